//! Two-click check-in / check-out selection over a cached per-day availability map.
//!
//! Every rejected click leaves the selection exactly as it was. The map is only
//! an optimistic pre-filter; the authoritative decision is taken again when the
//! booking is submitted.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use thiserror::Error;
use tracing::debug;
use crate::domain::models::calendar::{AvailabilityMap, BOOKED_REASON};
use crate::domain::models::service::Service;

/// Occupancy above which an available day is flagged as limited.
pub const LIMITED_AVAILABILITY_PERCENT: u8 = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Empty,
    CheckInChosen { check_in: NaiveDate },
    RangeChosen { check_in: NaiveDate, check_out: NaiveDate },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionRejected {
    #[error("Cannot select past dates")]
    PastDate,
    #[error("{reason}")]
    Unavailable { reason: String },
    #[error("Check-out must be after check-in")]
    CheckOutBeforeCheckIn,
    #[error("{count} date(s) in range are unavailable")]
    RangeContainsUnavailable { count: usize },
    #[error("Minimum {min} nights required")]
    BelowMinimumStay { min: u32 },
    #[error("Maximum {max} nights allowed")]
    AboveMaximumStay { max: u32 },
    #[error("Select check-in and check-out dates first")]
    NoRangeChosen,
    #[error("Availability may have changed, please refresh the calendar")]
    StaleAvailability,
}

/// How the calendar renders a single day. Variants are listed in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayStatus {
    Past,
    Blocked,
    Booked,
    SelectedCheckIn,
    SelectedCheckOut,
    InRange,
    HoverRange,
    LimitedAvailability,
    Available,
}

#[derive(Debug, Clone)]
pub struct SelectorConfig {
    pub min_stay: u32,
    pub max_stay: Option<u32>,
    pub max_map_age: Duration,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self { min_stay: 1, max_stay: None, max_map_age: Duration::minutes(5) }
    }
}

impl SelectorConfig {
    pub fn for_service(service: &Service) -> Self {
        Self {
            min_stay: service.min_stay.max(1) as u32,
            max_stay: service.max_stay.map(|max| max.max(1) as u32),
            ..Self::default()
        }
    }
}

type OnSelect = Box<dyn FnMut(NaiveDate, NaiveDate) + Send>;

pub struct DateRangeSelector {
    state: SelectionState,
    hover_date: Option<NaiveDate>,
    map: AvailabilityMap,
    config: SelectorConfig,
    on_select: Option<OnSelect>,
}

impl DateRangeSelector {
    pub fn new(map: AvailabilityMap, mut config: SelectorConfig) -> Self {
        config.min_stay = config.min_stay.max(1);
        Self {
            state: SelectionState::Empty,
            hover_date: None,
            map,
            config,
            on_select: None,
        }
    }

    /// Called with `(check_in, check_out)` each time a range is completed.
    pub fn on_select(mut self, callback: impl FnMut(NaiveDate, NaiveDate) + Send + 'static) -> Self {
        self.on_select = Some(Box::new(callback));
        self
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn check_in(&self) -> Option<NaiveDate> {
        match self.state {
            SelectionState::Empty => None,
            SelectionState::CheckInChosen { check_in } | SelectionState::RangeChosen { check_in, .. } => Some(check_in),
        }
    }

    pub fn check_out(&self) -> Option<NaiveDate> {
        match self.state {
            SelectionState::RangeChosen { check_out, .. } => Some(check_out),
            _ => None,
        }
    }

    pub fn hover_date(&self) -> Option<NaiveDate> {
        self.hover_date
    }

    pub fn map(&self) -> &AvailabilityMap {
        &self.map
    }

    pub fn click(&mut self, date: NaiveDate, today: NaiveDate) -> Result<SelectionState, SelectionRejected> {
        let outcome = self.transition(date, today);
        if let Err(ref rejection) = outcome {
            debug!(%date, %rejection, "date selection rejected");
        }
        outcome
    }

    fn transition(&mut self, date: NaiveDate, today: NaiveDate) -> Result<SelectionState, SelectionRejected> {
        if date < today {
            return Err(SelectionRejected::PastDate);
        }
        if !self.map.is_available(date) {
            let reason = self.map.get(date)
                .and_then(|day| day.block_reason.clone())
                .unwrap_or_else(|| "This date is not available".to_string());
            return Err(SelectionRejected::Unavailable { reason });
        }

        let next = match self.state {
            SelectionState::Empty | SelectionState::RangeChosen { .. } => {
                SelectionState::CheckInChosen { check_in: date }
            }
            SelectionState::CheckInChosen { check_in } => {
                if date < check_in {
                    return Err(SelectionRejected::CheckOutBeforeCheckIn);
                }

                let count = self.map.count_unavailable(check_in, date);
                if count > 0 {
                    return Err(SelectionRejected::RangeContainsUnavailable { count });
                }

                let nights = (date - check_in).num_days() as u32;
                if nights < self.config.min_stay {
                    return Err(SelectionRejected::BelowMinimumStay { min: self.config.min_stay });
                }
                if let Some(max) = self.config.max_stay
                    && nights > max {
                    return Err(SelectionRejected::AboveMaximumStay { max });
                }

                SelectionState::RangeChosen { check_in, check_out: date }
            }
        };

        self.state = next;
        if let SelectionState::RangeChosen { check_in, check_out } = next
            && let Some(callback) = self.on_select.as_mut() {
            callback(check_in, check_out);
        }
        Ok(next)
    }

    pub fn clear(&mut self) {
        self.state = SelectionState::Empty;
        self.hover_date = None;
    }

    pub fn hover(&mut self, date: NaiveDate) {
        self.hover_date = Some(date);
    }

    pub fn clear_hover(&mut self) {
        self.hover_date = None;
    }

    pub fn classify(&self, date: NaiveDate, today: NaiveDate) -> DayStatus {
        if date < today {
            return DayStatus::Past;
        }

        let day = self.map.get(date);
        if !self.map.is_available(date) {
            let booked = day
                .and_then(|d| d.block_reason.as_deref())
                .is_some_and(|reason| reason.eq_ignore_ascii_case(BOOKED_REASON));
            return if booked { DayStatus::Booked } else { DayStatus::Blocked };
        }

        match self.state {
            SelectionState::CheckInChosen { check_in } | SelectionState::RangeChosen { check_in, .. }
                if date == check_in => DayStatus::SelectedCheckIn,
            SelectionState::RangeChosen { check_out, .. } if date == check_out => DayStatus::SelectedCheckOut,
            SelectionState::RangeChosen { check_in, check_out } if check_in < date && date < check_out => DayStatus::InRange,
            SelectionState::CheckInChosen { check_in }
                if self.hover_date.is_some_and(|hover| check_in < date && date < hover) => DayStatus::HoverRange,
            _ => {
                let limited = day
                    .and_then(|d| d.occupancy_percent)
                    .is_some_and(|pct| pct > LIMITED_AVAILABILITY_PERCENT);
                if limited { DayStatus::LimitedAvailability } else { DayStatus::Available }
            }
        }
    }

    /// Swaps in a freshly fetched map. Responses older than the current map are
    /// ignored so an out-of-order fetch cannot roll availability back.
    pub fn refresh(&mut self, map: AvailabilityMap) -> bool {
        if map.as_of() < self.map.as_of() {
            return false;
        }
        self.map = map;
        true
    }

    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        now - self.map.as_of() > self.config.max_map_age
    }

    /// The chosen range, provided the map it was chosen against is still fresh
    /// and still shows every night as available.
    pub fn submission(&self, now: DateTime<Utc>) -> Result<(NaiveDate, NaiveDate), SelectionRejected> {
        let SelectionState::RangeChosen { check_in, check_out } = self.state else {
            return Err(SelectionRejected::NoRangeChosen);
        };
        if self.is_stale(now) {
            return Err(SelectionRejected::StaleAvailability);
        }
        let count = self.map.count_unavailable(check_in, check_out);
        if count > 0 {
            return Err(SelectionRejected::RangeContainsUnavailable { count });
        }
        Ok((check_in, check_out))
    }
}
