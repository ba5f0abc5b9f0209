use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use crate::domain::models::booking::ServiceBookingWindow;
use crate::domain::models::calendar::CalendarDateAvailability;
use crate::domain::models::inventory::DailyInventoryRecord;
use crate::domain::models::service::{Service, ServiceCategory, ServiceKind};
use crate::domain::models::unavailable_block::UnavailableDateBlock;
use crate::domain::ports::{BookingWindowRepository, InventoryRepository, UnavailableBlockRepository};
use crate::domain::services::calendar::build_calendar;
use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct AvailabilityRequest {
    pub service_id: String,
    pub category: ServiceCategory,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub time_slot: Option<String>,
    pub units: i32,
}

impl AvailabilityRequest {
    pub fn for_window(window: &ServiceBookingWindow) -> Self {
        Self {
            service_id: window.service_id.clone(),
            category: window.service_category,
            start_date: window.start_date,
            end_date: window.end_date,
            time_slot: window.time_slot.clone(),
            units: window.units,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AvailabilityResult {
    pub is_available: bool,
    pub conflicting_bookings: Vec<ServiceBookingWindow>,
    pub unavailable_dates: Vec<UnavailableDateBlock>,
    /// Nights on which a property has fewer rooms left than requested.
    pub sold_out_dates: Vec<NaiveDate>,
}

/// The calendar day after `date`, or `InvalidRange` at the end of the representable calendar.
pub fn next_day(date: NaiveDate) -> Result<NaiveDate, AppError> {
    date.succ_opt().ok_or_else(|| AppError::InvalidRange(format!("{} is out of range", date)))
}

/// Rejects ranges spanning more than `max_days` days.
pub fn check_range_span(start: NaiveDate, end: NaiveDate, max_days: i64) -> Result<(), AppError> {
    if (end - start).num_days() > max_days {
        return Err(AppError::InvalidRange(format!("Ranges are limited to {} days", max_days)));
    }
    Ok(())
}

/// Validates the request against the service kind and returns the half-open
/// interval it occupies. A tour occupies its single tour date.
pub fn requested_interval(kind: &ServiceKind, request: &AvailabilityRequest) -> Result<(NaiveDate, NaiveDate), AppError> {
    if request.category != kind.category() {
        return Err(AppError::InvalidRange(format!(
            "Service {} is a {}, not a {}", request.service_id, kind.category(), request.category
        )));
    }
    if request.units < 1 {
        return Err(AppError::InvalidRange("At least one unit must be requested".into()));
    }
    if request.units > 1 && !matches!(kind, ServiceKind::Property { .. }) {
        return Err(AppError::InvalidRange("Only properties can book more than one unit".into()));
    }
    if request.time_slot.is_some() && !matches!(kind, ServiceKind::Tour { .. }) {
        return Err(AppError::InvalidRange("Time slots only apply to tours".into()));
    }

    match kind {
        ServiceKind::Tour { slots } => {
            let after = next_day(request.start_date)?;
            if request.end_date != request.start_date && request.end_date != after {
                return Err(AppError::InvalidRange("A tour booking covers a single tour date".into()));
            }
            match request.time_slot.as_deref() {
                None if !slots.is_empty() => return Err(AppError::InvalidRange("Time slot is required for this tour".into())),
                Some(slot) if !slots.iter().any(|s| s == slot) => {
                    return Err(AppError::InvalidRange(format!("Unknown time slot {}", slot)));
                }
                _ => {}
            }
            Ok((request.start_date, after))
        }
        ServiceKind::Property { .. } | ServiceKind::Vehicle => {
            if request.start_date >= request.end_date {
                return Err(AppError::InvalidRange("Start date must be before end date".into()));
            }
            Ok((request.start_date, request.end_date))
        }
    }
}

/// Stored end date for a submission. Tours always end the day after their
/// tour date; everything else must name its exclusive end.
pub fn resolve_end_date(kind: &ServiceKind, start: NaiveDate, end: Option<NaiveDate>) -> Result<NaiveDate, AppError> {
    match (kind, end) {
        (ServiceKind::Tour { .. }, None) => next_day(start),
        (ServiceKind::Tour { .. }, Some(end)) => {
            let after = next_day(start)?;
            if end == start || end == after {
                Ok(after)
            } else {
                Err(AppError::InvalidRange("A tour booking covers a single tour date".into()))
            }
        }
        (_, Some(end)) => Ok(end),
        (_, None) => Err(AppError::Validation("end_date is required".into())),
    }
}

/// Minimum and maximum stay in nights. Tours have no stay length.
pub fn check_stay_length(service: &Service, start: NaiveDate, end: NaiveDate) -> Result<(), AppError> {
    if service.category == ServiceCategory::Tour {
        return Ok(());
    }
    let nights = (end - start).num_days();
    if nights < i64::from(service.min_stay) {
        return Err(AppError::Validation(format!("Minimum {} nights required", service.min_stay)));
    }
    if let Some(max) = service.max_stay && nights > i64::from(max) {
        return Err(AppError::Validation(format!("Maximum {} nights allowed", max)));
    }
    Ok(())
}

/// Decides whether `request` is bookable given everything already recorded
/// against the service. Unavailability is an ordinary result; only malformed
/// requests are errors.
pub fn check_availability(
    kind: &ServiceKind,
    request: &AvailabilityRequest,
    bookings: &[ServiceBookingWindow],
    blocks: &[UnavailableDateBlock],
    inventory: &[DailyInventoryRecord],
) -> Result<AvailabilityResult, AppError> {
    let (start, end) = requested_interval(kind, request)?;

    let active: Vec<&ServiceBookingWindow> = bookings.iter()
        .filter(|b| b.service_id == request.service_id && b.status.is_active())
        .collect();

    let mut result = AvailabilityResult::default();

    match kind {
        ServiceKind::Vehicle => {
            result.conflicting_bookings = active.iter()
                .filter(|b| b.overlaps(start, end))
                .map(|b| (*b).clone())
                .collect();
        }
        ServiceKind::Tour { slots } => {
            result.conflicting_bookings = active.iter()
                .filter(|b| b.start_date == start)
                .filter(|b| slots.is_empty() || b.time_slot == request.time_slot)
                .map(|b| (*b).clone())
                .collect();
        }
        ServiceKind::Property { total_inventory } => {
            let capacity_by_date: HashMap<NaiveDate, i32> = inventory.iter()
                .filter(|r| r.room_type_id == request.service_id)
                .map(|r| (r.date, r.available))
                .collect();

            let overlapping: Vec<&ServiceBookingWindow> = active.into_iter()
                .filter(|b| b.overlaps(start, end))
                .collect();

            let mut conflicting: Vec<&ServiceBookingWindow> = Vec::new();
            let mut day = start;
            while day < end {
                let capacity = capacity_by_date.get(&day).copied().unwrap_or(*total_inventory);
                let occupying: Vec<&ServiceBookingWindow> = overlapping.iter()
                    .copied()
                    .filter(|b| b.occupies(day))
                    .collect();
                let committed: i32 = occupying.iter().map(|b| b.units).sum();

                if capacity - committed < request.units {
                    debug!(%day, capacity, committed, "room type sold out");
                    result.sold_out_dates.push(day);
                    for booking in occupying {
                        if !conflicting.iter().any(|c| c.id == booking.id) {
                            conflicting.push(booking);
                        }
                    }
                }
                day += Duration::days(1);
            }
            result.conflicting_bookings = conflicting.into_iter().cloned().collect();
        }
    }

    result.unavailable_dates = blocks.iter()
        .filter(|b| b.service_id == request.service_id && b.overlaps(start, end))
        .cloned()
        .collect();

    result.is_available = result.conflicting_bookings.is_empty()
        && result.unavailable_dates.is_empty()
        && result.sold_out_dates.is_empty();

    Ok(result)
}

/// Loads what a service has on record for a range and runs the pure checks.
pub struct AvailabilityChecker {
    booking_repo: Arc<dyn BookingWindowRepository>,
    block_repo: Arc<dyn UnavailableBlockRepository>,
    inventory_repo: Arc<dyn InventoryRepository>,
}

impl AvailabilityChecker {
    pub fn new(
        booking_repo: Arc<dyn BookingWindowRepository>,
        block_repo: Arc<dyn UnavailableBlockRepository>,
        inventory_repo: Arc<dyn InventoryRepository>,
    ) -> Self {
        Self { booking_repo, block_repo, inventory_repo }
    }

    pub async fn check(&self, service: &Service, request: &AvailabilityRequest) -> Result<AvailabilityResult, AppError> {
        let kind = service.kind();
        let (start, end) = requested_interval(&kind, request)?;

        let bookings = self.booking_repo.list_overlapping(&service.id, start, end).await?;
        let blocks = self.block_repo.list_overlapping(&service.id, start, end).await?;
        let inventory = match kind {
            ServiceKind::Property { .. } => self.inventory_repo.list_by_range(&service.id, start, end).await?,
            _ => Vec::new(),
        };

        check_availability(&kind, request, &bookings, &blocks, &inventory)
    }

    /// Per-day view of `[start, end]`, both ends inclusive.
    pub async fn calendar(&self, service: &Service, start: NaiveDate, end: NaiveDate) -> Result<Vec<CalendarDateAvailability>, AppError> {
        let after_end = next_day(end)?;

        let bookings = self.booking_repo.list_overlapping(&service.id, start, after_end).await?;
        let blocks = self.block_repo.list_overlapping(&service.id, start, after_end).await?;
        let inventory = match service.category {
            ServiceCategory::Property => self.inventory_repo.list_by_range(&service.id, start, after_end).await?,
            _ => Vec::new(),
        };

        Ok(build_calendar(service, start, end, &bookings, &blocks, &inventory))
    }
}
