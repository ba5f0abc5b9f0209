use serde::{Deserialize, Serialize};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::collections::HashMap;

/// Block reason used for days that are taken by bookings rather than held by the owner.
pub const BOOKED_REASON: &str = "booked";

/// Read-only projection of one calendar day for one service.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CalendarDateAvailability {
    pub date: NaiveDate,
    pub is_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupancy_percent: Option<u8>,
}

impl CalendarDateAvailability {
    pub fn available(date: NaiveDate) -> Self {
        Self { date, is_available: true, block_reason: None, price: None, occupancy_percent: None }
    }

    pub fn unavailable(date: NaiveDate, reason: impl Into<String>) -> Self {
        Self { date, is_available: false, block_reason: Some(reason.into()), price: None, occupancy_percent: None }
    }
}

/// Per-day availability keyed by date, stamped with the time it was computed.
/// `as_of` acts as the map version when a newer calendar arrives.
#[derive(Debug, Clone)]
pub struct AvailabilityMap {
    days: HashMap<NaiveDate, CalendarDateAvailability>,
    as_of: DateTime<Utc>,
}

impl AvailabilityMap {
    pub fn new(days: impl IntoIterator<Item = CalendarDateAvailability>, as_of: DateTime<Utc>) -> Self {
        Self {
            days: days.into_iter().map(|d| (d.date, d)).collect(),
            as_of,
        }
    }

    pub fn empty(as_of: DateTime<Utc>) -> Self {
        Self { days: HashMap::new(), as_of }
    }

    pub fn as_of(&self) -> DateTime<Utc> {
        self.as_of
    }

    pub fn get(&self, date: NaiveDate) -> Option<&CalendarDateAvailability> {
        self.days.get(&date)
    }

    /// Days without a record are treated as unavailable.
    pub fn is_available(&self, date: NaiveDate) -> bool {
        self.days.get(&date).is_some_and(|d| d.is_available)
    }

    /// Number of unavailable days in `[start, end)`.
    pub fn count_unavailable(&self, start: NaiveDate, end: NaiveDate) -> usize {
        let mut count = 0;
        let mut day = start;
        while day < end {
            if !self.is_available(day) {
                count += 1;
            }
            day += Duration::days(1);
        }
        count
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_missing_days_count_as_unavailable() {
        let map = AvailabilityMap::new(
            vec![
                CalendarDateAvailability::available(d("2025-12-01")),
                CalendarDateAvailability::unavailable(d("2025-12-02"), "maintenance"),
            ],
            Utc::now(),
        );

        assert!(map.is_available(d("2025-12-01")));
        assert!(!map.is_available(d("2025-12-02")));
        assert!(!map.is_available(d("2025-12-03")));
        assert_eq!(map.count_unavailable(d("2025-12-01"), d("2025-12-04")), 2);
        assert_eq!(map.count_unavailable(d("2025-12-01"), d("2025-12-01")), 0);
    }

    #[test]
    fn test_wire_format_omits_empty_fields() {
        let json = serde_json::to_value(CalendarDateAvailability::available(d("2025-12-01"))).unwrap();
        assert_eq!(json, serde_json::json!({"date": "2025-12-01", "is_available": true}));

        let parsed: CalendarDateAvailability = serde_json::from_str(
            r#"{"date":"2025-12-02","is_available":false,"block_reason":"booked","occupancy_percent":100}"#
        ).unwrap();
        assert_eq!(parsed.block_reason.as_deref(), Some(BOOKED_REASON));
        assert_eq!(parsed.occupancy_percent, Some(100));
        assert!(parsed.price.is_none());
    }
}
