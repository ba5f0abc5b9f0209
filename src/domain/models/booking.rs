use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use rand::{distributions::Alphanumeric, Rng};
use std::fmt;
use std::str::FromStr;
use crate::domain::models::service::{ServiceCategory, UnknownVariant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }

    /// Only pending and confirmed windows hold on to their dates.
    pub fn is_active(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }

    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        matches!(
            (self, next),
            (BookingStatus::Pending, BookingStatus::Confirmed)
                | (BookingStatus::Pending, BookingStatus::Cancelled)
                | (BookingStatus::Confirmed, BookingStatus::Cancelled)
                | (BookingStatus::Confirmed, BookingStatus::Completed)
        )
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            "completed" => Ok(BookingStatus::Completed),
            other => Err(UnknownVariant { kind: "booking status", value: other.to_string() }),
        }
    }
}

impl TryFrom<String> for BookingStatus {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A requested or committed reservation of one service over `[start_date, end_date)`.
///
/// A stay from the 1st to the 3rd occupies the nights of the 1st and 2nd.
/// Tour windows always span exactly their tour date and are told apart by `time_slot`.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct ServiceBookingWindow {
    pub id: String,
    pub service_id: String,
    #[sqlx(try_from = "String")]
    pub service_category: ServiceCategory,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub time_slot: Option<String>,
    pub units: i32,
    #[sqlx(try_from = "String")]
    pub status: BookingStatus,
    pub customer_name: String,
    pub customer_email: String,
    pub reference: String,
    pub created_at: DateTime<Utc>,
}

pub struct NewBookingParams {
    pub service_id: String,
    pub service_category: ServiceCategory,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub time_slot: Option<String>,
    pub units: i32,
    pub name: String,
    pub email: String,
}

impl ServiceBookingWindow {
    pub fn new(params: NewBookingParams) -> Self {
        let reference: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(24)
            .map(char::from)
            .collect();

        Self {
            id: Uuid::new_v4().to_string(),
            service_id: params.service_id,
            service_category: params.service_category,
            start_date: params.start_date,
            end_date: params.end_date,
            time_slot: params.time_slot,
            units: params.units,
            status: BookingStatus::Pending,
            customer_name: params.name,
            customer_email: params.email,
            reference,
            created_at: Utc::now(),
        }
    }

    /// Half-open overlap with `[start, end)`; touching ranges do not overlap.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date < end && self.end_date > start
    }

    /// Whether the window holds the night of `day`.
    pub fn occupies(&self, day: NaiveDate) -> bool {
        self.start_date <= day && day < self.end_date
    }
}
