use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;
use crate::domain::models::calendar::BOOKED_REASON;
use crate::domain::models::service::{ServiceCategory, UnknownVariant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Booked,
    Blocked,
}

impl BlockType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Booked => "booked",
            BlockType::Blocked => "blocked",
        }
    }
}

impl FromStr for BlockType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "booked" => Ok(BlockType::Booked),
            "blocked" => Ok(BlockType::Blocked),
            other => Err(UnknownVariant { kind: "block type", value: other.to_string() }),
        }
    }
}

impl TryFrom<String> for BlockType {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Owner-imposed hold over `[start_date, end_date)`, independent of bookings.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct UnavailableDateBlock {
    pub id: String,
    pub service_id: String,
    #[sqlx(try_from = "String")]
    pub service_category: ServiceCategory,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    #[serde(rename = "type")]
    #[sqlx(try_from = "String")]
    pub block_type: BlockType,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
}

impl UnavailableDateBlock {
    pub fn new(
        service_id: String,
        service_category: ServiceCategory,
        start_date: NaiveDate,
        end_date: NaiveDate,
        reason: String,
        block_type: BlockType,
        owner_id: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            service_id,
            service_category,
            start_date,
            end_date,
            reason,
            block_type,
            owner_id,
            created_at: Utc::now(),
        }
    }

    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date < end && self.end_date > start
    }

    pub fn covers(&self, day: NaiveDate) -> bool {
        self.start_date <= day && day < self.end_date
    }

    /// Reason shown on the calendar. `booked` holds always read as booked.
    pub fn display_reason(&self) -> String {
        match self.block_type {
            BlockType::Booked => BOOKED_REASON.to_string(),
            BlockType::Blocked if self.reason.trim().is_empty() => BlockType::Blocked.as_str().to_string(),
            BlockType::Blocked => self.reason.clone(),
        }
    }
}
