use crate::domain::models::calendar::CalendarDateAvailability;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize)]
pub struct CalendarResponse {
    pub service_id: String,
    pub as_of: DateTime<Utc>,
    pub days: Vec<CalendarDateAvailability>,
}

#[derive(Serialize)]
pub struct BulkInventoryResponse {
    pub room_type_id: String,
    pub updated: u64,
}
