use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Per-night capacity override for a room type. Without a record the room
/// type's configured total inventory applies.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct DailyInventoryRecord {
    pub id: String,
    pub room_type_id: String,
    pub date: NaiveDate,
    pub available: i32,
    pub blocked: i32,
    pub note: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl DailyInventoryRecord {
    pub fn new(room_type_id: String, date: NaiveDate, available: i32, blocked: i32, note: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            room_type_id,
            date,
            available,
            blocked,
            note,
            updated_at: Utc::now(),
        }
    }
}
