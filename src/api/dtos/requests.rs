use crate::domain::models::booking::BookingStatus;
use crate::domain::models::service::ServiceCategory;
use crate::domain::models::unavailable_block::BlockType;
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct CreateServiceRequest {
    pub category: ServiceCategory,
    pub name: String,
    pub owner_id: String,
    pub total_inventory: Option<i32>,
    pub tour_slots: Option<Vec<String>>,
    pub min_stay: Option<i32>,
    pub max_stay: Option<i32>,
    pub base_price: Option<f64>,
    pub timezone: Option<String>,
}

#[derive(Deserialize)]
pub struct ListServicesQuery {
    pub owner_id: String,
}

#[derive(Deserialize)]
pub struct CheckAvailabilityRequest {
    pub service_id: String,
    pub service_category: Option<ServiceCategory>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub time_slot: Option<String>,
    pub units: Option<i32>,
}

#[derive(Deserialize)]
pub struct DateRangeQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub time_slot: Option<String>,
    pub units: Option<i32>,
    pub customer_name: String,
    pub customer_email: String,
}

#[derive(Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatus,
}

#[derive(Deserialize)]
pub struct CreateBlockRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: Option<String>,
    #[serde(rename = "type")]
    pub block_type: Option<BlockType>,
    pub owner_id: Option<String>,
}

#[derive(Deserialize)]
pub struct UpsertInventoryRequest {
    pub available: i32,
    pub blocked: Option<i32>,
    pub note: Option<String>,
}

/// Applies the same counts to every night of `[start_date, end_date)`.
#[derive(Deserialize)]
pub struct BulkInventoryRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub available: i32,
    pub blocked: Option<i32>,
    pub note: Option<String>,
}
