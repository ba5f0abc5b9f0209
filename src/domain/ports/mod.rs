use crate::domain::models::{
    service::Service,
    booking::{BookingStatus, ServiceBookingWindow},
    unavailable_block::UnavailableDateBlock,
    inventory::DailyInventoryRecord,
};
use crate::domain::services::availability::AvailabilityResult;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

/// What the authoritative check-then-insert produced.
#[derive(Debug)]
pub enum BookingOutcome {
    Created(ServiceBookingWindow),
    Rejected(AvailabilityResult),
}

#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn create(&self, service: &Service) -> Result<Service, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Service>, AppError>;
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Service>, AppError>;
}

#[async_trait]
pub trait BookingWindowRepository: Send + Sync {
    /// Re-runs the availability check while holding the service's
    /// serialization point and inserts the window only if it still fits.
    async fn create_checked(&self, service: &Service, window: &ServiceBookingWindow) -> Result<BookingOutcome, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<ServiceBookingWindow>, AppError>;
    async fn find_by_reference(&self, reference: &str) -> Result<Option<ServiceBookingWindow>, AppError>;
    async fn list_by_service(&self, service_id: &str) -> Result<Vec<ServiceBookingWindow>, AppError>;
    /// Pending and confirmed windows overlapping `[start, end)`.
    async fn list_overlapping(&self, service_id: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<ServiceBookingWindow>, AppError>;
    async fn update_status(&self, id: &str, status: BookingStatus) -> Result<ServiceBookingWindow, AppError>;
    async fn complete_elapsed(&self, today: NaiveDate) -> Result<u64, AppError>;
}

#[async_trait]
pub trait UnavailableBlockRepository: Send + Sync {
    async fn create(&self, block: &UnavailableDateBlock) -> Result<UnavailableDateBlock, AppError>;
    async fn list_by_service(&self, service_id: &str) -> Result<Vec<UnavailableDateBlock>, AppError>;
    async fn list_overlapping(&self, service_id: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<UnavailableDateBlock>, AppError>;
    async fn delete(&self, service_id: &str, id: &str) -> Result<(), AppError>;
    async fn delete_expired(&self, today: NaiveDate) -> Result<u64, AppError>;
}

#[async_trait]
pub trait InventoryRepository: Send + Sync {
    async fn upsert(&self, record: &DailyInventoryRecord) -> Result<DailyInventoryRecord, AppError>;
    async fn upsert_range(&self, records: &[DailyInventoryRecord]) -> Result<u64, AppError>;
    /// Records dated within `[start, end)`.
    async fn list_by_range(&self, room_type_id: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<DailyInventoryRecord>, AppError>;
}
