use crate::domain::models::{
    booking::{BookingStatus, ServiceBookingWindow},
    inventory::DailyInventoryRecord,
    service::{Service, ServiceCategory},
    unavailable_block::UnavailableDateBlock,
};
use crate::domain::ports::{BookingOutcome, BookingWindowRepository};
use crate::domain::services::availability::{check_availability, AvailabilityRequest};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{SqliteConnection, SqlitePool};
use chrono::NaiveDate;
use tracing::debug;

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Runs inside a `BEGIN IMMEDIATE` transaction: the write lock is held from the first read,
/// so a concurrent submission for the same dates waits and then sees this row.
async fn check_and_insert(conn: &mut SqliteConnection, service: &Service, window: &ServiceBookingWindow) -> Result<BookingOutcome, AppError> {
    let bookings = sqlx::query_as::<_, ServiceBookingWindow>(
        "SELECT * FROM booking_windows WHERE service_id = ? AND start_date < ? AND end_date > ? AND status IN ('pending', 'confirmed')"
    ).bind(&service.id).bind(window.end_date).bind(window.start_date).fetch_all(&mut *conn).await.map_err(AppError::Database)?;

    let blocks = sqlx::query_as::<_, UnavailableDateBlock>(
        "SELECT * FROM unavailable_date_blocks WHERE service_id = ? AND start_date < ? AND end_date > ?"
    ).bind(&service.id).bind(window.end_date).bind(window.start_date).fetch_all(&mut *conn).await.map_err(AppError::Database)?;

    let inventory = if service.category == ServiceCategory::Property {
        sqlx::query_as::<_, DailyInventoryRecord>(
            "SELECT * FROM daily_inventory WHERE room_type_id = ? AND date >= ? AND date < ?"
        ).bind(&service.id).bind(window.start_date).bind(window.end_date).fetch_all(&mut *conn).await.map_err(AppError::Database)?
    } else {
        Vec::new()
    };

    let result = check_availability(&service.kind(), &AvailabilityRequest::for_window(window), &bookings, &blocks, &inventory)?;
    if !result.is_available {
        return Ok(BookingOutcome::Rejected(result));
    }

    let created = sqlx::query_as::<_, ServiceBookingWindow>(
        "INSERT INTO booking_windows (id, service_id, service_category, start_date, end_date, time_slot, units, status, customer_name, customer_email, reference, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
         RETURNING *"
    )
        .bind(&window.id).bind(&window.service_id).bind(window.service_category.as_str()).bind(window.start_date)
        .bind(window.end_date).bind(&window.time_slot).bind(window.units).bind(window.status.as_str())
        .bind(&window.customer_name).bind(&window.customer_email).bind(&window.reference).bind(window.created_at)
        .fetch_one(&mut *conn).await.map_err(AppError::Database)?;

    Ok(BookingOutcome::Created(created))
}

#[async_trait]
impl BookingWindowRepository for SqliteBookingRepo {
    async fn create_checked(&self, service: &Service, window: &ServiceBookingWindow) -> Result<BookingOutcome, AppError> {
        // Dropping `tx` before commit rolls back and releases the write lock.
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await.map_err(AppError::Database)?;

        let outcome = check_and_insert(&mut *tx, service, window).await?;
        match &outcome {
            BookingOutcome::Created(_) => tx.commit().await.map_err(AppError::Database)?,
            BookingOutcome::Rejected(_) => tx.rollback().await.map_err(AppError::Database)?,
        }
        debug!(service_id = %service.id, created = matches!(outcome, BookingOutcome::Created(_)), "booking window check finished");
        Ok(outcome)
    }
    async fn find_by_id(&self, id: &str) -> Result<Option<ServiceBookingWindow>, AppError> {
        sqlx::query_as::<_, ServiceBookingWindow>("SELECT * FROM booking_windows WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_reference(&self, reference: &str) -> Result<Option<ServiceBookingWindow>, AppError> {
        sqlx::query_as::<_, ServiceBookingWindow>("SELECT * FROM booking_windows WHERE reference = ?").bind(reference).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_by_service(&self, service_id: &str) -> Result<Vec<ServiceBookingWindow>, AppError> {
        sqlx::query_as::<_, ServiceBookingWindow>("SELECT * FROM booking_windows WHERE service_id = ? ORDER BY start_date ASC").bind(service_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_overlapping(&self, service_id: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<ServiceBookingWindow>, AppError> {
        sqlx::query_as::<_, ServiceBookingWindow>("SELECT * FROM booking_windows WHERE service_id = ? AND start_date < ? AND end_date > ? AND status IN ('pending', 'confirmed')").bind(service_id).bind(end).bind(start).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn update_status(&self, id: &str, status: BookingStatus) -> Result<ServiceBookingWindow, AppError> {
        sqlx::query_as::<_, ServiceBookingWindow>("UPDATE booking_windows SET status = ? WHERE id = ? RETURNING *")
            .bind(status.as_str()).bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Booking not found".into()))
    }
    async fn complete_elapsed(&self, today: NaiveDate) -> Result<u64, AppError> {
        let result = sqlx::query("UPDATE booking_windows SET status = 'completed' WHERE status = 'confirmed' AND end_date <= ?").bind(today).execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.rows_affected())
    }
}
