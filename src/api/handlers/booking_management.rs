use axum::{extract::{Path, State}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::domain::models::booking::BookingStatus;
use crate::error::AppError;
use std::sync::Arc;
use serde_json::json;
use tracing::info;

pub async fn get_booking_by_reference(
    State(state): State<Arc<AppState>>,
    Path(reference): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_repo.find_by_reference(&reference).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    let service = state.service_repo.find_by_id(&booking.service_id).await?
        .ok_or(AppError::Internal)?;

    Ok(Json(json!({
        "booking": booking,
        "service": service
    })))
}

pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Path(reference): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_repo.find_by_reference(&reference).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    if booking.status == BookingStatus::Cancelled {
        return Ok(Json(booking));
    }
    if !booking.status.can_transition_to(BookingStatus::Cancelled) {
        return Err(AppError::Conflict(format!("A {} booking cannot be cancelled", booking.status)));
    }

    let cancelled = state.booking_repo.update_status(&booking.id, BookingStatus::Cancelled).await?;
    info!("Booking cancelled via reference: {}", booking.id);

    Ok(Json(cancelled))
}
