use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{CreateBookingRequest, UpdateBookingStatusRequest};
use crate::domain::models::booking::{NewBookingParams, ServiceBookingWindow};
use crate::domain::ports::BookingOutcome;
use crate::domain::services::availability::{check_range_span, check_stay_length, resolve_end_date, AvailabilityRequest};
use crate::error::AppError;
use std::sync::Arc;
use tracing::{info, warn};

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Path(service_id): Path<String>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    info!("create_booking: Starting for service {}", service_id);

    let service = state.service_repo.find_by_id(&service_id).await?
        .ok_or(AppError::NotFound("Service not found".into()))?;

    if payload.customer_name.trim().is_empty() {
        return Err(AppError::Validation("customer_name is required".into()));
    }
    if !payload.customer_email.contains('@') {
        return Err(AppError::Validation("Invalid customer_email".into()));
    }

    let kind = service.kind();
    let end_date = resolve_end_date(&kind, payload.start_date, payload.end_date)?;
    check_range_span(payload.start_date, end_date, state.config.calendar_max_days)?;

    if payload.start_date < service.today() {
        return Err(AppError::Validation("Cannot book in the past".into()));
    }
    if payload.start_date < end_date {
        check_stay_length(&service, payload.start_date, end_date)?;
    }

    let window = ServiceBookingWindow::new(NewBookingParams {
        service_id: service.id.clone(),
        service_category: service.category,
        start_date: payload.start_date,
        end_date,
        time_slot: payload.time_slot,
        units: payload.units.unwrap_or(1),
        name: payload.customer_name,
        email: payload.customer_email,
    });

    // Optimistic pass answers the common case without taking the write lock.
    let precheck = state.availability.check(&service, &AvailabilityRequest::for_window(&window)).await?;
    if !precheck.is_available {
        info!("create_booking: Requested range unavailable for service {}", service.id);
        return Err(AppError::Unavailable(precheck));
    }

    match state.booking_repo.create_checked(&service, &window).await? {
        BookingOutcome::Created(created) => {
            info!(booking_id = %created.id, reference = %created.reference, "Booking window created");
            Ok((StatusCode::CREATED, Json(created)))
        }
        BookingOutcome::Rejected(result) => {
            warn!("create_booking: Lost race for service {} {}..{}", service.id, window.start_date, window.end_date);
            Err(AppError::RaceLost(result))
        }
    }
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Path(service_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.service_repo.find_by_id(&service_id).await?
        .ok_or(AppError::NotFound("Service not found".into()))?;
    let bookings = state.booking_repo.list_by_service(&service_id).await?;
    Ok(Json(bookings))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_repo.find_by_id(&booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;
    Ok(Json(booking))
}

pub async fn update_booking_status(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
    Json(payload): Json<UpdateBookingStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_repo.find_by_id(&booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    if booking.status == payload.status {
        return Ok(Json(booking));
    }
    if !booking.status.can_transition_to(payload.status) {
        return Err(AppError::Conflict(format!(
            "Cannot change booking from {} to {}", booking.status, payload.status
        )));
    }

    let updated = state.booking_repo.update_status(&booking.id, payload.status).await?;
    info!(booking_id = %updated.id, from = %booking.status, to = %updated.status, "Booking status changed");
    Ok(Json(updated))
}
