use axum::{extract::{Path, Query, State}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{CheckAvailabilityRequest, DateRangeQuery};
use crate::api::dtos::responses::CalendarResponse;
use crate::domain::services::availability::{check_range_span, resolve_end_date, AvailabilityRequest};
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use tracing::debug;

pub async fn check_availability(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CheckAvailabilityRequest>,
) -> Result<impl IntoResponse, AppError> {
    let service = state.service_repo.find_by_id(&payload.service_id).await?
        .ok_or(AppError::NotFound("Service not found".into()))?;

    let end_date = resolve_end_date(&service.kind(), payload.start_date, payload.end_date)?;
    check_range_span(payload.start_date, end_date, state.config.calendar_max_days)?;
    let request = AvailabilityRequest {
        service_id: service.id.clone(),
        category: payload.service_category.unwrap_or(service.category),
        start_date: payload.start_date,
        end_date,
        time_slot: payload.time_slot,
        units: payload.units.unwrap_or(1),
    };

    let result = state.availability.check(&service, &request).await?;
    debug!(service_id = %service.id, is_available = result.is_available, "Availability checked");

    Ok(Json(result))
}

pub async fn get_calendar(
    State(state): State<Arc<AppState>>,
    Path(service_id): Path<String>,
    Query(query): Query<DateRangeQuery>,
) -> Result<impl IntoResponse, AppError> {
    if query.end < query.start {
        return Err(AppError::InvalidRange("end must not be before start".into()));
    }
    let span_days = (query.end - query.start).num_days() + 1;
    if span_days > state.config.calendar_max_days {
        return Err(AppError::InvalidRange(format!(
            "Calendar window is limited to {} days", state.config.calendar_max_days
        )));
    }

    let service = state.service_repo.find_by_id(&service_id).await?
        .ok_or(AppError::NotFound("Service not found".into()))?;

    let as_of = Utc::now();
    let days = state.availability.calendar(&service, query.start, query.end).await?;

    Ok(Json(CalendarResponse { service_id: service.id, as_of, days }))
}
