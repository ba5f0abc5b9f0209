use axum::{extract::{Path, Query, State}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{BulkInventoryRequest, DateRangeQuery, UpsertInventoryRequest};
use crate::api::dtos::responses::BulkInventoryResponse;
use crate::domain::models::inventory::DailyInventoryRecord;
use crate::domain::models::service::{Service, ServiceCategory};
use crate::domain::services::availability::next_day;
use crate::error::AppError;
use std::sync::Arc;
use chrono::NaiveDate;
use tracing::info;

async fn load_room_type(state: &AppState, room_type_id: &str) -> Result<Service, AppError> {
    let service = state.service_repo.find_by_id(room_type_id).await?
        .ok_or(AppError::NotFound("Room type not found".into()))?;
    if service.category != ServiceCategory::Property {
        return Err(AppError::Validation("Daily inventory only applies to properties".into()));
    }
    Ok(service)
}

fn validate_counts(service: &Service, available: i32, blocked: i32) -> Result<(), AppError> {
    if available < 0 || available > service.total_inventory {
        return Err(AppError::Validation(format!(
            "available must be between 0 and {}", service.total_inventory
        )));
    }
    if blocked < 0 {
        return Err(AppError::Validation("blocked must not be negative".into()));
    }
    Ok(())
}

pub async fn list_inventory(
    State(state): State<Arc<AppState>>,
    Path(room_type_id): Path<String>,
    Query(query): Query<DateRangeQuery>,
) -> Result<impl IntoResponse, AppError> {
    if query.end < query.start {
        return Err(AppError::InvalidRange("end must not be before start".into()));
    }
    let records = state.inventory_repo.list_by_range(&room_type_id, query.start, next_day(query.end)?).await?;
    Ok(Json(records))
}

pub async fn upsert_inventory(
    State(state): State<Arc<AppState>>,
    Path((room_type_id, date)): Path<(String, NaiveDate)>,
    Json(payload): Json<UpsertInventoryRequest>,
) -> Result<impl IntoResponse, AppError> {
    let service = load_room_type(&state, &room_type_id).await?;
    let blocked = payload.blocked.unwrap_or(0);
    validate_counts(&service, payload.available, blocked)?;

    let record = DailyInventoryRecord::new(service.id, date, payload.available, blocked, payload.note);
    let saved = state.inventory_repo.upsert(&record).await?;
    info!(room_type_id = %saved.room_type_id, date = %saved.date, available = saved.available, "Inventory updated");

    Ok(Json(saved))
}

pub async fn bulk_upsert_inventory(
    State(state): State<Arc<AppState>>,
    Path(room_type_id): Path<String>,
    Json(payload): Json<BulkInventoryRequest>,
) -> Result<impl IntoResponse, AppError> {
    let service = load_room_type(&state, &room_type_id).await?;
    if payload.start_date >= payload.end_date {
        return Err(AppError::InvalidRange("Start date must be before end date".into()));
    }
    if (payload.end_date - payload.start_date).num_days() > state.config.calendar_max_days {
        return Err(AppError::InvalidRange(format!(
            "Bulk updates are limited to {} days", state.config.calendar_max_days
        )));
    }
    let blocked = payload.blocked.unwrap_or(0);
    validate_counts(&service, payload.available, blocked)?;

    let records: Vec<DailyInventoryRecord> = payload.start_date.iter_days()
        .take_while(|day| *day < payload.end_date)
        .map(|day| DailyInventoryRecord::new(service.id.clone(), day, payload.available, blocked, payload.note.clone()))
        .collect();

    let updated = state.inventory_repo.upsert_range(&records).await?;
    info!(room_type_id = %service.id, updated, "Inventory range updated {}..{}", payload.start_date, payload.end_date);

    Ok(Json(BulkInventoryResponse { room_type_id: service.id, updated }))
}
