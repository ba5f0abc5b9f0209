use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::CreateBlockRequest;
use crate::domain::models::unavailable_block::{BlockType, UnavailableDateBlock};
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_block(
    State(state): State<Arc<AppState>>,
    Path(service_id): Path<String>,
    Json(payload): Json<CreateBlockRequest>,
) -> Result<impl IntoResponse, AppError> {
    let service = state.service_repo.find_by_id(&service_id).await?
        .ok_or(AppError::NotFound("Service not found".into()))?;

    if payload.start_date >= payload.end_date {
        return Err(AppError::InvalidRange("Start date must be before end date".into()));
    }

    let block = UnavailableDateBlock::new(
        service.id.clone(),
        service.category,
        payload.start_date,
        payload.end_date,
        payload.reason.unwrap_or_default(),
        payload.block_type.unwrap_or(BlockType::Blocked),
        payload.owner_id.unwrap_or_else(|| service.owner_id.clone()),
    );

    let created = state.block_repo.create(&block).await?;
    info!(block_id = %created.id, service_id = %service.id, "Dates blocked {}..{}", created.start_date, created.end_date);

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_blocks(
    State(state): State<Arc<AppState>>,
    Path(service_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let blocks = state.block_repo.list_by_service(&service_id).await?;
    Ok(Json(blocks))
}

pub async fn delete_block(
    State(state): State<Arc<AppState>>,
    Path((service_id, block_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    state.block_repo.delete(&service_id, &block_id).await?;
    info!(block_id = %block_id, service_id = %service_id, "Block removed");
    Ok(StatusCode::NO_CONTENT)
}
