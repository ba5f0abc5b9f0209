use axum::{extract::{Path, Query, State}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{CreateServiceRequest, ListServicesQuery};
use crate::domain::models::service::{NewServiceParams, Service, ServiceCategory};
use crate::error::AppError;
use std::collections::HashSet;
use std::sync::Arc;
use chrono::NaiveTime;
use chrono_tz::Tz;
use tracing::info;

pub async fn create_service(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateServiceRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".into()));
    }
    if payload.owner_id.trim().is_empty() {
        return Err(AppError::Validation("owner_id is required".into()));
    }

    let total_inventory = payload.total_inventory.unwrap_or(1);
    if total_inventory < 1 {
        return Err(AppError::Validation("total_inventory must be at least 1".into()));
    }

    let tour_slots = payload.tour_slots.unwrap_or_default();
    if !tour_slots.is_empty() && payload.category != ServiceCategory::Tour {
        return Err(AppError::Validation("Only tours have time slots".into()));
    }
    let mut seen = HashSet::new();
    for slot in &tour_slots {
        NaiveTime::parse_from_str(slot, "%H:%M")
            .map_err(|_| AppError::Validation(format!("Invalid time slot {} (HH:MM)", slot)))?;
        if !seen.insert(slot.as_str()) {
            return Err(AppError::Validation(format!("Duplicate time slot {}", slot)));
        }
    }

    let min_stay = payload.min_stay.unwrap_or(1);
    if min_stay < 1 {
        return Err(AppError::Validation("min_stay must be at least 1".into()));
    }
    if let Some(max) = payload.max_stay && max < min_stay {
        return Err(AppError::Validation("max_stay must not be below min_stay".into()));
    }

    let timezone = payload.timezone.unwrap_or_else(|| "UTC".to_string());
    timezone.parse::<Tz>().map_err(|_| AppError::Validation(format!("Unknown timezone {}", timezone)))?;

    let service = Service::new(NewServiceParams {
        category: payload.category,
        name: payload.name,
        owner_id: payload.owner_id,
        total_inventory,
        tour_slots,
        min_stay,
        max_stay: payload.max_stay,
        base_price: payload.base_price,
        timezone,
    });

    let created = state.service_repo.create(&service).await?;
    info!(service_id = %created.id, category = %created.category, "Service created");

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_service(
    State(state): State<Arc<AppState>>,
    Path(service_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let service = state.service_repo.find_by_id(&service_id).await?
        .ok_or(AppError::NotFound("Service not found".into()))?;
    Ok(Json(service))
}

pub async fn list_services(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListServicesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let services = state.service_repo.list_by_owner(&query.owner_id).await?;
    Ok(Json(services))
}
