use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put, delete},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{health, service, availability, booking, booking_management, block, inventory};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Services
        .route("/api/v1/services", post(service::create_service).get(service::list_services))
        .route("/api/v1/services/{service_id}", get(service::get_service))

        // Availability
        .route("/api/v1/availability/check", post(availability::check_availability))
        .route("/api/v1/services/{service_id}/calendar", get(availability::get_calendar))

        // Booking windows
        .route("/api/v1/services/{service_id}/bookings", post(booking::create_booking).get(booking::list_bookings))
        .route("/api/v1/bookings/{booking_id}", get(booking::get_booking))
        .route("/api/v1/bookings/{booking_id}/status", put(booking::update_booking_status))

        // Customer Booking Management
        .route("/api/v1/bookings/manage/{reference}", get(booking_management::get_booking_by_reference))
        .route("/api/v1/bookings/manage/{reference}/cancel", post(booking_management::cancel_booking))

        // Provider blocks
        .route("/api/v1/services/{service_id}/blocks", get(block::list_blocks).post(block::create_block))
        .route("/api/v1/services/{service_id}/blocks/{block_id}", delete(block::delete_block))

        // Room type inventory
        .route("/api/v1/room-types/{room_type_id}/inventory", get(inventory::list_inventory))
        .route("/api/v1/room-types/{room_type_id}/inventory/bulk", post(inventory::bulk_upsert_inventory))
        .route("/api/v1/room-types/{room_type_id}/inventory/{date}", put(inventory::upsert_inventory))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
