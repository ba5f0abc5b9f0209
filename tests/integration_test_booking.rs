mod common;

use axum::http::StatusCode;
use common::{day, TestApp};
use serde_json::json;

fn guest(start: String, end: String) -> serde_json::Value {
    json!({
        "start_date": start,
        "end_date": end,
        "customer_name": "Sam Guest",
        "customer_email": "sam@example.com"
    })
}

#[tokio::test]
async fn test_booking_is_created_pending_with_reference() {
    let app = TestApp::new().await;
    let car = app.create_service(json!({ "category": "vehicle", "name": "Convertible", "owner_id": "fleet-1" })).await;

    let (status, body) = app.book(&car, guest(day(4), day(6))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "pending");
    assert_eq!(body["service_category"], "vehicle");
    assert_eq!(body["units"], 1);
    assert_eq!(body["reference"].as_str().unwrap().len(), 24);

    let id = body["id"].as_str().unwrap();
    let (status, fetched) = app.request("GET", &format!("/api/v1/bookings/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["start_date"], day(4));
    assert_eq!(fetched["end_date"], day(6));

    let (_, list) = app.request("GET", &format!("/api/v1/services/{}/bookings", car), None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_overlapping_booking_is_rejected_with_detail() {
    let app = TestApp::new().await;
    let car = app.create_service(json!({ "category": "vehicle", "name": "Pickup", "owner_id": "fleet-1" })).await;

    let (status, first) = app.book(&car, guest(day(10), day(13))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.book(&car, guest(day(12), day(15))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "The requested dates are not available");
    assert_eq!(body["availability"]["is_available"], false);
    assert_eq!(body["availability"]["conflicting_bookings"][0]["id"], first["id"]);

    let (status, _) = app.book(&car, guest(day(13), day(14))).await;
    assert_eq!(status, StatusCode::CREATED, "touching ranges must not conflict");

    let (status, _) = app.book(&car, guest(day(8), day(10))).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_past_and_malformed_submissions() {
    let app = TestApp::new().await;
    let car = app.create_service(json!({ "category": "vehicle", "name": "Sedan", "owner_id": "fleet-1" })).await;

    let (status, body) = app.book(&car, guest(day(-2), day(1))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Cannot book in the past");

    let (status, _) = app.book(&car, guest(day(5), day(5))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.book(&car, guest(day(6), day(5))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.book(&car, json!({
        "start_date": day(5), "customer_name": "No End", "customer_email": "x@example.com"
    })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.book(&car, json!({
        "start_date": day(5), "end_date": day(6), "customer_name": "Bad", "customer_email": "not-an-email"
    })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.book("missing-service", guest(day(5), day(6))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_stay_length_limits_are_enforced() {
    let app = TestApp::new().await;
    let villa = app.create_service(json!({
        "category": "property", "name": "Villa", "owner_id": "host-1", "min_stay": 2, "max_stay": 5
    })).await;

    let (status, body) = app.book(&villa, guest(day(3), day(4))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Minimum 2 nights required");

    let (status, body) = app.book(&villa, guest(day(3), day(9))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Maximum 5 nights allowed");

    let (status, _) = app.book(&villa, guest(day(3), day(8))).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_status_transitions() {
    let app = TestApp::new().await;
    let car = app.create_service(json!({ "category": "vehicle", "name": "Coupe", "owner_id": "fleet-1" })).await;
    let (_, booking) = app.book(&car, guest(day(2), day(4))).await;
    let uri = format!("/api/v1/bookings/{}/status", booking["id"].as_str().unwrap());

    let (status, body) = app.request("PUT", &uri, Some(json!({ "status": "confirmed" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "confirmed");

    let (status, _) = app.request("PUT", &uri, Some(json!({ "status": "pending" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = app.request("PUT", &uri, Some(json!({ "status": "completed" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "completed");

    let (status, _) = app.request("PUT", &uri, Some(json!({ "status": "cancelled" }))).await;
    assert_eq!(status, StatusCode::CONFLICT, "completed is terminal");

    let (status, _) = app.request("PUT", "/api/v1/bookings/unknown/status", Some(json!({ "status": "confirmed" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cancellation_frees_capacity_immediately() {
    let app = TestApp::new().await;
    let room = app.create_service(json!({
        "category": "property", "name": "Attic", "owner_id": "host-1", "total_inventory": 1
    })).await;

    let (_, first) = app.book(&room, guest(day(7), day(9))).await;
    let (status, _) = app.book(&room, guest(day(8), day(10))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app.request(
        "PUT",
        &format!("/api/v1/bookings/{}/status", first["id"].as_str().unwrap()),
        Some(json!({ "status": "cancelled" })),
    ).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.book(&room, guest(day(8), day(10))).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_blocked_dates_reject_submission() {
    let app = TestApp::new().await;
    let car = app.create_service(json!({ "category": "vehicle", "name": "Minibus", "owner_id": "fleet-1" })).await;

    app.request("POST", &format!("/api/v1/services/{}/blocks", car), Some(json!({
        "start_date": day(15), "end_date": day(16), "reason": "inspection"
    }))).await;

    let (status, body) = app.book(&car, guest(day(14), day(17))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["availability"]["unavailable_dates"][0]["reason"], "inspection");
}

#[tokio::test]
async fn test_slots_and_units_are_rejected_where_they_do_not_apply() {
    let app = TestApp::new().await;
    let car = app.create_service(json!({ "category": "vehicle", "name": "Van", "owner_id": "fleet-1" })).await;
    let room = app.create_service(json!({
        "category": "property", "name": "Loft", "owner_id": "host-1", "total_inventory": 3
    })).await;
    let tour = app.create_service(json!({ "category": "tour", "name": "Harbour walk", "owner_id": "guide-1" })).await;

    let (status, body) = app.book(&car, json!({
        "start_date": day(5), "end_date": day(7), "time_slot": "09:00",
        "customer_name": "Ana", "customer_email": "ana@example.com"
    })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Time slots only apply to tours");

    let (status, _) = app.book(&room, json!({
        "start_date": day(5), "end_date": day(7), "time_slot": "09:00",
        "customer_name": "Ana", "customer_email": "ana@example.com"
    })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.book(&tour, json!({
        "start_date": day(5), "time_slot": "09:00",
        "customer_name": "Ana", "customer_email": "ana@example.com"
    })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app.book(&car, json!({
        "start_date": day(5), "end_date": day(7), "units": 2,
        "customer_name": "Ana", "customer_email": "ana@example.com"
    })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Only properties can book more than one unit");

    let (status, _) = app.book(&tour, json!({
        "start_date": day(5), "units": 2,
        "customer_name": "Ana", "customer_email": "ana@example.com"
    })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.book(&room, json!({
        "start_date": day(5), "end_date": day(7), "units": 2,
        "customer_name": "Ana", "customer_email": "ana@example.com"
    })).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, list) = app.request("GET", &format!("/api/v1/services/{}/bookings", car), None).await;
    assert!(list.as_array().unwrap().is_empty());
}
