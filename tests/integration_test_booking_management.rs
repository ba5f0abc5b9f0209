mod common;

use axum::http::StatusCode;
use common::{day, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_manage_booking_by_reference() {
    let app = TestApp::new().await;
    let tour = app.create_service(json!({
        "category": "tour", "name": "Wine tasting", "owner_id": "guide-1", "tour_slots": ["17:00"]
    })).await;

    let (status, booking) = app.book(&tour, json!({
        "start_date": day(6), "time_slot": "17:00",
        "customer_name": "Kim", "customer_email": "kim@example.com"
    })).await;
    assert_eq!(status, StatusCode::CREATED);
    let reference = booking["reference"].as_str().unwrap();

    let (status, body) = app.request("GET", &format!("/api/v1/bookings/manage/{}", reference), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["booking"]["id"], booking["id"]);
    assert_eq!(body["service"]["name"], "Wine tasting");

    let (status, cancelled) = app.request("POST", &format!("/api/v1/bookings/manage/{}/cancel", reference), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cancelled["status"], "cancelled");

    // Repeated cancellation is idempotent.
    let (status, again) = app.request("POST", &format!("/api/v1/bookings/manage/{}/cancel", reference), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(again["status"], "cancelled");

    let (status, _) = app.book(&tour, json!({
        "start_date": day(6), "time_slot": "17:00",
        "customer_name": "Ravi", "customer_email": "ravi@example.com"
    })).await;
    assert_eq!(status, StatusCode::CREATED, "slot must be free after cancellation");
}

#[tokio::test]
async fn test_completed_booking_cannot_be_cancelled() {
    let app = TestApp::new().await;
    let car = app.create_service(json!({ "category": "vehicle", "name": "Estate", "owner_id": "fleet-1" })).await;

    let (_, booking) = app.book(&car, json!({
        "start_date": day(1), "end_date": day(2),
        "customer_name": "Jo", "customer_email": "jo@example.com"
    })).await;
    let status_uri = format!("/api/v1/bookings/{}/status", booking["id"].as_str().unwrap());
    app.request("PUT", &status_uri, Some(json!({ "status": "confirmed" }))).await;
    app.request("PUT", &status_uri, Some(json!({ "status": "completed" }))).await;

    let (status, _) = app.request(
        "POST",
        &format!("/api/v1/bookings/manage/{}/cancel", booking["reference"].as_str().unwrap()),
        None,
    ).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_unknown_reference_is_not_found() {
    let app = TestApp::new().await;

    let (status, _) = app.request("GET", "/api/v1/bookings/manage/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.request("POST", "/api/v1/bookings/manage/nope/cancel", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
