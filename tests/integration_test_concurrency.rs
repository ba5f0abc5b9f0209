mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{date, day, TestApp};
use serde_json::json;
use std::time::{Duration, Instant};
use stay_availability::domain::models::booking::{NewBookingParams, ServiceBookingWindow};
use stay_availability::domain::ports::BookingOutcome;
use tokio::task::JoinSet;
use tower::ServiceExt;

#[tokio::test]
async fn test_concurrent_submissions_yield_exactly_one_booking() {
    let app = TestApp::new().await;
    let room = app.create_service(json!({
        "category": "property", "name": "Penthouse", "owner_id": "host-1", "total_inventory": 1
    })).await;

    let mut set = JoinSet::new();
    for i in 0..8 {
        let router = app.router.clone();
        let uri = format!("/api/v1/services/{}/bookings", room);
        let payload = json!({
            "start_date": day(30), "end_date": day(33),
            "customer_name": format!("Guest {}", i),
            "customer_email": format!("guest{}@example.com", i)
        });
        set.spawn(async move {
            let response = router.oneshot(
                Request::builder().method("POST").uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string())).unwrap()
            ).await.unwrap();
            response.status()
        });
    }

    let mut created = 0;
    let mut conflicts = 0;
    while let Some(status) = set.join_next().await {
        match status.unwrap() {
            StatusCode::CREATED => created += 1,
            StatusCode::CONFLICT => conflicts += 1,
            other => panic!("unexpected status {}", other),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(conflicts, 7);

    let (_, list) = app.request("GET", &format!("/api/v1/services/{}/bookings", room), None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_checked_rejects_losers_under_lock() {
    let app = TestApp::new().await;
    let car_id = app.create_service(json!({ "category": "vehicle", "name": "Roadster", "owner_id": "fleet-1" })).await;
    let car = app.state.service_repo.find_by_id(&car_id).await.unwrap().unwrap();

    let mut set = JoinSet::new();
    for i in 0..6 {
        let repo = app.state.booking_repo.clone();
        let service = car.clone();
        // Every window overlaps the others on the 41st day.
        let window = ServiceBookingWindow::new(NewBookingParams {
            service_id: car.id.clone(),
            service_category: car.category,
            start_date: date(40 - i),
            end_date: date(42),
            time_slot: None,
            units: 1,
            name: format!("Driver {}", i),
            email: format!("driver{}@example.com", i),
        });
        set.spawn(async move { repo.create_checked(&service, &window).await });
    }

    let mut created = 0;
    let mut rejected = 0;
    while let Some(outcome) = set.join_next().await {
        match outcome.unwrap().unwrap() {
            BookingOutcome::Created(_) => created += 1,
            BookingOutcome::Rejected(result) => {
                assert!(!result.is_available);
                assert_eq!(result.conflicting_bookings.len(), 1);
                rejected += 1;
            }
        }
    }

    assert_eq!(created, 1);
    assert_eq!(rejected, 5);
}

#[tokio::test]
async fn test_concurrent_submissions_on_separate_slots_all_succeed() {
    let app = TestApp::new().await;
    let tour = app.create_service(json!({
        "category": "tour", "name": "Boat trip", "owner_id": "guide-1",
        "tour_slots": ["08:00", "11:00", "14:00", "17:00"]
    })).await;

    let mut set = JoinSet::new();
    for slot in ["08:00", "11:00", "14:00", "17:00"] {
        let router = app.router.clone();
        let uri = format!("/api/v1/services/{}/bookings", tour);
        let payload = json!({
            "start_date": day(12), "time_slot": slot,
            "customer_name": "Crew", "customer_email": "crew@example.com"
        });
        set.spawn(async move {
            router.oneshot(
                Request::builder().method("POST").uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string())).unwrap()
            ).await.unwrap().status()
        });
    }

    while let Some(status) = set.join_next().await {
        assert_eq!(status.unwrap(), StatusCode::CREATED);
    }
}

#[tokio::test]
async fn test_cancelled_submission_releases_write_lock() {
    let app = TestApp::new().await;
    let car_id = app.create_service(json!({ "category": "vehicle", "name": "Hatchback", "owner_id": "fleet-1" })).await;
    let car = app.state.service_repo.find_by_id(&car_id).await.unwrap().unwrap();

    // Abandon submissions at increasing points between BEGIN and COMMIT.
    for i in 0..20u64 {
        let window = ServiceBookingWindow::new(NewBookingParams {
            service_id: car.id.clone(),
            service_category: car.category,
            start_date: date(50 + 2 * i as i64),
            end_date: date(51 + 2 * i as i64),
            time_slot: None,
            units: 1,
            name: "Abandoned".into(),
            email: "abandoned@example.com".into(),
        });
        let _ = tokio::time::timeout(
            Duration::from_micros(5 + 10 * i),
            app.state.booking_repo.create_checked(&car, &window),
        ).await;
    }

    let started = Instant::now();
    let (status, body) = app.book(&car_id, json!({
        "start_date": day(20), "end_date": day(22),
        "customer_name": "After", "customer_email": "after@example.com"
    })).await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert!(started.elapsed() < Duration::from_secs(2), "booking waited on a leaked lock");
}
