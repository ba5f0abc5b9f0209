use stay_availability::{
    api::router::create_router,
    config::Config,
    infra::factory::{connect_sqlite, run_sqlite_migrations, sqlite_state},
    state::AppState,
};
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::{Duration, NaiveDate, Utc};
use serde_json::Value;
use sqlx::{Pool, Sqlite};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let pool = connect_sqlite(&db_url).await.expect("Failed to connect to test db");
        run_sqlite_migrations(&pool).await.expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            sweep_interval_secs: 300,
            calendar_max_days: 366,
        };

        let state = Arc::new(sqlite_state(&config, pool.clone()));
        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
        (status, json)
    }

    /// Creates a service and returns its id.
    pub async fn create_service(&self, payload: Value) -> String {
        let (status, body) = self.request("POST", "/api/v1/services", Some(payload)).await;
        assert_eq!(status, StatusCode::CREATED, "service creation failed: {}", body);
        body["id"].as_str().unwrap().to_string()
    }

    pub async fn book(&self, service_id: &str, payload: Value) -> (StatusCode, Value) {
        self.request("POST", &format!("/api/v1/services/{}/bookings", service_id), Some(payload)).await
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}

/// A date `n` days after today (UTC), formatted for JSON payloads.
#[allow(dead_code)]
pub fn day(n: i64) -> String {
    date(n).format("%Y-%m-%d").to_string()
}

#[allow(dead_code)]
pub fn date(n: i64) -> NaiveDate {
    Utc::now().date_naive() + Duration::days(n)
}
