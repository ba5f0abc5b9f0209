use crate::domain::{models::service::Service, ports::ServiceRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresServiceRepo {
    pool: PgPool,
}

impl PostgresServiceRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ServiceRepository for PostgresServiceRepo {
    async fn create(&self, service: &Service) -> Result<Service, AppError> {
        sqlx::query_as::<_, Service>("INSERT INTO services (id, category, name, owner_id, total_inventory, tour_slots_json, min_stay, max_stay, base_price, timezone, created_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING *")
            .bind(&service.id).bind(service.category.as_str()).bind(&service.name).bind(&service.owner_id)
            .bind(service.total_inventory).bind(&service.tour_slots_json).bind(service.min_stay).bind(service.max_stay)
            .bind(service.base_price).bind(&service.timezone).bind(service.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_id(&self, id: &str) -> Result<Option<Service>, AppError> {
        sqlx::query_as::<_, Service>("SELECT * FROM services WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Service>, AppError> {
        sqlx::query_as::<_, Service>("SELECT * FROM services WHERE owner_id = $1 ORDER BY created_at ASC").bind(owner_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
}
