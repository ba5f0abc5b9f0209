use crate::domain::{models::unavailable_block::UnavailableDateBlock, ports::UnavailableBlockRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;
use chrono::NaiveDate;

pub struct PostgresBlockRepo {
    pool: PgPool,
}

impl PostgresBlockRepo {
    pub fn new(pool: PgPool) -> Self { Self { pool } }
}

#[async_trait]
impl UnavailableBlockRepository for PostgresBlockRepo {
    async fn create(&self, block: &UnavailableDateBlock) -> Result<UnavailableDateBlock, AppError> {
        sqlx::query_as::<_, UnavailableDateBlock>("INSERT INTO unavailable_date_blocks (id, service_id, service_category, start_date, end_date, reason, block_type, owner_id, created_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *")
            .bind(&block.id).bind(&block.service_id).bind(block.service_category.as_str()).bind(block.start_date).bind(block.end_date)
            .bind(&block.reason).bind(block.block_type.as_str()).bind(&block.owner_id).bind(block.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_by_service(&self, service_id: &str) -> Result<Vec<UnavailableDateBlock>, AppError> {
        sqlx::query_as::<_, UnavailableDateBlock>("SELECT * FROM unavailable_date_blocks WHERE service_id = $1 ORDER BY start_date ASC").bind(service_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_overlapping(&self, service_id: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<UnavailableDateBlock>, AppError> {
        sqlx::query_as::<_, UnavailableDateBlock>("SELECT * FROM unavailable_date_blocks WHERE service_id = $1 AND start_date < $2 AND end_date > $3").bind(service_id).bind(end).bind(start).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn delete(&self, service_id: &str, id: &str) -> Result<(), AppError> {
        let res = sqlx::query("DELETE FROM unavailable_date_blocks WHERE service_id = $1 AND id = $2").bind(service_id).bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if res.rows_affected() == 0 { return Err(AppError::NotFound("Block not found".into())); }
        Ok(())
    }
    async fn delete_expired(&self, today: NaiveDate) -> Result<u64, AppError> {
        let res = sqlx::query("DELETE FROM unavailable_date_blocks WHERE end_date <= $1").bind(today).execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(res.rows_affected())
    }
}
