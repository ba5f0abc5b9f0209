use crate::domain::{models::inventory::DailyInventoryRecord, ports::InventoryRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;
use chrono::NaiveDate;

const UPSERT_SQL: &str = "INSERT INTO daily_inventory (id, room_type_id, date, available, blocked, note, updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7) ON CONFLICT (room_type_id, date) DO UPDATE SET available = EXCLUDED.available, blocked = EXCLUDED.blocked, note = EXCLUDED.note, updated_at = EXCLUDED.updated_at RETURNING *";

pub struct PostgresInventoryRepo {
    pool: PgPool,
}

impl PostgresInventoryRepo {
    pub fn new(pool: PgPool) -> Self { Self { pool } }
}

#[async_trait]
impl InventoryRepository for PostgresInventoryRepo {
    async fn upsert(&self, record: &DailyInventoryRecord) -> Result<DailyInventoryRecord, AppError> {
        sqlx::query_as::<_, DailyInventoryRecord>(UPSERT_SQL)
            .bind(&record.id).bind(&record.room_type_id).bind(record.date).bind(record.available)
            .bind(record.blocked).bind(&record.note).bind(record.updated_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn upsert_range(&self, records: &[DailyInventoryRecord]) -> Result<u64, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        for record in records {
            sqlx::query(UPSERT_SQL)
                .bind(&record.id).bind(&record.room_type_id).bind(record.date).bind(record.available)
                .bind(record.blocked).bind(&record.note).bind(record.updated_at)
                .execute(&mut *tx).await.map_err(AppError::Database)?;
        }
        tx.commit().await.map_err(AppError::Database)?;
        Ok(records.len() as u64)
    }
    async fn list_by_range(&self, room_type_id: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<DailyInventoryRecord>, AppError> {
        sqlx::query_as::<_, DailyInventoryRecord>("SELECT * FROM daily_inventory WHERE room_type_id = $1 AND date >= $2 AND date < $3 ORDER BY date ASC").bind(room_type_id).bind(start).bind(end).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
}
