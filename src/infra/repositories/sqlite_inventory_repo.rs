use crate::domain::{models::inventory::DailyInventoryRecord, ports::InventoryRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;
use chrono::NaiveDate;

const UPSERT_SQL: &str = r#"INSERT INTO daily_inventory (id, room_type_id, date, available, blocked, note, updated_at)
   VALUES (?, ?, ?, ?, ?, ?, ?)
   ON CONFLICT(room_type_id, date) DO UPDATE SET
   available=excluded.available,
   blocked=excluded.blocked,
   note=excluded.note,
   updated_at=excluded.updated_at
   RETURNING *"#;

pub struct SqliteInventoryRepo {
    pool: SqlitePool,
}

impl SqliteInventoryRepo {
    pub fn new(pool: SqlitePool) -> Self { Self { pool } }
}

#[async_trait]
impl InventoryRepository for SqliteInventoryRepo {
    async fn upsert(&self, record: &DailyInventoryRecord) -> Result<DailyInventoryRecord, AppError> {
        sqlx::query_as::<_, DailyInventoryRecord>(UPSERT_SQL)
            .bind(&record.id)
            .bind(&record.room_type_id)
            .bind(record.date)
            .bind(record.available)
            .bind(record.blocked)
            .bind(&record.note)
            .bind(record.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn upsert_range(&self, records: &[DailyInventoryRecord]) -> Result<u64, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        for record in records {
            sqlx::query(UPSERT_SQL)
                .bind(&record.id)
                .bind(&record.room_type_id)
                .bind(record.date)
                .bind(record.available)
                .bind(record.blocked)
                .bind(&record.note)
                .bind(record.updated_at)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
        }
        tx.commit().await.map_err(AppError::Database)?;
        Ok(records.len() as u64)
    }

    async fn list_by_range(&self, room_type_id: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<DailyInventoryRecord>, AppError> {
        sqlx::query_as::<_, DailyInventoryRecord>(
            "SELECT * FROM daily_inventory WHERE room_type_id = ? AND date >= ? AND date < ? ORDER BY date ASC"
        )
            .bind(room_type_id)
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
