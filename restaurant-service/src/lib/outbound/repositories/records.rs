use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::domain::restaurant::errors::RestaurantError;
use crate::domain::restaurant::models::RecordEntry;
use crate::domain::restaurant::models::SearchRecord;
use crate::domain::restaurant::ports::RecordRepository;

pub struct PostgresRecordRepository {
    pool: PgPool,
}

impl PostgresRecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct RecordEntryRow {
    email: String,
    city: Option<String>,
    latitude: f64,
    longitude: f64,
    created_at: DateTime<Utc>,
}

impl From<RecordEntryRow> for RecordEntry {
    fn from(row: RecordEntryRow) -> Self {
        RecordEntry {
            email: row.email,
            city: row.city,
            latitude: row.latitude,
            longitude: row.longitude,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl RecordRepository for PostgresRecordRepository {
    async fn insert(&self, record: SearchRecord) -> Result<(), RestaurantError> {
        sqlx::query(
            r#"
            INSERT INTO records (user_id, city, latitude, longitude, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(record.user_id.0)
        .bind(record.city)
        .bind(record.coordinates.latitude())
        .bind(record.coordinates.longitude())
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RestaurantError::StoreUnavailable(e.to_string()))?;

        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<RecordEntry>, RestaurantError> {
        let rows = sqlx::query_as::<_, RecordEntryRow>(
            r#"
            SELECT u.email, r.city, r.latitude, r.longitude, r.created_at
            FROM records r
            JOIN users u ON u.id = r.user_id
            ORDER BY r.created_at DESC, r.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RestaurantError::StoreUnavailable(e.to_string()))?;

        Ok(rows.into_iter().map(RecordEntry::from).collect())
    }
}
