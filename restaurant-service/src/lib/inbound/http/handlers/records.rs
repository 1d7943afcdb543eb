use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::restaurant::models::RecordEntry;
use crate::inbound::http::router::AppState;

pub async fn list_records(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<RecordData>>, ApiError> {
    state
        .restaurant_service
        .list_records()
        .await
        .map_err(ApiError::from)
        .map(|records| {
            ApiSuccess::new(
                StatusCode::OK,
                records.into_iter().map(RecordData::from).collect(),
            )
        })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordData {
    pub email: String,
    pub city: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
}

impl From<RecordEntry> for RecordData {
    fn from(entry: RecordEntry) -> Self {
        Self {
            email: entry.email,
            city: entry.city,
            latitude: entry.latitude,
            longitude: entry.longitude,
            created_at: entry.created_at,
        }
    }
}
