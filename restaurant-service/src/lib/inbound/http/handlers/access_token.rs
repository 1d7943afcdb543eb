use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::bearer_token;
use crate::inbound::http::router::AppState;

/// Exchange the bearer refresh token for a fresh access token.
pub async fn access_token(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<ApiSuccess<AccessTokenResponseData>, ApiError> {
    let refresh_token = bearer_token(&headers).ok_or_else(ApiError::unauthorized)?;

    state
        .auth_service
        .refresh(refresh_token)
        .await
        .map_err(ApiError::from)
        .map(|access_token| {
            ApiSuccess::new(StatusCode::OK, AccessTokenResponseData { access_token })
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenResponseData {
    pub access_token: String,
}
