use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;

use super::ApiError;
use crate::inbound::http::middleware::bearer_token;
use crate::inbound::http::router::AppState;

/// Revoke the bearer refresh token.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let refresh_token = bearer_token(&headers).ok_or_else(ApiError::unauthorized)?;

    state
        .auth_service
        .logout(refresh_token)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::OK)
}
