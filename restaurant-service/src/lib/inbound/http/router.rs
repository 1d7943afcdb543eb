use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::access_token::access_token;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::records::list_records;
use super::handlers::registration::register;
use super::handlers::restaurants::search_restaurants;
use super::handlers::ApiError;
use super::middleware::authenticate as auth_middleware;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::restaurant::ports::RestaurantServicePort;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub restaurant_service: Arc<dyn RestaurantServicePort>,
}

pub fn create_router(
    auth_service: Arc<dyn AuthServicePort>,
    restaurant_service: Arc<dyn RestaurantServicePort>,
) -> Router {
    let state = AppState {
        auth_service,
        restaurant_service,
    };

    // Refresh-token routes read the bearer token themselves; it is not an access token.
    let auth_routes = Router::new()
        .route("/auth/registration", post(register))
        .route("/auth/login", post(login))
        .route("/auth/accesstoken", post(access_token))
        .route("/auth/logout", post(logout));

    let protected_routes = Router::new()
        .route("/restaurants", get(search_restaurants))
        .route("/records", get(list_records))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .nest("/api", auth_routes.merge(protected_routes))
        .fallback(not_found)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Not found".to_string())
}
