use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::restaurant::models::Photo;
use crate::domain::restaurant::models::Restaurant;
use crate::domain::restaurant::models::RestaurantQuery;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn search_restaurants(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    params: Result<Query<RestaurantParams>, QueryRejection>,
) -> Result<ApiSuccess<Vec<RestaurantData>>, ApiError> {
    let Query(params) = params.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let query = RestaurantQuery::from_parts(params.city, params.latitude, params.longitude)?;

    state
        .restaurant_service
        .search(&user.user_id, query)
        .await
        .map_err(ApiError::from)
        .map(|restaurants| {
            ApiSuccess::new(
                StatusCode::OK,
                restaurants.into_iter().map(RestaurantData::from).collect(),
            )
        })
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RestaurantParams {
    city: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestaurantData {
    pub name: String,
    pub rating: Option<f64>,
    pub address: String,
    pub photos: Vec<PhotoData>,
}

/// Photo fields keep the provider's naming.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhotoData {
    pub photo_reference: String,
    pub width: u32,
    pub height: u32,
    pub html_attributions: Vec<String>,
}

impl From<Restaurant> for RestaurantData {
    fn from(restaurant: Restaurant) -> Self {
        Self {
            name: restaurant.name,
            rating: restaurant.rating,
            address: restaurant.address,
            photos: restaurant.photos.into_iter().map(PhotoData::from).collect(),
        }
    }
}

impl From<Photo> for PhotoData {
    fn from(photo: Photo) -> Self {
        Self {
            photo_reference: photo.photo_reference,
            width: photo.width,
            height: photo.height,
            html_attributions: photo.html_attributions,
        }
    }
}
