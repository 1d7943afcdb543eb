use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::config::PlacesConfig;
use crate::domain::restaurant::errors::RestaurantError;
use crate::domain::restaurant::models::Coordinates;
use crate::domain::restaurant::models::Photo;
use crate::domain::restaurant::models::Restaurant;
use crate::domain::restaurant::ports::PlacesClient;

const GEOCODE_PATH: &str = "/maps/api/geocode/json";
const NEARBY_SEARCH_PATH: &str = "/maps/api/place/nearbysearch/json";
const PLACE_TYPE: &str = "restaurant";

/// Google Geocoding and Places (nearby search) client.
pub struct GooglePlacesClient {
    client: Client,
    api_key: String,
    base_url: String,
    radius: u32,
    language: String,
}

impl GooglePlacesClient {
    pub fn new(config: &PlacesConfig) -> Result<Self, RestaurantError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RestaurantError::PlacesUnavailable(e.to_string()))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            radius: config.radius,
            language: config.language.clone(),
        })
    }

    async fn get<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T, RestaurantError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                // reqwest errors carry the URL, and with it the API key
                RestaurantError::PlacesUnavailable(format!(
                    "request to {} failed: {}",
                    path,
                    e.without_url()
                ))
            })?;

        if !response.status().is_success() {
            return Err(RestaurantError::PlacesUnavailable(format!(
                "{} returned {}",
                path,
                response.status()
            )));
        }

        response.json::<T>().await.map_err(|e| {
            RestaurantError::PlacesUnavailable(format!(
                "unreadable response from {}: {}",
                path,
                e.without_url()
            ))
        })
    }
}

#[async_trait]
impl PlacesClient for GooglePlacesClient {
    async fn locate_city(&self, city: &str) -> Result<Option<Coordinates>, RestaurantError> {
        let response: GeocodeResponse = self
            .get(GEOCODE_PATH, &[("address", city.to_string())])
            .await?;

        check_status(&response.status, response.error_message.as_deref())?;

        response
            .results
            .into_iter()
            .next()
            .map(|result| {
                let location = result.geometry.location;
                Coordinates::new(location.lat, location.lng)
                    .map_err(|e| RestaurantError::PlacesUnavailable(e.to_string()))
            })
            .transpose()
    }

    async fn nearby_restaurants(
        &self,
        location: &Coordinates,
    ) -> Result<Vec<Restaurant>, RestaurantError> {
        let response: NearbySearchResponse = self
            .get(
                NEARBY_SEARCH_PATH,
                &[
                    (
                        "location",
                        format!("{},{}", location.latitude(), location.longitude()),
                    ),
                    ("radius", self.radius.to_string()),
                    ("type", PLACE_TYPE.to_string()),
                    ("language", self.language.clone()),
                ],
            )
            .await?;

        check_status(&response.status, response.error_message.as_deref())?;

        tracing::debug!(
            results = response.results.len(),
            status = %response.status,
            "Nearby search answered"
        );

        Ok(response.results.into_iter().map(Restaurant::from).collect())
    }
}

/// Google reports most failures with HTTP 200 and a status field.
fn check_status(status: &str, error_message: Option<&str>) -> Result<(), RestaurantError> {
    match status {
        "OK" | "ZERO_RESULTS" => Ok(()),
        other => Err(RestaurantError::PlacesUnavailable(format!(
            "places provider answered {}: {}",
            other,
            error_message.unwrap_or("no details")
        ))),
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct NearbySearchResponse {
    status: String,
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<PlaceResult>,
}

#[derive(Debug, Deserialize)]
struct PlaceResult {
    name: String,
    rating: Option<f64>,
    vicinity: Option<String>,
    #[serde(default)]
    photos: Vec<PlacePhoto>,
}

#[derive(Debug, Deserialize)]
struct PlacePhoto {
    photo_reference: String,
    width: u32,
    height: u32,
    #[serde(default)]
    html_attributions: Vec<String>,
}

impl From<PlaceResult> for Restaurant {
    fn from(place: PlaceResult) -> Self {
        Restaurant {
            name: place.name,
            rating: place.rating,
            address: place
                .vicinity
                .filter(|vicinity| !vicinity.is_empty())
                .unwrap_or_else(|| Restaurant::UNKNOWN_ADDRESS.to_string()),
            photos: place
                .photos
                .into_iter()
                .map(|photo| Photo {
                    photo_reference: photo.photo_reference,
                    width: photo.width,
                    height: photo.height,
                    html_attributions: photo.html_attributions,
                })
                .collect(),
        }
    }
}
