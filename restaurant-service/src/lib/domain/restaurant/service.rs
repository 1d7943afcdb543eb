use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::authentication::models::UserId;
use crate::domain::restaurant::errors::RestaurantError;
use crate::domain::restaurant::models::RecordEntry;
use crate::domain::restaurant::models::Restaurant;
use crate::domain::restaurant::models::RestaurantQuery;
use crate::domain::restaurant::models::SearchRecord;
use crate::domain::restaurant::ports::PlacesClient;
use crate::domain::restaurant::ports::RecordRepository;
use crate::domain::restaurant::ports::RestaurantServicePort;

/// Domain service implementation for restaurant lookups.
pub struct RestaurantService<PC, RR>
where
    PC: PlacesClient,
    RR: RecordRepository,
{
    places: Arc<PC>,
    records: Arc<RR>,
}

impl<PC, RR> RestaurantService<PC, RR>
where
    PC: PlacesClient,
    RR: RecordRepository,
{
    pub fn new(places: Arc<PC>, records: Arc<RR>) -> Self {
        Self { places, records }
    }
}

#[async_trait]
impl<PC, RR> RestaurantServicePort for RestaurantService<PC, RR>
where
    PC: PlacesClient,
    RR: RecordRepository,
{
    async fn search(
        &self,
        user_id: &UserId,
        query: RestaurantQuery,
    ) -> Result<Vec<Restaurant>, RestaurantError> {
        let (city, location) = match query {
            RestaurantQuery::ByCity(city) => {
                let location = self
                    .places
                    .locate_city(&city)
                    .await?
                    .ok_or_else(|| RestaurantError::InvalidCity(city.clone()))?;
                (Some(city), location)
            }
            RestaurantQuery::ByCoordinates(location) => (None, location),
        };

        let restaurants = self.places.nearby_restaurants(&location).await?;

        self.records
            .insert(SearchRecord {
                user_id: *user_id,
                city,
                coordinates: location,
                created_at: Utc::now(),
            })
            .await?;

        tracing::debug!(
            user_id = %user_id,
            latitude = location.latitude(),
            longitude = location.longitude(),
            results = restaurants.len(),
            "Restaurant search completed"
        );

        Ok(restaurants)
    }

    async fn list_records(&self) -> Result<Vec<RecordEntry>, RestaurantError> {
        self.records.list_all().await
    }
}
