use async_trait::async_trait;

use crate::domain::authentication::models::UserId;
use crate::domain::restaurant::errors::RestaurantError;
use crate::domain::restaurant::models::Coordinates;
use crate::domain::restaurant::models::RecordEntry;
use crate::domain::restaurant::models::Restaurant;
use crate::domain::restaurant::models::RestaurantQuery;
use crate::domain::restaurant::models::SearchRecord;

/// Port for restaurant lookup and audit-log use cases.
#[async_trait]
pub trait RestaurantServicePort: Send + Sync + 'static {
    /// Find restaurants near a city or a coordinate pair and record the search.
    ///
    /// # Errors
    /// * `InvalidCity` - City could not be geocoded
    /// * `PlacesUnavailable` - Places provider failed
    /// * `StoreUnavailable` - Recording the search failed
    async fn search(
        &self,
        user_id: &UserId,
        query: RestaurantQuery,
    ) -> Result<Vec<Restaurant>, RestaurantError>;

    /// Every recorded search, newest first.
    ///
    /// # Errors
    /// * `StoreUnavailable` - Storage operation failed
    async fn list_records(&self) -> Result<Vec<RecordEntry>, RestaurantError>;
}

/// External geocoding and nearby-search provider.
#[async_trait]
pub trait PlacesClient: Send + Sync + 'static {
    /// Resolve a city name to the coordinates of its best match.
    ///
    /// # Returns
    /// None when the provider has no match
    async fn locate_city(&self, city: &str) -> Result<Option<Coordinates>, RestaurantError>;

    async fn nearby_restaurants(
        &self,
        location: &Coordinates,
    ) -> Result<Vec<Restaurant>, RestaurantError>;
}

/// Persistence for the search audit log.
#[async_trait]
pub trait RecordRepository: Send + Sync + 'static {
    async fn insert(&self, record: SearchRecord) -> Result<(), RestaurantError>;

    async fn list_all(&self) -> Result<Vec<RecordEntry>, RestaurantError>;
}
