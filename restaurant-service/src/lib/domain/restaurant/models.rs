use chrono::DateTime;
use chrono::Utc;

use crate::domain::authentication::models::UserId;
use crate::domain::restaurant::errors::CoordinatesError;
use crate::domain::restaurant::errors::RestaurantError;

/// A point on the globe, range-checked on construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// # Errors
    /// * `LatitudeOutOfRange` - Latitude outside [-90, 90]
    /// * `LongitudeOutOfRange` - Longitude outside [-180, 180]
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinatesError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinatesError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinatesError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// What a restaurant lookup is anchored on.
#[derive(Debug, Clone, PartialEq)]
pub enum RestaurantQuery {
    ByCity(String),
    ByCoordinates(Coordinates),
}

impl RestaurantQuery {
    /// Build a query from optional request parameters.
    ///
    /// Exactly one of `city` or the coordinate pair must be given.
    ///
    /// # Errors
    /// * `InvalidQuery` - Nothing given, city mixed with coordinates, or blank city
    /// * `MissingParameter` - Only one of latitude/longitude given
    /// * `InvalidCoordinates` - Coordinates out of range
    pub fn from_parts(
        city: Option<String>,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<Self, RestaurantError> {
        match (city, latitude, longitude) {
            (None, None, None) => Err(RestaurantError::InvalidQuery(
                "one of city, latitude or longitude is required".to_string(),
            )),
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => Err(RestaurantError::InvalidQuery(
                "city cannot be combined with latitude or longitude".to_string(),
            )),
            (Some(city), None, None) => {
                if city.trim().is_empty() {
                    Err(RestaurantError::InvalidQuery(
                        "city must not be empty".to_string(),
                    ))
                } else {
                    Ok(Self::ByCity(city))
                }
            }
            (None, Some(latitude), Some(longitude)) => {
                Ok(Self::ByCoordinates(Coordinates::new(latitude, longitude)?))
            }
            (None, _, _) => Err(RestaurantError::MissingParameter(
                "latitude or longitude".to_string(),
            )),
        }
    }
}

/// Photo reference returned by the places provider.
#[derive(Debug, Clone, PartialEq)]
pub struct Photo {
    pub photo_reference: String,
    pub width: u32,
    pub height: u32,
    pub html_attributions: Vec<String>,
}

/// Restaurant as returned to API callers.
#[derive(Debug, Clone, PartialEq)]
pub struct Restaurant {
    pub name: String,
    pub rating: Option<f64>,
    pub address: String,
    pub photos: Vec<Photo>,
}

impl Restaurant {
    pub const UNKNOWN_ADDRESS: &'static str = "Address not available";
}

/// Audit row written for every successful lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRecord {
    pub user_id: UserId,
    pub city: Option<String>,
    pub coordinates: Coordinates,
    pub created_at: DateTime<Utc>,
}

/// Audit row joined with the searching user's email.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordEntry {
    pub email: String,
    pub city: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_bounds() {
        assert!(Coordinates::new(90.0, 180.0).is_ok());
        assert!(Coordinates::new(-90.0, -180.0).is_ok());
        assert_eq!(
            Coordinates::new(90.5, 0.0),
            Err(CoordinatesError::LatitudeOutOfRange(90.5))
        );
        assert_eq!(
            Coordinates::new(0.0, -180.5),
            Err(CoordinatesError::LongitudeOutOfRange(-180.5))
        );
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_query_by_city() {
        let query = RestaurantQuery::from_parts(Some("Bogota".to_string()), None, None);
        assert_eq!(query, Ok(RestaurantQuery::ByCity("Bogota".to_string())));
    }

    #[test]
    fn test_query_by_coordinates() {
        let query = RestaurantQuery::from_parts(None, Some(4.6), Some(-74.08)).unwrap();
        assert_eq!(
            query,
            RestaurantQuery::ByCoordinates(Coordinates::new(4.6, -74.08).unwrap())
        );
    }

    #[test]
    fn test_query_rejections() {
        assert!(matches!(
            RestaurantQuery::from_parts(None, None, None),
            Err(RestaurantError::InvalidQuery(_))
        ));
        assert!(matches!(
            RestaurantQuery::from_parts(Some("Bogota".to_string()), Some(4.6), None),
            Err(RestaurantError::InvalidQuery(_))
        ));
        assert!(matches!(
            RestaurantQuery::from_parts(Some(" ".to_string()), None, None),
            Err(RestaurantError::InvalidQuery(_))
        ));
        assert_eq!(
            RestaurantQuery::from_parts(None, Some(4.6), None),
            Err(RestaurantError::MissingParameter(
                "latitude or longitude".to_string()
            ))
        );
        assert!(matches!(
            RestaurantQuery::from_parts(None, Some(100.0), Some(0.0)),
            Err(RestaurantError::InvalidCoordinates(_))
        ));
    }
}
