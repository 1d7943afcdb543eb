use thiserror::Error;

/// Error for coordinate validation failures
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CoordinatesError {
    #[error("latitude must be between -90 and 90, got {0}")]
    LatitudeOutOfRange(f64),

    #[error("longitude must be between -180 and 180, got {0}")]
    LongitudeOutOfRange(f64),
}

/// Top-level error for restaurant lookups and the search audit log.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RestaurantError {
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(#[from] CoordinatesError),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Missing query param: {0}")]
    MissingParameter(String),

    #[error("There is not a valid city {0} or similar")]
    InvalidCity(String),

    #[error("Places service failed: {0}")]
    PlacesUnavailable(String),

    #[error("Storage backend failed: {0}")]
    StoreUnavailable(String),
}
