pub mod places;
pub mod repositories;
