pub mod authentication;
pub mod restaurant;
