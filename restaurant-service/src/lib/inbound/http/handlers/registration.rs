use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::ApiError;
use crate::domain::authentication::errors::EmailError;
use crate::domain::authentication::errors::NameError;
use crate::domain::authentication::errors::PasswordPolicyError;
use crate::domain::authentication::models::DisplayName;
use crate::domain::authentication::models::EmailAddress;
use crate::domain::authentication::models::Password;
use crate::domain::authentication::models::RegisterCommand;
use crate::inbound::http::router::AppState;

/// Register a new user. Responds 201 with an empty body.
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegistrationRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(body) = body.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    state
        .auth_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::CREATED)
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegistrationRequest {
    name: String,
    email: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseRegistrationRequestError {
    #[error("Invalid name: {0}")]
    Name(#[from] NameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordPolicyError),
}

impl RegistrationRequest {
    fn try_into_command(self) -> Result<RegisterCommand, ParseRegistrationRequestError> {
        let name = DisplayName::new(self.name)?;
        let email = EmailAddress::new(self.email)?;
        let password = Password::new(self.password)?;
        Ok(RegisterCommand::new(name, email, password))
    }
}

impl From<ParseRegistrationRequestError> for ApiError {
    fn from(err: ParseRegistrationRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, email: &str, password: &str) -> RegistrationRequest {
        RegistrationRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_valid_request() {
        let command = request("A", "a@x.com", "Password1@")
            .try_into_command()
            .unwrap();
        assert_eq!(command.email.as_str(), "a@x.com");
    }

    #[test]
    fn test_invalid_fields() {
        assert!(matches!(
            request(" ", "a@x.com", "Password1@").try_into_command(),
            Err(ParseRegistrationRequestError::Name(_))
        ));
        assert!(matches!(
            request("A", "not-an-email", "Password1@").try_into_command(),
            Err(ParseRegistrationRequestError::Email(_))
        ));
        assert!(matches!(
            request("A", "a@x.com", "password").try_into_command(),
            Err(ParseRegistrationRequestError::Password(_))
        ));
    }
}
