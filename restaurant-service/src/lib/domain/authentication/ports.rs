use async_trait::async_trait;
use auth::TokenPair;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::Credential;
use crate::domain::authentication::models::DisplayName;
use crate::domain::authentication::models::EmailAddress;
use crate::domain::authentication::models::LoginCommand;
use crate::domain::authentication::models::RefreshToken;
use crate::domain::authentication::models::RegisterCommand;
use crate::domain::authentication::models::User;
use crate::domain::authentication::models::UserId;

/// Port for authentication use cases.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user and store the hash of their password.
    ///
    /// # Errors
    /// * `DuplicateEmail` - Email is already registered
    /// * `StoreUnavailable` - Storage operation failed
    async fn register(&self, command: RegisterCommand) -> Result<(), AuthError>;

    /// Verify credentials and issue an access/refresh token pair.
    ///
    /// The refresh token is persisted before the pair is returned.
    ///
    /// # Errors
    /// * `FailedLogin` - Unknown email or wrong password (indistinguishable)
    /// * `StoreUnavailable` - Storage operation failed
    async fn login(&self, command: LoginCommand) -> Result<TokenPair, AuthError>;

    /// Exchange a stored, valid refresh token for a new access token.
    ///
    /// # Errors
    /// * `Unauthorized` - Token empty, invalid, expired or revoked
    async fn refresh(&self, refresh_token: &str) -> Result<String, AuthError>;

    /// Revoke a refresh token.
    ///
    /// # Errors
    /// * `Unauthorized` - Token empty, invalid, expired or already revoked
    async fn logout(&self, refresh_token: &str) -> Result<(), AuthError>;

    /// Check an access token's signature and expiry and return its subject.
    ///
    /// Never touches storage.
    ///
    /// # Errors
    /// * `Unauthorized` - Token invalid or expired
    fn verify_access_token(&self, access_token: &str) -> Result<UserId, AuthError>;
}

/// Persistence operations for users, credentials and refresh tokens.
///
/// Every operation fails with `StoreUnavailable` when the backend does.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    async fn find_user_by_email(&self, email: &EmailAddress) -> Result<Option<User>, AuthError>;

    /// Insert a user; id and creation time are assigned by the store.
    ///
    /// # Errors
    /// * `DuplicateEmail` - Email uniqueness constraint violated
    async fn create_user(
        &self,
        name: &DisplayName,
        email: &EmailAddress,
    ) -> Result<User, AuthError>;

    async fn create_credential(
        &self,
        user_id: &UserId,
        password_hash: &str,
    ) -> Result<Credential, AuthError>;

    /// Insert a user together with their credential.
    ///
    /// The default runs the two inserts one after the other; stores that
    /// support transactions override it so neither row exists without the other.
    async fn create_user_with_credential(
        &self,
        name: &DisplayName,
        email: &EmailAddress,
        password_hash: &str,
    ) -> Result<User, AuthError> {
        let user = self.create_user(name, email).await?;
        self.create_credential(&user.id, password_hash).await?;
        Ok(user)
    }

    async fn find_credential_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Credential>, AuthError>;

    async fn create_refresh_token(
        &self,
        user_id: &UserId,
        token: &str,
    ) -> Result<RefreshToken, AuthError>;

    async fn find_refresh_token(&self, token: &str) -> Result<Option<RefreshToken>, AuthError>;

    /// Delete the row matching `token` exactly.
    ///
    /// # Returns
    /// Number of rows deleted (0 or 1)
    async fn delete_refresh_token(&self, token: &str) -> Result<u64, AuthError>;
}
