use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::TokenPair;
use uuid::Uuid;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::LoginCommand;
use crate::domain::authentication::models::RegisterCommand;
use crate::domain::authentication::models::UserId;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::authentication::ports::CredentialStore;

/// Domain service implementation for authentication.
///
/// Orchestrates the credential store, password hashing and token issuance.
/// Password hashing and verification run on the blocking thread pool.
pub struct AuthService<CS>
where
    CS: CredentialStore,
{
    store: Arc<CS>,
    authenticator: Arc<Authenticator>,
    decoy_hash: String,
}

impl<CS> AuthService<CS>
where
    CS: CredentialStore,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// Computes one throwaway hash up front; logins for unknown emails verify
    /// against it so they cost the same as a wrong password.
    pub fn new(store: Arc<CS>, authenticator: Arc<Authenticator>) -> Self {
        let decoy_hash = authenticator
            .hash_password(&Uuid::new_v4().to_string())
            .unwrap_or_default();

        Self {
            store,
            authenticator,
            decoy_hash,
        }
    }

    async fn hash_password(&self, password: String) -> Result<String, AuthError> {
        let authenticator = Arc::clone(&self.authenticator);

        tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
            .await
            .map_err(|e| AuthError::Internal(format!("Password hashing task failed: {}", e)))?
            .map_err(|e| AuthError::Internal(format!("Password hashing failed: {}", e)))
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool, AuthError> {
        let authenticator = Arc::clone(&self.authenticator);

        tokio::task::spawn_blocking(move || authenticator.verify_password(&password, &hash))
            .await
            .map_err(|e| AuthError::Internal(format!("Password verification task failed: {}", e)))?
            .map_err(|e| AuthError::Internal(format!("Password verification failed: {}", e)))
    }

    /// Cryptographic half of refresh-token validation.
    fn verify_refresh_token(&self, refresh_token: &str) -> Result<UserId, AuthError> {
        if refresh_token.is_empty() {
            return Err(AuthError::Unauthorized);
        }

        let claims = self
            .authenticator
            .verify_refresh_token(refresh_token)
            .map_err(|e| {
                tracing::debug!(error = %e, "Refresh token rejected");
                AuthError::Unauthorized
            })?;

        UserId::from_string(claims.user_id()).map_err(|e| {
            tracing::warn!(error = %e, "Refresh token carries a malformed subject");
            AuthError::Unauthorized
        })
    }
}

#[async_trait]
impl<CS> AuthServicePort for AuthService<CS>
where
    CS: CredentialStore,
{
    async fn register(&self, command: RegisterCommand) -> Result<(), AuthError> {
        if self.store.find_user_by_email(&command.email).await?.is_some() {
            return Err(AuthError::DuplicateEmail(command.email.to_string()));
        }

        let password_hash = self
            .hash_password(command.password.expose().to_string())
            .await?;

        let user = self
            .store
            .create_user_with_credential(&command.name, &command.email, &password_hash)
            .await?;

        tracing::info!(user_id = %user.id, "User registered");

        Ok(())
    }

    async fn login(&self, command: LoginCommand) -> Result<TokenPair, AuthError> {
        let Some(user) = self.store.find_user_by_email(&command.email).await? else {
            let _ = self
                .verify_password(command.password, self.decoy_hash.clone())
                .await;
            return Err(AuthError::FailedLogin);
        };

        let Some(credential) = self.store.find_credential_by_user_id(&user.id).await? else {
            tracing::warn!(user_id = %user.id, "User has no stored credential");
            return Err(AuthError::FailedLogin);
        };

        if !self
            .verify_password(command.password, credential.password_hash)
            .await?
        {
            return Err(AuthError::FailedLogin);
        }

        let pair = self
            .authenticator
            .issue_token_pair(&user.id.to_string())
            .map_err(|e| AuthError::Internal(format!("Token generation failed: {}", e)))?;

        self.store
            .create_refresh_token(&user.id, &pair.refresh_token)
            .await?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(pair)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<String, AuthError> {
        let user_id = self.verify_refresh_token(refresh_token)?;

        let stored = self
            .store
            .find_refresh_token(refresh_token)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Refresh token lookup failed");
                AuthError::Unauthorized
            })?
            .ok_or(AuthError::Unauthorized)?;

        if stored.user_id != user_id {
            tracing::warn!(user_id = %user_id, "Stored refresh token belongs to another user");
            return Err(AuthError::Unauthorized);
        }

        self.authenticator
            .issue_access_token(&user_id.to_string())
            .map_err(|e| AuthError::Internal(format!("Token generation failed: {}", e)))
    }

    async fn logout(&self, refresh_token: &str) -> Result<(), AuthError> {
        let user_id = self.verify_refresh_token(refresh_token)?;

        let deleted = self
            .store
            .delete_refresh_token(refresh_token)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Refresh token deletion failed");
                AuthError::Unauthorized
            })?;

        if deleted == 0 {
            return Err(AuthError::Unauthorized);
        }

        tracing::info!(user_id = %user_id, "Refresh token revoked");

        Ok(())
    }

    fn verify_access_token(&self, access_token: &str) -> Result<UserId, AuthError> {
        let claims = self
            .authenticator
            .verify_access_token(access_token)
            .map_err(|e| {
                tracing::debug!(error = %e, "Access token rejected");
                AuthError::Unauthorized
            })?;

        UserId::from_string(claims.user_id()).map_err(|_| AuthError::Unauthorized)
    }
}
