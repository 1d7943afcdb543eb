use chrono::Duration;

use super::claims::Claims;
use super::claims::TokenKind;
use super::errors::JwtError;
use super::handler::JwtHandler;

/// Issues and verifies the two token classes.
///
/// Access and refresh tokens are signed with distinct secrets, so a leaked
/// access secret cannot mint refresh tokens and vice versa. Verification
/// checks signature, expiry and kind only; it never consults storage.
pub struct TokenService {
    access: JwtHandler,
    refresh: JwtHandler,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    pub const DEFAULT_ACCESS_TTL_SECS: i64 = 15 * 60;
    pub const DEFAULT_REFRESH_TTL_SECS: i64 = 24 * 60 * 60;

    /// Create a token service with default lifetimes (15 minutes / 1 day).
    ///
    /// # Arguments
    /// * `access_secret` - Secret for signing access tokens
    /// * `refresh_secret` - Secret for signing refresh tokens
    pub fn new(access_secret: &[u8], refresh_secret: &[u8]) -> Self {
        Self {
            access: JwtHandler::new(access_secret),
            refresh: JwtHandler::new(refresh_secret),
            access_ttl: Duration::seconds(Self::DEFAULT_ACCESS_TTL_SECS),
            refresh_ttl: Duration::seconds(Self::DEFAULT_REFRESH_TTL_SECS),
        }
    }

    /// Override token lifetimes.
    pub fn with_ttls(mut self, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        self.access_ttl = access_ttl;
        self.refresh_ttl = refresh_ttl;
        self
    }

    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    pub fn issue_access_token(&self, user_id: &str) -> Result<String, JwtError> {
        let claims = Claims::for_user(user_id, TokenKind::Access, self.access_ttl);
        self.access.encode(&claims)
    }

    pub fn issue_refresh_token(&self, user_id: &str) -> Result<String, JwtError> {
        let claims = Claims::for_user(user_id, TokenKind::Refresh, self.refresh_ttl);
        self.refresh.encode(&claims)
    }

    pub fn verify_access_token(&self, token: &str) -> Result<Claims, JwtError> {
        Self::verify(&self.access, token, TokenKind::Access)
    }

    pub fn verify_refresh_token(&self, token: &str) -> Result<Claims, JwtError> {
        Self::verify(&self.refresh, token, TokenKind::Refresh)
    }

    fn verify(handler: &JwtHandler, token: &str, expected: TokenKind) -> Result<Claims, JwtError> {
        let claims: Claims = handler.decode(token)?;

        if claims.kind != expected {
            return Err(JwtError::WrongKind {
                expected: expected.to_string(),
                actual: claims.kind.to_string(),
            });
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCESS_SECRET: &[u8] = b"access_secret_at_least_32_bytes_long!";
    const REFRESH_SECRET: &[u8] = b"refresh_secret_at_least_32_bytes_long";

    fn service() -> TokenService {
        TokenService::new(ACCESS_SECRET, REFRESH_SECRET)
    }

    #[test]
    fn test_default_ttls() {
        let service = service();
        assert_eq!(service.access_ttl(), Duration::minutes(15));
        assert_eq!(service.refresh_ttl(), Duration::days(1));
    }

    #[test]
    fn test_access_token_round_trip() {
        let service = service();

        let token = service.issue_access_token("user123").unwrap();
        let claims = service.verify_access_token(&token).unwrap();

        assert_eq!(claims.user_id(), "user123");
        assert_eq!(claims.kind, TokenKind::Access);
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn test_refresh_token_round_trip() {
        let service = service();

        let token = service.issue_refresh_token("user123").unwrap();
        let claims = service.verify_refresh_token(&token).unwrap();

        assert_eq!(claims.user_id(), "user123");
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn test_token_classes_are_not_interchangeable() {
        let service = service();

        let access = service.issue_access_token("user123").unwrap();
        let refresh = service.issue_refresh_token("user123").unwrap();

        assert!(matches!(
            service.verify_refresh_token(&access),
            Err(JwtError::InvalidToken(_))
        ));
        assert!(matches!(
            service.verify_access_token(&refresh),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_kind_checked_even_with_shared_secret() {
        let service = TokenService::new(ACCESS_SECRET, ACCESS_SECRET);

        let access = service.issue_access_token("user123").unwrap();

        assert!(matches!(
            service.verify_refresh_token(&access),
            Err(JwtError::WrongKind { .. })
        ));
    }

    #[test]
    fn test_tokens_issued_back_to_back_differ() {
        let service = service();

        let first = service.issue_access_token("user123").unwrap();
        let second = service.issue_access_token("user123").unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_expired_tokens_are_rejected() {
        let service = service().with_ttls(Duration::seconds(-30), Duration::seconds(-30));

        let access = service.issue_access_token("user123").unwrap();
        let refresh = service.issue_refresh_token("user123").unwrap();

        assert_eq!(
            service.verify_access_token(&access),
            Err(JwtError::TokenExpired)
        );
        assert_eq!(
            service.verify_refresh_token(&refresh),
            Err(JwtError::TokenExpired)
        );
    }

    #[test]
    fn test_token_from_other_deployment_is_rejected() {
        let ours = service();
        let theirs = TokenService::new(
            b"other_access_secret_32_bytes_long!!",
            b"other_refresh_secret_32_bytes_long!",
        );

        let token = theirs.issue_access_token("user123").unwrap();
        assert!(ours.verify_access_token(&token).is_err());
    }
}
