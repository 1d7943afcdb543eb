//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure for services:
//! - Password hashing (bcrypt, tunable cost)
//! - Access/refresh JWT issuance and validation with separate secrets
//! - Authentication coordination
//!
//! Services define their own authentication ports and adapt these implementations.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::with_cost(4).unwrap();
//! let hash = hasher.hash("Password1@").unwrap();
//! let is_valid = hasher.verify("Password1@", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Tokens
//! ```
//! use auth::TokenService;
//!
//! let tokens = TokenService::new(
//!     b"access_secret_at_least_32_bytes_long!",
//!     b"refresh_secret_at_least_32_bytes_long",
//! );
//! let refresh = tokens.issue_refresh_token("user123").unwrap();
//! let claims = tokens.verify_refresh_token(&refresh).unwrap();
//! assert_eq!(claims.user_id(), "user123");
//!
//! // A refresh token is never accepted where an access token is expected.
//! assert!(tokens.verify_access_token(&refresh).is_err());
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, PasswordHasher, TokenService};
//!
//! let auth = Authenticator::new(
//!     PasswordHasher::with_cost(4).unwrap(),
//!     TokenService::new(
//!         b"access_secret_at_least_32_bytes_long!",
//!         b"refresh_secret_at_least_32_bytes_long",
//!     ),
//! );
//!
//! // Register: hash password
//! let hash = auth.hash_password("Password1@").unwrap();
//!
//! // Login: verify and issue the token pair
//! let pair = auth.authenticate("Password1@", &hash, "user123").unwrap();
//!
//! // Validate the access token
//! let claims = auth.verify_access_token(&pair.access_token).unwrap();
//! assert_eq!(claims.user_id(), "user123");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::TokenPair;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenKind;
pub use jwt::TokenService;
pub use password::PasswordError;
pub use password::PasswordHasher;
