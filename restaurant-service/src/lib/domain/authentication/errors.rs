use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for display name validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("name is required")]
    Empty,

    #[error("name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),

    #[error("email too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for password policy violations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("password should contain at least {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("password should contain at least 1 uppercase character")]
    MissingUppercase,

    #[error("password should contain at least 1 lowercase character")]
    MissingLowercase,

    #[error("password should contain at least 1 numeric character")]
    MissingDigit,

    #[error("password should contain at least 1 special character")]
    MissingSpecialCharacter,

    #[error("password should not contain white spaces")]
    ContainsWhitespace,
}

/// Top-level error for authentication operations.
///
/// Every variant maps to exactly one HTTP status at the transport boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("There is already a user created with the email: {0}")]
    DuplicateEmail(String),

    /// Unknown email and wrong password are deliberately the same error.
    #[error("Incorrect password or email")]
    FailedLogin,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Storage backend failed: {0}")]
    StoreUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
