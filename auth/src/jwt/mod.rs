pub mod claims;
pub mod errors;
pub mod handler;
pub mod tokens;

pub use claims::Claims;
pub use claims::TokenKind;
pub use errors::JwtError;
pub use handler::JwtHandler;
pub use tokens::TokenService;
