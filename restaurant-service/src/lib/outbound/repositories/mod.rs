pub mod credentials;
pub mod records;

pub use credentials::PostgresCredentialStore;
pub use records::PostgresRecordRepository;
