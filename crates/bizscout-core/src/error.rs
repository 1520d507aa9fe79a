use thiserror::Error;

/// All the ways things can go wrong in BizScout
///
/// We use thiserror here because it generates the boilerplate for us.
/// Life's too short to manually implement Display and Error traits.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Business lookup failed: {0}")]
    Lookup(#[from] bizscout_api::BizApiError),

    #[error("Store operation failed: {0}")]
    Store(#[from] bizscout_store::StoreError),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Business not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
