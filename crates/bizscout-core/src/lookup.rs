use crate::{models::Business, Result};

/// Trait for the external business lookup - makes testing easier and keeps
/// the API client swappable behind one seam.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait BusinessLookup: Send + Sync {
    /// Search businesses by term and location
    async fn search(&self, term: &str, location: &str) -> Result<Vec<Business>>;

    /// Fetch one business by identifier
    async fn get(&self, id: &str) -> Result<Business>;
}
