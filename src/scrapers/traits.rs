use crate::error::FetchError;
use async_trait::async_trait;

/// Retrieves page bodies over some transport.
///
/// The pipeline only sees this trait, so runs can be replayed against
/// canned pages.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// GET the URL and return the body as text
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}
