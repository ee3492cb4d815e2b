use crate::error::FetchError;
use crate::scrapers::traits::Fetcher;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

/// Plain HTTP fetcher
///
/// Sends bare GET requests: no custom headers, no timeout, no retries.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        debug!("Fetching URL: {}", url);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            warn!("{} returned status: {}", url, response.status());
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let body = response.text().await?;
        debug!("Downloaded {} bytes of HTML", body.len());

        Ok(body)
    }
}

/// Resolve an entry link against the page it was found on
pub fn resolve_link(base: &str, href: &str) -> Result<String, FetchError> {
    let href = href.trim();
    if href.is_empty() {
        return Err(FetchError::MissingUrl);
    }

    let base = Url::parse(base).map_err(|e| FetchError::InvalidUrl(format!("{base}: {e}")))?;
    base.join(href)
        .map(String::from)
        .map_err(|e| FetchError::InvalidUrl(format!("{href}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://www.westcoast.tas.gov.au/planning/advertised/";

    #[test]
    fn test_resolve_absolute_link() {
        let url = resolve_link(BASE, "https://example.com/da/1").unwrap();
        assert_eq!(url, "https://example.com/da/1");
    }

    #[test]
    fn test_resolve_relative_link() {
        assert_eq!(
            resolve_link(BASE, "/da-2024-07/").unwrap(),
            "https://www.westcoast.tas.gov.au/da-2024-07/"
        );
        assert_eq!(
            resolve_link(BASE, "da-2024-07").unwrap(),
            "https://www.westcoast.tas.gov.au/planning/advertised/da-2024-07"
        );
    }

    #[test]
    fn test_resolve_empty_link() {
        assert!(matches!(resolve_link(BASE, "  "), Err(FetchError::MissingUrl)));
    }

    #[test]
    fn test_resolve_bad_base() {
        assert!(matches!(
            resolve_link("not a url", "/x"),
            Err(FetchError::InvalidUrl(_))
        ));
    }
}
