use crate::error::ScrapeError;
use crate::scrapers::types::PageTemplate;
use crate::store::is_valid_table_name;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "PLANNING_SCOUT_CONFIG";
/// Config file picked up from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "scout.toml";

pub const DEFAULT_LISTING_URL: &str =
    "https://www.westcoast.tas.gov.au/planning-and-development/planning/advertised-development-applications/";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub listing_url: String,
    pub database_path: PathBuf,
    pub table_name: String,
    pub template: PageTemplate,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            listing_url: DEFAULT_LISTING_URL.to_string(),
            database_path: PathBuf::from("data.sqlite"),
            table_name: "west_coast".to_string(),
            template: PageTemplate::CardListing,
        }
    }
}

impl ScraperConfig {
    #[cfg(test)]
    pub fn with_listing_url(mut self, url: impl Into<String>) -> Self {
        self.listing_url = url.into();
        self
    }

    #[cfg(test)]
    pub fn with_template(mut self, template: PageTemplate) -> Self {
        self.template = template;
        self
    }

    /// Parse a TOML document; omitted keys keep their defaults
    pub fn from_toml(content: &str) -> Result<Self, ScrapeError> {
        let config: ScraperConfig =
            toml::from_str(content).map_err(|e| ScrapeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ScrapeError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ScrapeError::Config(format!("failed to read '{}': {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Config from `$PLANNING_SCOUT_CONFIG`, else `scout.toml`, else defaults
    pub fn discover() -> Result<Self, ScrapeError> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            info!("Loading config from {}", path);
            return Self::load(Path::new(&path));
        }

        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.exists() {
            info!("Loading config from {}", local.display());
            return Self::load(local);
        }

        Ok(Self::default())
    }

    pub fn validate(&self) -> Result<(), ScrapeError> {
        if url::Url::parse(&self.listing_url).is_err() {
            return Err(ScrapeError::Config(format!(
                "listing_url is not a valid URL: {}",
                self.listing_url
            )));
        }
        if !is_valid_table_name(&self.table_name) {
            return Err(ScrapeError::InvalidTableName(self.table_name.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScraperConfig::default();
        assert_eq!(config.listing_url, DEFAULT_LISTING_URL);
        assert_eq!(config.database_path, PathBuf::from("data.sqlite"));
        assert_eq!(config.table_name, "west_coast");
        assert_eq!(config.template, PageTemplate::CardListing);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml() {
        let config = ScraperConfig::from_toml(
            r#"
            table_name = "westcoast"
            template = "post_excerpt"
            "#,
        )
        .unwrap();
        assert_eq!(config.table_name, "westcoast");
        assert_eq!(config.template, PageTemplate::PostExcerpt);
        assert_eq!(config.listing_url, DEFAULT_LISTING_URL);
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            ScraperConfig::from_toml("table_name = \"drop table\""),
            Err(ScrapeError::InvalidTableName(_))
        ));
        assert!(matches!(
            ScraperConfig::from_toml("listing_url = \"nowhere\""),
            Err(ScrapeError::Config(_))
        ));
        assert!(matches!(
            ScraperConfig::from_toml("template = \"carousel\""),
            Err(ScrapeError::Config(_))
        ));
    }

    #[test]
    fn test_load_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("scout.toml");
        std::fs::write(&path, "database_path = \"/tmp/planning.sqlite\"\n").unwrap();

        let config = ScraperConfig::load(&path).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/tmp/planning.sqlite"));

        let missing = tmp.path().join("absent.toml");
        assert!(matches!(
            ScraperConfig::load(&missing),
            Err(ScrapeError::Config(_))
        ));
    }

    #[test]
    fn test_builders() {
        let config = ScraperConfig::default()
            .with_listing_url("https://example.com/listing")
            .with_template(PageTemplate::CardListingNoDetail);
        assert_eq!(config.listing_url, "https://example.com/listing");
        assert_eq!(config.template, PageTemplate::CardListingNoDetail);
    }
}
