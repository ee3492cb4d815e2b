//! One scrape run: listing fetch, entry parsing, enrichment, storage
//!
//! Everything runs in sequence. Each entry is carried through the stages in
//! its own [`ListingEntry`] value; nothing is shared between entries.

use crate::config::ScraperConfig;
use crate::error::ScrapeError;
use crate::models::{ApplicationRecord, Missing};
use crate::scrapers::detail::{excerpt_fields, parse_detail_page};
use crate::scrapers::http::resolve_link;
use crate::scrapers::listing::parse_listing;
use crate::scrapers::normalize::today;
use crate::scrapers::traits::Fetcher;
use crate::scrapers::types::{DetailFields, ListingEntry, PageTemplate};
use crate::store::{SaveOutcome, Store};
use tracing::{error, info, warn};

/// Counts reported at the end of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub entries: usize,
    pub saved: usize,
    pub skipped: usize,
    pub detail_failures: usize,
}

pub struct Pipeline<F: Fetcher> {
    fetcher: F,
    store: Store,
    listing_url: String,
    template: PageTemplate,
}

impl<F: Fetcher> Pipeline<F> {
    pub fn new(fetcher: F, store: Store, config: &ScraperConfig) -> Self {
        Self {
            fetcher,
            store,
            listing_url: config.listing_url.clone(),
            template: config.template,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Run once against the listing page
    ///
    /// A listing fetch failure returns before anything is parsed or stored.
    /// Detail fetch failures only degrade the affected entry.
    pub async fn run(&self) -> Result<RunSummary, ScrapeError> {
        info!("Fetching page content from: {}", self.listing_url);
        let html = self
            .fetcher
            .fetch(&self.listing_url)
            .await
            .map_err(|source| ScrapeError::ListFetch {
                url: self.listing_url.clone(),
                source,
            })?;
        info!("Successfully fetched page content.");

        let entries = parse_listing(&html, self.template);
        info!(
            "Found {} entries using the {} template",
            entries.len(),
            self.template
        );

        let date_scraped = today();
        let mut summary = RunSummary::default();

        for entry in entries {
            summary.entries += 1;

            let fields = match self.enrich(&entry).await {
                Ok(fields) => fields,
                Err(e) => {
                    error!("Failed to fetch detailed application: {}", e);
                    summary.detail_failures += 1;
                    DetailFields::not_found()
                }
            };

            let record = build_record(entry, fields, &date_scraped);
            if !record.has_reference() {
                warn!("Entry {} has no council reference", summary.entries);
            }
            log_record(&record);

            match self.store.save(&record)? {
                SaveOutcome::Inserted => summary.saved += 1,
                SaveOutcome::Skipped => summary.skipped += 1,
            }
        }

        info!(
            "Run complete: {} entries, {} saved, {} skipped, {} detail failures",
            summary.entries, summary.saved, summary.skipped, summary.detail_failures
        );

        Ok(summary)
    }

    async fn enrich(&self, entry: &ListingEntry) -> Result<DetailFields, ScrapeError> {
        match self.template {
            PageTemplate::CardListing => {
                let (url, html) = self.fetch_detail(&entry.link).await?;
                Ok(parse_detail_page(&html, &url))
            }
            PageTemplate::PostExcerpt => {
                let link = self.absolute_link(&entry.link);
                Ok(excerpt_fields(entry.excerpt.as_deref(), &entry.address, &link))
            }
            PageTemplate::CardListingNoDetail => {
                let link = self.absolute_link(&entry.link);
                Ok(DetailFields {
                    address: entry.address.clone(),
                    document_link: if link.is_empty() {
                        Missing::SupportingDocuments.to_string()
                    } else {
                        link
                    },
                    ..DetailFields::not_found()
                })
            }
        }
    }

    /// Resolved detail URL and its body
    async fn fetch_detail(&self, link: &str) -> Result<(String, String), ScrapeError> {
        let url = resolve_link(&self.listing_url, link).map_err(|source| {
            ScrapeError::DetailFetch {
                url: link.to_string(),
                source,
            }
        })?;

        info!("Fetching detailed application from: {}", url);
        match self.fetcher.fetch(&url).await {
            Ok(html) => Ok((url, html)),
            Err(source) => Err(ScrapeError::DetailFetch { url, source }),
        }
    }

    /// Resolved link, or the raw text when it cannot be resolved
    fn absolute_link(&self, link: &str) -> String {
        resolve_link(&self.listing_url, link).unwrap_or_else(|_| link.trim().to_string())
    }
}

fn build_record(entry: ListingEntry, fields: DetailFields, date_scraped: &str) -> ApplicationRecord {
    ApplicationRecord {
        council_reference: entry.council_reference,
        address: fields.address,
        description: fields.description,
        date_received: fields.date_received,
        on_notice_to: fields.on_notice_to,
        document_description: fields.document_link,
        date_scraped: date_scraped.to_string(),
        ..Default::default()
    }
}

fn log_record(record: &ApplicationRecord) {
    info!("Council Reference: {}", record.council_reference);
    info!("Address: {}", record.address);
    info!("Description: {}", record.description);
    info!("Date Received: {}", record.date_received);
    info!("On Notice To: {}", record.on_notice_to);
    info!("Supporting Documents Link: {}", record.document_description);
    info!("-----------------------------------");
}
