use serde::Deserialize;
use std::fmt;

use crate::models::Missing;

/// Layout of the council's listing page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PageTemplate {
    /// Summary cards, each linking to a detail page with labelled paragraphs
    #[default]
    CardListing,
    /// Blog-style posts with a `DA####/##: address` title and an excerpt
    PostExcerpt,
    /// Summary cards whose link is stored as-is, without visiting it
    CardListingNoDetail,
}

impl PageTemplate {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CardListing => "card_listing",
            Self::PostExcerpt => "post_excerpt",
            Self::CardListingNoDetail => "card_listing_no_detail",
        }
    }
}

impl fmt::Display for PageTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields read from one entry node of the listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub council_reference: String,
    pub address: String,
    /// Raw `href` of the entry's link, empty when the node has none
    pub link: String,
    /// Excerpt text for post layouts
    pub excerpt: Option<String>,
}

/// Fields that come from enrichment rather than the listing itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailFields {
    pub description: String,
    /// Stored address; card detail pages supply their own
    pub address: String,
    pub date_received: String,
    pub on_notice_to: String,
    pub document_link: String,
}

impl DetailFields {
    /// Values used when the detail page could not be retrieved
    pub fn not_found() -> Self {
        Self {
            description: Missing::Description.to_string(),
            address: Missing::Address.to_string(),
            date_received: Missing::DateReceived.to_string(),
            on_notice_to: String::new(),
            document_link: Missing::SupportingDocuments.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        template: PageTemplate,
    }

    #[test]
    fn test_template_from_toml() {
        let w: Wrapper = toml::from_str("template = \"post_excerpt\"").unwrap();
        assert_eq!(w.template, PageTemplate::PostExcerpt);

        let w: Wrapper = toml::from_str("template = \"card_listing_no_detail\"").unwrap();
        assert_eq!(w.template, PageTemplate::CardListingNoDetail);
    }

    #[test]
    fn test_not_found_fields() {
        let fields = DetailFields::not_found();
        assert_eq!(fields.description, "Description not found");
        assert_eq!(fields.date_received, "Date not found");
        assert_eq!(fields.document_link, "Supporting documents not found");
        assert_eq!(fields.address, "Address not found");
    }
}
