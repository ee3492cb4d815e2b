//! Entry enrichment
//!
//! Card layouts link to a detail page of labelled paragraphs; post layouts
//! carry everything in one excerpt that is split on a marker phrase.

use crate::models::Missing;
use crate::scrapers::http::resolve_link;
use crate::scrapers::normalize::{clean_text, or_missing};
use crate::scrapers::types::DetailFields;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

pub const PROPOSAL_LABEL: &str = "Proposal:";
pub const ADDRESS_LABEL: &str = "Address:";
pub const DATED_LABEL: &str = "Dated:";
pub const DOCUMENTS_CAPTION: &str = "SUPPORTING DOCUMENTS";
pub const NOTICE_MARKER: &str = "Representations must";

static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());
static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());

static NOTICE_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Representations must be made by (.+?)\.").unwrap());

/// Extract the labelled fields of a card detail page
///
/// `page_url` is the address the page was fetched from; the document link is
/// resolved against it.
pub fn parse_detail_page(html: &str, page_url: &str) -> DetailFields {
    let document = Html::parse_document(html);
    let document_link = captioned_link(&document, DOCUMENTS_CAPTION)
        .map(|href| resolve_link(page_url, &href).unwrap_or(href));

    DetailFields {
        description: or_missing(labelled_value(&document, PROPOSAL_LABEL), Missing::Description),
        address: or_missing(labelled_value(&document, ADDRESS_LABEL), Missing::Address),
        date_received: or_missing(labelled_value(&document, DATED_LABEL), Missing::DateReceived),
        on_notice_to: String::new(),
        document_link: or_missing(document_link, Missing::SupportingDocuments),
    }
}

/// Split a post excerpt into the description and the notice deadline
pub fn split_excerpt(excerpt: &str) -> (String, String) {
    let excerpt = clean_text(excerpt);
    let description = excerpt
        .split(NOTICE_MARKER)
        .next()
        .map(str::to_string);
    let on_notice_to = NOTICE_DATE
        .captures(&excerpt)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string());

    (
        or_missing(description, Missing::Description),
        or_missing(on_notice_to, Missing::OnNoticeTo),
    )
}

/// Build the enrichment fields of a post entry from its excerpt and link
///
/// The address stays the one parsed from the post title.
pub fn excerpt_fields(excerpt: Option<&str>, address: &str, link: &str) -> DetailFields {
    let (description, on_notice_to) = match excerpt {
        Some(text) => split_excerpt(text),
        None => (
            Missing::Description.to_string(),
            Missing::OnNoticeTo.to_string(),
        ),
    };

    DetailFields {
        description,
        address: address.to_string(),
        date_received: Missing::DateReceived.to_string(),
        on_notice_to,
        document_link: or_missing(Some(link.to_string()), Missing::SupportingDocuments),
    }
}

/// Text of the first paragraph containing `label`, with the label removed
fn labelled_value(document: &Html, label: &str) -> Option<String> {
    document
        .select(&PARAGRAPH)
        .map(|p| p.text().collect::<String>())
        .find(|text| text.contains(label))
        .map(|text| text.replacen(label, "", 1))
}

/// `href` of the first anchor whose text is exactly `caption`
fn captioned_link(document: &Html, caption: &str) -> Option<String> {
    document
        .select(&ANCHOR)
        .find(|a| clean_text(&a.text().collect::<String>()) == caption)
        .and_then(|a| a.value().attr("href"))
        .map(str::to_string)
}
