//! Listing page parser
//!
//! Finds the repeating entry nodes of a listing page and reads the natural
//! key, address and link from each one. Missing elements never fail; they
//! become placeholder text.

use crate::models::Missing;
use crate::scrapers::normalize::or_missing;
use crate::scrapers::types::{ListingEntry, PageTemplate};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

static CARD_ITEM: Lazy<Selector> = Lazy::new(|| Selector::parse(".card-listing__item").unwrap());
static CARD_TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse(".card-listing__title").unwrap());
static CARD_CONTENT: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".card-listing__content p").unwrap());
static CARD_LINK: Lazy<Selector> = Lazy::new(|| Selector::parse(".card-listing__link").unwrap());

static POST_ITEM: Lazy<Selector> = Lazy::new(|| Selector::parse(".post-inner-wrap").unwrap());
static POST_TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse(".post-title").unwrap());
static POST_TITLE_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".post-title a[href]").unwrap());
static ANY_LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());
static POST_EXCERPT: Lazy<Selector> = Lazy::new(|| Selector::parse(".post-excerpt").unwrap());

// "DA2024/07: 12 Smith Street"
static TITLE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(DA\d{4}/\d{2}):\s*(.*)").unwrap());

/// Entry nodes of the listing page, in document order
pub fn entry_nodes<'a>(
    document: &'a Html,
    template: PageTemplate,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    let selector: &'static Selector = match template {
        PageTemplate::CardListing | PageTemplate::CardListingNoDetail => &*CARD_ITEM,
        PageTemplate::PostExcerpt => &*POST_ITEM,
    };
    document.select(selector)
}

/// Read one entry node
pub fn parse_entry(node: ElementRef<'_>, template: PageTemplate) -> ListingEntry {
    match template {
        PageTemplate::CardListing | PageTemplate::CardListingNoDetail => parse_card(node),
        PageTemplate::PostExcerpt => parse_post(node),
    }
}

/// Parse a listing page into owned entries
pub fn parse_listing(html: &str, template: PageTemplate) -> Vec<ListingEntry> {
    let document = Html::parse_document(html);
    entry_nodes(&document, template)
        .map(|node| parse_entry(node, template))
        .collect()
}

/// Split a post title into council reference and address
///
/// Each half falls back to its own placeholder.
pub fn split_title(title: &str) -> (String, String) {
    let captures = TITLE_PATTERN.captures(title);
    let group = |i: usize| {
        captures
            .as_ref()
            .and_then(|c| c.get(i))
            .map(|m| m.as_str().to_string())
    };

    (
        or_missing(group(1), Missing::CouncilReference),
        or_missing(group(2), Missing::Address),
    )
}

fn parse_card(node: ElementRef<'_>) -> ListingEntry {
    ListingEntry {
        council_reference: or_missing(first_text(node, &CARD_TITLE), Missing::CouncilReference),
        address: or_missing(first_text(node, &CARD_CONTENT), Missing::Address),
        link: first_href(node, &CARD_LINK).unwrap_or_default(),
        excerpt: None,
    }
}

fn parse_post(node: ElementRef<'_>) -> ListingEntry {
    let title = first_text(node, &POST_TITLE).unwrap_or_default();
    let (council_reference, address) = split_title(&title);

    ListingEntry {
        council_reference,
        address,
        link: first_href(node, &POST_TITLE_LINK)
            .or_else(|| first_href(node, &ANY_LINK))
            .unwrap_or_default(),
        excerpt: first_text(node, &POST_EXCERPT),
    }
}

fn first_text(node: ElementRef<'_>, selector: &Selector) -> Option<String> {
    node.select(selector)
        .next()
        .map(|el| el.text().collect::<String>())
}

fn first_href(node: ElementRef<'_>, selector: &Selector) -> Option<String> {
    node.select(selector)
        .next()
        .and_then(|el| el.value().attr("href"))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD_PAGE: &str = r#"
        <html><body>
          <div class="card-listing">
            <div class="card-listing__item">
              <a class="card-listing__link" href="/da-2024-07/">
                <h3 class="card-listing__title"> DA2024/07 </h3>
                <div class="card-listing__content"><p>12 Smith
                  Street, Queenstown</p></div>
              </a>
            </div>
            <div class="card-listing__item">
              <h3 class="card-listing__title">DA2024/08</h3>
            </div>
          </div>
        </body></html>
    "#;

    const POST_PAGE: &str = r#"
        <html><body>
          <div class="post-inner-wrap">
            <h2 class="post-title"><a href="https://example.com/da2024-07">DA2024/07: 12 Smith Street</a></h2>
            <div class="post-excerpt">Build a shed. Representations must be made by 14 March 2024. Contact council.</div>
          </div>
          <div class="post-inner-wrap">
            <h2 class="post-title">Notice of public meeting</h2>
          </div>
        </body></html>
    "#;

    #[test]
    fn test_split_title() {
        let (reference, address) = split_title("DA2024/07: 12 Smith Street");
        assert_eq!(reference, "DA2024/07");
        assert_eq!(address, "12 Smith Street");
    }

    #[test]
    fn test_split_title_no_match() {
        let (reference, address) = split_title("Notice of public meeting");
        assert_eq!(reference, "Council Reference not found");
        assert_eq!(address, "Address not found");
    }

    #[test]
    fn test_split_title_halves_are_independent() {
        let (reference, address) = split_title("DA2024/07: ");
        assert_eq!(reference, "DA2024/07");
        assert_eq!(address, "Address not found");
    }

    #[test]
    fn test_parse_card_listing() {
        let entries = parse_listing(CARD_PAGE, PageTemplate::CardListing);
        assert_eq!(entries.len(), 2);

        let first = &entries[0];
        assert_eq!(first.council_reference, "DA2024/07");
        assert_eq!(first.address, "12 Smith Street, Queenstown");
        assert_eq!(first.link, "/da-2024-07/");
        assert!(first.excerpt.is_none());

        let second = &entries[1];
        assert_eq!(second.council_reference, "DA2024/08");
        assert_eq!(second.address, "Address not found");
        assert_eq!(second.link, "");
    }

    #[test]
    fn test_card_template_ignores_posts() {
        assert!(parse_listing(POST_PAGE, PageTemplate::CardListingNoDetail).is_empty());
    }

    #[test]
    fn test_parse_post_listing() {
        let entries = parse_listing(POST_PAGE, PageTemplate::PostExcerpt);
        assert_eq!(entries.len(), 2);

        let first = &entries[0];
        assert_eq!(first.council_reference, "DA2024/07");
        assert_eq!(first.address, "12 Smith Street");
        assert_eq!(first.link, "https://example.com/da2024-07");
        assert!(first.excerpt.as_deref().unwrap().starts_with("Build a shed."));

        let second = &entries[1];
        assert_eq!(second.council_reference, "Council Reference not found");
        assert_eq!(second.address, "Address not found");
        assert!(second.excerpt.is_none());
    }

    #[test]
    fn test_entry_nodes_is_lazy_over_document() {
        let document = Html::parse_document(CARD_PAGE);
        let mut nodes = entry_nodes(&document, PageTemplate::CardListing);
        assert!(nodes.next().is_some());
        assert!(nodes.next().is_some());
        assert!(nodes.next().is_none());
    }
}
