use crate::models::Missing;

/// Trim and collapse runs of whitespace to a single space
pub fn clean_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Clean an optional value, substituting the placeholder when it is absent
/// or empty after cleaning
pub fn or_missing(value: Option<String>, missing: Missing) -> String {
    value
        .map(|v| clean_text(&v))
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| missing.as_str().to_string())
}

/// Today's date in ISO form, stamped once per run
pub fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}
