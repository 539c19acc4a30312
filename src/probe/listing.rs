//! Autogenerated directory index detection.
//!
//! Only the document title is inspected. Apache and nginx both emit
//! `Index of /<dir>`; localized or themed listings are missed.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

const LISTING_MARKER: &str = "Index of /";

static TITLE: Lazy<Option<Selector>> = Lazy::new(|| Selector::parse("title").ok());

/// Text of the first `<title>` element, if any.
pub fn document_title(html: &str) -> Option<String> {
    let selector = TITLE.as_ref()?;
    let document = Html::parse_document(html);
    let title = document.select(selector).next()?;
    Some(title.text().collect::<String>())
}

pub fn is_directory_listing(html: &str) -> bool {
    document_title(html)
        .map(|t| t.contains(LISTING_MARKER))
        .unwrap_or(false)
}
