//! HTML extraction for comic pages
//!
//! This module owns every assumption about the archive's markup shape. A
//! page's markup is parsed once and yields both things the driver needs:
//! the comic image (if any) and the next-page link (if any). Absence is a
//! value (`None`), never an error - a page without an image is skipped, a
//! page without a next-link ends the crawl.

use scraper::{Html, Selector};
use url::Url;

/// The payload extracted from one archive page
#[derive(Debug, Clone, PartialEq)]
pub struct ComicEntry {
    /// Absolute address of the comic image
    pub image_url: Url,

    /// Caption/tooltip text, empty when the page carries none
    pub caption: String,
}

/// Extracted information from one archive page
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPage {
    /// The comic image and caption, `None` when the page has no image
    pub comic: Option<ComicEntry>,

    /// Resolved address of the next page, `None` at the end of the archive
    pub next_url: Option<Url>,
}

/// Parses a page's markup and extracts the comic image and next-page link
///
/// The document is parsed once and both lookups run against it:
///
/// - The comic image is the first element matching `image_selector` with a
///   non-empty `src` attribute; the `src` is resolved against the page's
///   own URL and the caption comes from the `title` attribute (empty when
///   absent).
/// - The next-page link is the first element matching `next_selector` with
///   a non-empty `href`, resolved the same way.
///
/// An element that is missing, has an empty attribute, or whose attribute
/// does not resolve to a URL yields `None` for that half of the result -
/// "no image here" and "no further pages" are control flow, not errors.
pub fn parse_page(
    html: &str,
    page_url: &Url,
    image_selector: &Selector,
    next_selector: &Selector,
) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        comic: extract_comic(&document, page_url, image_selector),
        next_url: extract_next_url(&document, page_url, next_selector),
    }
}

/// Extracts the comic image and its caption from a parsed document
fn extract_comic(document: &Html, page_url: &Url, image_selector: &Selector) -> Option<ComicEntry> {
    let element = document.select(image_selector).next()?;
    let src = element.value().attr("src")?.trim();
    if src.is_empty() {
        return None;
    }

    let image_url = page_url.join(src).ok()?;
    let caption = element.value().attr("title").unwrap_or("").to_string();

    Some(ComicEntry { image_url, caption })
}

/// Extracts the next-page link from a parsed document
fn extract_next_url(document: &Html, page_url: &Url, next_selector: &Selector) -> Option<Url> {
    let element = document.select(next_selector).next()?;
    let href = element.value().attr("href")?.trim();
    if href.is_empty() {
        return None;
    }

    page_url.join(href).ok()
}
