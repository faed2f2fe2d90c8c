//! HTML anchor extraction
//!
//! One pass over a fetched document, yielding every `<a>` element that
//! carries an `href` attribute, in document order. Resolution and
//! filtering of the raw hrefs happen later in the coordinator; this module
//! reports what the document says, verbatim.

use scraper::{Html, Selector};

/// One anchor element: display text plus the raw href attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    /// The anchor's text content, whitespace-trimmed
    pub text: String,

    /// The href attribute, untouched
    pub href: String,
}

/// Extracts all anchors from an HTML document, in document order
///
/// Anchors without an href attribute are not anchors for crawling
/// purposes and are not yielded. Anchors with an empty href are yielded;
/// the coordinator records them without following.
///
/// # Example
///
/// ```
/// use linktrail::crawler::extract_anchors;
///
/// let html = r#"<html><body><a href="/a">First</a><a href="/b">Second</a></body></html>"#;
/// let anchors = extract_anchors(html);
/// assert_eq!(anchors.len(), 2);
/// assert_eq!(anchors[0].text, "First");
/// assert_eq!(anchors[0].href, "/a");
/// ```
pub fn extract_anchors(html: &str) -> Vec<Anchor> {
    let document = Html::parse_document(html);

    // The selector literal is valid; parse cannot fail on it
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| {
            let href = element.value().attr("href")?;
            Some(Anchor {
                text: element.text().collect::<String>().trim().to_string(),
                href: href.to_string(),
            })
        })
        .collect()
}
