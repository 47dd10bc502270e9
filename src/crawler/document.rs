//! Parsed HTML documents and the queries the crawl callbacks run on them
//!
//! The link collector and the record extractor only ever see an
//! `HtmlDocument`; they select elements, read attributes and read text through
//! it and never touch the network.

use scraper::{ElementRef, Html, Selector};
use url::Url;

/// A fetched page, parsed and tagged with the URL it was served from
///
/// `scraper::Html` is not `Send`, so documents are built and dropped on the
/// task that handles the response.
pub struct HtmlDocument {
    url: Url,
    html: Html,
}

impl HtmlDocument {
    /// Parses a response body into a queryable document
    ///
    /// HTML parsing is error-tolerant: any body yields a document, at worst
    /// an empty one.
    ///
    /// # Example
    ///
    /// ```
    /// use blog_harvest::HtmlDocument;
    /// use scraper::Selector;
    /// use url::Url;
    ///
    /// let url = Url::parse("https://example.com/post").unwrap();
    /// let doc = HtmlDocument::parse(url, "<h1>Hello</h1>");
    /// let h1 = Selector::parse("h1").unwrap();
    /// assert_eq!(doc.first_text(&h1), Some("Hello".to_string()));
    /// ```
    pub fn parse(url: Url, body: &str) -> Self {
        Self {
            url,
            html: Html::parse_document(body),
        }
    }

    /// The URL the document was served from; relative links resolve against it
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// First element matching the selector, in document order
    pub fn select_first(&self, selector: &Selector) -> Option<ElementRef<'_>> {
        self.html.select(selector).next()
    }

    /// All elements matching the selector, in document order
    pub fn select_all(&self, selector: &Selector) -> Vec<ElementRef<'_>> {
        self.html.select(selector).collect()
    }

    /// Text of the first matching element that has any
    pub fn first_text(&self, selector: &Selector) -> Option<String> {
        self.html.select(selector).find_map(element_text)
    }

    /// Value of `name` on the first matching element that carries it
    pub fn first_attr(&self, selector: &Selector, name: &str) -> Option<String> {
        self.html
            .select(selector)
            .find_map(|element| element.value().attr(name))
            .map(str::to_string)
    }
}

/// Concatenated descendant text of an element, whitespace included
///
/// Returns `None` only for elements with no text at all.
pub fn element_text(element: ElementRef<'_>) -> Option<String> {
    let text = element.text().collect::<String>();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
