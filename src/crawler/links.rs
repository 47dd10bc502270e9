//! Link collection for listing pages
//!
//! A listing page yields two things: the post links found in its first
//! content row, and the next listing page to visit. The next page comes from
//! the pagination queue, not from the page itself.

use crate::crawler::document::HtmlDocument;
use crate::crawler::pagination::PaginationQueue;
use crate::crawler::selectors::{LISTING_ROW, ROW_LINK};

/// What a listing page contributes to the crawl
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingHarvest {
    /// Raw `href` values of the post links, in document order
    pub post_links: Vec<String>,

    /// The next listing page, if the pagination queue was not yet empty
    pub next_page: Option<String>,
}

/// Collects post links and the next listing page from a listing document
///
/// # Link Extraction Rules
///
/// - Only the first element with the `x-row-inner` class marker is searched
/// - Every anchor below it that has an `href` contributes that `href`
/// - Values are returned untouched: no resolution, filtering or dedup
/// - A page without the marker yields no links
///
/// # Pagination
///
/// Exactly one URL is popped from the front of `queue` per call, whether or
/// not the page had any links. An empty queue yields no next page.
///
/// # Example
///
/// ```
/// use blog_harvest::{collect, HtmlDocument, PaginationQueue};
/// use url::Url;
///
/// let doc = HtmlDocument::parse(
///     Url::parse("https://example.com/blog/").unwrap(),
///     r#"<div class="x-row-inner"><a href="/post-a">A</a></div>"#,
/// );
/// let mut queue = PaginationQueue::new(["https://example.com/blog/?_paged=2"]);
///
/// let harvest = collect(&doc, &mut queue);
/// assert_eq!(harvest.post_links, vec!["/post-a"]);
/// assert!(queue.is_empty());
/// ```
pub fn collect(document: &HtmlDocument, queue: &mut PaginationQueue) -> ListingHarvest {
    let post_links: Vec<String> = document
        .select_first(&LISTING_ROW)
        .map(|row| {
            row.select(&ROW_LINK)
                .filter_map(|anchor| anchor.value().attr("href"))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let next_page = queue.pop_next();

    tracing::debug!(
        "Listing {}: {} post links, next page {:?}",
        document.url(),
        post_links.len(),
        next_page
    );

    ListingHarvest {
        post_links,
        next_page,
    }
}
