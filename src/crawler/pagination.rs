use crate::config::SiteConfig;
use std::collections::VecDeque;

/// Listing pages still to visit, consumed front to back
///
/// The list is fixed when the crawl starts; it is never refilled from page
/// content. Once it is empty no further listing pages are followed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationQueue {
    pages: VecDeque<String>,
}

impl PaginationQueue {
    /// Creates a queue holding `pages` in order
    pub fn new<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pages: pages.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates the queue for a configured site
    pub fn from_site(site: &SiteConfig) -> Self {
        Self::new(site.pagination.iter().cloned())
    }

    /// Removes and returns the next listing page, if any
    pub fn pop_next(&mut self) -> Option<String> {
        self.pages.pop_front()
    }

    /// Number of listing pages left
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// True once every listing page has been handed out
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_PAGINATION;

    #[test]
    fn test_pops_in_order_then_exhausts() {
        let mut queue = PaginationQueue::new(DEFAULT_PAGINATION);
        assert_eq!(queue.len(), 4);

        for n in 2..=5 {
            assert_eq!(
                queue.pop_next(),
                Some(format!("https://validmind.com/blog/?_paged={}", n))
            );
        }

        assert!(queue.is_empty());
        assert_eq!(queue.pop_next(), None);
        assert_eq!(queue.pop_next(), None);
    }

    #[test]
    fn test_from_site() {
        let site = SiteConfig {
            start_url: "https://example.com/".to_string(),
            pagination: vec!["https://example.com/?p=2".to_string()],
        };
        let mut queue = PaginationQueue::from_site(&site);
        assert_eq!(queue.pop_next().as_deref(), Some("https://example.com/?p=2"));
        assert!(queue.is_empty());
    }
}
