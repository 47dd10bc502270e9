//! Crawler module for blog harvesting
//!
//! This module contains the crawling logic, including:
//! - Parsed documents and the queries run on them
//! - Link collection and pagination for listing pages
//! - Record extraction for post pages
//! - HTTP fetching with retry logic
//! - Request scheduling and overall crawl coordination

mod coordinator;
mod document;
mod fetcher;
mod links;
mod pagination;
mod record;
mod scheduler;
mod selectors;

pub use coordinator::{run_crawl, Coordinator};
pub use document::{element_text, HtmlDocument};
pub use fetcher::{build_http_client, fetch_url, FetchResult, RetryPolicy};
pub use links::{collect, ListingHarvest};
pub use pagination::PaginationQueue;
pub use record::{extract, PostRecord};
pub use scheduler::{CrawlRequest, DiscoveryOrder, Handler, Scheduler};

use crate::config::Config;
use crate::output::CrawlStatistics;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client
/// 2. Fetch the start page and every listing page the pagination list names
/// 3. Fetch every post linked from those pages and extract its record
/// 4. Write the records to the configured JSON file
pub async fn crawl(config: Config) -> crate::Result<CrawlStatistics> {
    run_crawl(config).await
}
