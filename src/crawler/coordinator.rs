//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that ties everything together:
//! - Seeding the work queue with the start page
//! - Fetching pending requests concurrently
//! - Dispatching each fetched document to the listing or post handler
//! - Waiting for all in-flight work before the output is written

use crate::config::{validate, Config};
use crate::crawler::document::HtmlDocument;
use crate::crawler::fetcher::{build_http_client, fetch_url, FetchResult, RetryPolicy};
use crate::crawler::links::collect;
use crate::crawler::pagination::PaginationQueue;
use crate::crawler::record::{extract, PostRecord};
use crate::crawler::scheduler::{CrawlRequest, DiscoveryOrder, Handler, Scheduler};
use crate::output::{write_records, CrawlStatistics};
use crate::url::resolve_link;
use crate::Result;
use reqwest::Client;
use std::path::Path;
use std::sync::Arc;
use tokio::task::JoinSet;
use url::Url;

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Arc<Config>,
    client: Client,
    retry: RetryPolicy,
    scheduler: Scheduler,
    pagination: PaginationQueue,
    records: Vec<(DiscoveryOrder, PostRecord)>,
    stats: CrawlStatistics,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(HarvestError)` - The configuration is invalid or the HTTP client failed to build
    pub fn new(config: Config) -> Result<Self> {
        validate(&config)?;

        let client = build_http_client(&config.crawler, &config.user_agent)?;
        let retry = RetryPolicy::from(&config.crawler);
        let mut scheduler = Scheduler::new(&config.crawler);
        let pagination = PaginationQueue::from_site(&config.site);

        let start_url = Url::parse(&config.site.start_url)?;
        scheduler.enqueue(CrawlRequest::listing(start_url, 0));

        Ok(Self {
            config: Arc::new(config),
            client,
            retry,
            scheduler,
            pagination,
            records: Vec::new(),
            stats: CrawlStatistics::new(),
        })
    }

    /// Runs the crawl until no request is pending or in flight
    ///
    /// Fetches run concurrently, bounded by the scheduler's permits. Documents
    /// are parsed and handled here, one at a time, so handlers have exclusive
    /// access to the pagination queue.
    ///
    /// # Returns
    ///
    /// The collected records in discovery order.
    pub async fn run(&mut self) -> Result<Vec<PostRecord>> {
        tracing::info!("Starting crawl at {}", self.config.site.start_url);

        let mut in_flight: JoinSet<(CrawlRequest, FetchResult)> = JoinSet::new();
        let mut completed: u64 = 0;

        loop {
            while let Some(request) = self.scheduler.next_request() {
                self.spawn_fetch(&mut in_flight, request);
            }

            let joined = match in_flight.join_next().await {
                Some(joined) => joined,
                None => {
                    tracing::info!("Work queue is empty, crawl complete");
                    break;
                }
            };

            match joined {
                Ok((request, result)) => self.handle_response(request, result),
                Err(e) => {
                    tracing::error!("Fetch task failed: {}", e);
                    self.stats.failed_fetches += 1;
                }
            }

            completed += 1;
            if completed % 10 == 0 {
                tracing::info!(
                    "Progress: {} fetches done, {} in flight, {} records",
                    completed,
                    in_flight.len() + self.scheduler.pending_len(),
                    self.records.len()
                );
            }
        }

        self.stats.duplicates_filtered = self.scheduler.duplicates_filtered();
        self.stats.finish();

        let mut records = std::mem::take(&mut self.records);
        records.sort_by_key(|(order, _)| *order);

        tracing::info!(
            "Crawl finished: {} listing pages, {} posts, {} failed fetches",
            self.stats.listing_pages,
            self.stats.post_pages,
            self.stats.failed_fetches
        );

        Ok(records.into_iter().map(|(_, record)| record).collect())
    }

    /// Statistics gathered so far
    pub fn statistics(&self) -> &CrawlStatistics {
        &self.stats
    }

    /// Starts fetching a request on the JoinSet, bounded by the scheduler's permits
    fn spawn_fetch(
        &self,
        in_flight: &mut JoinSet<(CrawlRequest, FetchResult)>,
        request: CrawlRequest,
    ) {
        let client = self.client.clone();
        let retry = self.retry.clone();
        let permits = self.scheduler.permits();

        in_flight.spawn(async move {
            let result = match permits.acquire_owned().await {
                Ok(_permit) => fetch_url(&client, &request.url, &retry).await,
                Err(e) => FetchResult::NetworkError {
                    error: e.to_string(),
                    retryable: false,
                },
            };
            (request, result)
        });
    }

    /// Routes a finished fetch to the handler named by its request
    ///
    /// Failed fetches are logged and skipped; they produce no record and, for
    /// listing pages, no further pagination.
    fn handle_response(&mut self, request: CrawlRequest, result: FetchResult) {
        match result {
            FetchResult::Success {
                final_url, body, ..
            } => {
                let document = HtmlDocument::parse(final_url, &body);
                match request.handler {
                    Handler::Listing => self.handle_listing(&request, &document),
                    Handler::Post => self.handle_post(&request, &document),
                }
            }
            failure => {
                tracing::warn!(
                    "Skipping {:?} page {}: {}",
                    request.handler,
                    request.url,
                    failure.describe()
                );
                self.stats.failed_fetches += 1;
            }
        }
    }

    /// Follows the post links of a listing page and its next page
    fn handle_listing(&mut self, request: &CrawlRequest, document: &HtmlDocument) {
        self.stats.listing_pages += 1;
        let listing = request.order.listing;
        let harvest = collect(document, &mut self.pagination);

        for (index, href) in harvest.post_links.iter().enumerate() {
            if let Some(url) = self.resolve(document.url(), href) {
                self.scheduler
                    .enqueue(CrawlRequest::post(url, listing, index as u32));
            }
        }

        if let Some(next_page) = harvest.next_page {
            if let Some(url) = self.resolve(document.url(), &next_page) {
                self.scheduler
                    .enqueue(CrawlRequest::listing(url, listing + 1));
            }
        }
    }

    /// Extracts the record of a post page
    fn handle_post(&mut self, request: &CrawlRequest, document: &HtmlDocument) {
        self.stats.post_pages += 1;
        let record = extract(document);
        tracing::debug!("Extracted {:?} from {}", record.heading, document.url());
        self.records.push((request.order, record));
    }

    /// Resolves an href against the page it was found on, counting failures
    fn resolve(&mut self, base: &Url, href: &str) -> Option<Url> {
        match resolve_link(base, href) {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::warn!("Cannot follow link {:?} from {}: {}", href, base, e);
                self.stats.unresolved_links += 1;
                None
            }
        }
    }
}

/// Runs the complete crawl operation
///
/// This function orchestrates the entire crawl process:
///
/// 1. Build the HTTP client and seed the start page
/// 2. Crawl listing pages and posts until no work remains
/// 3. Write the records, in discovery order, to the output file
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlStatistics)` - Crawl completed and output written
/// * `Err(HarvestError)` - Crawl could not start or the output could not be written
///
/// # Example
///
/// ```no_run
/// use blog_harvest::config::Config;
/// use blog_harvest::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let stats = run_crawl(Config::default()).await?;
/// println!("{} records", stats.records_written);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config) -> Result<CrawlStatistics> {
    let output_path = config.output.json_path.clone();
    let mut coordinator = Coordinator::new(config)?;
    let records = coordinator.run().await?;

    write_records(Path::new(&output_path), &records)?;

    let mut stats = coordinator.statistics().clone();
    stats.records_written = records.len() as u64;
    Ok(stats)
}
