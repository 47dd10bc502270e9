//! Scheduler for the crawl's work queue
//!
//! This module handles:
//! - The queue of follow requests waiting to be fetched
//! - Dropping requests for URLs that were already scheduled
//! - The global limit on fetches in flight

use crate::config::CrawlerConfig;
use crate::url::request_fingerprint;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use tokio::sync::Semaphore;
use url::Url;

/// Which callback processes a fetched document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handler {
    /// A blog index page: collect post links and paginate
    Listing,
    /// A single post: extract a record
    Post,
}

/// Position of a request in discovery order
///
/// Ordered by listing page first, then by the link's position on that page.
/// Records are written in this order whatever order their fetches finish in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct DiscoveryOrder {
    /// Index of the listing page in the pagination chain (start page is 0)
    pub listing: u32,
    /// Index of the link on its listing page
    pub link: u32,
}

/// A URL waiting to be fetched, tagged with the callback for its response
#[derive(Debug, Clone)]
pub struct CrawlRequest {
    pub url: Url,
    pub handler: Handler,
    pub order: DiscoveryOrder,
}

impl CrawlRequest {
    /// Request for a listing page
    pub fn listing(url: Url, listing: u32) -> Self {
        Self {
            url,
            handler: Handler::Listing,
            order: DiscoveryOrder { listing, link: 0 },
        }
    }

    /// Request for a post found on listing page `listing` at position `link`
    pub fn post(url: Url, listing: u32, link: u32) -> Self {
        Self {
            url,
            handler: Handler::Post,
            order: DiscoveryOrder { listing, link },
        }
    }
}

/// Scheduler manages the pending queue and the concurrency limit
///
/// The scheduler coordinates:
/// - FIFO hand-out of pending requests
/// - Duplicate filtering on request fingerprints (when enabled)
/// - Global concurrency limits (max fetches in flight)
pub struct Scheduler {
    /// Global semaphore for limiting concurrent fetches
    permits: Arc<Semaphore>,

    /// Requests not yet handed out
    pending: VecDeque<CrawlRequest>,

    /// Fingerprints of every request accepted so far
    seen: HashSet<String>,

    /// Whether duplicates are dropped
    dedupe: bool,

    /// Number of requests dropped as duplicates
    duplicates_filtered: u64,
}

impl Scheduler {
    /// Creates a new scheduler
    pub fn new(config: &CrawlerConfig) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(config.max_concurrent_requests as usize)),
            pending: VecDeque::new(),
            seen: HashSet::new(),
            dedupe: config.dedupe_requests,
            duplicates_filtered: 0,
        }
    }

    /// Adds a request to the queue
    ///
    /// # Returns
    ///
    /// * `true` - The request was queued
    /// * `false` - The request was dropped as a duplicate
    pub fn enqueue(&mut self, request: CrawlRequest) -> bool {
        if self.dedupe {
            let fingerprint = request_fingerprint(&request.url);
            if !self.seen.insert(fingerprint) {
                self.duplicates_filtered += 1;
                tracing::debug!("Filtered duplicate request: {}", request.url);
                return false;
            }
        }

        tracing::trace!("Queued {:?} request: {}", request.handler, request.url);
        self.pending.push_back(request);
        true
    }

    /// Takes the next pending request, if any
    pub fn next_request(&mut self) -> Option<CrawlRequest> {
        self.pending.pop_front()
    }

    /// Semaphore every fetch must hold a permit of while in flight
    pub fn permits(&self) -> Arc<Semaphore> {
        Arc::clone(&self.permits)
    }

    /// Number of requests waiting to be handed out
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Number of requests dropped as duplicates so far
    pub fn duplicates_filtered(&self) -> u64 {
        self.duplicates_filtered
    }
}
