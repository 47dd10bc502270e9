//! Crawl statistics
//!
//! Counters kept by the coordinator during a run, logged when the crawl ends
//! and printed by the binary.

use chrono::{DateTime, Utc};

/// Crawl statistics summary
#[derive(Debug, Clone)]
pub struct CrawlStatistics {
    /// When the crawl started
    pub started_at: DateTime<Utc>,

    /// When the crawl finished (None while running)
    pub finished_at: Option<DateTime<Utc>>,

    /// Listing pages fetched and processed
    pub listing_pages: u64,

    /// Post pages fetched and processed
    pub post_pages: u64,

    /// Records written to the output file
    pub records_written: u64,

    /// Fetches that failed after retries
    pub failed_fetches: u64,

    /// Requests dropped because their URL was already scheduled
    pub duplicates_filtered: u64,

    /// Links that could not be turned into a followable URL
    pub unresolved_links: u64,
}

impl Default for CrawlStatistics {
    fn default() -> Self {
        Self::new()
    }
}

impl CrawlStatistics {
    /// Creates empty statistics stamped with the current time
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            listing_pages: 0,
            post_pages: 0,
            records_written: 0,
            failed_fetches: 0,
            duplicates_filtered: 0,
            unresolved_links: 0,
        }
    }

    /// Marks the crawl as finished now
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Total pages fetched successfully
    pub fn pages_fetched(&self) -> u64 {
        self.listing_pages + self.post_pages
    }

    /// Wall-clock duration in seconds, once finished
    pub fn duration_seconds(&self) -> Option<u64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds().max(0) as u64)
    }

    /// Returns the success rate as a percentage of attempted fetches
    pub fn success_rate(&self) -> f64 {
        let attempted = self.pages_fetched() + self.failed_fetches;
        if attempted == 0 {
            return 0.0;
        }
        (self.pages_fetched() as f64 / attempted as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Started: {}", stats.started_at.to_rfc3339());
    if let Some(finished) = stats.finished_at {
        println!("Finished: {}", finished.to_rfc3339());
    }
    if let Some(seconds) = stats.duration_seconds() {
        println!("Duration: {}s", seconds);
    }
    println!();

    println!("Pages:");
    println!("  Listing pages: {}", stats.listing_pages);
    println!("  Post pages: {}", stats.post_pages);
    println!("  Failed fetches: {}", stats.failed_fetches);
    println!("  Duplicates filtered: {}", stats.duplicates_filtered);
    println!("  Unresolved links: {}", stats.unresolved_links);
    println!();

    println!("Records written: {}", stats.records_written);
    println!(
        "Success Rate: {:.1}% ({} / {} fetches)",
        stats.success_rate(),
        stats.pages_fetched(),
        stats.pages_fetched() + stats.failed_fetches
    );
}
