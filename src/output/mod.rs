//! Output module for crawl results
//!
//! This module handles:
//! - Writing the collected post records to the JSON output file
//! - Recording and printing crawl statistics

mod json;
pub mod stats;

pub use json::write_records;
pub use stats::{print_statistics, CrawlStatistics};
