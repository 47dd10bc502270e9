//! Configuration module for Blog-Harvest
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! A missing file is not an error for the binary: `Config::default()` carries the
//! built-in site literals.
//!
//! # Example
//!
//! ```no_run
//! use blog_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Writing records to: {}", config.output.json_path);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, OutputConfig, SiteConfig, UserAgentConfig, DEFAULT_JSON_PATH,
    DEFAULT_PAGINATION, DEFAULT_START_URL,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
