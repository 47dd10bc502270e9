use serde::Deserialize;

/// Blog index root the crawl starts from
pub const DEFAULT_START_URL: &str = "https://validmind.com/blog/";

/// Listing pages visited after the start page, in order
pub const DEFAULT_PAGINATION: [&str; 4] = [
    "https://validmind.com/blog/?_paged=2",
    "https://validmind.com/blog/?_paged=3",
    "https://validmind.com/blog/?_paged=4",
    "https://validmind.com/blog/?_paged=5",
];

/// File the collected records are written to
pub const DEFAULT_JSON_PATH: &str = "validmind-blogs.json";

/// Main configuration structure for Blog-Harvest
///
/// Every section is optional in the TOML file; missing sections and keys
/// fall back to the built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub site: SiteConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of fetches in flight at once
    #[serde(rename = "max-concurrent-requests")]
    pub max_concurrent_requests: u32,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout")]
    pub request_timeout: u64,

    /// How many times a transient failure is retried
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Delay between retry attempts (milliseconds)
    #[serde(rename = "retry-delay")]
    pub retry_delay: u64,

    /// Drop requests whose URL was already scheduled
    #[serde(rename = "dedupe-requests")]
    pub dedupe_requests: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_requests: 8,
            request_timeout: 30,
            max_retries: 2,
            retry_delay: 500,
            dedupe_requests: true,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "BlogHarvest".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://example.com/about".to_string(),
            contact_email: "crawler@example.com".to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header value
    ///
    /// Format: `CrawlerName/Version (+ContactURL; ContactEmail)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// The site being harvested
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// First listing page
    #[serde(rename = "start-url")]
    pub start_url: String,

    /// Further listing pages, consumed front to back
    pub pagination: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            start_url: DEFAULT_START_URL.to_string(),
            pagination: DEFAULT_PAGINATION.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the JSON records file (overwritten on every run)
    #[serde(rename = "json-path")]
    pub json_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json_path: DEFAULT_JSON_PATH.to_string(),
        }
    }
}
