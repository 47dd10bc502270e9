//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end, from the start page to the JSON file.

use blog_harvest::config::{Config, CrawlerConfig, OutputConfig, SiteConfig};
use blog_harvest::crawler::{run_crawl, Coordinator};
use blog_harvest::PostRecord;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration crawling the mock server
fn create_test_config(base_url: &str, pagination: &[&str], json_path: &Path) -> Config {
    Config {
        crawler: CrawlerConfig {
            max_concurrent_requests: 4,
            request_timeout: 5,
            max_retries: 0,
            retry_delay: 1,
            dedupe_requests: true,
        },
        site: SiteConfig {
            start_url: format!("{}/blog/", base_url),
            pagination: pagination
                .iter()
                .map(|p| format!("{}{}", base_url, p))
                .collect(),
        },
        output: OutputConfig {
            json_path: json_path.to_string_lossy().into_owned(),
        },
        ..Config::default()
    }
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/html")
}

fn listing_page(links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|l| format!(r#"<a href="{}">{}</a>"#, l, l))
        .collect();
    format!(
        r#"<html><body>
            <nav><a href="/about">About</a></nav>
            <div class="x-row x-row-inner">{}</div>
            <div class="x-row-inner"><a href="/not-a-post">ignored</a></div>
        </body></html>"#,
        anchors
    )
}

fn post_page(heading: &str, author: Option<&str>, date: Option<&str>) -> String {
    let author = author
        .map(|a| format!(r#"<div class="pp-author-boxes-name"><a href="/author" title="{}">{}</a></div>"#, a, a))
        .unwrap_or_default();
    let date = date
        .map(|d| format!(r#"<div class="x-text-content-text"><span class="x-text-content-text-subheadline">{}</span></div>"#, d))
        .unwrap_or_default();
    format!(
        "<html><body><h1>{}</h1>{}{}</body></html>",
        heading, date, author
    )
}

/// Listing page that also links to a page 4 outside the pagination list
fn listing_with_next(links: &[&str]) -> String {
    let mut page = listing_page(links);
    page.push_str(r#"<a class="next" href="/blog/page/4/">Next</a>"#);
    page
}

async fn mount_page(server: &MockServer, at: &str, body: String, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(html(body))
        .expect(expected_calls)
        .mount(server)
        .await;
}

fn read_records(path: &Path) -> Vec<PostRecord> {
    let content = std::fs::read_to_string(path).expect("Output file missing");
    serde_json::from_str(&content).expect("Output is not a JSON array of records")
}

#[tokio::test]
async fn test_full_crawl_writes_records_in_discovery_order() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_page(&server, "/blog/", listing_page(&["/post-a", "/post-b"]), 1).await;
    mount_page(&server, "/blog/page/2/", listing_page(&["/post-c"]), 1).await;

    // post-a answers last; its record must still come first
    Mock::given(method("GET"))
        .and(path("/post-a"))
        .respond_with(
            html(post_page("A", Some("Jane Doe"), Some("March 4, 2024")))
                .set_delay(Duration::from_millis(300)),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "/post-b", post_page("B", None, Some("March 1, 2024")), 1).await;
    mount_page(&server, "/post-c", post_page("C", Some("John Roe"), None), 1).await;
    mount_page(&server, "/not-a-post", post_page("X", None, None), 0).await;
    mount_page(&server, "/about", post_page("About", None, None), 0).await;

    let dir = TempDir::new().unwrap();
    let json_path = dir.path().join("validmind-blogs.json");
    std::fs::write(&json_path, "[\"stale\"]").unwrap();

    let config = create_test_config(&base_url, &["/blog/page/2/"], &json_path);
    let stats = run_crawl(config).await.expect("Crawl failed");

    let records = read_records(&json_path);
    assert_eq!(
        records,
        vec![
            PostRecord {
                heading: Some("A".to_string()),
                author: Some("Jane Doe".to_string()),
                date: Some("March 4, 2024".to_string()),
            },
            PostRecord {
                heading: Some("B".to_string()),
                author: None,
                date: Some("March 1, 2024".to_string()),
            },
            PostRecord {
                heading: Some("C".to_string()),
                author: Some("John Roe".to_string()),
                date: None,
            },
        ]
    );

    assert_eq!(stats.listing_pages, 2);
    assert_eq!(stats.post_pages, 3);
    assert_eq!(stats.records_written, 3);
    assert_eq!(stats.failed_fetches, 0);
}

#[tokio::test]
async fn test_output_keys_are_always_present() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_page(&server, "/blog/", listing_page(&["/bare"]), 1).await;
    mount_page(&server, "/bare", "<html><body><p>nothing</p></body></html>".to_string(), 1).await;

    let dir = TempDir::new().unwrap();
    let json_path = dir.path().join("out.json");
    run_crawl(create_test_config(&base_url, &[], &json_path))
        .await
        .expect("Crawl failed");

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{"heading": null, "author": null, "date": null}])
    );
}

#[tokio::test]
async fn test_pagination_stops_when_list_is_exhausted() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_page(&server, "/blog/", listing_with_next(&["/p1"]), 1).await;
    mount_page(&server, "/blog/page/2/", listing_with_next(&["/p2"]), 1).await;
    mount_page(&server, "/blog/page/3/", listing_with_next(&["/p3"]), 1).await;
    mount_page(&server, "/blog/page/4/", listing_with_next(&["/p4"]), 0).await;
    for (post, heading) in [("/p1", "1"), ("/p2", "2"), ("/p3", "3")] {
        mount_page(&server, post, post_page(heading, None, None), 1).await;
    }
    mount_page(&server, "/p4", post_page("4", None, None), 0).await;

    let dir = TempDir::new().unwrap();
    let json_path = dir.path().join("out.json");
    let config = create_test_config(&base_url, &["/blog/page/2/", "/blog/page/3/"], &json_path);

    let mut coordinator = Coordinator::new(config).unwrap();
    let records = coordinator.run().await.expect("Crawl failed");

    let headings: Vec<Option<String>> = records.into_iter().map(|r| r.heading).collect();
    assert_eq!(
        headings,
        vec![
            Some("1".to_string()),
            Some("2".to_string()),
            Some("3".to_string())
        ]
    );
    assert_eq!(coordinator.statistics().listing_pages, 3);
}

#[tokio::test]
async fn test_missing_marker_still_follows_next_page() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_page(
        &server,
        "/blog/",
        r#"<html><body><a href="/orphan">orphan</a></body></html>"#.to_string(),
        1,
    )
    .await;
    mount_page(&server, "/orphan", post_page("orphan", None, None), 0).await;
    mount_page(&server, "/blog/page/2/", listing_page(&["/post-a"]), 1).await;
    mount_page(&server, "/post-a", post_page("A", None, None), 1).await;

    let dir = TempDir::new().unwrap();
    let json_path = dir.path().join("out.json");
    let stats = run_crawl(create_test_config(&base_url, &["/blog/page/2/"], &json_path))
        .await
        .expect("Crawl failed");

    assert_eq!(stats.records_written, 1);
    assert_eq!(read_records(&json_path)[0].heading.as_deref(), Some("A"));
}

#[tokio::test]
async fn test_duplicate_links_are_fetched_once() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_page(&server, "/blog/", listing_page(&["/post-a", "/post-b", "/post-a"]), 1).await;
    mount_page(&server, "/blog/page/2/", listing_page(&["/post-b#comments", "/post-c"]), 1).await;
    mount_page(&server, "/post-a", post_page("A", None, None), 1).await;
    mount_page(&server, "/post-b", post_page("B", None, None), 1).await;
    mount_page(&server, "/post-c", post_page("C", None, None), 1).await;

    let dir = TempDir::new().unwrap();
    let json_path = dir.path().join("out.json");
    let stats = run_crawl(create_test_config(&base_url, &["/blog/page/2/"], &json_path))
        .await
        .expect("Crawl failed");

    let headings: Vec<String> = read_records(&json_path)
        .into_iter()
        .filter_map(|r| r.heading)
        .collect();
    assert_eq!(headings, vec!["A", "B", "C"]);
    assert_eq!(stats.duplicates_filtered, 2);
}

#[tokio::test]
async fn test_failed_post_is_skipped() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_page(&server, "/blog/", listing_page(&["/post-a", "/broken", "/gone"]), 1).await;
    mount_page(&server, "/post-a", post_page("A", None, None), 1).await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let json_path = dir.path().join("out.json");
    let stats = run_crawl(create_test_config(&base_url, &[], &json_path))
        .await
        .expect("Crawl failed");

    assert_eq!(read_records(&json_path).len(), 1);
    assert_eq!(stats.failed_fetches, 2);
    assert_eq!(stats.post_pages, 1);
}

#[tokio::test]
async fn test_failed_start_page_writes_empty_output() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    Mock::given(method("GET"))
        .and(path("/blog/"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "/blog/page/2/", listing_page(&["/post-a"]), 0).await;

    let dir = TempDir::new().unwrap();
    let json_path = dir.path().join("out.json");
    let stats = run_crawl(create_test_config(&base_url, &["/blog/page/2/"], &json_path))
        .await
        .expect("Crawl failed");

    assert!(read_records(&json_path).is_empty());
    assert_eq!(stats.failed_fetches, 1);
    assert_eq!(stats.listing_pages, 0);
}
