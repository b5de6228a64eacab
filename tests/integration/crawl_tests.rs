//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and saved-page
//! directories to test full crawl runs end-to-end.

use std::path::Path;
use std::sync::Arc;
use wiki_indexer::config::{Config, CrawlerConfig, FetcherConfig, OutputConfig, UserAgentConfig};
use wiki_indexer::crawler::{run_crawl, CrawlMode, CrawlOptions};
use wiki_indexer::output::ranked_counts;
use wiki_indexer::storage::{self, open_index, shared, IndexStore, MemoryIndex};
use wiki_indexer::Document;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const START_PAGE: &str = r##"<html><body>
    <div id="mw-content-text">
        <p>The cat saw <a href="/wiki/Next">the next page</a>.</p>
        <p><a href="https://other.example/wiki/Away">away</a> <a href="#cite">cite</a></p>
    </div>
</body></html>"##;

const NEXT_PAGE: &str = r#"<html><body>
    <div id="mw-content-text">
        <p>Back to <a href="/wiki/Start">start</a> or on to <a href="/wiki/Last">the last</a>.</p>
    </div>
</body></html>"#;

const LAST_PAGE: &str = r#"<html><body>
    <div id="mw-content-text"><p>The end.</p></div>
</body></html>"#;

/// Creates a test configuration crawling from the given seed
fn create_test_config(seed: &str, db_path: &Path, pages_to_index: u32) -> Config {
    Config {
        crawler: CrawlerConfig {
            seed: seed.to_string(),
            article_prefix: "/wiki/".to_string(),
            max_cycles: 50,
            pages_to_index,
        },
        fetcher: FetcherConfig {
            timeout_secs: 5,
            ..FetcherConfig::default()
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestIndexer".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
            contact_email: "test@example.com".to_string(),
        },
        output: OutputConfig {
            database_path: db_path.display().to_string(),
            report_terms: vec!["the".to_string()],
        },
    }
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=utf-8")
}

async fn mount_page(server: &MockServer, page: &str, body: &str, times: u64) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(html(body))
        .expect(times)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_over_http() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Each page is fetched exactly once across both runs
    mount_page(&mock_server, "/wiki/Start", START_PAGE, 1).await;
    mount_page(&mock_server, "/wiki/Next", NEXT_PAGE, 1).await;
    mount_page(&mock_server, "/wiki/Last", LAST_PAGE, 1).await;

    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("index.db");
    let seed = format!("{}/wiki/Start", base_url);
    let config = create_test_config(&seed, &db_path, 3);

    let index = shared(open_index(&db_path).unwrap());
    let report = run_crawl(&config, CrawlOptions::default(), Arc::clone(&index))
        .await
        .expect("Crawl failed");

    let start = format!("{}/wiki/Start", base_url);
    let next = format!("{}/wiki/Next", base_url);
    let last = format!("{}/wiki/Last", base_url);

    // Start, Next, Start again (skipped), Last
    assert_eq!(report.indexed, vec![start.clone(), next.clone(), last.clone()]);
    assert_eq!(report.cycles, 4);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.failed, 0);
    assert!(!report.exhausted);

    {
        let store = storage::lock(&index).unwrap();
        assert_eq!(store.count_indexed().unwrap(), 3);
        assert_eq!(
            ranked_counts(&*store, "the").unwrap(),
            vec![(start.clone(), 2), (last.clone(), 1), (next.clone(), 1)]
        );
        // Off-site links and fragments are never followed
        assert!(!store.is_indexed("https://other.example/wiki/Away").unwrap());
    }

    // A second run against the same database finds the seed already indexed
    drop(index);
    let index = shared(open_index(&db_path).unwrap());
    let report = run_crawl(&config, CrawlOptions::default(), Arc::clone(&index))
        .await
        .expect("Second crawl failed");

    assert!(report.indexed.is_empty());
    assert_eq!(report.skipped, 1);
    assert!(report.exhausted);
}

#[tokio::test]
async fn test_missing_seed_is_a_failed_fetch() {
    let mock_server = MockServer::start().await;

    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("index.db");
    let seed = format!("{}/wiki/Missing", mock_server.uri());
    let config = create_test_config(&seed, &db_path, 1);

    // No mock mounted: wiremock answers 404
    let index = shared(MemoryIndex::new());
    let report = run_crawl(&config, CrawlOptions::default(), Arc::clone(&index))
        .await
        .expect("Fetch failures should not abort the crawl");

    assert!(report.indexed.is_empty());
    assert_eq!(report.failed, 1);
    assert!(report.exhausted);
    assert_eq!(storage::lock(&index).unwrap().count_indexed().unwrap(), 0);
}

#[tokio::test]
async fn test_non_html_pages_are_skipped() {
    let mock_server = MockServer::start().await;

    let start = r#"<div id="mw-content-text"><p><a href="/wiki/File:Logo.png">logo</a> <a href="/wiki/Last">last</a></p></div>"#;
    mount_page(&mock_server, "/wiki/Start", start, 1).await;
    mount_page(&mock_server, "/wiki/Last", LAST_PAGE, 1).await;
    Mock::given(method("GET"))
        .and(path("/wiki/File:Logo.png"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![0x89u8, 0x50, 0x4e, 0x47], "image/png"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let seed = format!("{}/wiki/Start", mock_server.uri());
    let config = create_test_config(&seed, &dir.path().join("index.db"), 10);

    let index = shared(MemoryIndex::new());
    let report = run_crawl(&config, CrawlOptions::default(), index)
        .await
        .unwrap();

    assert_eq!(report.indexed.len(), 2);
    assert_eq!(report.failed, 1);
    assert!(report.exhausted);
}

fn write_saved_pages(dir: &Path) {
    std::fs::write(dir.join("Start"), START_PAGE).unwrap();
    std::fs::write(dir.join("Next"), NEXT_PAGE).unwrap();
    std::fs::write(dir.join("Last"), LAST_PAGE).unwrap();
}

fn saved_page_config(cache: &Path, pages_to_index: u32) -> Config {
    let mut config = create_test_config(
        "https://en.wikipedia.org/wiki/Start",
        &cache.join("unused.db"),
        pages_to_index,
    );
    config.fetcher.cache_dir = Some(cache.display().to_string());
    config
}

#[tokio::test]
async fn test_crawl_from_saved_pages() {
    let cache = tempfile::tempdir().unwrap();
    write_saved_pages(cache.path());
    let config = saved_page_config(cache.path(), 2);

    let index = shared(MemoryIndex::new());
    let report = run_crawl(&config, CrawlOptions::default(), Arc::clone(&index))
        .await
        .unwrap();

    assert_eq!(
        report.indexed,
        vec![
            "https://en.wikipedia.org/wiki/Start".to_string(),
            "https://en.wikipedia.org/wiki/Next".to_string(),
        ]
    );
    // Next queued Start and Last
    assert_eq!(report.pending, 2);
    let store = storage::lock(&index).unwrap();
    assert_eq!(
        store
            .term_count("https://en.wikipedia.org/wiki/Start", "cat")
            .unwrap(),
        1
    );
}

#[tokio::test]
async fn test_testing_mode_refetches_indexed_pages() {
    let cache = tempfile::tempdir().unwrap();
    write_saved_pages(cache.path());
    let config = saved_page_config(cache.path(), 1);

    let mut preloaded = MemoryIndex::new();
    preloaded
        .index_page("https://en.wikipedia.org/wiki/Start", &Document::default())
        .unwrap();
    let index = shared(preloaded);

    let options = CrawlOptions {
        mode: CrawlMode::Testing,
        ..CrawlOptions::default()
    };
    let report = run_crawl(&config, options, Arc::clone(&index))
        .await
        .unwrap();

    assert_eq!(report.indexed, vec!["https://en.wikipedia.org/wiki/Start".to_string()]);
    assert_eq!(report.skipped, 0);
    // Re-indexing replaced the empty document's counts
    let store = storage::lock(&index).unwrap();
    assert_eq!(store.write_count(), 2);
    assert_eq!(
        store
            .term_count("https://en.wikipedia.org/wiki/Start", "the")
            .unwrap(),
        2
    );
}

#[tokio::test]
async fn test_reset_clears_previous_index() {
    let cache = tempfile::tempdir().unwrap();
    write_saved_pages(cache.path());
    let config = saved_page_config(cache.path(), 1);

    let mut preloaded = MemoryIndex::new();
    preloaded
        .index_page("https://en.wikipedia.org/wiki/Start", &Document::default())
        .unwrap();
    preloaded
        .index_page("https://en.wikipedia.org/wiki/Stale", &Document::default())
        .unwrap();
    let index = shared(preloaded);

    let options = CrawlOptions {
        reset: true,
        ..CrawlOptions::default()
    };
    let report = run_crawl(&config, options, Arc::clone(&index))
        .await
        .unwrap();

    assert_eq!(report.indexed.len(), 1);
    let store = storage::lock(&index).unwrap();
    assert_eq!(store.count_indexed().unwrap(), 1);
    assert!(!store.is_indexed("https://en.wikipedia.org/wiki/Stale").unwrap());
}

#[tokio::test]
async fn test_prime_queues_seed_links_first() {
    let cache = tempfile::tempdir().unwrap();
    write_saved_pages(cache.path());
    let config = saved_page_config(cache.path(), 2);

    let options = CrawlOptions {
        prime: true,
        ..CrawlOptions::default()
    };
    let index = shared(MemoryIndex::new());
    let report = run_crawl(&config, options, index).await.unwrap();

    // Frontier after priming: Start, Next; Start's own cycle queues Next again
    assert_eq!(
        report.indexed,
        vec![
            "https://en.wikipedia.org/wiki/Start".to_string(),
            "https://en.wikipedia.org/wiki/Next".to_string(),
        ]
    );
    assert_eq!(report.cycles, 2);
    // Next (duplicate), Start, Last
    assert_eq!(report.pending, 3);
}
