//! Integration tests for the scraper
//!
//! These tests use wiremock to serve a small paginated listing and its
//! product pages, then run the full scrape cycle end-to-end over HTTP.

use product_scraper::config::{
    Config, OutputConfig, OutputFormat, RetryConfig, ScraperConfig, UserAgentConfig,
};
use product_scraper::crawler::run_scrape;
use product_scraper::ScrapeError;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration scraping `start_url` with no retry delay
fn create_test_config(
    start_url: &str,
    dataset_path: &str,
    format: OutputFormat,
    summary_path: Option<String>,
) -> Config {
    Config {
        scraper: ScraperConfig {
            start_url: start_url.to_string(),
            base_url: None,
            max_pages: None,
            progress_interval: 2,
        },
        retry: RetryConfig {
            max_attempts: 3,
            delay_secs: 0,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
            contact_email: "test@example.com".to_string(),
        },
        output: OutputConfig {
            dataset_path: dataset_path.to_string(),
            format,
            summary_path,
        },
    }
}

fn listing_page(product_paths: &[&str], next_path: Option<&str>) -> String {
    let products: String = product_paths
        .iter()
        .map(|p| format!(r#"<li><a class="product-title" href="{}">Product</a></li>"#, p))
        .collect();
    let next = next_path
        .map(|p| format!(r#"<li class="pagination__controls--next"><a href="{}">next</a></li>"#, p))
        .unwrap_or_default();

    format!(
        r#"<html><body><ul>{}</ul><ul class="pagination">{}</ul></body></html>"#,
        products, next
    )
}

fn product_page(name: &str) -> String {
    format!(
        r#"<html><body>
        <h1 class="page-heading"><span data-test="title">{name}</span></h1>
        <div class="u-pl--xxs" data-test="rating-suffix">4,2/5</div>
        <span class="promo-price">199<sup>,-</sup></span>
        <div class="buy-block__discount">You save €20,00</div>
        <section class="js_slot-specifications">
          <div class="specs__row"><dt class="specs__title">Colour:Tooltip which colour</dt><dd class="specs__value">Black</dd></div>
        </section>
        </body></html>"#
    )
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html")
}

/// Mounts a 2-page listing with 3 and 2 products
async fn mount_site(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/listing/1"))
        .respond_with(html(listing_page(
            &["/p/1/", "/p/2/", "/p/3/"],
            Some("/listing/2"),
        )))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/listing/2"))
        .respond_with(html(listing_page(&["/p/4/", "/p/5/"], None)))
        .mount(server)
        .await;

    for n in 1..=5 {
        Mock::given(method("GET"))
            .and(path(format!("/p/{}/", n)))
            .respond_with(html(product_page(&format!("Product {}", n))))
            .expect(1)
            .mount(server)
            .await;
    }
}

#[tokio::test]
async fn test_full_scrape_writes_csv_in_listing_order() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;

    let temp_dir = TempDir::new().unwrap();
    let dataset_path = temp_dir.path().join("product_data.csv");
    let summary_path = temp_dir.path().join("summary.md");
    let config = create_test_config(
        &format!("{}/listing/1", mock_server.uri()),
        dataset_path.to_str().unwrap(),
        OutputFormat::Csv,
        Some(summary_path.to_str().unwrap().to_string()),
    );

    let stats = run_scrape(config, Some("hash".to_string())).await.unwrap();

    assert_eq!(stats.links_per_page, vec![3, 2]);
    assert_eq!(stats.total_links, 5);
    assert_eq!(stats.records, 5);

    let mut reader = csv::Reader::from_path(&dataset_path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.len(), 13);
    assert_eq!(&headers[0], "url");

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 5);
    for (index, row) in rows.iter().enumerate() {
        let n = index + 1;
        assert_eq!(row[0], format!("{}/p/{}/", mock_server.uri(), n));
        assert_eq!(row[1], format!("Product {}", n));
    }

    let first = &rows[0];
    assert_eq!(&first[2], "Brand is not available");
    assert_eq!(&first[3], "4.2");
    assert_eq!(&first[6], "199");
    // No list price on the page, so MRSP falls back to the sale price
    assert_eq!(&first[7], "199");
    assert_eq!(&first[8], "€20,00");
    assert_eq!(&first[12], r#"{"Colour":"Black"}"#);

    let summary = std::fs::read_to_string(&summary_path).unwrap();
    assert!(summary.contains("- **Records**: 5"));
    assert!(summary.contains("- **Config Hash**: hash"));
}

#[tokio::test]
async fn test_full_scrape_writes_json() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;

    let temp_dir = TempDir::new().unwrap();
    let dataset_path = temp_dir.path().join("product_data.json");
    let config = create_test_config(
        &format!("{}/listing/1", mock_server.uri()),
        dataset_path.to_str().unwrap(),
        OutputFormat::Json,
        None,
    );

    run_scrape(config, None).await.unwrap();

    let text = std::fs::read_to_string(&dataset_path).unwrap();
    let records: serde_json::Value = serde_json::from_str(&text).unwrap();
    let records = records.as_array().unwrap();

    assert_eq!(records.len(), 5);
    assert_eq!(records[4]["name"], "Product 5");
    assert_eq!(records[0]["specifications"]["Colour"], "Black");
    assert_eq!(records[0]["stock_status"], "Stock status not available");
}

#[tokio::test]
async fn test_transient_failures_are_retried() {
    let mock_server = MockServer::start().await;

    // Two failures, then the page is served
    Mock::given(method("GET"))
        .and(path("/listing/1"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/listing/1"))
        .respond_with(html(listing_page(&["/p/1/"], None)))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/p/1/"))
        .respond_with(html(product_page("Only")))
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let dataset_path = temp_dir.path().join("product_data.csv");
    let config = create_test_config(
        &format!("{}/listing/1", mock_server.uri()),
        dataset_path.to_str().unwrap(),
        OutputFormat::Csv,
        None,
    );

    let stats = run_scrape(config, None).await.unwrap();
    assert_eq!(stats.records, 1);
}

#[tokio::test]
async fn test_dead_product_link_keeps_run_going() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/listing/1"))
        .respond_with(html(listing_page(&["/p/1/", "/p/gone/", "/p/3/"], None)))
        .mount(&mock_server)
        .await;
    for n in [1, 3] {
        Mock::given(method("GET"))
            .and(path(format!("/p/{}/", n)))
            .respond_with(html(product_page(&format!("Product {}", n))))
            .mount(&mock_server)
            .await;
    }
    // Served once: a client error is not retried
    Mock::given(method("GET"))
        .and(path("/p/gone/"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<html>Page not found</html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let dataset_path = temp_dir.path().join("product_data.csv");
    let config = create_test_config(
        &format!("{}/listing/1", mock_server.uri()),
        dataset_path.to_str().unwrap(),
        OutputFormat::Csv,
        None,
    );

    let stats = run_scrape(config, None).await.unwrap();
    assert_eq!(stats.records, 3);

    let mut reader = csv::Reader::from_path(&dataset_path).unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(&rows[0][1], "Product 1");
    assert_eq!(&rows[2][1], "Product 3");

    let gone = &rows[1];
    assert_eq!(gone[0], format!("{}/p/gone/", mock_server.uri()));
    assert_eq!(&gone[1], "Product name is not available");
    assert_eq!(&gone[3], "Rating not available");
    assert_eq!(&gone[6], "Sale price not available");
    assert_eq!(&gone[12], "{}");
}

#[tokio::test]
async fn test_exhausted_retries_abort_without_output() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/listing/1"))
        .respond_with(html(listing_page(&["/p/1/"], None)))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/p/1/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let dataset_path = temp_dir.path().join("product_data.csv");
    let config = create_test_config(
        &format!("{}/listing/1", mock_server.uri()),
        dataset_path.to_str().unwrap(),
        OutputFormat::Csv,
        None,
    );

    let err = run_scrape(config, None).await.unwrap_err();

    match err {
        ScrapeError::Fetch(e) => {
            assert_eq!(e.attempts(), 3);
            assert_eq!(e.url(), format!("{}/p/1/", mock_server.uri()));
            assert!(e.to_string().starts_with("request timed out"));
        }
        other => panic!("unexpected error: {}", other),
    }
    assert!(!dataset_path.exists());
}
