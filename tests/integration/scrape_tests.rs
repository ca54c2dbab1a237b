//! Integration tests for the scraper
//!
//! These tests use wiremock to serve listing pages and run the full
//! fetch, paginate, extract and export cycle end-to-end.

use listing_scraper::config::{Config, HttpConfig, OutputConfig, TargetConfig};
use listing_scraper::crawler::{
    compile, discover_links, extract_records, FieldRule, FieldSource, PageSchema,
};
use listing_scraper::{ExtractResult, ProductRecord, ScrapeError, ScrapeOutcome, Scraper};
use scraper::Selector;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: String, dir: &TempDir) -> Config {
    Config {
        target: TargetConfig { base_url },
        http: HttpConfig {
            user_agent: "TestScraper/1.0".to_string(),
            timeout_secs: 5,
        },
        output: OutputConfig {
            csv_path: dir.path().join("computers_data.csv").to_string_lossy().into_owned(),
            json_path: dir.path().join("computers_data.json").to_string_lossy().into_owned(),
        },
    }
}

fn card(name: &str, description: &str, price: &str) -> String {
    format!(
        r#"<div class="col-md-4"><div class="card thumbnail"><div class="card-body">
            <h4 class="price float-end card-title pull-right"> {price} </h4>
            <h4><a href="/product/x" class="title" title="{name}">{name}</a></h4>
            <p class="description card-text"> {description} </p>
        </div></div></div>"#
    )
}

fn listing(cards: &[String], pagination: Option<&[&str]>) -> String {
    let pagination = pagination
        .map(|hrefs| {
            let items: String = hrefs
                .iter()
                .map(|href| format!(r#"<li class="page-item"><a class="page-link" href="{href}">p</a></li>"#))
                .collect();
            format!(r#"<ul class="pagination">{items}</ul>"#)
        })
        .unwrap_or_default();

    format!(
        "<html><head><title>Laptops</title></head><body><div class=\"row\">{}</div>{}</body></html>",
        cards.concat(),
        pagination
    )
}

async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_scrape_two_pages() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let pagination: &[&str] = &["/laptops/1", "/laptops/2"];

    mount_page(
        &mock_server,
        "/laptops",
        listing(&[card("Base Page Laptop", "base", "$100")], Some(pagination)),
    )
    .await;
    mount_page(
        &mock_server,
        "/laptops/1",
        listing(
            &[
                card("Asus VivoBook X441NA", "14\", Celeron N3450", "$295.99"),
                card("Prestigio SmartBook 133S", "13.3\", Core M3-6Y30", "$299"),
            ],
            Some(pagination),
        ),
    )
    .await;
    mount_page(
        &mock_server,
        "/laptops/2",
        listing(&[card("Acer Aspire 3 Ünïcödé", "15.6\", Ryzen 3", "€399.00")], Some(pagination)),
    )
    .await;

    let config = create_test_config(format!("{}/laptops", mock_server.uri()), &dir);
    let csv_path = config.output.csv_path.clone();
    let json_path = config.output.json_path.clone();

    let scraper = Scraper::new(config).expect("Failed to create scraper");
    let outcome = scraper.run().await.expect("Scrape failed");

    let batches = match outcome {
        ScrapeOutcome::Saved { batches, .. } => batches,
        other => panic!("expected Saved, got {:?}", other),
    };

    // Base page plus two discovered links
    assert_eq!(batches.len(), 3);
    assert_eq!(batches[0].url, format!("{}/laptops", mock_server.uri()));
    assert_eq!(batches[1].url, format!("{}/laptops/1", mock_server.uri()));
    assert_eq!(batches[0].len(), 1);
    assert_eq!(batches[1].len(), 2);
    assert_eq!(batches[2].len(), 1);

    let csv = std::fs::read_to_string(&csv_path).expect("CSV not written");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "name,description,price");
    assert_eq!(lines.len(), 1 + 4);

    let json = std::fs::read_to_string(&json_path).expect("JSON not written");
    assert!(json.contains("Acer Aspire 3 Ünïcödé"));
    let records: Vec<ProductRecord> = serde_json::from_str(&json).unwrap();
    assert_eq!(records.len(), 4);
    assert_eq!(
        records[1],
        ProductRecord::new("Asus VivoBook X441NA", "14\", Celeron N3450", "$295.99")
    );
}

#[tokio::test]
async fn test_missing_pagination_aborts_run() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        "/laptops",
        listing(&[card("Lonely Laptop", "only page", "$1")], None),
    )
    .await;

    let config = create_test_config(format!("{}/laptops", mock_server.uri()), &dir);
    let csv_path = config.output.csv_path.clone();

    let outcome = Scraper::new(config).unwrap().run().await.unwrap();

    assert!(matches!(outcome, ScrapeOutcome::NoPagination { .. }));
    assert!(!std::path::Path::new(&csv_path).exists());
}

#[tokio::test]
async fn test_pages_without_cards_save_nothing() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let pagination: &[&str] = &["/laptops/2"];

    mount_page(&mock_server, "/laptops", listing(&[], Some(pagination))).await;
    mount_page(&mock_server, "/laptops/2", listing(&[], Some(pagination))).await;

    let config = create_test_config(format!("{}/laptops", mock_server.uri()), &dir);
    let csv_path = config.output.csv_path.clone();
    let json_path = config.output.json_path.clone();

    let outcome = Scraper::new(config).unwrap().run().await.unwrap();

    match outcome {
        ScrapeOutcome::NoRecords { batches } => {
            assert_eq!(batches.len(), 2);
            assert!(batches.iter().all(|b| b.is_empty()));
        }
        other => panic!("expected NoRecords, got {:?}", other),
    }
    assert!(!std::path::Path::new(&csv_path).exists());
    assert!(!std::path::Path::new(&json_path).exists());
}

#[tokio::test]
async fn test_http_error_on_linked_page_fails_run() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let pagination: &[&str] = &["/laptops/gone"];

    mount_page(
        &mock_server,
        "/laptops",
        listing(&[card("A", "a", "$1")], Some(pagination)),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/laptops/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let config = create_test_config(format!("{}/laptops", mock_server.uri()), &dir);
    let csv_path = config.output.csv_path.clone();

    let err = Scraper::new(config).unwrap().run().await.unwrap_err();

    match err {
        ScrapeError::HttpStatus { url, status_code } => {
            assert_eq!(status_code, 404);
            assert!(url.ends_with("/laptops/gone"));
        }
        other => panic!("expected HttpStatus, got {}", other),
    }
    assert!(!std::path::Path::new(&csv_path).exists());
}

#[tokio::test]
async fn test_server_error_on_base_page() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/laptops"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let config = create_test_config(format!("{}/laptops", mock_server.uri()), &dir);
    let err = Scraper::new(config).unwrap().run().await.unwrap_err();

    assert!(matches!(err, ScrapeError::HttpStatus { status_code: 503, .. }));
}

#[tokio::test]
async fn test_malformed_card_fails_run() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let pagination: &[&str] = &["/laptops/2"];

    mount_page(
        &mock_server,
        "/laptops",
        listing(&[card("A", "a", "$1")], Some(pagination)),
    )
    .await;
    mount_page(
        &mock_server,
        "/laptops/2",
        listing(
            &[r#"<div class="card-body"><a class="title" title="No Price"></a></div>"#.to_string()],
            Some(pagination),
        ),
    )
    .await;

    let config = create_test_config(format!("{}/laptops", mock_server.uri()), &dir);
    let json_path = config.output.json_path.clone();

    let err = Scraper::new(config).unwrap().run().await.unwrap_err();

    assert!(matches!(err, ScrapeError::Extract { .. }));
    assert!(!std::path::Path::new(&json_path).exists());
}

/// Schema for a shop that lists products as `li.product` and paginates with `nav.pager`
struct ShopSchema {
    pagination: Selector,
    page_link: FieldRule,
    product_block: Selector,
    name: FieldRule,
    description: FieldRule,
    price: FieldRule,
}

impl ShopSchema {
    fn new() -> ExtractResult<Self> {
        Ok(Self {
            pagination: compile("nav.pager")?,
            page_link: FieldRule::new("page link", "a", FieldSource::Attribute("data-path"))?,
            product_block: compile("li.product")?,
            name: FieldRule::new("name", "span.name", FieldSource::Text)?,
            description: FieldRule::new("description", "div.blurb", FieldSource::Text)?,
            price: FieldRule::new("price", "meta[itemprop=price]", FieldSource::Attribute("content"))?,
        })
    }
}

impl PageSchema for ShopSchema {
    fn pagination(&self) -> &Selector {
        &self.pagination
    }

    fn page_link(&self) -> &FieldRule {
        &self.page_link
    }

    fn product_block(&self) -> &Selector {
        &self.product_block
    }

    fn name(&self) -> &FieldRule {
        &self.name
    }

    fn description(&self) -> &FieldRule {
        &self.description
    }

    fn price(&self) -> &FieldRule {
        &self.price
    }
}

fn shop_page(products: &[(&str, &str, &str)], pages: &[&str]) -> String {
    let items: String = products
        .iter()
        .map(|(name, blurb, price)| {
            format!(
                r#"<li class="product"><span class="name"> {name} </span><div class="blurb">{blurb}</div><meta itemprop="price" content="{price}"></li>"#
            )
        })
        .collect();
    let links: String = pages
        .iter()
        .map(|page| format!(r#"<a href="javascript:void(0)" data-path="{page}">next</a>"#))
        .collect();

    format!(r#"<html><body><ul>{items}</ul><nav class="pager">{links}</nav></body></html>"#)
}

#[test]
fn test_custom_schema_discovers_and_extracts() {
    let schema = ShopSchema::new().unwrap();
    let html = shop_page(
        &[("Pixel Tablet", "11\" screen", "499.00"), ("Galaxy Tab", "AMOLED", "649.00")],
        &["/tablets?p=2", "/tablets?p=3"],
    );

    let links = discover_links(&html, "https://shop.example.org/tablets", &schema).unwrap();
    assert_eq!(
        links,
        vec![
            "https://shop.example.org/tablets",
            "https://shop.example.org/tablets?p=2",
            "https://shop.example.org/tablets?p=3",
        ]
    );

    let records = extract_records(&html, &schema).unwrap();
    assert_eq!(
        records,
        vec![
            ProductRecord::new("Pixel Tablet", "11\" screen", "499.00"),
            ProductRecord::new("Galaxy Tab", "AMOLED", "649.00"),
        ]
    );

    // Markup for the e-commerce site means nothing to this schema
    let pager: &[&str] = &["/laptops/2"];
    let other = listing(&[card("A", "a", "$1")], Some(pager));
    assert!(discover_links(&other, "https://shop.example.org/tablets", &schema)
        .unwrap()
        .is_empty());
    assert!(extract_records(&other, &schema).unwrap().is_empty());
}

#[tokio::test]
async fn test_full_scrape_with_custom_schema() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        "/tablets",
        shop_page(&[("Pixel Tablet", "Android", "499.00")], &["/tablets/2"]),
    )
    .await;
    mount_page(
        &mock_server,
        "/tablets/2",
        shop_page(&[("iPad Air", "M2 chip", "599.00")], &["/tablets/2"]),
    )
    .await;

    let config = create_test_config(format!("{}/tablets", mock_server.uri()), &dir);
    let json_path = config.output.json_path.clone();

    let scraper = Scraper::with_schema(config, Box::new(ShopSchema::new().unwrap()))
        .expect("Failed to create scraper");
    let outcome = scraper.run().await.expect("Scrape failed");

    let batches = match outcome {
        ScrapeOutcome::Saved { batches, .. } => batches,
        other => panic!("expected Saved, got {:?}", other),
    };
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[1].url, format!("{}/tablets/2", mock_server.uri()));

    let json = std::fs::read_to_string(&json_path).expect("JSON not written");
    let records: Vec<ProductRecord> = serde_json::from_str(&json).unwrap();
    assert_eq!(
        records,
        vec![
            ProductRecord::new("Pixel Tablet", "Android", "499.00"),
            ProductRecord::new("iPad Air", "M2 chip", "599.00"),
        ]
    );
}

#[tokio::test]
async fn test_redirected_page_is_followed() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let pagination: &[&str] = &["/laptops/old"];

    mount_page(
        &mock_server,
        "/laptops",
        listing(&[card("A", "a", "$1")], Some(pagination)),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/laptops/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/laptops/new"))
        .mount(&mock_server)
        .await;
    mount_page(
        &mock_server,
        "/laptops/new",
        listing(&[card("B", "b", "$2")], Some(pagination)),
    )
    .await;

    let config = create_test_config(format!("{}/laptops", mock_server.uri()), &dir);
    let outcome = Scraper::new(config).unwrap().run().await.unwrap();

    match outcome {
        ScrapeOutcome::Saved { batches, .. } => {
            assert_eq!(batches.len(), 2);
            assert!(batches[1].url.ends_with("/laptops/old"));
            assert_eq!(batches[1].records[0].name, "B");
        }
        other => panic!("expected Saved, got {:?}", other),
    }
}
