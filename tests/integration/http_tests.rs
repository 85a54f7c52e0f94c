//! Integration tests for the HTTP fetcher
//!
//! These tests use wiremock to serve catalog pages over HTTP and run the
//! scrape through `HttpFetcher`.

use product_scraper::config::{HttpConfig, UserAgentConfig};
use product_scraper::{Fetcher, HttpFetcher, ScrapeError, Scraper};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn listing(hrefs: &[String]) -> String {
    let items: String = hrefs
        .iter()
        .map(|href| {
            format!(
                r#"<li><div class="productInfo"><h3><a href="{}">item</a></h3></div></li>"#,
                href
            )
        })
        .collect();
    format!("<html><body><ul>{}</ul></body></html>", items)
}

fn product_page(title: &str, price: &str) -> String {
    format!(
        r#"<html><body>
        <div class="productTitleDescriptionContainer"><h1>{}</h1></div>
        <div class="productText"><p>{} from the orchard</p></div>
        <p class="pricePerUnit">&pound;{}<abbr title="per">/</abbr>unit</p>
        </body></html>"#,
        title, title, price
    )
}

fn test_fetcher() -> HttpFetcher {
    let user_agent = UserAgentConfig {
        crawler_name: "TestScraper".to_string(),
        crawler_version: "1.0".to_string(),
        contact_url: None,
    };
    let http = HttpConfig {
        timeout_secs: 10,
        connect_timeout_secs: 5,
    };
    HttpFetcher::from_config(&user_agent, &http).expect("Failed to build fetcher")
}

async fn mount_html(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_scrape_over_http() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let kiwi = product_page("Kiwi", "1.80");
    let kiwi_len = kiwi.len() as u64;

    mount_html(
        &mock_server,
        "/ripe.html",
        listing(&[
            format!("{}/kiwi.html", base_url),
            format!("{}/pear.html", base_url),
            format!("{}/gone.html", base_url),
        ]),
    )
    .await;
    mount_html(&mock_server, "/kiwi.html", kiwi).await;
    mount_html(&mock_server, "/pear.html", product_page("Pear", "1.50")).await;

    Mock::given(method("GET"))
        .and(path("/gone.html"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let scraper = Scraper::new(test_fetcher());
    let report = scraper
        .run(&[format!("{}/ripe.html", base_url)])
        .await
        .expect("Scrape should not fail");

    assert_eq!(report.results.len(), 2);
    assert_eq!(report.results.total(), 330);
    assert_eq!(report.stats.product_urls, 3);
    assert_eq!(report.stats.product_failures, 1);

    let kiwi = report
        .results
        .products()
        .iter()
        .find(|p| p.title() == "Kiwi")
        .expect("Kiwi should be scraped");
    assert_eq!(kiwi.description(), "Kiwi from the orchard");
    assert_eq!(kiwi.unit_price(), 180);
    assert_eq!(kiwi.size(), kiwi_len);
}

#[tokio::test]
async fn test_relative_links_resolved_against_seed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/catalog/ripe.html",
        listing(&["kiwi.html".to_string(), "/catalog/pear.html".to_string()]),
    )
    .await;
    mount_html(&mock_server, "/catalog/kiwi.html", product_page("Kiwi", "1.80")).await;
    mount_html(&mock_server, "/catalog/pear.html", product_page("Pear", "1.50")).await;

    let results = Scraper::new(test_fetcher())
        .scrape(&[format!("{}/catalog/ripe.html", base_url)])
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results.total(), 330);
}

#[tokio::test]
async fn test_sends_configured_user_agent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page.html"))
        .and(header("user-agent", "TestScraper/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let page = test_fetcher()
        .fetch(&format!("{}/page.html", mock_server.uri()))
        .await
        .expect("Fetch should succeed");

    assert_eq!(page.body, b"<html></html>".to_vec());
    assert_eq!(page.content_length, 13);
}

#[tokio::test]
async fn test_error_status_is_fetch_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/broken.html"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let result = test_fetcher()
        .fetch(&format!("{}/broken.html", mock_server.uri()))
        .await;

    assert!(matches!(result, Err(ScrapeError::Status { status: 500, .. })));
}

#[tokio::test]
async fn test_unreachable_host_is_fetch_failure() {
    // Port 9 (discard) on localhost is expected to refuse connections
    let result = test_fetcher().fetch("http://127.0.0.1:9/").await;
    assert!(matches!(result, Err(ScrapeError::Http { .. })));
}

#[tokio::test]
async fn test_latin1_page_decoded_by_charset() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let page = product_page("Kiwi", "PRICE").replace("&pound;PRICE", "PRICE");
    let (head, tail) = page.split_once("PRICE").unwrap();
    let body = [head.as_bytes(), &b"\xA31.80"[..], tail.as_bytes()].concat();

    mount_html(
        &mock_server,
        "/ripe.html",
        listing(&[format!("{}/kiwi.html", base_url)]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/kiwi.html"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=iso-8859-1"),
        )
        .mount(&mock_server)
        .await;

    let fetched = test_fetcher()
        .fetch(&format!("{}/kiwi.html", base_url))
        .await
        .expect("Fetch should succeed");
    assert!(String::from_utf8(fetched.body).unwrap().contains("£1.80<abbr"));

    let report = Scraper::new(test_fetcher())
        .run(&[format!("{}/ripe.html", base_url)])
        .await
        .unwrap();

    assert_eq!(report.stats.product_failures, 0);
    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results.total(), 180);
}
