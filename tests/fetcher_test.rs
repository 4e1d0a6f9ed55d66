//! Integration tests for HttpFetcher using wiremock
//!
//! These tests validate the HTTP fetcher's behavior with mock servers.

use medscrape::crawler::{HttpFetcher, PageFetcher};
use medscrape::error::FetchError;
use std::time::Duration;
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Test successful fetch from mock server
#[tokio::test]
async fn test_fetch_success() {
    let mock_server = MockServer::start().await;
    let html = "<html><head><title>Migraine</title></head><body><h1>Migraine</h1></body></html>";

    Mock::given(method("GET"))
        .and(path("/conditions/migraine"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::new(Duration::from_secs(5)).unwrap();
    let url = format!("{}/conditions/migraine", mock_server.uri());
    let body = fetcher.fetch(&url, "agent").await.unwrap();

    assert!(body.contains("<h1>Migraine</h1>"));
}

/// Test that the identity is sent as the User-Agent
#[tokio::test]
async fn test_identity_sent_as_user_agent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page"))
        .and(header("user-agent", "MHI-SymptomChecker/1.0 (hello@mhi.ng)"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::new(Duration::from_secs(5)).unwrap();
    let url = format!("{}/page", mock_server.uri());
    let body = fetcher
        .fetch(&url, "MHI-SymptomChecker/1.0 (hello@mhi.ng)")
        .await
        .unwrap();

    assert_eq!(body, "ok");
}

/// Test 404 is reported once, without retries
#[tokio::test]
async fn test_not_found_no_retry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::new(Duration::from_secs(5)).unwrap();
    let url = format!("{}/missing", mock_server.uri());
    let result = fetcher.fetch(&url, "agent").await;

    assert!(matches!(result, Err(FetchError::Status(404))));
}

/// Test server errors surface as status errors
#[tokio::test]
async fn test_server_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::new(Duration::from_secs(5)).unwrap();
    let err = fetcher
        .fetch(&format!("{}/busy", mock_server.uri()), "agent")
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Status(503)));
    assert!(err.is_recoverable());
}

/// Test a slow response hits the request timeout
#[tokio::test]
async fn test_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("late")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::new(Duration::from_millis(200)).unwrap();
    let url = format!("{}/slow", mock_server.uri());
    let result = fetcher.fetch(&url, "agent").await;

    assert!(matches!(result, Err(FetchError::Timeout)));
}

/// Test a legacy charset declared in Content-Type is decoded
#[tokio::test]
async fn test_charset_from_content_type() {
    let mock_server = MockServer::start().await;

    // "<h1>Ménière</h1>" in windows-1252
    let mut body = b"<h1>M".to_vec();
    body.extend_from_slice(&[0xe9, 0x6e, 0x69, 0xe8]);
    body.extend_from_slice(b"re</h1>");

    Mock::given(method("GET"))
        .and(path("/legacy"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=windows-1252"),
        )
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::new(Duration::from_secs(5)).unwrap();
    let url = format!("{}/legacy", mock_server.uri());
    let text = fetcher.fetch(&url, "agent").await.unwrap();

    assert_eq!(text, "<h1>Ménière</h1>");
}

/// Test connection failures are transport errors
#[tokio::test]
async fn test_connection_refused() {
    let mock_server = MockServer::start().await;
    let url = format!("{}/gone", mock_server.uri());
    drop(mock_server);

    let fetcher = HttpFetcher::new(Duration::from_secs(2)).unwrap();
    let result = fetcher.fetch(&url, "agent").await;

    assert!(matches!(
        result,
        Err(FetchError::Http(_) | FetchError::Timeout)
    ));
}

/// Test malformed bytes are replaced instead of failing the page
#[tokio::test]
async fn test_malformed_body_still_returned() {
    let mock_server = MockServer::start().await;

    let mut body = b"<h2>Symptoms</h2><div class=\"Text_wrapper\">Fever ".to_vec();
    body.push(0xff);
    body.extend_from_slice(b"</div>");

    Mock::given(method("GET"))
        .and(path("/conditions/flu"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=utf-8"))
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::new(Duration::from_secs(5)).unwrap();
    let url = format!("{}/conditions/flu", mock_server.uri());
    let text = fetcher.fetch(&url, "agent").await.unwrap();

    assert!(text.contains("Fever \u{FFFD}</div>"));
}

/// Test cookies set by one page are not sent with the next request
#[tokio::test]
async fn test_no_session_between_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header_exists("cookie"))
        .respond_with(ResponseTemplate::new(500))
        .with_priority(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/conditions"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "session=abc; Path=/")
                .set_body_string("index"),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/conditions/flu"))
        .respond_with(ResponseTemplate::new(200).set_body_string("flu"))
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::new(Duration::from_secs(5)).unwrap();
    let index = format!("{}/conditions", mock_server.uri());
    let detail = format!("{}/conditions/flu", mock_server.uri());

    assert_eq!(fetcher.fetch(&index, "agent").await.unwrap(), "index");
    assert_eq!(fetcher.fetch(&detail, "agent").await.unwrap(), "flu");
}
