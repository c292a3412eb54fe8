//! Tests for the HTTP client module

use super::*;
use crate::auth::{
    Authenticator, Credentials, Signer, SigningRequest, AUTHORIZATION_HEADER, DATE_HEADER,
};
use crate::error::{Error, Result};
use crate::types::{BackoffType, Method};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::matchers::{body_string, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpClient {
    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(10),
            Duration::from_secs(1),
        )
        .no_rate_limit()
        .build();
    HttpClient::with_config(config).unwrap()
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.max_retries, 3);
    assert!(config.base_url.is_none());
    assert!(config.rate_limit.is_some());
    assert!(config.user_agent.starts_with("plaza-client/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .base_url("https://test-plazaapi.bol.com")
        .timeout(Duration::from_secs(60))
        .max_retries(5)
        .backoff(
            BackoffType::Linear,
            Duration::from_millis(200),
            Duration::from_secs(30),
        )
        .header("X-Custom", "value")
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(
        config.base_url,
        Some("https://test-plazaapi.bol.com".to_string())
    );
    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(config.max_retries, 5);
    assert_eq!(config.backoff_type, BackoffType::Linear);
    assert_eq!(config.initial_backoff, Duration::from_millis(200));
    assert_eq!(config.max_backoff, Duration::from_secs(30));
    assert_eq!(
        config.default_headers.get("X-Custom"),
        Some(&"value".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[test]
fn test_request_config_builder() {
    let config = RequestConfig::new()
        .query("page", 1)
        .query_opt("fulfilment-method", Some("FBR"))
        .query_opt("order-id", None::<String>)
        .header("X-Request-Id", "abc123")
        .xml("<Root/>")
        .accept("application/pdf")
        .timeout(Duration::from_secs(10))
        .retries(2);

    assert_eq!(config.query.get("page"), Some(&"1".to_string()));
    assert_eq!(
        config.query.get("fulfilment-method"),
        Some(&"FBR".to_string())
    );
    assert!(!config.query.contains_key("order-id"));
    assert_eq!(
        config.headers.get("X-Request-Id"),
        Some(&"abc123".to_string())
    );
    assert_eq!(config.body.as_deref(), Some("<Root/>"));
    assert_eq!(config.accept.as_deref(), Some("application/pdf"));
    assert_eq!(config.timeout, Some(Duration::from_secs(10)));
    assert_eq!(config.max_retries, Some(2));
}

#[test]
fn test_http_response_accessors() {
    let response = HttpResponse::new(
        200,
        Some("application/json;charset=UTF-8".to_string()),
        bytes::Bytes::from_static(b"{}"),
    );
    assert!(response.is_json());
    assert_eq!(response.text().unwrap(), "{}");

    let xml = HttpResponse::new(200, Some("application/xml".to_string()), bytes::Bytes::new());
    assert!(!xml.is_json());
}

#[test]
fn test_http_response_invalid_utf8() {
    let response = HttpResponse::new(200, None, bytes::Bytes::from_static(&[0xff, 0xfe]));
    assert!(response.text().is_err());
}

// ============================================================================
// Requests
// ============================================================================

#[tokio::test]
async fn test_http_client_get() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/services/rest/orders/v2"))
        .and(header("accept", DEFAULT_ACCEPT))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<Orders/>", "application/xml"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client.get("/services/rest/orders/v2").await.unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.content_type(), Some("application/xml"));
    assert_eq!(response.text().unwrap(), "<Orders/>");
}

#[tokio::test]
async fn test_http_client_send_xml() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/services/rest/transports/v2/1"))
        .and(body_string("<ChangeTransportRequest/>"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client
        .send_xml(
            Method::PUT,
            "/services/rest/transports/v2/1",
            "<ChangeTransportRequest/>".to_string(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_query_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/services/rest/shipments/v2"))
        .and(query_param("page", "2"))
        .and(query_param("order-id", "123"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client
        .get_with_config(
            "/services/rest/shipments/v2",
            RequestConfig::new().query("page", 2).query("order-id", "123"),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_default_and_request_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/data"))
        .and(header("X-Team", "fulfilment"))
        .and(header("X-Request-Id", "req-456"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .header("X-Team", "fulfilment")
        .no_rate_limit()
        .build();

    let client = HttpClient::with_config(config).unwrap();
    let response = client
        .get_with_config(
            "/api/data",
            RequestConfig::new().header("X-Request-Id", "req-456"),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_accepted_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/offers/v2/"))
        .respond_with(ResponseTemplate::new(202))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client
        .send_xml(Method::PUT, "/offers/v2/", "<UpsertRequest/>".to_string())
        .await
        .unwrap();

    assert_eq!(response.status(), 202);
}

#[tokio::test]
async fn test_http_client_full_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/offers/v2/export/file.csv"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder().no_rate_limit().build();
    let client = HttpClient::with_config(config).unwrap();

    let response = client
        .get(&format!("{}/offers/v2/export/file.csv", mock_server.uri()))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

// ============================================================================
// Errors and retries
// ============================================================================

#[tokio::test]
async fn test_http_client_404_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/services/rest/process-status/v2/9"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .get("/services/rest/process-status/v2/9")
        .await
        .unwrap_err();

    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "Not found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_http_client_retry_on_500() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/flaky"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/flaky"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client.get("/api/flaky").await.unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_rate_limit_retry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/limited"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("retry-after", "1")
                .set_body_string("Rate limited"),
        )
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/limited"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client.get("/api/limited").await.unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_rate_limited_without_retries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/limited"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "7"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .get_with_config("/api/limited", RequestConfig::new().retries(0))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::RateLimited {
            retry_after_seconds: 7
        }
    ));
}

#[tokio::test]
async fn test_http_client_max_retries_exceeded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/always-fail"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Server error"))
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .max_retries(2)
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(10),
            Duration::from_secs(1),
        )
        .no_rate_limit()
        .build();

    let client = HttpClient::with_config(config).unwrap();
    let err = client.get("/api/always-fail").await.unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 500, .. }));
}

#[tokio::test]
async fn test_http_client_timeout_is_retried_then_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .get_with_config(
            "/api/slow",
            RequestConfig::new()
                .timeout(Duration::from_millis(50))
                .retries(1),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Timeout { timeout_ms: 50 }));
}

#[tokio::test]
async fn test_http_client_refused_connection() {
    let config = HttpClientConfig::builder()
        .base_url("http://127.0.0.1:1")
        .max_retries(1)
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(10),
            Duration::from_secs(1),
        )
        .no_rate_limit()
        .build();

    let client = HttpClient::with_config(config).unwrap();
    let err = client.get("/services/rest/orders/v2").await.unwrap_err();

    assert!(matches!(err, Error::Http(_)));
    assert!(err.is_retryable());
}

// ============================================================================
// Signing
// ============================================================================

#[tokio::test]
async fn test_http_client_signs_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/services/rest/orders/v2"))
        .and(header_exists(DATE_HEADER))
        .and(header_exists(AUTHORIZATION_HEADER))
        .and(header("content-type", "application/xml; charset=UTF-8"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .no_rate_limit()
        .build();
    let client =
        HttpClient::with_auth(config, Authenticator::new(Credentials::new("pub", "priv"))).unwrap();

    let response = client.get("/services/rest/orders/v2").await.unwrap();
    assert_eq!(response.status(), 200);

    let requests = mock_server.received_requests().await.unwrap();
    let signature = requests[0].headers.get(AUTHORIZATION_HEADER).unwrap();
    assert!(signature.to_str().unwrap().starts_with("pub:"));
}

/// Records the path of every signing call
#[derive(Clone, Default)]
struct RecordingSigner {
    calls: Arc<AtomicUsize>,
    paths: Arc<Mutex<Vec<String>>>,
}

impl Signer for RecordingSigner {
    fn sign(&self, request: &SigningRequest) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut paths) = self.paths.lock() {
            paths.push(request.path.clone());
        }
        Ok("test:signature".to_string())
    }
}

#[tokio::test]
async fn test_http_client_signs_every_attempt_without_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/services/rest/orders/v2"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/services/rest/orders/v2"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let signer = RecordingSigner::default();
    let mut client = client_for(&mock_server);
    client.set_authenticator(Authenticator::with_signer(signer.clone()));

    client
        .get_with_config(
            "/services/rest/orders/v2",
            RequestConfig::new().query("page", 1),
        )
        .await
        .unwrap();

    assert_eq!(signer.calls.load(Ordering::SeqCst), 3);
    let paths = signer.paths.lock().unwrap();
    assert!(paths.iter().all(|p| p == "/services/rest/orders/v2"));
}

// ============================================================================
// Backoff
// ============================================================================

fn client_with_backoff(backoff_type: BackoffType, max: Duration) -> HttpClient {
    let config = HttpClientConfig::builder()
        .backoff(backoff_type, Duration::from_millis(100), max)
        .no_rate_limit()
        .build();
    HttpClient::with_config(config).unwrap()
}

#[test]
fn test_calculate_backoff_constant() {
    let client = client_with_backoff(BackoffType::Constant, Duration::from_secs(10));

    assert_eq!(client.calculate_backoff(0), Duration::from_millis(100));
    assert_eq!(client.calculate_backoff(5), Duration::from_millis(100));
}

#[test]
fn test_calculate_backoff_linear() {
    let client = client_with_backoff(BackoffType::Linear, Duration::from_secs(10));

    assert_eq!(client.calculate_backoff(0), Duration::from_millis(100));
    assert_eq!(client.calculate_backoff(1), Duration::from_millis(200));
    assert_eq!(client.calculate_backoff(2), Duration::from_millis(300));
}

#[test]
fn test_calculate_backoff_exponential() {
    let client = client_with_backoff(BackoffType::Exponential, Duration::from_secs(10));

    assert_eq!(client.calculate_backoff(0), Duration::from_millis(100));
    assert_eq!(client.calculate_backoff(1), Duration::from_millis(200));
    assert_eq!(client.calculate_backoff(3), Duration::from_millis(800));
}

#[test]
fn test_calculate_backoff_respects_max() {
    let client = client_with_backoff(BackoffType::Exponential, Duration::from_millis(500));
    assert_eq!(client.calculate_backoff(10), Duration::from_millis(500));
}

#[test]
fn test_http_client_debug() {
    let client = HttpClient::new().unwrap();
    let debug_str = format!("{client:?}");
    assert!(debug_str.contains("HttpClient"));
    assert!(debug_str.contains("has_authenticator: false"));
    assert!(client.has_rate_limiter());
}

#[tokio::test]
async fn test_http_client_with_rate_limiter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/data"))
        .respond_with(ResponseTemplate::new(200))
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .rate_limit(RateLimiterConfig::new(100, 10))
        .build();

    let client = HttpClient::with_config(config).unwrap();
    for _ in 0..3 {
        let response = client.get("/api/data").await.unwrap();
        assert_eq!(response.status(), 200);
    }
}
