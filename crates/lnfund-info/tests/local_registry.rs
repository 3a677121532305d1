//! Registry client tests against a throwaway HTTP server on localhost

use lnfund_deps::{Funding, FundingRecord};
use lnfund_info::{ClientOptions, Error, HttpClient, Registry, RegistryClient};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Canned reply for one request path
#[derive(Clone)]
struct Reply {
    status: u16,
    body: String,
    delay: Duration,
}

impl Reply {
    fn ok(body: &str) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    fn status(status: u16) -> Self {
        Self {
            status,
            body: "{}".to_string(),
            delay: Duration::ZERO,
        }
    }
}

/// Serve canned replies keyed by request path; unknown paths get a 404.
async fn serve(routes: HashMap<&'static str, Reply>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let routes = Arc::new(routes);

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let routes = Arc::clone(&routes);
            tokio::spawn(async move {
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut chunk).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => buf.extend_from_slice(&chunk[..n]),
                    }
                }

                let head = String::from_utf8_lossy(&buf);
                let path = head.split_whitespace().nth(1).unwrap_or("/").to_string();
                let reply = routes
                    .get(path.as_str())
                    .cloned()
                    .unwrap_or_else(|| Reply::status(404));

                tokio::time::sleep(reply.delay).await;
                let response = format!(
                    "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    reply.status,
                    reply.body.len(),
                    reply.body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{}", addr)
}

fn client_for(base: &str) -> RegistryClient {
    RegistryClient::builder()
        .registry_url(base)
        .timeout(Duration::from_millis(500))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_fetch_latest_parses_funding_and_dependencies() {
    let base = serve(HashMap::from([(
        "/satoshi-utils/latest",
        Reply::ok(
            r#"{
                "name": "satoshi-utils",
                "version": "2.0.0",
                "dependencies": { "bolt11": "^1" },
                "peerDependencies": { "noble": "^1" },
                "funding": { "type": "lightning", "url": "lightning:sats@getalby.com" }
            }"#,
        ),
    )]))
    .await;

    let client = client_for(&base);
    let metadata = client.latest("satoshi-utils").await.unwrap();

    assert_eq!(metadata.version(), Some("2.0.0"));
    assert_eq!(metadata.dependency_names(), vec!["bolt11", "noble"]);
    assert_eq!(
        metadata.funding,
        Some(Funding::Single(FundingRecord::new(
            "lightning",
            "lightning:sats@getalby.com"
        )))
    );
}

#[tokio::test]
async fn test_scoped_package_path_is_encoded() {
    let base = serve(HashMap::from([(
        "/@scope%2Fpkg/latest",
        Reply::ok(r#"{ "name": "@scope/pkg" }"#),
    )]))
    .await;

    let metadata = client_for(&base).latest("@scope/pkg").await.unwrap();
    assert_eq!(metadata.name(), Some("@scope/pkg"));
}

#[tokio::test]
async fn test_missing_package_is_status_error() {
    let base = serve(HashMap::new()).await;

    let err = client_for(&base).latest("does-not-exist").await.unwrap_err();
    assert!(err.is_not_found(), "unexpected error: {}", err);
}

#[tokio::test]
async fn test_too_many_requests() {
    let base = serve(HashMap::from([("/busy/latest", Reply::status(429))])).await;

    let err = client_for(&base).latest("busy").await.unwrap_err();
    assert!(matches!(err, Error::RateLimitExceeded(_)));
}

#[tokio::test]
async fn test_malformed_body_is_metadata_error() {
    let base = serve(HashMap::from([
        ("/broken/latest", Reply::ok("{ not json")),
        ("/array/latest", Reply::ok("[]")),
    ]))
    .await;
    let client = client_for(&base);

    assert!(matches!(client.latest("broken").await, Err(Error::Metadata(_))));
    assert!(matches!(client.latest("array").await, Err(Error::Metadata(_))));
}

#[tokio::test]
async fn test_slow_registry_times_out() {
    let base = serve(HashMap::from([(
        "/slow/latest",
        Reply {
            status: 200,
            body: "{}".to_string(),
            delay: Duration::from_secs(3),
        },
    )]))
    .await;

    let err = client_for(&base).latest("slow").await.unwrap_err();
    assert!(err.is_timeout(), "expected timeout, got {}", err);
}

#[tokio::test]
async fn test_http_client_fetches_plain_documents() {
    let base = serve(HashMap::from([
        (
            "/app/package.json",
            Reply::ok(r#"{ "dependencies": { "a": "1" } }"#),
        ),
        ("/app/broken.json", Reply::status(500)),
    ]))
    .await;
    let client = HttpClient::with_options(&ClientOptions::default()).unwrap();

    let body = client
        .get_text(&format!("{}/app/package.json", base))
        .await
        .unwrap();
    assert!(body.contains("\"a\""));

    let err = client
        .get_text(&format!("{}/app/broken.json", base))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Status { status: 500, .. }));
}

#[tokio::test]
#[ignore] // Requires network access
async fn test_public_registry() {
    let client = RegistryClient::new().unwrap();
    let metadata = client.latest("react").await.unwrap();
    assert_eq!(metadata.name(), Some("react"));
}
