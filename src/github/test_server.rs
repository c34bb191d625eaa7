// src/github/test_server.rs
// =============================================================================
// A one-shot HTTP responder for tests, so nothing touches the real network.
// =============================================================================

use std::time::Duration;

use reqwest::Client;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use url::Url;

/// Answers exactly one request with `response`, or never answers if None
pub async fn serve_once(response: Option<String>) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        match response {
            Some(response) => {
                socket.write_all(response.as_bytes()).await.unwrap();
                let _ = socket.shutdown().await;
            }
            None => tokio::time::sleep(Duration::from_secs(30)).await,
        }
    });

    Url::parse(&format!("http://{}", addr)).unwrap()
}

pub fn http_response(status_line: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_line,
        body.len(),
        body
    )
}

/// Like the real client, minus proxies so localhost is reached directly
pub fn test_client(timeout: Duration) -> Client {
    Client::builder().timeout(timeout).no_proxy().build().unwrap()
}
