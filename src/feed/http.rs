use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use log::debug;
use reqwest::Client;

use super::{FeedError, FeedResponse, FeedSource};

/// `FeedSource` 的 HTTP 實作，相對路徑的資源會接在基礎 URL 之後。
pub struct HttpFeedSource {
    /// 基礎 URL（結尾的 `/` 會被移除）。
    base_url: String,
    /// `reqwest` 的非同步 HTTP 客戶端，可以安全地在任務間複製。
    client: Client,
}

impl HttpFeedSource {
    /// 建立新的來源。`timeout` 為 `None` 時不設定逾時。
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, FeedError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(FeedError::Client)?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// 將資源路徑轉為完整 URL；已是絕對 URL 者原樣回傳。
    pub fn resolve(&self, resource: &str) -> String {
        if resource.starts_with("http://") || resource.starts_with("https://") {
            resource.to_string()
        } else {
            format!("{}/{}", self.base_url, resource.trim_start_matches('/'))
        }
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    fn name(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, resource: &str) -> Result<FeedResponse, FeedError> {
        let url = self.resolve(resource);
        let transport = |err: reqwest::Error| FeedError::Transport {
            resource: url.clone(),
            message: err.to_string(),
        };

        let response = self.client.get(&url).send().await.map_err(transport)?;
        let status = response.status().as_u16();

        // 以串流方式讀取本文。
        let mut stream = response.bytes_stream();
        let mut body = Vec::new();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(transport)?;
            body.extend_from_slice(&chunk);
        }
        debug!("GET {url} -> {status} ({} bytes)", body.len());

        Ok(FeedResponse {
            status,
            body: String::from_utf8_lossy(&body).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answers `/broken` with a 500 and anything else with a JSON body.
    async fn serve(listener: TcpListener, requests: usize) {
        for _ in 0..requests {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let head = String::from_utf8_lossy(&request);
            let (status, body) = if head.starts_with("GET /site/broken ") {
                ("500 Internal Server Error", "oops")
            } else {
                ("200 OK", r#"[{"question":{"en":"Q"},"answer":{"en":"A"}}]"#)
            };
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        }
    }

    #[tokio::test]
    async fn status_and_body_come_back_as_sent() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(serve(listener, 2));

        let source = HttpFeedSource::new(&format!("http://{addr}/site"), None).unwrap();
        let ok = source.get("data/faq.json").await.unwrap();
        assert_eq!(ok.status, 200);
        assert!(ok.is_success());
        assert_eq!(ok.body, r#"[{"question":{"en":"Q"},"answer":{"en":"A"}}]"#);

        let broken = source.get("broken").await.unwrap();
        assert_eq!(broken, FeedResponse { status: 500, body: String::from("oops") });
        server.await.unwrap();
    }

    #[tokio::test]
    async fn silent_server_hits_the_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
            drop(socket);
        });

        let source = HttpFeedSource::new(&format!("http://{addr}"), Some(Duration::from_millis(200))).unwrap();
        let err = source.get("data/faq.json").await.unwrap_err();
        assert!(matches!(err, FeedError::Transport { .. }), "unexpected error: {err}");
        server.abort();
    }

    #[tokio::test]
    async fn refused_connection_is_a_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source = HttpFeedSource::new(&format!("http://{addr}"), None).unwrap();
        let err = source.get("data/faq.json").await.unwrap_err();
        assert!(matches!(err, FeedError::Transport { ref resource, .. } if resource.ends_with("/data/faq.json")));
    }

    #[test]
    fn relative_resources_join_the_base() {
        let source = HttpFeedSource::new("https://games.example/site/", None).unwrap();
        assert_eq!(
            source.resolve("data/faq.json"),
            "https://games.example/site/data/faq.json"
        );
        assert_eq!(
            source.resolve("/data/faq.json"),
            "https://games.example/site/data/faq.json"
        );
        assert_eq!(
            source.resolve("https://cdn.example/faq.json"),
            "https://cdn.example/faq.json"
        );
    }
}
