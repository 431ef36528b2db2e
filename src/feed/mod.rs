//! `feed` 模組負責取得外部 JSON 資料來源（相關遊戲、常見問題）並將其轉為可渲染的條目。
//!
//! 每個子模組各司其職：
//! `http` 與 `local` 實作了 `FeedSource` trait，`models` 定義資料格式，
//! `loader` 則負責非同步載入與渲染到容器中。

/// `http` 模組：透過 `reqwest` 從遠端伺服器取得資料。
pub mod http;
/// `loader` 模組：`FeedLoader`，將一個資料來源綁定到一個容器元素。
pub mod loader;
/// `local` 模組：從本地目錄讀取資料，對應靜態網站的檔案配置。
pub mod local;
/// `models` 模組：遊戲與常見問題條目的資料結構與渲染方式。
pub mod models;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

pub use loader::{FeedCompletion, FeedKind, FeedLoader, StalePolicy};
pub use models::{FaqEntry, GameEntry};

/// Default location of the related games feed, relative to the feed base.
pub const GAMES_FEED: &str = "data/related-games.json";
/// Default location of the FAQ feed, relative to the feed base.
pub const FAQ_FEED: &str = "data/faq.json";

/// Errors that can occur while fetching or decoding a feed.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("could not fetch {resource}: {message}")]
    Transport { resource: String, message: String },
    #[error("HTTP error! status: {0}")]
    Status(u16),
    #[error("malformed feed body: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// 原始回應：狀態碼與完整本文。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedResponse {
    pub status: u16,
    pub body: String,
}

impl FeedResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 所有資料來源都必須遵守的介面。
///
/// 使用 `#[async_trait]` 讓 trait 中可以定義非同步函式；
/// `Send + Sync` 約束讓同一個來源可以透過 `Arc` 在多個載入任務間共用。
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// 回傳此來源的名稱，用於日誌記錄。
    fn name(&self) -> &str;

    /// 取得指定資源。非 2xx 的狀態碼不是錯誤，由呼叫端判斷。
    async fn get(&self, resource: &str) -> Result<FeedResponse, FeedError>;
}

/// Picks an HTTP source for `http://`/`https://` bases and a directory source otherwise.
pub fn source_for(base: &str, timeout: Option<Duration>) -> Result<Arc<dyn FeedSource>, FeedError> {
    if base.starts_with("http://") || base.starts_with("https://") {
        Ok(Arc::new(http::HttpFeedSource::new(base, timeout)?))
    } else {
        Ok(Arc::new(local::LocalFeedSource::new(base)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_range() {
        assert!(FeedResponse::ok("[]").is_success());
        assert!(FeedResponse { status: 204, body: String::new() }.is_success());
        assert!(!FeedResponse { status: 304, body: String::new() }.is_success());
        assert!(!FeedResponse { status: 500, body: String::new() }.is_success());
    }

    #[test]
    fn source_selection_by_scheme() {
        let remote = source_for("https://example.com/site", None).unwrap();
        assert_eq!(remote.name(), "https://example.com/site");
        let local = source_for("./public", None).unwrap();
        assert_eq!(local.name(), "./public");
    }
}
