use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};

use crate::feed::{self, StalePolicy};
use crate::i18n::LanguageCode;

/// 站台設定檔相對於站台根目錄的位置。
const CONFIG_FILE: &str = "config/page.toml";

/// 站台設定的頂層結構，通常從 `config/page.toml` 載入。
///
/// 所有相對路徑都以站台根目錄為基準。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// 資料來源的基礎位置：`http(s)://` URL 或本地目錄。
    pub feed_base: String,
    /// 相關遊戲資料的資源路徑。
    pub games_feed: String,
    /// 常見問題資料的資源路徑。
    pub faq_feed: String,
    /// 翻譯字典檔（`.json` 或 `.toml`）。
    pub translations: PathBuf,
    /// 頁面版面配置檔；不存在時使用內建版面。
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<PathBuf>,
    /// 備用語言。
    pub fallback_language: LanguageCode,
    /// 語言偏好檔；未指定時使用使用者設定目錄。
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preference_file: Option<PathBuf>,
    /// 是否捨棄比最新一次載入更舊的完成結果。
    pub discard_stale_loads: bool,
    /// 單次請求的逾時秒數；`None` 表示不設逾時。
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_timeout_secs: Option<u64>,
    /// 輸出的 HTML 檔案。
    pub output: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            feed_base: String::from("."),
            games_feed: feed::GAMES_FEED.to_string(),
            faq_feed: feed::FAQ_FEED.to_string(),
            translations: PathBuf::from("data/translations.json"),
            layout: Some(PathBuf::from("config/layout.toml")),
            fallback_language: LanguageCode::fallback(),
            preference_file: None,
            discard_stale_loads: false,
            fetch_timeout_secs: None,
            output: PathBuf::from("dist/index.html"),
        }
    }
}

impl SiteConfig {
    /// 從站台根目錄讀取設定。
    /// 如果 `config/page.toml` 不存在，則使用預設值。
    pub fn load(site_root: &Path) -> Result<Self> {
        let config_path = Self::path(site_root);
        let config = if config_path.exists() {
            let raw = fs::read_to_string(&config_path)
                .with_context(|| format!("讀取站台設定失敗: {}", config_path.display()))?;
            toml::from_str::<SiteConfig>(&raw)
                .with_context(|| format!("解析站台設定失敗: {}", config_path.display()))?
        } else {
            Self::default()
        };
        Ok(config.normalize(site_root))
    }

    /// 將相對路徑轉換為相對於站台根目錄的路徑。
    fn normalize(mut self, site_root: &Path) -> Self {
        let resolve = |path: &Path| {
            if path.is_relative() {
                site_root.join(path)
            } else {
                path.to_path_buf()
            }
        };
        self.translations = resolve(&self.translations);
        self.layout = self.layout.as_deref().map(resolve);
        self.preference_file = self.preference_file.as_deref().map(resolve);
        self.output = resolve(&self.output);
        let is_remote = self.feed_base.starts_with("http://") || self.feed_base.starts_with("https://");
        if !is_remote && Path::new(&self.feed_base).is_relative() {
            self.feed_base = site_root.join(&self.feed_base).display().to_string();
        }
        self
    }

    pub fn stale_policy(&self) -> StalePolicy {
        if self.discard_stale_loads {
            StalePolicy::DiscardStale
        } else {
            StalePolicy::LastCompletionWins
        }
    }

    /// 站台的設定檔路徑。
    pub fn path(site_root: &Path) -> PathBuf {
        site_root.join(CONFIG_FILE)
    }

    /// 讀取設定；站台尚無設定檔時，先寫出一份預設設定供使用者修改。
    /// 已存在的設定檔不會被覆寫。
    pub fn load_or_init(site_root: &Path) -> Result<Self> {
        let config_path = Self::path(site_root);
        if !config_path.exists() {
            Self::default().save_to_file(site_root)?;
            info!("Wrote default site settings to {}", config_path.display());
        }
        Self::load(site_root)
    }

    /// 以站台根目錄為基準寫出設定。應以未經 `normalize` 的設定呼叫，
    /// 否則相對路徑會被寫成絕對路徑。
    pub fn save_to_file(&self, site_root: &Path) -> Result<()> {
        let config_path = Self::path(site_root);
        if let Some(dir) = config_path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("建立設定目錄失敗: {}", dir.display()))?;
        }
        let body = toml::to_string_pretty(self).context("序列化站台設定失敗")?;
        fs::write(&config_path, body)
            .with_context(|| format!("寫入站台設定失敗: {}", config_path.display()))
    }
}
