use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::debug;

use super::{FeedError, FeedResponse, FeedSource};

/// Serves feed resources out of a directory, the way a static site would.
///
/// A missing file answers with status 404 rather than an error.
pub struct LocalFeedSource {
    label: String,
    root: PathBuf,
}

impl LocalFeedSource {
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            label: root.display().to_string(),
            root: root.to_path_buf(),
        }
    }
}

#[async_trait]
impl FeedSource for LocalFeedSource {
    fn name(&self) -> &str {
        &self.label
    }

    async fn get(&self, resource: &str) -> Result<FeedResponse, FeedError> {
        let path = self.root.join(resource.trim_start_matches('/'));
        match tokio::fs::read_to_string(&path).await {
            Ok(body) => {
                debug!("Read feed {} ({} bytes)", path.display(), body.len());
                Ok(FeedResponse::ok(body))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(FeedResponse {
                status: 404,
                body: String::new(),
            }),
            Err(err) => Err(FeedError::Transport {
                resource: path.display().to_string(),
                message: err.to_string(),
            }),
        }
    }
}
