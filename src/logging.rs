use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Installs the global logger.
///
/// `config/log4rs.yaml` under the site root wins when present; otherwise
/// `env_logger` reads `RUST_LOG`, defaulting to `info`.
pub fn init(site_root: &Path) -> Result<()> {
    let yaml_path = site_root.join("config/log4rs.yaml");
    if yaml_path.exists() {
        let raw = fs::read_to_string(&yaml_path)
            .with_context(|| format!("failed to read logging config: {}", yaml_path.display()))?;
        let config: log4rs::config::RawConfig = serde_yaml::from_str(&raw)
            .with_context(|| format!("failed to parse logging config: {}", yaml_path.display()))?;
        log4rs::init_raw_config(config).context("failed to install log4rs")?;
        log::debug!("Logging configured from {}", yaml_path.display());
        return Ok(());
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init()
        .context("failed to install env_logger")?;
    Ok(())
}
