use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use localized_page::{LanguageCode, Page, PageEvent, SiteConfig, logging};
use log::info;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> Result<()> {
    let site_root = env::args().nth(1).map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    logging::init(&site_root)?;

    let config = SiteConfig::load_or_init(&site_root)?;
    let mut page = Page::from_config(&config)?;

    page.handle_event(PageEvent::Ready);
    page.settle().await;
    write_output(&page, &config.output)?;

    // Each line on stdin acts as a change of the language selector.
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let code = line.trim();
        if code.is_empty() {
            continue;
        }
        page.handle_event(PageEvent::LanguageSelected(LanguageCode::new(code)));
        page.settle().await;
        write_output(&page, &config.output)?;
    }

    Ok(())
}

fn write_output(page: &Page, output: &Path) -> Result<()> {
    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory: {}", parent.display()))?;
    }
    fs::write(output, page.document().to_html())
        .with_context(|| format!("failed to write page: {}", output.display()))?;
    info!(
        "Wrote {} in {}",
        output.display(),
        page.controller().current()
    );
    Ok(())
}
