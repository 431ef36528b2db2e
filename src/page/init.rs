use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use log::debug;
use tokio::sync::mpsc;

use super::state::{FAQ_CONTAINER_ID, GAMES_CONTAINER_ID, LANGUAGE_SELECTOR_ID};
use super::{LanguageController, Page};
use crate::config::SiteConfig;
use crate::document::{Document, Element};
use crate::feed::{self, FaqEntry, FeedKind, FeedLoader, FeedSource, GameEntry, StalePolicy};
use crate::i18n::TranslationDictionary;
use crate::preferences::{FilePreferenceStore, PreferenceStore};

/// Knobs for a page that do not come from its collaborators.
#[derive(Debug, Clone)]
pub struct PageOptions {
    pub games_feed: String,
    pub faq_feed: String,
    pub stale_policy: StalePolicy,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            games_feed: feed::GAMES_FEED.to_string(),
            faq_feed: feed::FAQ_FEED.to_string(),
            stale_policy: StalePolicy::default(),
        }
    }
}

impl Page {
    /// Assembles a page. Nothing is applied or fetched until `startup`.
    pub fn new(
        document: Document,
        dictionary: Arc<TranslationDictionary>,
        store: Box<dyn PreferenceStore>,
        source: Arc<dyn FeedSource>,
        options: PageOptions,
    ) -> Self {
        let controller = LanguageController::restore(dictionary, store);
        let games = FeedLoader::new::<GameEntry>(
            FeedKind::Games,
            options.games_feed,
            GAMES_CONTAINER_ID,
            "relatedGamesError",
            "Error loading related games. Please try again later.",
        );
        let faq = FeedLoader::new::<FaqEntry>(
            FeedKind::Faq,
            options.faq_feed,
            FAQ_CONTAINER_ID,
            "faqError",
            "Error loading FAQ. Please try again later.",
        );
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            document,
            controller,
            games,
            faq,
            source,
            stale_policy: options.stale_policy,
            in_flight: 0,
            events_tx: tx,
            events_rx: rx,
        }
    }

    /// Builds a page from site settings: dictionary, layout, preference file and feed source.
    pub fn from_config(config: &SiteConfig) -> Result<Self> {
        let dictionary = TranslationDictionary::load(&config.translations, config.fallback_language.clone())
            .with_context(|| format!("failed to load translations: {}", config.translations.display()))?;
        debug!("Loaded translations for {:?}", dictionary.languages());

        let document = match &config.layout {
            Some(path) if path.exists() => Document::load_layout(path)?,
            _ => default_document(&dictionary),
        };

        let preference_file = config
            .preference_file
            .clone()
            .or_else(FilePreferenceStore::default_path)
            .context("no location available for the preference file")?;
        let store = FilePreferenceStore::new(preference_file);

        let timeout = config.fetch_timeout_secs.map(Duration::from_secs);
        let source = feed::source_for(&config.feed_base, timeout)
            .with_context(|| format!("failed to set up feed source: {}", config.feed_base))?;

        let options = PageOptions {
            games_feed: config.games_feed.clone(),
            faq_feed: config.faq_feed.clone(),
            stale_policy: config.stale_policy(),
        };
        Ok(Self::new(document, Arc::new(dictionary), Box::new(store), source, options))
    }
}

/// The built-in page layout, with one selector option per dictionary language.
pub fn default_document(dictionary: &TranslationDictionary) -> Document {
    let options: String = dictionary
        .languages()
        .iter()
        .map(|code| format!("<option value=\"{code}\">{code}</option>"))
        .collect();

    let mut doc = Document::new();
    doc.push(
        Element::new("meta")
            .with_attr("name", "description")
            .with_key("metaDescription"),
    )
    .push(Element::new("title").with_key("pageTitle").with_html("Games"))
    .push(Element::new("select").with_id(LANGUAGE_SELECTOR_ID).with_html(options))
    .push(Element::new("h1").with_key("heroTitle").with_html("Games"))
    .push(Element::new("p").with_key("heroSubtitle"))
    .push(Element::new("h2").with_key("relatedGamesTitle").with_html("Related Games"))
    .push(Element::new("div").with_id(GAMES_CONTAINER_ID))
    .push(Element::new("h2").with_key("faqTitle").with_html("FAQ"))
    .push(Element::new("div").with_id(FAQ_CONTAINER_ID))
    .push(Element::new("footer").with_key("footerText"));
    doc
}
