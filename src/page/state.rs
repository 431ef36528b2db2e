use std::sync::Arc;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use super::LanguageController;
use super::PageEvent;
use crate::document::Document;
use crate::feed::{FeedLoader, FeedSource, StalePolicy};

/// Element id of the language selector.
pub const LANGUAGE_SELECTOR_ID: &str = "languageSwitcher";
/// Element id of the related games container.
pub const GAMES_CONTAINER_ID: &str = "relatedGamesContainer";
/// Element id of the FAQ container.
pub const FAQ_CONTAINER_ID: &str = "faqContainer";

/// The running page: document, language controller and both feed loaders.
///
/// All mutation happens through `handle_event` on whichever task owns the
/// page. Fetch tasks only ever talk back through the event channel.
pub struct Page {
    pub(crate) document: Document,
    pub(crate) controller: LanguageController,
    pub(crate) games: FeedLoader,
    pub(crate) faq: FeedLoader,
    pub(crate) source: Arc<dyn FeedSource>,
    pub(crate) stale_policy: StalePolicy,
    /// Loads started but not yet handled.
    pub(crate) in_flight: usize,
    pub(crate) events_tx: UnboundedSender<PageEvent>,
    pub(crate) events_rx: UnboundedReceiver<PageEvent>,
}

impl Page {
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn controller(&self) -> &LanguageController {
        &self.controller
    }

    pub fn games(&self) -> &FeedLoader {
        &self.games
    }

    pub fn faq(&self) -> &FeedLoader {
        &self.faq
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// A sender other tasks can use to feed events into this page.
    pub fn events(&self) -> UnboundedSender<PageEvent> {
        self.events_tx.clone()
    }
}
