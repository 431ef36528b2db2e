use log::{debug, info};

use super::state::LANGUAGE_SELECTOR_ID;
use super::{Page, PageEvent};
use crate::feed::{FeedCompletion, FeedKind};
use crate::i18n::LanguageCode;

// Event handling for the page: startup, selector changes and feed completions.
impl Page {
    pub fn handle_event(&mut self, event: PageEvent) {
        match event {
            PageEvent::Ready => self.startup(),
            PageEvent::LanguageSelected(lang) => self.select_language(lang),
            PageEvent::FeedLoaded(completion) => self.finish_load(completion),
        }
    }

    /// Page-ready sequence: sync the selector with the restored language,
    /// apply it once and start both initial loads.
    pub fn startup(&mut self) {
        let lang = self.controller.current().clone();
        info!("Starting page in {lang}");
        self.apply_language(lang);
        self.load_feeds();
    }

    /// Selector change: apply and persist the language, then reload both feeds.
    pub fn select_language(&mut self, lang: LanguageCode) {
        info!("Language selected: {lang}");
        self.apply_language(lang);
        self.load_feeds();
    }

    /// Applies `lang` to the tagged elements and redraws both containers, so
    /// the tagged links inside rendered cards switch along with the rest.
    fn apply_language(&mut self, lang: LanguageCode) {
        self.sync_selector(&lang);
        self.controller.apply(lang, &mut self.document);
        let ctx = self.controller.render_context();
        self.games.redraw(&mut self.document, &ctx);
        self.faq.redraw(&mut self.document, &ctx);
    }

    /// Starts a fetch on both loaders. Loads already running are left alone.
    pub fn load_feeds(&mut self) {
        self.games.load(self.source.clone(), self.events_tx.clone());
        self.faq.load(self.source.clone(), self.events_tx.clone());
        self.in_flight += 2;
    }

    fn finish_load(&mut self, completion: FeedCompletion) {
        self.in_flight = self.in_flight.saturating_sub(1);
        let loader = match completion.kind {
            FeedKind::Games => &mut self.games,
            FeedKind::Faq => &mut self.faq,
        };
        let ctx = self.controller.render_context();
        loader.apply(completion, &mut self.document, &ctx, self.stale_policy);
    }

    fn sync_selector(&mut self, lang: &LanguageCode) {
        if let Some(selector) = self.document.element_mut(LANGUAGE_SELECTOR_ID) {
            selector.set_value(lang.as_str());
        }
    }

    /// Queues an event to be handled by the owner of the page.
    pub fn dispatch(&self, event: PageEvent) {
        // The page holds its own receiver, so the channel cannot be closed here.
        let _ = self.events_tx.send(event);
    }

    /// Takes a queued event without waiting.
    pub fn poll_event(&mut self) -> Option<PageEvent> {
        self.events_rx.try_recv().ok()
    }

    /// Waits for the next queued event.
    pub async fn next_event(&mut self) -> Option<PageEvent> {
        self.events_rx.recv().await
    }

    /// Handles events until every started load has come back.
    ///
    /// A fetch that never completes keeps this waiting; configure a fetch
    /// timeout when that matters.
    pub async fn settle(&mut self) {
        while let Some(event) = self.poll_event() {
            self.handle_event(event);
        }
        while self.in_flight > 0 {
            match self.next_event().await {
                Some(event) => self.handle_event(event),
                None => break,
            }
        }
        debug!("Page settled");
    }
}
