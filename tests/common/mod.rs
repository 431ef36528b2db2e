#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use localized_page::feed::{FeedError, FeedResponse, FeedSource};
use localized_page::page::{FAQ_CONTAINER_ID, GAMES_CONTAINER_ID, LANGUAGE_SELECTOR_ID};
use localized_page::{
    Document, Element, LanguageCode, MemoryPreferenceStore, Page, PageOptions, TranslationDictionary,
};
use tokio::sync::Notify;

pub const GAMES: &str = "data/related-games.json";
pub const FAQ: &str = "data/faq.json";

/// One scripted answer for a resource.
#[derive(Clone)]
pub struct Scripted {
    pub status: u16,
    pub body: String,
    pub transport_error: bool,
    pub gate: Option<Arc<Notify>>,
}

impl Scripted {
    pub fn ok(body: &str) -> Self {
        Self { status: 200, body: body.to_string(), transport_error: false, gate: None }
    }

    pub fn status(status: u16) -> Self {
        Self { status, body: String::new(), transport_error: false, gate: None }
    }

    pub fn network_error() -> Self {
        Self { status: 0, body: String::new(), transport_error: true, gate: None }
    }

    /// Holds the answer back until the returned handle is notified.
    pub fn gated(mut self) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.gate = Some(gate.clone());
        (self, gate)
    }
}

/// Answers each resource from a queue; the last answer repeats.
#[derive(Default)]
pub struct StubSource {
    scripts: Mutex<HashMap<String, VecDeque<Scripted>>>,
    calls: Mutex<HashMap<String, usize>>,
}

impl StubSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(&self, resource: &str, answer: Scripted) {
        self.scripts
            .lock()
            .unwrap()
            .entry(resource.to_string())
            .or_default()
            .push_back(answer);
    }

    pub fn calls(&self, resource: &str) -> usize {
        self.calls.lock().unwrap().get(resource).copied().unwrap_or(0)
    }

    fn next_answer(&self, resource: &str) -> Option<Scripted> {
        *self.calls.lock().unwrap().entry(resource.to_string()).or_default() += 1;
        let mut scripts = self.scripts.lock().unwrap();
        let queue = scripts.get_mut(resource)?;
        if queue.len() > 1 { queue.pop_front() } else { queue.front().cloned() }
    }
}

#[async_trait]
impl FeedSource for StubSource {
    fn name(&self) -> &str {
        "stub"
    }

    async fn get(&self, resource: &str) -> Result<FeedResponse, FeedError> {
        let Some(answer) = self.next_answer(resource) else {
            return Ok(FeedResponse { status: 404, body: String::new() });
        };
        if let Some(gate) = &answer.gate {
            gate.notified().await;
        }
        if answer.transport_error {
            return Err(FeedError::Transport {
                resource: resource.to_string(),
                message: String::from("connection refused"),
            });
        }
        Ok(FeedResponse { status: answer.status, body: answer.body })
    }
}

pub fn dictionary() -> Arc<TranslationDictionary> {
    Arc::new(
        TranslationDictionary::from_json_str(
            r#"{
                "en": {
                    "viewGameButton": "View",
                    "heroTitle": "Play <em>now</em>",
                    "metaDescription": "Free games",
                    "faqError": "Error loading FAQ. Please try again later."
                },
                "fr": {
                    "viewGameButton": "Voir",
                    "heroTitle": "Jouez <em>maintenant</em>"
                }
            }"#,
            LanguageCode::fallback(),
        )
        .unwrap(),
    )
}

pub fn document() -> Document {
    let mut doc = Document::new();
    doc.push(Element::new("meta").with_attr("name", "description").with_key("metaDescription"))
        .push(Element::new("select").with_id(LANGUAGE_SELECTOR_ID))
        .push(Element::new("h1").with_key("heroTitle").with_html("Title"))
        .push(Element::new("button").with_id("cta").with_key("viewGameButton"))
        .push(Element::new("input").with_id("submit").with_attr("type", "submit").with_key("viewGameButton"))
        .push(Element::new("p").with_id("tagline").with_key("notInDictionary").with_html("Static"))
        .push(Element::new("div").with_id(GAMES_CONTAINER_ID))
        .push(Element::new("div").with_id(FAQ_CONTAINER_ID));
    doc
}

pub fn page(source: Arc<StubSource>, store: MemoryPreferenceStore, options: PageOptions) -> Page {
    Page::new(document(), dictionary(), Box::new(store), source, options)
}

pub fn games_json(titles: &[&str]) -> String {
    let entries: Vec<String> = titles
        .iter()
        .map(|title| {
            format!(
                r#"{{"image":"img/{title}.png","title":{{"en":"{title}","fr":"{title} (fr)"}},"description":{{"en":"About {title}"}},"url":"https://games.example/{title}"}}"#
            )
        })
        .collect();
    format!("[{}]", entries.join(","))
}

pub fn faq_json() -> String {
    String::from(
        r#"[
            {"question": {"en": "Is it free?", "fr": "Est-ce gratuit ?"}, "answer": {"en": "Yes.", "fr": "Oui."}},
            {"question": {"en": "Offline?", "fr": "Hors ligne ?"}, "answer": {"en": "Not yet."}}
        ]"#,
    )
}

pub fn children(page: &Page, id: &str) -> Vec<String> {
    page.document()
        .element(id)
        .map(|el| el.children().to_vec())
        .unwrap_or_default()
}
