use std::sync::Arc;

use log::{debug, error, warn};
use serde::de::DeserializeOwned;
use tokio::sync::mpsc::UnboundedSender;

use crate::document::Document;
use crate::page::PageEvent;
use crate::render::{RenderContext, RenderEntry, error_notice};

use super::{FeedError, FeedSource};

type Entries = Vec<Box<dyn RenderEntry>>;
type ParseFn = fn(&str) -> Result<Entries, serde_json::Error>;

/// Identifies which loader a completion belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedKind {
    Games,
    Faq,
}

impl FeedKind {
    pub fn label(&self) -> &'static str {
        match self {
            FeedKind::Games => "related games",
            FeedKind::Faq => "FAQ",
        }
    }
}

/// What to do with a load that finishes after a newer one was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StalePolicy {
    /// Every completion renders; the last one to arrive wins.
    #[default]
    LastCompletionWins,
    /// Completions older than the loader's latest generation are dropped.
    DiscardStale,
}

/// Result of one background fetch, sent back to the page's event loop.
#[derive(Debug)]
pub struct FeedCompletion {
    pub kind: FeedKind,
    pub generation: u64,
    pub result: Result<Entries, FeedError>,
}

/// What the container currently shows, kept so it can be redrawn in another language.
#[derive(Debug)]
enum Shown {
    Entries(Entries),
    Notice,
}

/// Binds one feed resource to one container element.
///
/// `load` only starts the fetch; the outcome comes back as a
/// `PageEvent::FeedLoaded` and is rendered by `apply` on the event loop, using
/// whatever language is current at that moment.
pub struct FeedLoader {
    kind: FeedKind,
    resource: String,
    container_id: String,
    error_key: &'static str,
    error_default: &'static str,
    parse: ParseFn,
    generation: u64,
    shown: Option<Shown>,
}

impl FeedLoader {
    /// Creates a loader whose entries are decoded as `T`.
    pub fn new<T>(
        kind: FeedKind,
        resource: impl Into<String>,
        container_id: impl Into<String>,
        error_key: &'static str,
        error_default: &'static str,
    ) -> Self
    where
        T: RenderEntry + DeserializeOwned + 'static,
    {
        Self {
            kind,
            resource: resource.into(),
            container_id: container_id.into(),
            error_key,
            error_default,
            parse: parse_entries::<T>,
            generation: 0,
            shown: None,
        }
    }

    pub fn kind(&self) -> FeedKind {
        self.kind
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    /// Generation of the most recently started load.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Spawns the fetch and returns its generation. Earlier loads keep running.
    pub fn load(&mut self, source: Arc<dyn FeedSource>, events: UnboundedSender<PageEvent>) -> u64 {
        self.generation += 1;
        let generation = self.generation;
        let kind = self.kind;
        let resource = self.resource.clone();
        let parse = self.parse;
        debug!("Loading {} feed from {} (#{generation})", kind.label(), source.name());

        tokio::spawn(async move {
            let result = fetch_entries(source.as_ref(), &resource, parse).await;
            let completion = FeedCompletion {
                kind,
                generation,
                result,
            };
            if events.send(PageEvent::FeedLoaded(completion)).is_err() {
                debug!("Page closed before {} feed #{generation} finished", kind.label());
            }
        });
        generation
    }

    /// Renders a completed load into the container. Returns `false` when the
    /// completion was dropped or the container does not exist.
    pub fn apply(
        &mut self,
        completion: FeedCompletion,
        document: &mut Document,
        ctx: &RenderContext<'_>,
        policy: StalePolicy,
    ) -> bool {
        if policy == StalePolicy::DiscardStale && completion.generation < self.generation {
            debug!(
                "Discarding stale {} feed #{} (latest #{})",
                self.kind.label(),
                completion.generation,
                self.generation
            );
            return false;
        }
        self.shown = Some(match completion.result {
            Ok(entries) => Shown::Entries(entries),
            Err(err) => {
                error!("Could not load {}: {err}", self.kind.label());
                Shown::Notice
            }
        });
        self.redraw(document, ctx)
    }

    /// Redraws whatever the container last showed using `ctx`'s language.
    ///
    /// Called when the language changes so tagged links inside rendered
    /// entries follow the new language before the reload comes back.
    pub fn redraw(&self, document: &mut Document, ctx: &RenderContext<'_>) -> bool {
        let Some(shown) = &self.shown else {
            return false;
        };
        let Some(container) = document.element_mut(&self.container_id) else {
            warn!("Container #{} not found for {} feed", self.container_id, self.kind.label());
            return false;
        };

        container.clear_children();
        match shown {
            Shown::Entries(entries) => {
                for entry in entries {
                    container.append_html(entry.render(ctx));
                }
                debug!("Rendered {} {} entries in {}", entries.len(), self.kind.label(), ctx.language);
            }
            Shown::Notice => {
                let message = ctx.translate_or(self.error_key, self.error_default);
                container.append_html(error_notice(message));
            }
        }
        true
    }
}

async fn fetch_entries(
    source: &dyn FeedSource,
    resource: &str,
    parse: ParseFn,
) -> Result<Entries, FeedError> {
    let response = source.get(resource).await?;
    if !response.is_success() {
        return Err(FeedError::Status(response.status));
    }
    Ok(parse(&response.body)?)
}

fn parse_entries<T>(body: &str) -> Result<Entries, serde_json::Error>
where
    T: RenderEntry + DeserializeOwned + 'static,
{
    let entries: Vec<T> = serde_json::from_str(body)?;
    Ok(entries
        .into_iter()
        .map(|entry| Box::new(entry) as Box<dyn RenderEntry>)
        .collect())
}
