//! The `page` module ties the document, the language controller and the two
//! feed loaders together behind a single event loop.
//!
//! Fetches run as background tasks; everything that touches the document
//! happens in `Page::handle_event`.

/// `controller`: current language, applying it to the document and persisting it.
mod controller;
/// `events`: the `PageEvent` enum driving the loop.
mod events;
/// `init`: constructing a `Page` and the built-in layout.
mod init;
/// `state`: the `Page` struct and the well-known element ids.
mod state;
/// `wiring`: event handling, startup and selector changes.
mod wiring;

pub use controller::LanguageController;
pub use events::PageEvent;
pub use init::{PageOptions, default_document};
pub use state::{FAQ_CONTAINER_ID, GAMES_CONTAINER_ID, LANGUAGE_SELECTOR_ID, Page};
