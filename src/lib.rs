//! A localized game page: UI strings from a translation dictionary, plus
//! related games and an FAQ fetched as JSON feeds and re-rendered whenever the
//! display language changes.

pub mod config;
pub mod document;
pub mod feed;
pub mod i18n;
pub mod logging;
pub mod page;
pub mod preferences;
pub mod render;

pub use config::SiteConfig;
pub use document::{Document, Element, ElementKind};
pub use i18n::{LanguageCode, LocalizedField, TranslationDictionary};
pub use page::{Page, PageEvent, PageOptions};
pub use preferences::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};
