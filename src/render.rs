//! Language-aware rendering of feed entries.

use std::fmt::Debug;

use crate::i18n::{LanguageCode, LocalizedField, TranslationDictionary};

/// What a renderer needs to know about the active language.
///
/// Built by the language controller for each render pass, so renderers never
/// hold language state of their own.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub language: &'a LanguageCode,
    pub dictionary: &'a TranslationDictionary,
}

impl<'a> RenderContext<'a> {
    pub fn new(language: &'a LanguageCode, dictionary: &'a TranslationDictionary) -> Self {
        Self {
            language,
            dictionary,
        }
    }

    pub fn fallback(&self) -> &'a LanguageCode {
        self.dictionary.fallback()
    }

    /// Resolves a feed field: current language, fallback language, then empty.
    pub fn localize<'f>(&self, field: &'f LocalizedField) -> &'f str {
        field.resolve(self.language, self.dictionary.fallback())
    }

    /// Looks a UI string up in the dictionary.
    pub fn translate(&self, key: &str) -> Option<&'a str> {
        self.dictionary.lookup(self.language, key)
    }

    pub fn translate_or(&self, key: &str, default: &'a str) -> &'a str {
        self.translate(key).unwrap_or(default)
    }
}

/// One feed entry that knows how to turn itself into a markup block.
pub trait RenderEntry: Send + Debug {
    fn render(&self, ctx: &RenderContext<'_>) -> String;
}

/// Markup for the single notice shown when a feed cannot be displayed.
pub fn error_notice(message: &str) -> String {
    format!("<p class=\"error-notice\">{message}</p>")
}
