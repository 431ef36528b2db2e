use std::sync::Arc;

use log::{debug, warn};

use crate::document::Document;
use crate::i18n::{LanguageCode, TranslationDictionary};
use crate::preferences::{PREFERRED_LANGUAGE_KEY, PreferenceStore};
use crate::render::RenderContext;

/// Owns the current language for the lifetime of the page.
pub struct LanguageController {
    current: LanguageCode,
    dictionary: Arc<TranslationDictionary>,
    store: Box<dyn PreferenceStore>,
}

impl LanguageController {
    /// Restores the stored preference, or the dictionary's fallback when none
    /// is stored or the store cannot be read.
    pub fn restore(dictionary: Arc<TranslationDictionary>, store: Box<dyn PreferenceStore>) -> Self {
        let current = match store.get(PREFERRED_LANGUAGE_KEY) {
            Ok(Some(saved)) if !saved.is_empty() => LanguageCode::new(saved),
            Ok(_) => dictionary.fallback().clone(),
            Err(err) => {
                warn!("Could not read language preference: {err}");
                dictionary.fallback().clone()
            }
        };
        debug!("Restored language {current}");
        Self {
            current,
            dictionary,
            store,
        }
    }

    pub fn current(&self) -> &LanguageCode {
        &self.current
    }

    pub fn dictionary(&self) -> &TranslationDictionary {
        &self.dictionary
    }

    pub fn render_context(&self) -> RenderContext<'_> {
        RenderContext::new(&self.current, &self.dictionary)
    }

    /// Makes `lang` current, persists it and rewrites every tagged element.
    ///
    /// Elements whose key is missing in both `lang` and the fallback keep
    /// their content. A failed write to the store is logged and ignored.
    pub fn apply(&mut self, lang: LanguageCode, document: &mut Document) {
        if !self.dictionary.supports(&lang) {
            debug!("No translations for {lang}, using {} per key", self.dictionary.fallback());
        }
        document.set_lang(lang.as_str());
        if let Err(err) = self.store.set(PREFERRED_LANGUAGE_KEY, lang.as_str()) {
            warn!("Could not persist language preference {lang}: {err}");
        }

        let mut updated = 0usize;
        for element in document.translatable_mut() {
            let Some(key) = element.translation_key() else {
                continue;
            };
            if let Some(text) = self.dictionary.lookup(&lang, key) {
                element.write_translation(text);
                updated += 1;
            }
        }
        debug!("Applied {lang} to {updated} elements");
        self.current = lang;
    }
}
