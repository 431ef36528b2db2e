//! Language codes, the translation dictionary and localized feed fields.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Language used whenever the selected one lacks a key or a variant.
pub const FALLBACK_LANGUAGE: &str = "en";

/// A short language identifier such as `en` or `fr`.
///
/// Any string is accepted; unsupported codes simply resolve through the
/// fallback language.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn fallback() -> Self {
        Self(FALLBACK_LANGUAGE.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self::fallback()
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for LanguageCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

/// Errors raised while loading a translation dictionary.
#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("failed to read translations from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse JSON translations: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to parse TOML translations: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("translations are missing the fallback language `{0}`")]
    MissingFallback(String),
}

/// Static mapping of language code to key/string translations for the page chrome.
#[derive(Debug, Clone)]
pub struct TranslationDictionary {
    fallback: LanguageCode,
    languages: HashMap<String, HashMap<String, String>>,
}

impl TranslationDictionary {
    /// Builds a dictionary, requiring `fallback` to be one of the languages.
    pub fn new(
        languages: HashMap<String, HashMap<String, String>>,
        fallback: LanguageCode,
    ) -> Result<Self, DictionaryError> {
        if !languages.contains_key(fallback.as_str()) {
            return Err(DictionaryError::MissingFallback(fallback.to_string()));
        }
        Ok(Self {
            fallback,
            languages,
        })
    }

    pub fn from_json_str(raw: &str, fallback: LanguageCode) -> Result<Self, DictionaryError> {
        let languages = serde_json::from_str(raw)?;
        Self::new(languages, fallback)
    }

    pub fn from_toml_str(raw: &str, fallback: LanguageCode) -> Result<Self, DictionaryError> {
        let languages = toml::from_str(raw)?;
        Self::new(languages, fallback)
    }

    /// Loads a `.toml` or `.json` dictionary file; any other extension is read as JSON.
    pub fn load(path: &Path, fallback: LanguageCode) -> Result<Self, DictionaryError> {
        let raw = fs::read_to_string(path).map_err(|source| DictionaryError::Io {
            path: path.display().to_string(),
            source,
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&raw, fallback),
            _ => Self::from_json_str(&raw, fallback),
        }
    }

    pub fn fallback(&self) -> &LanguageCode {
        &self.fallback
    }

    pub fn supports(&self, lang: &LanguageCode) -> bool {
        self.languages.contains_key(lang.as_str())
    }

    /// Sorted list of the languages the dictionary knows about.
    pub fn languages(&self) -> Vec<LanguageCode> {
        let mut codes: Vec<LanguageCode> =
            self.languages.keys().map(|code| LanguageCode::new(code.as_str())).collect();
        codes.sort();
        codes
    }

    /// Resolves `key` for `lang`, falling back to the fallback language.
    ///
    /// Returns `None` when neither language has the key.
    pub fn lookup(&self, lang: &LanguageCode, key: &str) -> Option<&str> {
        self.languages
            .get(lang.as_str())
            .and_then(|strings| strings.get(key))
            .or_else(|| {
                self.languages
                    .get(self.fallback.as_str())
                    .and_then(|strings| strings.get(key))
            })
            .map(String::as_str)
    }
}

/// A feed value carrying one string per language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct LocalizedField(BTreeMap<String, String>);

impl LocalizedField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, lang: &str, text: impl Into<String>) -> Self {
        self.0.insert(lang.to_string(), text.into());
        self
    }

    pub fn get(&self, lang: &LanguageCode) -> Option<&str> {
        self.0.get(lang.as_str()).map(String::as_str)
    }

    /// Current language, then `fallback`, then the empty string.
    pub fn resolve(&self, lang: &LanguageCode, fallback: &LanguageCode) -> &str {
        self.get(lang).or_else(|| self.get(fallback)).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary() -> TranslationDictionary {
        TranslationDictionary::from_json_str(
            r#"{
                "en": {"viewGameButton": "View", "title": "Games"},
                "fr": {"viewGameButton": "Voir"}
            }"#,
            LanguageCode::fallback(),
        )
        .unwrap()
    }

    #[test]
    fn lookup_prefers_requested_language() {
        let dict = dictionary();
        assert_eq!(dict.lookup(&"fr".into(), "viewGameButton"), Some("Voir"));
    }

    #[test]
    fn lookup_falls_back_per_key() {
        let dict = dictionary();
        assert_eq!(dict.lookup(&"fr".into(), "title"), Some("Games"));
        assert_eq!(dict.lookup(&"xx".into(), "viewGameButton"), Some("View"));
        assert_eq!(dict.lookup(&"fr".into(), "missing"), None);
    }

    #[test]
    fn fallback_language_is_required() {
        let err = TranslationDictionary::from_json_str(
            r#"{"fr": {"a": "b"}}"#,
            LanguageCode::fallback(),
        )
        .unwrap_err();
        assert!(matches!(err, DictionaryError::MissingFallback(code) if code == "en"));
    }

    #[test]
    fn toml_dictionaries_load() {
        let dict = TranslationDictionary::from_toml_str(
            "[en]\nheading = \"Hello\"\n\n[de]\nheading = \"Hallo\"\n",
            LanguageCode::fallback(),
        )
        .unwrap();
        assert_eq!(dict.lookup(&"de".into(), "heading"), Some("Hallo"));
        assert_eq!(dict.languages(), vec![LanguageCode::from("de"), LanguageCode::from("en")]);
    }

    #[test]
    fn localized_field_resolution_order() {
        let field = LocalizedField::new().with("en", "Answer").with("es", "Respuesta");
        let en = LanguageCode::fallback();
        assert_eq!(field.resolve(&"es".into(), &en), "Respuesta");
        assert_eq!(field.resolve(&"fr".into(), &en), "Answer");
        assert_eq!(LocalizedField::new().resolve(&"fr".into(), &en), "");
    }
}
