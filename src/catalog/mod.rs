// SPDX-License-Identifier: MPL-2.0
//! Language-indexed table of display strings.
//!
//! A `Catalog` is immutable after construction and shared as
//! `Arc<Catalog>`. Lookups never fail: a key missing for the requested
//! language falls back to the default language, then to the raw key
//! itself. Both misses are logged, neither is surfaced to the user.

pub mod loader;

use crate::error::{Error, Result};
use crate::language::LanguageCode;
use std::collections::HashMap;
use std::sync::Arc;

/// Fallback language for keys missing in the requested one.
pub const DEFAULT_LANGUAGE: LanguageCode = LanguageCode::En;

/// Shared handle used once the startup load has published the catalog.
pub type SharedCatalog = Arc<Catalog>;

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    languages: HashMap<LanguageCode, HashMap<String, String>>,
}

impl Catalog {
    /// Parses the catalog document: `{ [languageCode]: { [key]: string } }`.
    ///
    /// Tables for language codes outside the supported set are dropped with
    /// a warning. A document that yields no supported table at all is an
    /// error; the caller then leaves the catalog unset.
    pub fn from_json(text: &str) -> Result<Catalog> {
        let raw: HashMap<String, HashMap<String, String>> = serde_json::from_str(text)?;

        let mut languages = HashMap::new();
        for (tag, table) in raw {
            match LanguageCode::from_code(&tag) {
                Some(lang) => {
                    languages.insert(lang, table);
                }
                None => {
                    tracing::warn!(language = %tag, "dropping unsupported language table");
                }
            }
        }

        if languages.is_empty() {
            return Err(Error::Catalog(
                "document contains no supported language table".into(),
            ));
        }

        Ok(Catalog { languages })
    }

    /// Strict lookup, no fallback.
    pub fn get(&self, lang: LanguageCode, key: &str) -> Option<&str> {
        self.languages
            .get(&lang)
            .and_then(|table| table.get(key))
            .map(String::as_str)
    }

    /// Display string for `key` in `lang`, falling back to the default
    /// language and finally to the raw key.
    pub fn lookup<'a>(&'a self, lang: LanguageCode, key: &'a str) -> &'a str {
        if let Some(value) = self.get(lang, key) {
            return value;
        }
        if let Some(value) = self.get(DEFAULT_LANGUAGE, key) {
            tracing::debug!(%lang, key, "key missing, using default language");
            return value;
        }
        tracing::warn!(%lang, key, "key missing in every language, using raw key");
        key
    }

    /// Whether `text` is exactly the display string of `key` in any
    /// supported language. Used for state detection on toggles whose
    /// current label encodes their state.
    pub fn matches_display(&self, key: &str, text: &str) -> bool {
        LanguageCode::all()
            .iter()
            .any(|&lang| self.get(lang, key) == Some(text))
    }

    /// Finds which of `keys` currently displays as `text`, in any supported
    /// language. Matching is exact equality on the whole string — never a
    /// substring — so a rule keyed on "Export" can never touch an "Export
    /// options" label.
    pub fn reverse_lookup_in<'k>(&self, keys: &[&'k str], text: &str) -> Option<&'k str> {
        for &key in keys {
            for &lang in LanguageCode::all() {
                if self.get(lang, key) == Some(text) {
                    return Some(key);
                }
            }
        }
        None
    }

    /// Language tables present in the document.
    pub fn languages(&self) -> Vec<LanguageCode> {
        let mut langs: Vec<LanguageCode> = self.languages.keys().copied().collect();
        langs.sort_by_key(|l| l.code());
        langs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        Catalog::from_json(
            r#"{
                "en": {"home": "Home", "search": "Search", "export": "Export"},
                "mk": {"home": "Почетна", "search": "Пребарај"}
            }"#,
        )
        .expect("sample catalog should parse")
    }

    #[test]
    fn lookup_returns_requested_language() {
        let catalog = sample();
        assert_eq!(catalog.lookup(LanguageCode::Mk, "home"), "Почетна");
    }

    #[test]
    fn lookup_falls_back_to_default_language() {
        let catalog = sample();
        // "export" has no mk entry
        assert_eq!(catalog.lookup(LanguageCode::Mk, "export"), "Export");
    }

    #[test]
    fn lookup_falls_back_to_raw_key() {
        let catalog = sample();
        assert_eq!(catalog.lookup(LanguageCode::En, "no-such-key"), "no-such-key");
    }

    #[test]
    fn unsupported_language_tables_are_dropped() {
        let catalog = Catalog::from_json(
            r#"{"en": {"home": "Home"}, "de": {"home": "Startseite"}}"#,
        )
        .expect("catalog should parse");
        assert_eq!(catalog.languages(), vec![LanguageCode::En]);
    }

    #[test]
    fn document_without_supported_tables_is_an_error() {
        let result = Catalog::from_json(r#"{"de": {"home": "Startseite"}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(Catalog::from_json("{not json").is_err());
        assert!(Catalog::from_json(r#"{"en": "flat"}"#).is_err());
    }

    #[test]
    fn reverse_lookup_matches_exactly() {
        let catalog = sample();
        assert_eq!(
            catalog.reverse_lookup_in(&["home", "search"], "Пребарај"),
            Some("search")
        );
        // Whole-string equality only: a superstring must not match.
        assert_eq!(
            catalog.reverse_lookup_in(&["export"], "Export options"),
            None
        );
    }

    #[test]
    fn matches_display_checks_every_language() {
        let catalog = sample();
        assert!(catalog.matches_display("home", "Home"));
        assert!(catalog.matches_display("home", "Почетна"));
        assert!(!catalog.matches_display("home", "Почетна страница"));
    }
}
