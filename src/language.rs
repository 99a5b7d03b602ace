// SPDX-License-Identifier: MPL-2.0
//! Supported languages and the persisted current-language selection.
//!
//! `LanguageCode` is a closed set: anything read from disk, the CLI, or a
//! user control normalizes into it. `LanguageState` owns the mutable
//! selection; the language switch controller is its only writer.

use crate::config::{self, Config};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Languages the portal ships translations for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    /// English (default)
    #[default]
    En,
    /// Macedonian
    Mk,
    /// Albanian
    Al,
}

impl LanguageCode {
    /// Two-letter code used in the catalog document and the config file.
    pub fn code(&self) -> &'static str {
        match self {
            LanguageCode::En => "en",
            LanguageCode::Mk => "mk",
            LanguageCode::Al => "al",
        }
    }

    /// Native display name, for selection UIs.
    pub fn display_name(&self) -> &'static str {
        match self {
            LanguageCode::En => "English",
            LanguageCode::Mk => "Македонски",
            LanguageCode::Al => "Shqip",
        }
    }

    /// All supported languages.
    pub fn all() -> &'static [LanguageCode] {
        &[LanguageCode::En, LanguageCode::Mk, LanguageCode::Al]
    }

    /// Locale tag understood by the mapping-widget library, consulted only
    /// at the library's own initialization. The library has no `al` locale;
    /// Albanian maps to its `sq` tag.
    pub fn widget_locale(&self) -> &'static str {
        match self {
            LanguageCode::En => "en",
            LanguageCode::Mk => "mk",
            LanguageCode::Al => "sq",
        }
    }

    /// Strict parse of a two-letter code.
    pub fn from_code(value: &str) -> Option<LanguageCode> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" => Some(LanguageCode::En),
            "mk" => Some(LanguageCode::Mk),
            "al" => Some(LanguageCode::Al),
            _ => None,
        }
    }

    /// Parse a persisted or user-supplied code. Unrecognized values
    /// normalize to the default language rather than erroring.
    pub fn parse_or_default(value: &str) -> LanguageCode {
        Self::from_code(value).unwrap_or_default()
    }

    /// Language selected by a flag control, identified by the alt label of
    /// the flag image inside it.
    pub fn from_control_label(label: &str) -> Option<LanguageCode> {
        match label.trim().to_ascii_lowercase().as_str() {
            "english" => Some(LanguageCode::En),
            "macedonian" => Some(LanguageCode::Mk),
            "albanian" => Some(LanguageCode::Al),
            _ => None,
        }
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Process-wide current-language value, persisted across sessions.
#[derive(Debug)]
pub struct LanguageState {
    current: LanguageCode,
    /// Config file override, used by tests and the demo harness.
    config_path: Option<PathBuf>,
}

impl LanguageState {
    /// Resolves the startup language: CLI override, then the persisted
    /// config value, then the OS locale, then the default.
    pub fn init(cli_lang: Option<&str>, config: &Config) -> Self {
        let current = resolve_language(cli_lang, config);
        Self {
            current,
            config_path: None,
        }
    }

    /// Redirects persistence to an explicit config file.
    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    pub fn get(&self) -> LanguageCode {
        self.current
    }

    /// Persists the new selection and returns the previous value.
    pub fn set(&mut self, code: LanguageCode) -> LanguageCode {
        let previous = self.current;
        self.current = code;

        let mut cfg = match &self.config_path {
            Some(path) => config::load_from_path(path).unwrap_or_default(),
            None => config::load().unwrap_or_default(),
        };
        cfg.language = Some(code.code().to_string());

        let saved = match &self.config_path {
            Some(path) => config::save_to_path(&cfg, path),
            None => config::save(&cfg),
        };
        if let Err(error) = saved {
            tracing::warn!(%error, "failed to persist language selection");
        }

        previous
    }
}

fn resolve_language(cli_lang: Option<&str>, config: &Config) -> LanguageCode {
    // 1. CLI args
    if let Some(lang) = cli_lang.and_then(LanguageCode::from_code) {
        return lang;
    }

    // 2. Config file
    if let Some(lang) = config
        .language
        .as_deref()
        .and_then(LanguageCode::from_code)
    {
        return lang;
    }

    // 3. OS locale (primary subtag only, e.g. "mk-MK" -> "mk")
    if let Some(os_locale) = sys_locale::get_locale() {
        let primary = os_locale.split(['-', '_']).next().unwrap_or("");
        if let Some(lang) = LanguageCode::from_code(primary) {
            return lang;
        }
    }

    LanguageCode::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn code_round_trip() {
        for &lang in LanguageCode::all() {
            assert_eq!(LanguageCode::from_code(lang.code()), Some(lang));
        }
    }

    #[test]
    fn unrecognized_code_normalizes_to_default() {
        assert_eq!(LanguageCode::parse_or_default("fr"), LanguageCode::En);
        assert_eq!(LanguageCode::parse_or_default(""), LanguageCode::En);
        assert_eq!(LanguageCode::parse_or_default("MK"), LanguageCode::Mk);
    }

    #[test]
    fn control_labels_map_to_languages() {
        assert_eq!(
            LanguageCode::from_control_label("English"),
            Some(LanguageCode::En)
        );
        assert_eq!(
            LanguageCode::from_control_label("MACEDONIAN"),
            Some(LanguageCode::Mk)
        );
        assert_eq!(
            LanguageCode::from_control_label("albanian"),
            Some(LanguageCode::Al)
        );
        assert_eq!(LanguageCode::from_control_label("german"), None);
    }

    #[test]
    fn widget_locale_maps_albanian_to_sq() {
        assert_eq!(LanguageCode::Al.widget_locale(), "sq");
        assert_eq!(LanguageCode::Mk.widget_locale(), "mk");
    }

    #[test]
    fn cli_override_wins_over_config() {
        let config = Config {
            language: Some("mk".to_string()),
            ..Config::default()
        };
        let state = LanguageState::init(Some("al"), &config);
        assert_eq!(state.get(), LanguageCode::Al);
    }

    #[test]
    fn config_value_used_without_cli() {
        let config = Config {
            language: Some("mk".to_string()),
            ..Config::default()
        };
        let state = LanguageState::init(None, &config);
        assert_eq!(state.get(), LanguageCode::Mk);
    }

    #[test]
    fn persisted_garbage_falls_back_to_default_chain() {
        // An unparseable persisted value is skipped, not coerced.
        let config = Config {
            language: Some("??".to_string()),
            ..Config::default()
        };
        let state = LanguageState::init(Some("fr"), &config);
        // Both cli and config are unusable; the result is OS locale or
        // the default, either way a member of the supported set.
        assert!(LanguageCode::all().contains(&state.get()));
    }

    #[test]
    fn set_persists_and_returns_previous() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("settings.toml");
        let mut state =
            LanguageState::init(Some("en"), &Config::default()).with_config_path(path.clone());

        let previous = state.set(LanguageCode::Mk);
        assert_eq!(previous, LanguageCode::En);
        assert_eq!(state.get(), LanguageCode::Mk);

        let saved = config::load_from_path(&path).expect("failed to reload config");
        assert_eq!(saved.language, Some("mk".to_string()));
    }
}
