// SPDX-License-Identifier: MPL-2.0
//! Language selection controls and the switch strategy.
//!
//! Flag buttons identify their language through the alt label of the flag
//! image inside them. What a switch does to the page is configuration:
//! the widget library only honors a new locale when it re-initializes, so
//! deployments choose between a full reload and in-place rebinding.

use crate::language::LanguageCode;
use crate::page::{Document, NodeId, Selector};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Class of the container holding the flag buttons.
pub const LANGUAGE_BUTTONS_CLASS: &str = "language-buttons";

/// What a language switch does to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SwitchStrategy {
    /// Reload the page so the widget library re-initializes natively
    /// localized.
    #[default]
    Reload,
    /// Re-run binder, reconciler, and tooltip sync on the live tree; the
    /// library's own locale stays as initialized.
    InPlace,
}

impl FromStr for SwitchStrategy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "reload" => Ok(SwitchStrategy::Reload),
            "in-place" | "inplace" => Ok(SwitchStrategy::InPlace),
            other => Err(format!("unknown switch strategy: {other}")),
        }
    }
}

/// All flag controls currently on the page.
pub fn find_controls(doc: &Document) -> Vec<NodeId> {
    match doc.find(Selector::Class(LANGUAGE_BUTTONS_CLASS)) {
        Some(container) => doc.find_all_in(container, Selector::Tag("button")),
        None => Vec::new(),
    }
}

/// Which language a clicked flag control selects, from the alt label of
/// the flag image inside it. `None` for controls without a recognizable
/// flag; the click is then ignored.
pub fn language_from_control(doc: &Document, control: NodeId) -> Option<LanguageCode> {
    let img = doc.find_in(control, Selector::Tag("img"))?;
    let alt = doc.attr(img, "alt")?;
    LanguageCode::from_control_label(alt)
}
