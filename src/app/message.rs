// SPDX-License-Identifier: MPL-2.0
//! Messages and runtime flags for the localization pipeline.

use crate::catalog::Catalog;
use crate::error::Error;
use crate::page::NodeId;
use crate::switcher::SwitchStrategy;
use crate::widgets::followup::Millis;
use std::path::PathBuf;

/// Host callbacks consumed by `Localizer::handle`: load completion,
/// structural notifications, timers, and clicks. Each variant carries the
/// host clock where scheduling depends on it.
#[derive(Debug)]
pub enum Message {
    /// The startup catalog fetch finished.
    CatalogLoaded {
        result: Result<Catalog, Error>,
        now: Millis,
    },
    /// The host container's observer has batches queued for draining.
    PageMutated { now: Millis },
    /// A follow-up deadline fired.
    FollowUpDue { now: Millis },
    /// A language flag control was clicked.
    LanguageButtonPressed { control: NodeId, now: Millis },
    /// Re-run every pass over the current tree.
    FullResync,
}

/// Runtime flags passed in from the CLI or launcher to tweak startup
/// behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional language override (`en`, `mk`, `al`).
    pub lang: Option<String>,
    /// Catalog location override: an HTTP URL or a file path.
    pub catalog: Option<String>,
    /// Switch strategy override; wins over the configured one.
    pub strategy: Option<SwitchStrategy>,
    /// Config file override (tests and the demo harness).
    pub config_path: Option<PathBuf>,
}
