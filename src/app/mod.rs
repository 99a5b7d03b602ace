// SPDX-License-Identifier: MPL-2.0
//! Pipeline root: wires the catalog, the language state, the static
//! binder, and the widget reconciler behind one message entrypoint.
//!
//! This file intentionally keeps the policy decisions (readiness gating,
//! switch strategy, where observation attaches) close to the message
//! loop so user-facing behavior is easy to audit. Until the catalog has
//! loaded, every message is a no-op rather than an error: translation
//! must never take the page down.

mod message;

pub use message::{Flags, Message};

use crate::binder;
use crate::catalog::SharedCatalog;
use crate::config::Config;
use crate::context::Context;
use crate::language::{LanguageCode, LanguageState};
use crate::page::{Document, Selector};
use crate::switcher::{self, SwitchStrategy};
use crate::widgets::followup::Millis;
use crate::widgets::reconciler::Reconciler;
use std::sync::Arc;

/// Well-known id of the container the widget library renders into. The
/// structural observer attaches here and nowhere else.
pub const HOST_CONTAINER_ID: &str = "map";

/// Side effect the host must carry out after a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Reload the page; the widget library re-initializes with the newly
    /// persisted language.
    ReloadPage,
}

/// Root state bridging the catalog, language selection, and the
/// reconciliation machinery.
pub struct Localizer {
    catalog: Option<SharedCatalog>,
    language: LanguageState,
    strategy: SwitchStrategy,
    reconciler: Reconciler,
}

impl Localizer {
    /// Resolves startup language and strategy from flags and config. The
    /// catalog arrives later via [`Message::CatalogLoaded`].
    pub fn new(flags: &Flags, config: &Config) -> Localizer {
        let mut language = LanguageState::init(flags.lang.as_deref(), config);
        if let Some(path) = &flags.config_path {
            language = language.with_config_path(path.clone());
        }
        let strategy = flags
            .strategy
            .or(config.switch_strategy)
            .unwrap_or_default();

        Localizer {
            catalog: None,
            language,
            strategy,
            reconciler: Reconciler::new(),
        }
    }

    pub fn language(&self) -> LanguageCode {
        self.language.get()
    }

    /// Locale tag for the widget library's own initialization.
    pub fn widget_locale(&self) -> &'static str {
        self.language.get().widget_locale()
    }

    /// Whether the catalog has loaded and passes will do real work.
    pub fn is_ready(&self) -> bool {
        self.catalog.is_some()
    }

    /// Earliest pending follow-up instant, for the host's timer.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.reconciler.next_deadline()
    }

    /// Single entrypoint for every host callback. Each arm isolates its
    /// own failures; one misfire must not stop later reconciliation.
    pub fn handle(&mut self, doc: &mut Document, message: Message) -> Effect {
        match message {
            Message::CatalogLoaded { result, now } => {
                match result {
                    Ok(catalog) => {
                        self.catalog = Some(Arc::new(catalog));
                        self.start(doc, now);
                    }
                    Err(error) => {
                        // Catalog stays unset; the page keeps its raw keys.
                        tracing::error!(%error, "catalog unavailable, translation disabled");
                    }
                }
                Effect::None
            }
            Message::PageMutated { now } => {
                let batches = doc.take_mutations();
                if let Some(catalog) = self.catalog.clone() {
                    let ctx = Context::new(&catalog, self.language.get());
                    self.reconciler.on_mutations(doc, &ctx, batches, now);
                }
                Effect::None
            }
            Message::FollowUpDue { now } => {
                if let Some(catalog) = self.catalog.clone() {
                    let ctx = Context::new(&catalog, self.language.get());
                    self.reconciler.on_deadline(doc, &ctx, now);
                }
                Effect::None
            }
            Message::LanguageButtonPressed { control, now: _ } => {
                let Some(selected) = switcher::language_from_control(doc, control) else {
                    tracing::debug!("click on unrecognized language control ignored");
                    return Effect::None;
                };
                let previous = self.language.set(selected);
                tracing::info!(%previous, %selected, "language switched");
                match self.strategy {
                    SwitchStrategy::Reload => Effect::ReloadPage,
                    SwitchStrategy::InPlace => {
                        self.resync(doc);
                        Effect::None
                    }
                }
            }
            Message::FullResync => {
                self.resync(doc);
                Effect::None
            }
        }
    }

    /// Initial pass once the catalog is in: bind the static chrome,
    /// attach the observer to the host container, and adopt whatever the
    /// widget library managed to mount while the catalog was loading.
    fn start(&mut self, doc: &mut Document, now: Millis) {
        let Some(catalog) = self.catalog.clone() else {
            return;
        };
        let ctx = Context::new(&catalog, self.language.get());
        binder::apply(doc, ctx.catalog, ctx.language);

        match doc.find(Selector::Id(HOST_CONTAINER_ID)) {
            Some(host) => {
                doc.observe(host);
                self.reconciler.adopt_existing(doc, &ctx, host, now);
            }
            None => {
                tracing::warn!(
                    container = HOST_CONTAINER_ID,
                    "host container missing, widget reconciliation disabled"
                );
            }
        }
    }

    fn resync(&mut self, doc: &mut Document) {
        let Some(catalog) = self.catalog.clone() else {
            return;
        };
        let ctx = Context::new(&catalog, self.language.get());
        binder::apply(doc, ctx.catalog, ctx.language);
        self.reconciler.resync_all(doc, &ctx);
    }
}
