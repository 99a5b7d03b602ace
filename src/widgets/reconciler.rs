// SPDX-License-Identifier: MPL-2.0
//! Event-driven reconciliation of externally rendered constructs.
//!
//! The widget library mounts, unmounts, and re-renders panels inside the
//! host container on its own schedule. The reconciler reacts to the
//! container's structural observer instead of rescanning the document:
//! inserted subtrees are classified by the library's own class markers,
//! each recognized construct gets its rules applied once per mount, and
//! progressively rendered dialogs get the bounded follow-up ladder.
//!
//! Per construct instance the lifecycle is:
//!
//! ```text
//! Unseen -> Mounted (rules applied)
//!        -> [Remounted -> rules reapplied, ladder restarted]
//!        -> Removed (pending follow-ups canceled)
//! ```
//!
//! Every pass is idempotent: writes that would not change the tree are
//! skipped, and text matching is whole-string equality against known
//! display strings, so partial matches can never corrupt longer labels.

use super::followup::{FollowUpQueue, Millis};
use super::{classify, tooltips, ConstructKind};
use crate::context::Context;
use crate::page::{Document, MutationBatch, NodeId};
use crate::rules;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy)]
struct Mount {
    kind: ConstructKind,
}

/// Tracks live construct instances and their pending follow-up passes.
#[derive(Debug, Default)]
pub struct Reconciler {
    mounts: HashMap<NodeId, Mount>,
    followups: FollowUpQueue,
}

impl Reconciler {
    pub fn new() -> Reconciler {
        Reconciler::default()
    }

    /// Adopts constructs already present under `host` when observation
    /// starts: widgets the library mounted before the catalog finished
    /// loading still get their initial pass. This is the only scan wider
    /// than an observer batch, and it stays scoped to the host container.
    pub fn adopt_existing(
        &mut self,
        doc: &mut Document,
        ctx: &Context<'_>,
        host: NodeId,
        now: Millis,
    ) {
        for child in doc.element_children(host) {
            self.handle_insertion(doc, ctx, child, now);
        }
    }

    /// Consumes observer batches in arrival order.
    pub fn on_mutations(
        &mut self,
        doc: &mut Document,
        ctx: &Context<'_>,
        batches: Vec<MutationBatch>,
        now: Millis,
    ) {
        for batch in batches {
            for &added in &batch.added {
                self.handle_insertion(doc, ctx, added, now);
            }
            for &removed in &batch.removed {
                self.handle_removal(doc, removed);
            }
        }
    }

    fn handle_insertion(&mut self, doc: &mut Document, ctx: &Context<'_>, added: NodeId, now: Millis) {
        for (node, kind) in classify(doc, added) {
            let remount = self.mounts.insert(node, Mount { kind }).is_some();
            if remount {
                tracing::debug!(?kind, "construct remounted, reapplying rules");
            } else {
                tracing::debug!(?kind, "construct mounted");
            }
            apply_construct(doc, ctx, node, kind);
            if kind.is_dialog() {
                // A remount restarts the ladder; schedule() drops the old one.
                self.followups.schedule(node, kind, now);
            }
        }
    }

    fn handle_removal(&mut self, doc: &Document, removed: NodeId) {
        // The removed subtree may hold several tracked constructs; the
        // detached flag covers them all.
        let gone: Vec<NodeId> = self
            .mounts
            .keys()
            .copied()
            .filter(|&node| node == removed || doc.is_detached(node))
            .collect();
        for node in gone {
            if let Some(mount) = self.mounts.remove(&node) {
                tracing::debug!(kind = ?mount.kind, "construct removed, canceling follow-ups");
            }
            self.followups.cancel(node);
        }
    }

    /// Runs the follow-up passes due at `now`. A pass whose construct
    /// disappeared in the meantime is dropped without touching the tree.
    pub fn on_deadline(&mut self, doc: &mut Document, ctx: &Context<'_>, now: Millis) {
        for fu in self.followups.take_due(now) {
            if doc.is_detached(fu.node) || !self.mounts.contains_key(&fu.node) {
                continue;
            }
            apply_construct(doc, ctx, fu.node, fu.kind);
            self.followups.reschedule(fu, now);
        }
    }

    /// Earliest pending follow-up instant, for the host's timer.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.followups.next_deadline()
    }

    /// Re-applies rules to every live construct. Used for in-place
    /// language switches; mounts of removed constructs are pruned first.
    pub fn resync_all(&mut self, doc: &mut Document, ctx: &Context<'_>) {
        self.mounts.retain(|&node, _| !doc.is_detached(node));
        let live: Vec<(NodeId, ConstructKind)> = self
            .mounts
            .iter()
            .map(|(&node, mount)| (node, mount.kind))
            .collect();
        for (node, kind) in live {
            apply_construct(doc, ctx, node, kind);
        }
    }

    /// Number of constructs currently tracked as mounted.
    pub fn live_constructs(&self) -> usize {
        self.mounts.len()
    }
}

/// One reconciliation pass over a single construct. Stateless: all
/// shared state lives in the tree and the context, so queued batches can
/// be processed back to back without scratch leaking between them.
fn apply_construct(doc: &mut Document, ctx: &Context<'_>, node: NodeId, kind: ConstructKind) {
    apply_positional_rules(doc, ctx, node, kind);
    retranslate_leaves(doc, ctx, node, kind);
    retranslate_placeholders(doc, ctx, node, kind);
    tooltips::sync(doc, ctx, node, kind);
}

fn apply_positional_rules(doc: &mut Document, ctx: &Context<'_>, node: NodeId, kind: ConstructKind) {
    for rule in kind.rules() {
        let scope = match rule.within {
            // The narrowing part may not have rendered yet: skip silently,
            // a follow-up pass will see it.
            Some(within) => match doc.find_in(node, within) {
                Some(scope) => scope,
                None => continue,
            },
            None => node,
        };
        let mut matches = doc.find_all_in(scope, rule.selector);
        if rule.within.is_some() {
            // The narrowing element itself is never a target.
            matches.retain(|&m| m != scope);
        }
        let Some(&target) = matches.get(rule.nth) else {
            continue;
        };
        if rules::is_write_protected(doc, target) {
            continue;
        }
        let translated = ctx.tr(rule.key);
        let value = match rule.icon_prefix {
            Some(prefix) => format!("{prefix}{translated}"),
            None => translated,
        };
        rules::write_target(doc, target, rule.target, false, &value);
    }
}

/// Rewrites leaf text that exactly equals a known display string of one of
/// the construct's text keys, in any supported language, to the current
/// language. Dialogs retemplate rows after mounting, so their leaves are
/// matched by content rather than position.
fn retranslate_leaves(doc: &mut Document, ctx: &Context<'_>, node: NodeId, kind: ConstructKind) {
    let keys = kind.text_keys();
    if keys.is_empty() {
        return;
    }
    for leaf in doc.descendant_elements(node) {
        if rules::is_write_protected(doc, leaf) {
            continue;
        }
        let Some(text) = doc.leaf_text(leaf) else {
            continue;
        };
        let Some(key) = ctx.catalog.reverse_lookup_in(keys, &text) else {
            continue;
        };
        let desired = ctx.tr(key);
        if desired != text {
            doc.set_text(leaf, &desired);
        }
    }
}

/// Same as [`retranslate_leaves`] for `placeholder` values. A placeholder
/// is never user content, so only an element currently holding focus is
/// off-limits.
fn retranslate_placeholders(doc: &mut Document, ctx: &Context<'_>, node: NodeId, kind: ConstructKind) {
    let keys = kind.placeholder_keys();
    if keys.is_empty() {
        return;
    }
    for element in doc.descendant_elements(node) {
        if doc.is_focused(element) {
            continue;
        }
        let Some(current) = doc.attr(element, "placeholder").map(str::to_string) else {
            continue;
        };
        let Some(key) = ctx.catalog.reverse_lookup_in(keys, &current) else {
            continue;
        };
        let desired = ctx.tr(key);
        if desired != current {
            doc.set_attr(element, "placeholder", &desired);
        }
    }
}
