// SPDX-License-Identifier: MPL-2.0
//! Bounded follow-up passes for progressively rendered dialogs.
//!
//! A dialog may retemplate its rows shortly after mounting. Instead of a
//! recurring timer, each dialog mount schedules a fixed ladder of
//! reconciliation passes at increasing delays. The ladder ends on its own
//! or when the dialog's node is observed removed, whichever comes first;
//! removal cancels every pending entry for that node.

use super::ConstructKind;
use crate::page::NodeId;

/// Milliseconds on the host's monotonic clock. Tests drive a fake clock
/// by passing arbitrary values.
pub type Millis = u64;

/// Delay ladder after a dialog mounts. Once exhausted the dialog gets no
/// further passes until it remounts.
pub const FOLLOW_UP_DELAYS_MS: [Millis; 3] = [100, 300, 700];

/// One scheduled reconciliation pass.
#[derive(Debug, Clone, Copy)]
pub struct FollowUp {
    pub node: NodeId,
    pub kind: ConstructKind,
    /// Index into [`FOLLOW_UP_DELAYS_MS`].
    pub attempt: usize,
    pub due_at: Millis,
}

/// Pending follow-up passes, at most one per construct instance.
#[derive(Debug, Default)]
pub struct FollowUpQueue {
    pending: Vec<FollowUp>,
}

impl FollowUpQueue {
    pub fn new() -> FollowUpQueue {
        FollowUpQueue::default()
    }

    /// Starts the ladder for a freshly mounted dialog. A remount restarts
    /// it; the previous ladder for the node is dropped first.
    pub fn schedule(&mut self, node: NodeId, kind: ConstructKind, now: Millis) {
        self.cancel(node);
        self.pending.push(FollowUp {
            node,
            kind,
            attempt: 0,
            due_at: now + FOLLOW_UP_DELAYS_MS[0],
        });
    }

    /// Queues the next rung after a pass ran, if the ladder has one.
    /// Returns whether anything was queued.
    pub fn reschedule(&mut self, done: FollowUp, now: Millis) -> bool {
        let next = done.attempt + 1;
        match FOLLOW_UP_DELAYS_MS.get(next) {
            Some(delay) => {
                self.pending.push(FollowUp {
                    node: done.node,
                    kind: done.kind,
                    attempt: next,
                    due_at: now + delay,
                });
                true
            }
            None => false,
        }
    }

    /// Drops every pending pass for `node`. Called on observed removal so
    /// a closed dialog leaks no recurring work.
    pub fn cancel(&mut self, node: NodeId) {
        self.pending.retain(|fu| fu.node != node);
    }

    /// Removes and returns the passes due at `now`, earliest first.
    pub fn take_due(&mut self, now: Millis) -> Vec<FollowUp> {
        let mut due: Vec<FollowUp> = Vec::new();
        let mut rest: Vec<FollowUp> = Vec::new();
        for fu in self.pending.drain(..) {
            if fu.due_at <= now {
                due.push(fu);
            } else {
                rest.push(fu);
            }
        }
        self.pending = rest;
        due.sort_by_key(|fu| fu.due_at);
        due
    }

    /// Earliest pending instant, for the host's timer.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.pending.iter().map(|fu| fu.due_at).min()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{Document, Fragment};

    fn dialog_node() -> NodeId {
        let mut doc = Document::new();
        let root = doc.root();
        doc.mount(root, Fragment::new("div").class("esri-print"))
    }

    #[test]
    fn ladder_runs_in_order_and_ends() {
        let node = dialog_node();
        let mut queue = FollowUpQueue::new();
        queue.schedule(node, ConstructKind::Print, 1_000);

        assert_eq!(queue.next_deadline(), Some(1_100));
        assert!(queue.take_due(1_099).is_empty());

        let due = queue.take_due(1_100);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].attempt, 0);

        assert!(queue.reschedule(due[0], 1_100));
        let due = queue.take_due(1_400);
        assert_eq!(due[0].attempt, 1);

        assert!(queue.reschedule(due[0], 1_400));
        let due = queue.take_due(2_100);
        assert_eq!(due[0].attempt, 2);

        // Ladder exhausted
        assert!(!queue.reschedule(due[0], 2_100));
        assert!(queue.is_empty());
    }

    #[test]
    fn cancel_clears_pending_passes() {
        let node = dialog_node();
        let mut queue = FollowUpQueue::new();
        queue.schedule(node, ConstructKind::Bookmarks, 0);
        queue.cancel(node);

        assert!(queue.is_empty());
        assert!(queue.take_due(u64::MAX).is_empty());
        assert_eq!(queue.next_deadline(), None);
    }

    #[test]
    fn remount_restarts_the_ladder() {
        let node = dialog_node();
        let mut queue = FollowUpQueue::new();
        queue.schedule(node, ConstructKind::Print, 0);
        let first = queue.take_due(100);
        queue.reschedule(first[0], 100);

        // Remount: the in-flight rung is replaced by a fresh attempt 0.
        queue.schedule(node, ConstructKind::Print, 500);
        let due = queue.take_due(1_000);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].attempt, 0);
        assert_eq!(due[0].due_at, 600);
    }
}
