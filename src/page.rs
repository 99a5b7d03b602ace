// SPDX-License-Identifier: MPL-2.0
//! In-memory element tree standing in for the host page.
//!
//! This models exactly the contract the translation layer relies on from
//! the host environment: structural queries, text and attribute writes,
//! focus tracking, and a structural-change observer scoped to a single
//! host container. The observer reports subtree insertions and removals
//! only, never attribute or text writes, so the layer's own writes cannot
//! feed back into it.
//!
//! Tests and the demo binary play the role of the external widget library
//! by mounting [`Fragment`]s into the observed container.

use std::collections::BTreeMap;

/// Handle to a node. Handles stay valid after removal so late observers
/// can still inspect what a removed subtree was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
enum NodeKind {
    Element {
        tag: String,
        id: Option<String>,
        classes: Vec<String>,
        attrs: BTreeMap<String, String>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    detached: bool,
}

/// Static selector used by binding rules. Deliberately small: binding
/// targets are identified by id, class, or a single attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    Id(&'static str),
    Class(&'static str),
    Tag(&'static str),
    Attr(&'static str, &'static str),
}

/// One observer batch: subtree roots inserted into or removed from the
/// observed container since the last drain. Batches are delivered in
/// arrival order.
#[derive(Debug, Clone, Default)]
pub struct MutationBatch {
    pub added: Vec<NodeId>,
    pub removed: Vec<NodeId>,
}

#[derive(Debug, Clone)]
enum FragmentNode {
    Element(Fragment),
    Text(String),
}

/// Declarative subtree for mounting externally rendered markup.
#[derive(Debug, Clone)]
pub struct Fragment {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, String)>,
    children: Vec<FragmentNode>,
}

impl Fragment {
    pub fn new(tag: &str) -> Fragment {
        Fragment {
            tag: tag.to_string(),
            id: None,
            classes: Vec::new(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn id(mut self, id: &str) -> Fragment {
        self.id = Some(id.to_string());
        self
    }

    pub fn class(mut self, class: &str) -> Fragment {
        self.classes.push(class.to_string());
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Fragment {
        self.attrs.push((name.to_string(), value.to_string()));
        self
    }

    /// Appends a text child at this position. Call order is child order.
    pub fn text(mut self, text: &str) -> Fragment {
        self.children.push(FragmentNode::Text(text.to_string()));
        self
    }

    pub fn child(mut self, child: Fragment) -> Fragment {
        self.children.push(FragmentNode::Element(child));
        self
    }
}

/// The page tree plus its single structural observer.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    focused: Option<NodeId>,
    observed: Option<NodeId>,
    pending: Vec<MutationBatch>,
    writes: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Document {
        let mut doc = Document {
            nodes: Vec::new(),
            root: NodeId(0),
            focused: None,
            observed: None,
            pending: Vec::new(),
            writes: 0,
        };
        doc.root = doc.push(NodeKind::element("body"), None);
        doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    fn push(&mut self, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent,
            children: Vec::new(),
            detached: false,
        });
        id
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    // -----------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------

    /// Creates a detached element; attach it with [`Document::append_child`].
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeKind::element(tag), None)
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
        self.record_insertion(child);
    }

    /// Materializes a fragment under `parent` and returns the subtree root.
    /// Insertions under the observed container are reported as one batch,
    /// the way the host environment batches structural notifications.
    pub fn mount(&mut self, parent: NodeId, fragment: Fragment) -> NodeId {
        let root = self.materialize(fragment);
        self.node_mut(root).parent = Some(parent);
        self.node_mut(parent).children.push(root);
        self.record_insertion(root);
        root
    }

    fn materialize(&mut self, fragment: Fragment) -> NodeId {
        let node = self.push(
            NodeKind::Element {
                tag: fragment.tag,
                id: fragment.id,
                classes: fragment.classes,
                attrs: fragment.attrs.into_iter().collect(),
            },
            None,
        );
        for child in fragment.children {
            let child_id = match child {
                FragmentNode::Element(f) => self.materialize(f),
                FragmentNode::Text(t) => self.push(NodeKind::Text(t), None),
            };
            self.node_mut(child_id).parent = Some(node);
            self.node_mut(node).children.push(child_id);
        }
        node
    }

    /// Detaches a subtree. The removal is reported to the observer if the
    /// subtree was inside the observed container; node handles stay valid.
    pub fn remove(&mut self, node: NodeId) {
        let observed = self.is_observed(node);
        if let Some(parent) = self.node(node).parent {
            let idx = self.node(parent).children.iter().position(|&c| c == node);
            if let Some(idx) = idx {
                self.node_mut(parent).children.remove(idx);
            }
        }
        self.node_mut(node).parent = None;
        self.mark_detached(node);
        if observed {
            self.pending.push(MutationBatch {
                added: Vec::new(),
                removed: vec![node],
            });
        }
    }

    fn mark_detached(&mut self, node: NodeId) {
        self.node_mut(node).detached = true;
        let children = self.node(node).children.clone();
        for child in children {
            self.mark_detached(child);
        }
    }

    // -----------------------------------------------------------------
    // Observation
    // -----------------------------------------------------------------

    /// Scopes the structural observer to `container`. There is exactly one
    /// observer; re-observing moves it.
    pub fn observe(&mut self, container: NodeId) {
        self.observed = Some(container);
        self.pending.clear();
    }

    fn is_observed(&self, node: NodeId) -> bool {
        match self.observed {
            Some(container) => node != container && self.contains(container, node),
            None => false,
        }
    }

    fn record_insertion(&mut self, node: NodeId) {
        if self.is_observed(node) {
            self.pending.push(MutationBatch {
                added: vec![node],
                removed: Vec::new(),
            });
        }
    }

    /// Drains queued observer batches, in arrival order.
    pub fn take_mutations(&mut self) -> Vec<MutationBatch> {
        std::mem::take(&mut self.pending)
    }

    pub fn has_pending_mutations(&self) -> bool {
        !self.pending.is_empty()
    }

    // -----------------------------------------------------------------
    // Inspection
    // -----------------------------------------------------------------

    pub fn is_element(&self, node: NodeId) -> bool {
        matches!(self.node(node).kind, NodeKind::Element { .. })
    }

    pub fn is_detached(&self, node: NodeId) -> bool {
        self.node(node).detached
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        match &self.node(node).kind {
            NodeKind::Element { tag, .. } => Some(tag),
            NodeKind::Text(_) => None,
        }
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        match &self.node(node).kind {
            NodeKind::Element { classes, .. } => classes.iter().any(|c| c == class),
            NodeKind::Text(_) => false,
        }
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        match &self.node(node).kind {
            NodeKind::Element { attrs, .. } => attrs.get(name).map(String::as_str),
            NodeKind::Text(_) => None,
        }
    }

    /// Whether `ancestor` contains `node` (strictly; a node does not
    /// contain itself).
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.node(node).parent;
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.node(parent).parent;
        }
        false
    }

    /// Element children only, skipping text nodes.
    pub fn element_children(&self, node: NodeId) -> Vec<NodeId> {
        self.node(node)
            .children
            .iter()
            .copied()
            .filter(|&c| self.is_element(c))
            .collect()
    }

    /// All child handles in order, text nodes included.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.node(node).children
    }

    /// Concatenated text of the subtree.
    pub fn text_of(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        match &self.node(node).kind {
            NodeKind::Text(t) => out.push_str(t),
            NodeKind::Element { .. } => {
                for &child in &self.node(node).children {
                    self.collect_text(child, out);
                }
            }
        }
    }

    /// Text of an element with no element children, trimmed. `None` for
    /// non-leaf elements; those are translated through their own leaves.
    pub fn leaf_text(&self, node: NodeId) -> Option<String> {
        if !self.is_element(node) || !self.element_children(node).is_empty() {
            return None;
        }
        let text = self.text_of(node);
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// Elements of the subtree in document order, `node` included.
    pub fn descendant_elements(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.walk_elements(node, &mut out);
        out
    }

    fn walk_elements(&self, node: NodeId, out: &mut Vec<NodeId>) {
        if self.is_element(node) {
            out.push(node);
        }
        for &child in &self.node(node).children {
            self.walk_elements(child, out);
        }
    }

    pub fn matches(&self, node: NodeId, selector: Selector) -> bool {
        match &self.node(node).kind {
            NodeKind::Text(_) => false,
            NodeKind::Element { tag, id, classes, attrs } => match selector {
                Selector::Id(wanted) => id.as_deref() == Some(wanted),
                Selector::Class(wanted) => classes.iter().any(|c| c == wanted),
                Selector::Tag(wanted) => tag == wanted,
                Selector::Attr(name, value) => attrs.get(name).map(String::as_str) == Some(value),
            },
        }
    }

    /// First match in document order within `scope` (the scope node itself
    /// participates, matching how class selectors hit construct roots).
    pub fn find_in(&self, scope: NodeId, selector: Selector) -> Option<NodeId> {
        self.descendant_elements(scope)
            .into_iter()
            .find(|&n| self.matches(n, selector))
    }

    pub fn find_all_in(&self, scope: NodeId, selector: Selector) -> Vec<NodeId> {
        self.descendant_elements(scope)
            .into_iter()
            .filter(|&n| self.matches(n, selector))
            .collect()
    }

    pub fn find(&self, selector: Selector) -> Option<NodeId> {
        self.find_in(self.root, selector)
    }

    pub fn find_all(&self, selector: Selector) -> Vec<NodeId> {
        self.find_all_in(self.root, selector)
    }

    // -----------------------------------------------------------------
    // Focus
    // -----------------------------------------------------------------

    pub fn focus(&mut self, node: Option<NodeId>) {
        self.focused = node;
    }

    pub fn is_focused(&self, node: NodeId) -> bool {
        self.focused == Some(node)
    }

    // -----------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------

    /// Number of writes that actually changed the tree. Re-applying the
    /// same text or attribute value does not count, which is what makes
    /// reconciliation idempotence observable.
    pub fn write_count(&self) -> u64 {
        self.writes
    }

    /// Sets an attribute; returns whether the value changed.
    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) -> bool {
        let changed = self.attr(node, name) != Some(value);
        if changed {
            if let NodeKind::Element { attrs, .. } = &mut self.node_mut(node).kind {
                attrs.insert(name.to_string(), value.to_string());
                self.writes += 1;
            }
        }
        changed
    }

    /// Replaces the element's content with a single text node.
    pub fn set_text(&mut self, node: NodeId, text: &str) -> bool {
        if self.text_of(node) == text && self.element_children(node).is_empty() {
            return false;
        }
        let old_children = std::mem::take(&mut self.node_mut(node).children);
        for child in old_children {
            self.node_mut(child).parent = None;
            self.mark_detached(child);
        }
        let text_node = self.push(NodeKind::Text(text.to_string()), Some(node));
        self.node_mut(node).children.push(text_node);
        self.writes += 1;
        true
    }

    /// Replaces the element's text while keeping its decorative icon child
    /// (an `i` element), re-inserted before the new text node.
    pub fn set_text_preserving_icon(&mut self, node: NodeId, text: &str) -> bool {
        let icon = self
            .element_children(node)
            .into_iter()
            .find(|&c| self.tag(c) == Some("i"));

        let Some(icon) = icon else {
            return self.set_text(node, text);
        };

        // Already icon-first with the wanted text: nothing to do.
        let children = self.node(node).children.clone();
        if children.first() == Some(&icon) && self.own_text(node) == text {
            return false;
        }

        for child in children {
            if child != icon {
                self.node_mut(child).parent = None;
                self.mark_detached(child);
            }
        }
        self.node_mut(node).children.clear();
        self.node_mut(node).children.push(icon);
        let text_node = self.push(NodeKind::Text(text.to_string()), Some(node));
        self.node_mut(node).children.push(text_node);
        self.writes += 1;
        true
    }

    /// Concatenated text of the element's direct text children only.
    fn own_text(&self, node: NodeId) -> String {
        let mut out = String::new();
        for &child in &self.node(node).children {
            if let NodeKind::Text(t) = &self.node(child).kind {
                out.push_str(t);
            }
        }
        out
    }
}

impl NodeKind {
    fn element(tag: &str) -> NodeKind {
        NodeKind::Element {
            tag: tag.to_string(),
            id: None,
            classes: Vec::new(),
            attrs: BTreeMap::new(),
        }
    }
}
