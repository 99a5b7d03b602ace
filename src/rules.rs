// SPDX-License-Identifier: MPL-2.0
//! Declarative binding rules for the fixed page chrome.
//!
//! One static table maps stable selectors to catalog keys and write
//! targets. The binder walks it; nothing else in the crate hard-codes a
//! page element.

use crate::page::{Document, NodeId, Selector};

/// Where a rule writes its translated string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// The element's text content.
    Text,
    /// The `placeholder` attribute.
    Placeholder,
    /// Both `title` and `aria-label`, always written together.
    Tooltip,
}

/// Declarative mapping from a page element to a catalog key.
#[derive(Debug, Clone, Copy)]
pub struct BindingRule {
    pub selector: Selector,
    pub key: &'static str,
    pub target: Target,
    /// Keep a decorative icon child, re-inserted before the new text.
    pub preserve_icon: bool,
}

impl BindingRule {
    const fn text(selector: Selector, key: &'static str) -> BindingRule {
        BindingRule {
            selector,
            key,
            target: Target::Text,
            preserve_icon: false,
        }
    }

    const fn text_with_icon(selector: Selector, key: &'static str) -> BindingRule {
        BindingRule {
            selector,
            key,
            target: Target::Text,
            preserve_icon: true,
        }
    }

    const fn placeholder(selector: Selector, key: &'static str) -> BindingRule {
        BindingRule {
            selector,
            key,
            target: Target::Placeholder,
            preserve_icon: false,
        }
    }
}

/// Fixed page chrome, bound once at startup and again on an in-place
/// language switch. Keys are the catalog document's own names.
pub static PAGE_RULES: &[BindingRule] = &[
    // Navigation
    BindingRule::text(Selector::Attr("href", "index.html"), "home"),
    BindingRule::text(Selector::Attr("href", "video.html"), "video"),
    BindingRule::text(Selector::Attr("href", "contact_page.html"), "contact"),
    // Toolbar buttons, both carry a decorative icon
    BindingRule::text_with_icon(Selector::Class("search-button"), "search"),
    BindingRule::text_with_icon(Selector::Class("gallery-button"), "gallery"),
    // Export and paging controls
    BindingRule::text(Selector::Id("exportPDF"), "export_pdf"),
    BindingRule::text(Selector::Id("exportExcel"), "export_excel"),
    BindingRule::text(Selector::Id("prevButton"), "previous"),
    BindingRule::text(Selector::Id("nextButton"), "next"),
    // Contact page
    BindingRule::text(Selector::Attr("data-key", "contact_title"), "contact_title"),
    BindingRule::text(Selector::Attr("data-key", "form_title"), "form_title"),
    BindingRule::text(Selector::Attr("data-key", "form_desc"), "form_desc"),
    BindingRule::text(Selector::Attr("for", "name"), "form_name"),
    BindingRule::text(Selector::Attr("for", "email"), "form_email"),
    BindingRule::text(Selector::Attr("for", "subject"), "form_subject"),
    BindingRule::text(Selector::Attr("for", "message"), "form_message"),
    BindingRule::text(Selector::Attr("type", "submit"), "form_send"),
    // Attribute table headers
    BindingRule::text(Selector::Attr("data-key", "table_id"), "table_id"),
    BindingRule::text(Selector::Attr("data-key", "table_name"), "table_name"),
    BindingRule::text(Selector::Attr("data-key", "table_address"), "table_address"),
    // Search field hint
    BindingRule::placeholder(
        Selector::Attr("data-key", "search_placeholder"),
        "search_placeholder",
    ),
];

/// Elements never written to even when a rule matches: they hold
/// user-entered content.
pub static EXCLUDED_CLASSES: &[&str] = &["esri-search__input", "esri-input"];

/// Whether writes into this element are forbidden right now: it either
/// holds user focus or sits on the exclusion list.
pub fn is_write_protected(doc: &Document, node: NodeId) -> bool {
    doc.is_focused(node) || EXCLUDED_CLASSES.iter().any(|c| doc.has_class(node, c))
}

/// Writes `value` to `node` per the target. Returns whether anything
/// changed; unchanged writes are skipped so repeated passes stay
/// observably idempotent.
pub fn write_target(
    doc: &mut Document,
    node: NodeId,
    target: Target,
    preserve_icon: bool,
    value: &str,
) -> bool {
    match target {
        Target::Text => {
            if preserve_icon {
                doc.set_text_preserving_icon(node, value)
            } else {
                doc.set_text(node, value)
            }
        }
        Target::Placeholder => doc.set_attr(node, "placeholder", value),
        Target::Tooltip => {
            let title = doc.set_attr(node, "title", value);
            let aria = doc.set_attr(node, "aria-label", value);
            title || aria
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Fragment;

    #[test]
    fn page_rules_cover_every_target_kind() {
        assert!(PAGE_RULES.iter().any(|r| r.target == Target::Placeholder));
        assert!(PAGE_RULES.iter().any(|r| r.preserve_icon));
        assert!(PAGE_RULES.iter().any(|r| r.target == Target::Text));
    }

    #[test]
    fn page_rules_have_unique_keys() {
        let mut keys: Vec<&str> = PAGE_RULES.iter().map(|r| r.key).collect();
        keys.sort_unstable();
        let len_before = keys.len();
        keys.dedup();
        assert_eq!(keys.len(), len_before);
    }

    #[test]
    fn tooltip_target_writes_title_and_aria_label() {
        let mut doc = Document::new();
        let root = doc.root();
        let node = doc.mount(root, Fragment::new("div"));

        assert!(write_target(&mut doc, node, Target::Tooltip, false, "Zoom in"));
        assert_eq!(doc.attr(node, "title"), Some("Zoom in"));
        assert_eq!(doc.attr(node, "aria-label"), Some("Zoom in"));
        assert!(!write_target(&mut doc, node, Target::Tooltip, false, "Zoom in"));
    }

    #[test]
    fn focused_and_excluded_elements_are_protected() {
        let mut doc = Document::new();
        let root = doc.root();
        let input = doc.mount(root, Fragment::new("input").class("esri-search__input"));
        let label = doc.mount(root, Fragment::new("span").text("Units"));

        assert!(is_write_protected(&doc, input));
        assert!(!is_write_protected(&doc, label));

        doc.focus(Some(label));
        assert!(is_write_protected(&doc, label));
    }
}
