// SPDX-License-Identifier: MPL-2.0
//! Title/aria-label synchronization for locale-sensitive controls.
//!
//! Runs as part of every construct pass, so tooltip writes the library
//! reverts get re-applied under the same bounded follow-up discipline as
//! text rules. Three cases need more than a positional rule:
//!
//! - the fullscreen toggle, whose correct string depends on its current
//!   state, read off the button's own `aria-label` at translation time;
//! - expand toggles, keyed by what their panel contains;
//! - sketch and coordinate-conversion tools, whose tooltips are
//!   retranslated by exact-equality match against known display strings.

use super::ConstructKind;
use crate::context::Context;
use crate::page::{Document, NodeId, Selector};
use crate::rules::{self, Target};

const EXPAND_TOGGLE: Selector = Selector::Class("esri-expand__toggle");
const EXPAND_COLLAPSE: Selector = Selector::Class("esri-expand__collapse");
const WIDGET_BUTTON: Selector = Selector::Class("esri-widget--button");

/// Expand tooltips are decided by panel content, first match wins.
const EXPAND_CONTENT: &[(Selector, &str)] = &[
    (Selector::Class("esri-layer-list"), "layerListTooltip"),
    (Selector::Class("esri-basemap-gallery"), "basemapTooltip"),
    (Selector::Class("esri-bookmarks"), "bookmarksTooltip"),
    (Selector::Class("esri-measurement"), "measurementTooltip"),
    (Selector::Class("esri-print"), "printTooltip"),
    (Selector::Class("esri-search"), "searchTooltip"),
];

/// Sketch tool tooltips, retranslated by exact match.
static SKETCH_TOOLTIP_KEYS: &[&str] = &[
    "drawPointTooltip",
    "drawPolylineTooltip",
    "drawPolygonTooltip",
    "drawCircleTooltip",
    "drawRectangleTooltip",
    "selectByLassoTooltip",
    "selectByRectangleTooltip",
    "selectFeatureTooltip",
];

/// Applies the attribute rules a construct needs beyond its positional
/// table. No-op for constructs without any.
pub fn sync(doc: &mut Document, ctx: &Context<'_>, node: NodeId, kind: ConstructKind) {
    match kind {
        ConstructKind::Fullscreen => sync_fullscreen(doc, ctx, node),
        ConstructKind::Expand => sync_expand(doc, ctx, node),
        ConstructKind::Sketch => retranslate_attrs(doc, ctx, node, SKETCH_TOOLTIP_KEYS),
        ConstructKind::CoordinateConversion => {
            retranslate_attrs(doc, ctx, node, kind.text_keys())
        }
        _ => {}
    }
}

/// The fullscreen button toggles between enter and exit labels. The state
/// is read off the current `aria-label` at the moment of translation: an
/// exact match against any language's exit string means the toggle is in
/// its exit state.
fn sync_fullscreen(doc: &mut Document, ctx: &Context<'_>, node: NodeId) {
    for button in doc.find_all_in(node, WIDGET_BUTTON) {
        if rules::is_write_protected(doc, button) {
            continue;
        }
        let current = doc.attr(button, "aria-label").unwrap_or_default();
        let key = if ctx.catalog.matches_display("exitFullscreenTooltip", current) {
            "exitFullscreenTooltip"
        } else {
            "fullscreenTooltip"
        };
        let value = ctx.tr(key);
        rules::write_target(doc, button, Target::Tooltip, false, &value);
    }
}

/// An expand control's tooltip names what it expands to.
fn sync_expand(doc: &mut Document, ctx: &Context<'_>, node: NodeId) {
    if let Some(&(_, key)) = EXPAND_CONTENT
        .iter()
        .find(|(content, _)| doc.find_in(node, *content).is_some())
    {
        let value = ctx.tr(key);
        for toggle in doc.find_all_in(node, EXPAND_TOGGLE) {
            rules::write_target(doc, toggle, Target::Tooltip, false, &value);
        }
    }

    let collapse_value = ctx.tr("collapseTooltip");
    for collapse in doc.find_all_in(node, EXPAND_COLLAPSE) {
        rules::write_target(doc, collapse, Target::Tooltip, false, &collapse_value);
    }
}

/// Rewrites `title`/`aria-label` values that exactly equal a known display
/// string of one of `keys`, in any supported language, to the current
/// language's string.
fn retranslate_attrs(doc: &mut Document, ctx: &Context<'_>, node: NodeId, keys: &[&str]) {
    for element in doc.descendant_elements(node) {
        for attr in ["title", "aria-label"] {
            let Some(current) = doc.attr(element, attr).map(str::to_string) else {
                continue;
            };
            let Some(key) = ctx.catalog.reverse_lookup_in(keys, &current) else {
                continue;
            };
            let desired = ctx.tr(key);
            if desired != current {
                doc.set_attr(element, attr, &desired);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::language::LanguageCode;
    use crate::page::Fragment;

    fn catalog() -> Catalog {
        Catalog::from_json(
            r#"{
                "en": {
                    "fullscreenTooltip": "Enter fullscreen",
                    "exitFullscreenTooltip": "Exit fullscreen",
                    "bookmarksTooltip": "Bookmarks",
                    "collapseTooltip": "Collapse",
                    "drawPointTooltip": "Draw a point"
                },
                "mk": {
                    "fullscreenTooltip": "Цел екран",
                    "exitFullscreenTooltip": "Излези од цел екран",
                    "bookmarksTooltip": "Обележувачи",
                    "collapseTooltip": "Затвори",
                    "drawPointTooltip": "Нацртај точка"
                }
            }"#,
        )
        .expect("test catalog should parse")
    }

    #[test]
    fn fullscreen_tooltip_depends_on_current_state() {
        let catalog = catalog();
        let ctx = Context::new(&catalog, LanguageCode::Mk);
        let mut doc = Document::new();
        let root = doc.root();
        let widget = doc.mount(
            root,
            Fragment::new("div").class("esri-fullscreen").child(
                Fragment::new("div")
                    .class("esri-widget--button")
                    .attr("aria-label", "Exit fullscreen"),
            ),
        );

        sync(&mut doc, &ctx, widget, ConstructKind::Fullscreen);
        let button = doc.find_in(widget, WIDGET_BUTTON).unwrap();
        assert_eq!(doc.attr(button, "aria-label"), Some("Излези од цел екран"));
        assert_eq!(doc.attr(button, "title"), Some("Излези од цел екран"));

        // Re-running keeps recognizing the (now Macedonian) exit state.
        sync(&mut doc, &ctx, widget, ConstructKind::Fullscreen);
        assert_eq!(doc.attr(button, "aria-label"), Some("Излези од цел екран"));
    }

    #[test]
    fn fullscreen_without_label_defaults_to_enter_state() {
        let catalog = catalog();
        let ctx = Context::new(&catalog, LanguageCode::En);
        let mut doc = Document::new();
        let root = doc.root();
        let widget = doc.mount(
            root,
            Fragment::new("div")
                .class("esri-fullscreen")
                .child(Fragment::new("div").class("esri-widget--button")),
        );

        sync(&mut doc, &ctx, widget, ConstructKind::Fullscreen);
        let button = doc.find_in(widget, WIDGET_BUTTON).unwrap();
        assert_eq!(doc.attr(button, "aria-label"), Some("Enter fullscreen"));
    }

    #[test]
    fn expand_tooltip_keyed_by_panel_content() {
        let catalog = catalog();
        let ctx = Context::new(&catalog, LanguageCode::Mk);
        let mut doc = Document::new();
        let root = doc.root();
        let expand = doc.mount(
            root,
            Fragment::new("div")
                .class("esri-expand")
                .child(Fragment::new("div").class("esri-expand__toggle"))
                .child(Fragment::new("div").class("esri-expand__collapse"))
                .child(Fragment::new("div").class("esri-bookmarks")),
        );

        sync(&mut doc, &ctx, expand, ConstructKind::Expand);
        let toggle = doc.find_in(expand, EXPAND_TOGGLE).unwrap();
        let collapse = doc.find_in(expand, EXPAND_COLLAPSE).unwrap();
        assert_eq!(doc.attr(toggle, "title"), Some("Обележувачи"));
        assert_eq!(doc.attr(collapse, "title"), Some("Затвори"));
    }

    #[test]
    fn sketch_tooltips_retranslate_by_exact_match_only() {
        let catalog = catalog();
        let ctx = Context::new(&catalog, LanguageCode::Mk);
        let mut doc = Document::new();
        let root = doc.root();
        let sketch = doc.mount(
            root,
            Fragment::new("div")
                .class("esri-sketch")
                .child(
                    Fragment::new("button")
                        .class("esri-sketch__tool")
                        .attr("title", "Draw a point"),
                )
                .child(
                    Fragment::new("button")
                        .class("esri-sketch__tool")
                        .attr("title", "Draw a point on the map"),
                ),
        );

        sync(&mut doc, &ctx, sketch, ConstructKind::Sketch);
        let tools = doc.find_all_in(sketch, Selector::Class("esri-sketch__tool"));
        assert_eq!(doc.attr(tools[0], "title"), Some("Нацртај точка"));
        // Superstring untouched: matching is whole-string equality.
        assert_eq!(doc.attr(tools[1], "title"), Some("Draw a point on the map"));
    }
}
