// SPDX-License-Identifier: MPL-2.0
//! Constructs rendered by the external mapping-widget library, and the
//! declarative knowledge of how to translate each one.
//!
//! Constructs are recognized by the root class markers the library puts
//! on its own markup. Per construct there are three rule sets:
//!
//! - [`ConstructKind::rules`] — positional sub-element rules, applied on
//!   every pass over the construct;
//! - [`ConstructKind::text_keys`] — catalog keys whose display strings are
//!   rewritten in leaf elements by exact-equality match (dialogs retemplate
//!   their rows, so their leaves cannot be addressed positionally);
//! - [`ConstructKind::placeholder_keys`] — same, for `placeholder`
//!   attributes on inputs.

pub mod followup;
pub mod reconciler;
pub mod tooltips;

use crate::page::{Document, NodeId, Selector};
use crate::rules::Target;

/// One externally rendered UI construct this layer knows how to translate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstructKind {
    Home,
    ZoomIn,
    ZoomOut,
    Locate,
    Fullscreen,
    Search,
    BasemapGallery,
    LayerList,
    Measurement,
    Bookmarks,
    Print,
    ElevationProfile,
    Sketch,
    CoordinateConversion,
    Expand,
}

/// Root class markers owned by the widget library. Order matters only for
/// determinism of classification output.
const MARKERS: &[(&str, ConstructKind)] = &[
    ("esri-home", ConstructKind::Home),
    ("esri-zoom-in", ConstructKind::ZoomIn),
    ("esri-zoom-out", ConstructKind::ZoomOut),
    ("esri-locate", ConstructKind::Locate),
    ("esri-fullscreen", ConstructKind::Fullscreen),
    ("esri-search", ConstructKind::Search),
    ("esri-basemap-gallery", ConstructKind::BasemapGallery),
    ("esri-layer-list", ConstructKind::LayerList),
    ("esri-measurement", ConstructKind::Measurement),
    ("esri-bookmarks", ConstructKind::Bookmarks),
    ("esri-print", ConstructKind::Print),
    ("esri-elevation-profile", ConstructKind::ElevationProfile),
    ("esri-sketch", ConstructKind::Sketch),
    ("esri-coordinate-conversion", ConstructKind::CoordinateConversion),
    ("esri-expand", ConstructKind::Expand),
];

/// Positional rule inside a construct subtree.
#[derive(Debug, Clone, Copy)]
pub struct WidgetRule {
    /// Narrows the construct subtree before selecting, when set.
    pub within: Option<Selector>,
    pub selector: Selector,
    /// Index among the matches; the library lays these buttons out
    /// positionally.
    pub nth: usize,
    pub key: &'static str,
    pub target: Target,
    /// Text prefix kept in front of the translated string (the custom
    /// measurement buttons carry emoji icons in their labels).
    pub icon_prefix: Option<&'static str>,
}

impl WidgetRule {
    const fn tooltip(selector: Selector, key: &'static str) -> WidgetRule {
        WidgetRule {
            within: None,
            selector,
            nth: 0,
            key,
            target: Target::Tooltip,
            icon_prefix: None,
        }
    }

    const fn text_in(
        within: Selector,
        selector: Selector,
        nth: usize,
        key: &'static str,
        icon_prefix: Option<&'static str>,
    ) -> WidgetRule {
        WidgetRule {
            within: Some(within),
            selector,
            nth,
            key,
            target: Target::Text,
            icon_prefix,
        }
    }
}

const WIDGET_BUTTON: Selector = Selector::Class("esri-widget--button");
const MEASURE_BUTTONS: Selector = Selector::Class("custom-measure-buttons");

static HOME_RULES: &[WidgetRule] = &[WidgetRule::tooltip(WIDGET_BUTTON, "homeTooltip")];
static ZOOM_IN_RULES: &[WidgetRule] =
    &[WidgetRule::tooltip(Selector::Class("esri-zoom-in"), "zoomInTooltip")];
static ZOOM_OUT_RULES: &[WidgetRule] =
    &[WidgetRule::tooltip(Selector::Class("esri-zoom-out"), "zoomOutTooltip")];
static LOCATE_RULES: &[WidgetRule] = &[WidgetRule::tooltip(WIDGET_BUTTON, "locateTooltip")];
static SEARCH_RULES: &[WidgetRule] = &[WidgetRule::tooltip(WIDGET_BUTTON, "searchTooltip")];

static MEASUREMENT_RULES: &[WidgetRule] = &[
    WidgetRule::text_in(MEASURE_BUTTONS, Selector::Tag("div"), 0, "startMeasurement", None),
    WidgetRule::text_in(MEASURE_BUTTONS, Selector::Tag("button"), 0, "distance", Some("📏 ")),
    WidgetRule::text_in(MEASURE_BUTTONS, Selector::Tag("button"), 1, "area", Some("⬛ ")),
    WidgetRule::text_in(MEASURE_BUTTONS, Selector::Tag("button"), 2, "clear", Some("🗑️ ")),
];

static NO_RULES: &[WidgetRule] = &[];

static PRINT_TEXT_KEYS: &[&str] = &[
    "exportDialogTitle",
    "layoutTab",
    "mapOnlyTab",
    "exportsTab",
    "templateLabel",
    "letterAnsiALandscape",
    "showPrintAreaLabel",
    "fileFormatLabel",
    "pdfFormat",
    "advancedOptionsLabel",
    "setScaleLabel",
    "dpiLabel",
    "includeLegendLabel",
    "includeAttributionLabel",
    "fileNameLabel",
    "widthLabel",
    "heightLabel",
    "noExportedFilesText",
    "bookmarkAddButton",
    "bookmarkCancelButton",
];

static BOOKMARKS_TEXT_KEYS: &[&str] = &[
    "addBookmarkButtonText",
    "bookmarkTitleLabel",
    "bookmarkAddButton",
    "bookmarkCancelButton",
    "noBookmarksText",
    "addBookmarksHintText",
];

static ELEVATION_TEXT_KEYS: &[&str] = &[
    "unitsLabel",
    "metricValue",
    "uniformChartScalingLabel",
    "selectLineButtonText",
    "newProfileButtonText",
];

static COORDINATE_TEXT_KEYS: &[&str] = &[
    "xyConversionOutputTooltip",
    "latLongTooltip",
    "mgrsTooltip",
    "usngTooltip",
    "utmTooltip",
];

static PRINT_PLACEHOLDER_KEYS: &[&str] = &["fileNamePlaceholder", "titleOfFilePlaceholder"];
static BOOKMARKS_PLACEHOLDER_KEYS: &[&str] = &["titleOfFilePlaceholder"];
static NO_KEYS: &[&str] = &[];

impl ConstructKind {
    /// The library-owned root class identifying this construct.
    pub fn marker_class(&self) -> &'static str {
        MARKERS
            .iter()
            .find(|(_, kind)| kind == self)
            .map(|(class, _)| *class)
            .unwrap_or_default()
    }

    /// Dialogs re-render their internal content after mounting and get
    /// bounded follow-up passes; plain controls do not.
    pub fn is_dialog(&self) -> bool {
        matches!(
            self,
            ConstructKind::Bookmarks | ConstructKind::Print | ConstructKind::ElevationProfile
        )
    }

    /// Positional sub-element rules.
    pub fn rules(&self) -> &'static [WidgetRule] {
        match self {
            ConstructKind::Home => HOME_RULES,
            ConstructKind::ZoomIn => ZOOM_IN_RULES,
            ConstructKind::ZoomOut => ZOOM_OUT_RULES,
            ConstructKind::Locate => LOCATE_RULES,
            ConstructKind::Search => SEARCH_RULES,
            ConstructKind::Measurement => MEASUREMENT_RULES,
            _ => NO_RULES,
        }
    }

    /// Keys whose display strings are exact-matched against leaf text.
    pub fn text_keys(&self) -> &'static [&'static str] {
        match self {
            ConstructKind::Print => PRINT_TEXT_KEYS,
            ConstructKind::Bookmarks => BOOKMARKS_TEXT_KEYS,
            ConstructKind::ElevationProfile => ELEVATION_TEXT_KEYS,
            ConstructKind::CoordinateConversion => COORDINATE_TEXT_KEYS,
            _ => NO_KEYS,
        }
    }

    /// Keys exact-matched against `placeholder` attribute values.
    pub fn placeholder_keys(&self) -> &'static [&'static str] {
        match self {
            ConstructKind::Print => PRINT_PLACEHOLDER_KEYS,
            ConstructKind::Bookmarks => BOOKMARKS_PLACEHOLDER_KEYS,
            _ => NO_KEYS,
        }
    }
}

/// Classifies an inserted subtree: the inserted node first, then its
/// descendants — never the rest of the document. Nested constructs (an
/// expand wrapping a bookmarks panel) each get their own entry.
pub fn classify(doc: &Document, inserted: NodeId) -> Vec<(NodeId, ConstructKind)> {
    let mut found = Vec::new();
    for node in doc.descendant_elements(inserted) {
        for &(class, kind) in MARKERS {
            if doc.has_class(node, class) {
                found.push((node, kind));
            }
        }
    }
    found
}
