// SPDX-License-Identifier: MPL-2.0
//! `maplocale` keeps the visible text of a map-portal page in sync with a
//! user-selected language, including the panels an external mapping-widget
//! library renders into the page on its own schedule.
//!
//! The pipeline: a catalog document is fetched once at startup, the static
//! page chrome is bound from a declarative rule table, and a structural
//! observer scoped to the widget host container drives event-driven
//! reconciliation of the library's panels — with bounded follow-up passes
//! for dialogs that re-render after mounting, and exact-equality matching
//! so partial matches can never corrupt longer labels.

#![doc(html_root_url = "https://docs.rs/maplocale/0.2.0")]

pub mod app;
pub mod binder;
pub mod catalog;
pub mod config;
pub mod context;
pub mod error;
pub mod language;
pub mod page;
pub mod rules;
pub mod switcher;
pub mod widgets;
