// SPDX-License-Identifier: MPL-2.0
//! Demo harness: builds a sample portal page, plays the widget library by
//! mounting panels into the host container, and drives the localization
//! pipeline end to end. Useful for eyeballing behavior without a browser:
//!
//! ```text
//! maplocale --lang mk --switch in-place
//! maplocale --catalog https://portal.example/languages.json
//! ```

use maplocale::app::{Effect, Flags, Localizer, Message, HOST_CONTAINER_ID};
use maplocale::catalog::loader::{self, CatalogSource};
use maplocale::config;
use maplocale::page::{Document, Fragment, NodeId, Selector};
use maplocale::switcher;
use std::time::{Duration, Instant};

#[tokio::main]
async fn main() -> maplocale::error::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "maplocale=info".into()),
        )
        .init();

    let mut args = pico_args::Arguments::from_env();
    let flags = Flags {
        lang: args.opt_value_from_str("--lang").unwrap(),
        catalog: args.opt_value_from_str("--catalog").unwrap(),
        strategy: args.opt_value_from_str("--switch").unwrap(),
        config_path: None,
    };

    let config = config::load().unwrap_or_default();
    let mut localizer = Localizer::new(&flags, &config);
    tracing::info!(
        language = %localizer.language(),
        widget_locale = localizer.widget_locale(),
        "starting demo page"
    );

    let mut doc = Document::new();
    let host = build_page(&mut doc);
    let start = Instant::now();

    let source = flags
        .catalog
        .as_deref()
        .map(CatalogSource::infer)
        .unwrap_or(CatalogSource::Embedded);
    let result = loader::load(&source).await;
    localizer.handle(
        &mut doc,
        Message::CatalogLoaded {
            result,
            now: elapsed(start),
        },
    );

    // The widget library mounts its controls asynchronously after load.
    mount_widgets(&mut doc, host);
    localizer.handle(&mut doc, Message::PageMutated { now: elapsed(start) });

    // The user opens the bookmarks dialog; the library templates it in
    // its own locale, so the dialog arrives in English and the follow-up
    // ladder catches the retemplated rows.
    doc.mount(host, bookmarks_dialog());
    localizer.handle(&mut doc, Message::PageMutated { now: elapsed(start) });
    run_followups(&mut localizer, &mut doc, start).await;

    // Click the Macedonian flag.
    let controls = switcher::find_controls(&doc);
    if let Some(&control) = controls.get(1) {
        let effect = localizer.handle(
            &mut doc,
            Message::LanguageButtonPressed {
                control,
                now: elapsed(start),
            },
        );
        if effect == Effect::ReloadPage {
            tracing::info!(
                widget_locale = localizer.widget_locale(),
                "page reload requested; widget library re-initializes localized"
            );
        }
    }

    print_summary(&doc, host);
    Ok(())
}

fn elapsed(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

/// Sleeps until each pending follow-up deadline and delivers it.
async fn run_followups(localizer: &mut Localizer, doc: &mut Document, start: Instant) {
    while let Some(deadline) = localizer.next_deadline() {
        let wait = deadline.saturating_sub(elapsed(start));
        tokio::time::sleep(Duration::from_millis(wait)).await;
        localizer.handle(doc, Message::FollowUpDue { now: elapsed(start) });
    }
}

/// The static chrome of the sample portal page.
fn build_page(doc: &mut Document) -> NodeId {
    let root = doc.root();
    doc.mount(
        root,
        Fragment::new("nav")
            .child(Fragment::new("a").attr("href", "index.html").text("home"))
            .child(Fragment::new("a").attr("href", "video.html").text("video"))
            .child(
                Fragment::new("a")
                    .attr("href", "contact_page.html")
                    .text("contact"),
            ),
    );
    doc.mount(
        root,
        Fragment::new("button")
            .class("search-button")
            .child(Fragment::new("i").class("icon-search"))
            .text("search"),
    );
    doc.mount(
        root,
        Fragment::new("input")
            .attr("data-key", "search_placeholder")
            .attr("placeholder", "search_placeholder"),
    );
    doc.mount(
        root,
        Fragment::new("div")
            .class(switcher::LANGUAGE_BUTTONS_CLASS)
            .child(Fragment::new("button").child(Fragment::new("img").attr("alt", "English")))
            .child(Fragment::new("button").child(Fragment::new("img").attr("alt", "Macedonian")))
            .child(Fragment::new("button").child(Fragment::new("img").attr("alt", "Albanian"))),
    );
    doc.mount(root, Fragment::new("div").id(HOST_CONTAINER_ID))
}

/// The widget library's initial controls.
fn mount_widgets(doc: &mut Document, host: NodeId) {
    doc.mount(
        host,
        Fragment::new("div")
            .class("esri-home")
            .child(Fragment::new("div").class("esri-widget--button")),
    );
    doc.mount(host, Fragment::new("div").class("esri-zoom-in"));
    doc.mount(host, Fragment::new("div").class("esri-zoom-out"));
    doc.mount(
        host,
        Fragment::new("div")
            .class("esri-fullscreen")
            .child(
                Fragment::new("div")
                    .class("esri-widget--button")
                    .attr("aria-label", "Enter fullscreen"),
            ),
    );
    doc.mount(
        host,
        Fragment::new("div")
            .class("esri-expand")
            .child(Fragment::new("div").class("esri-expand__toggle"))
            .child(Fragment::new("div").class("esri-expand__collapse"))
            .child(Fragment::new("div").class("esri-layer-list")),
    );
}

/// The bookmarks dialog as the library templates it, English strings and
/// all.
fn bookmarks_dialog() -> Fragment {
    Fragment::new("div")
        .class("esri-bookmarks")
        .child(Fragment::new("button").text("Add bookmark"))
        .child(Fragment::new("span").text("No bookmarks"))
        .child(Fragment::new("span").text("Add bookmarks to save locations"))
        .child(Fragment::new("input").attr("placeholder", "Enter a title"))
}

fn print_summary(doc: &Document, host: NodeId) {
    println!("--- page after the run ---");
    for (label, selector) in [
        ("nav/home", Selector::Attr("href", "index.html")),
        ("search button", Selector::Class("search-button")),
    ] {
        if let Some(node) = doc.find(selector) {
            println!("{label}: {}", doc.text_of(node));
        }
    }
    if let Some(input) = doc.find(Selector::Attr("data-key", "search_placeholder")) {
        println!(
            "search placeholder: {}",
            doc.attr(input, "placeholder").unwrap_or_default()
        );
    }
    for (label, selector) in [
        ("home tooltip", Selector::Class("esri-widget--button")),
        ("expand toggle", Selector::Class("esri-expand__toggle")),
    ] {
        if let Some(node) = doc.find_in(host, selector) {
            println!("{label}: {}", doc.attr(node, "title").unwrap_or_default());
        }
    }
    if let Some(dialog) = doc.find_in(host, Selector::Class("esri-bookmarks")) {
        println!("bookmarks dialog: {}", doc.text_of(dialog));
    }
}
