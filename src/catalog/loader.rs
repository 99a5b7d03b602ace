// SPDX-License-Identifier: MPL-2.0
//! Startup fetch of the catalog document.
//!
//! The catalog is loaded exactly once, before anything is bound. On any
//! failure the caller leaves the catalog unset and every dependent
//! operation becomes a no-op; translation failures must never take the
//! page down.

use super::Catalog;
use crate::error::{Error, Result};
use rust_embed::RustEmbed;
use std::fs;
use std::path::PathBuf;

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Asset;

const EMBEDDED_CATALOG: &str = "languages.json";

/// Where the catalog document comes from.
#[derive(Debug, Clone)]
pub enum CatalogSource {
    /// Fetched over HTTP at startup.
    Url(String),
    /// Read from a local file (development setups).
    File(PathBuf),
    /// The catalog bundled into the binary.
    Embedded,
}

impl CatalogSource {
    /// Interprets a CLI argument: anything with an HTTP scheme is a URL,
    /// everything else a path.
    pub fn infer(location: &str) -> CatalogSource {
        if location.starts_with("http://") || location.starts_with("https://") {
            CatalogSource::Url(location.to_string())
        } else {
            CatalogSource::File(PathBuf::from(location))
        }
    }
}

/// Fetches and parses the catalog document.
pub async fn load(source: &CatalogSource) -> Result<Catalog> {
    match source {
        CatalogSource::Url(url) => {
            let client = reqwest::Client::builder()
                .redirect(reqwest::redirect::Policy::limited(10))
                .build()?;
            let text = client
                .get(url)
                .send()
                .await?
                .error_for_status()?
                .text()
                .await?;
            Catalog::from_json(&text)
        }
        CatalogSource::File(path) => {
            let text = fs::read_to_string(path)?;
            Catalog::from_json(&text)
        }
        CatalogSource::Embedded => embedded(),
    }
}

/// Parses the catalog bundled into the binary.
pub fn embedded() -> Result<Catalog> {
    let file = Asset::get(EMBEDDED_CATALOG)
        .ok_or_else(|| Error::Catalog(format!("missing embedded asset {EMBEDDED_CATALOG}")))?;
    let text = String::from_utf8_lossy(file.data.as_ref());
    Catalog::from_json(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::LanguageCode;
    use std::io::Write;

    #[test]
    fn embedded_catalog_parses_with_all_languages() {
        let catalog = embedded().expect("embedded catalog should parse");
        assert_eq!(
            catalog.languages(),
            vec![LanguageCode::Al, LanguageCode::En, LanguageCode::Mk]
        );
        assert_eq!(catalog.lookup(LanguageCode::En, "home"), "Home");
    }

    #[tokio::test]
    async fn file_source_loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("failed to create temp file");
        write!(file, r#"{{"en": {{"home": "Home"}}}}"#).expect("failed to write catalog");

        let source = CatalogSource::File(file.path().to_path_buf());
        let catalog = load(&source).await.expect("file catalog should load");
        assert_eq!(catalog.lookup(LanguageCode::En, "home"), "Home");
    }

    #[tokio::test]
    async fn missing_file_reports_io_error() {
        let source = CatalogSource::File(PathBuf::from("/nonexistent/languages.json"));
        assert!(matches!(load(&source).await, Err(Error::Io(_))));
    }

    #[test]
    fn infer_distinguishes_urls_from_paths() {
        assert!(matches!(
            CatalogSource::infer("https://portal.example/languages.json"),
            CatalogSource::Url(_)
        ));
        assert!(matches!(
            CatalogSource::infer("assets/i18n/languages.json"),
            CatalogSource::File(_)
        ));
    }
}
