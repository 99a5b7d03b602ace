// SPDX-License-Identifier: MPL-2.0
//! Explicit translation context.
//!
//! Every binding and reconciliation pass receives the catalog and the
//! language it should render, instead of reading ambient globals. The
//! caller decides when the pair is available (the readiness gate lives
//! with the orchestrator, not here).

use crate::catalog::Catalog;
use crate::language::LanguageCode;

/// Read-only inputs for one translation pass.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub catalog: &'a Catalog,
    pub language: LanguageCode,
}

impl<'a> Context<'a> {
    pub fn new(catalog: &'a Catalog, language: LanguageCode) -> Context<'a> {
        Context { catalog, language }
    }

    /// Display string for `key` under the catalog's fallback policy.
    pub fn tr(&self, key: &str) -> String {
        self.catalog.lookup(self.language, key).to_string()
    }
}
