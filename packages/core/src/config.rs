//! Core configuration
//!
//! Policy knobs injected into the services. Nothing here is persisted by the
//! core; callers construct (or deserialize) a config and hand it over.

use serde::{Deserialize, Serialize};

/// How wiki-link titles are matched against note titles.
///
/// The default is exact, case-sensitive equality. Whitespace around titles is
/// trimmed at extraction time and never normalized further.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum TitleMatch {
    #[default]
    Exact,
    CaseInsensitive,
}

/// Injected policy configuration for the note services.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreConfig {
    /// Wiki-link title resolution policy
    pub title_match: TitleMatch,

    /// Trashed notes older than this are removed by the trash sweep
    pub trash_retention_days: i64,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            title_match: TitleMatch::Exact,
            trash_retention_days: 30,
        }
    }
}
