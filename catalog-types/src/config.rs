//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};
use crate::record::SearchField;

/// Name marker of the always-free institution category.
pub const DEFAULT_FREE_TUITION_MARKER: &str = "sena";

/// Catalog configuration options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CatalogConfig {
    /// Soft cap on text-search candidates per query.
    /// Default: 4000
    pub max_candidates: usize,
    /// Name marker of the always-free institution category.
    /// Default: `"sena"`
    pub free_tuition_marker: String,
    /// Fields that feed the index and the normalized text cache.
    /// Default: all of [`SearchField::ALL`]
    pub indexed_fields: Vec<SearchField>,
    /// Page size used when none (or an unknown one) is requested.
    /// Default: 50
    pub default_page_size: usize,
    /// Page sizes a consumer may offer.
    /// Default: `[20, 50, 100]`
    pub page_sizes: Vec<usize>,
    /// Maximum number of page-number buttons in the navigation window.
    /// Default: 7
    pub max_page_buttons: usize,
    /// Input quiescence a consumer should wait for before planning a query.
    /// The engine never sleeps; this is advice for callers.
    /// Default: 250
    pub debounce_ms: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            max_candidates: 4000,
            free_tuition_marker: DEFAULT_FREE_TUITION_MARKER.to_owned(),
            indexed_fields: SearchField::ALL.to_vec(),
            default_page_size: 50,
            page_sizes: vec![20, 50, 100],
            max_page_buttons: 7,
            debounce_ms: 250,
        }
    }
}

impl CatalogConfig {
    /// Default configuration without the candidate cap.
    #[must_use]
    pub fn uncapped() -> Self {
        Self {
            max_candidates: usize::MAX,
            ..Self::default()
        }
    }

    /// Resolves a requested page size against the allowed list.
    ///
    /// Unknown or zero sizes fall back to `default_page_size`.
    #[must_use]
    pub fn resolve_page_size(&self, requested: usize) -> usize {
        if requested > 0 && self.page_sizes.contains(&requested) {
            requested
        } else {
            self.default_page_size
        }
    }

    /// Checks that every option is usable.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidConfig`] naming the first bad option.
    pub fn validate(&self) -> Result<()> {
        if self.max_candidates == 0 {
            return Err(CatalogError::InvalidConfig("maxCandidates must be positive"));
        }
        if self.free_tuition_marker.trim().is_empty() {
            return Err(CatalogError::InvalidConfig(
                "freeTuitionMarker must not be empty",
            ));
        }
        if self.indexed_fields.is_empty() {
            return Err(CatalogError::InvalidConfig(
                "indexedFields must name at least one field",
            ));
        }
        if self.default_page_size == 0 {
            return Err(CatalogError::InvalidConfig("defaultPageSize must be positive"));
        }
        if self.page_sizes.contains(&0) {
            return Err(CatalogError::InvalidConfig("pageSizes must be positive"));
        }
        if self.max_page_buttons == 0 {
            return Err(CatalogError::InvalidConfig("maxPageButtons must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(CatalogConfig::default().validate(), Ok(()));
        assert_eq!(CatalogConfig::uncapped().validate(), Ok(()));
    }

    #[test]
    fn rejects_zero_values() {
        let cfg = CatalogConfig {
            default_page_size: 0,
            ..CatalogConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(CatalogError::InvalidConfig(_))));

        let cfg = CatalogConfig {
            max_page_buttons: 0,
            ..CatalogConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = CatalogConfig {
            page_sizes: vec![10, 0],
            ..CatalogConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_blank_marker_and_no_fields() {
        let cfg = CatalogConfig {
            free_tuition_marker: "  ".into(),
            ..CatalogConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = CatalogConfig {
            indexed_fields: Vec::new(),
            ..CatalogConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn resolve_page_size_falls_back() {
        let cfg = CatalogConfig::default();
        assert_eq!(cfg.resolve_page_size(20), 20);
        assert_eq!(cfg.resolve_page_size(100), 100);
        assert_eq!(cfg.resolve_page_size(33), 50);
        assert_eq!(cfg.resolve_page_size(0), 50);
    }

    #[test]
    fn deserializes_partial_json() {
        let cfg: CatalogConfig =
            serde_json::from_str(r#"{ "maxCandidates": 100, "indexedFields": ["title", "city"] }"#)
                .unwrap();
        assert_eq!(cfg.max_candidates, 100);
        assert_eq!(cfg.indexed_fields, [SearchField::Title, SearchField::City]);
        assert_eq!(cfg.default_page_size, 50);
        assert_eq!(cfg.free_tuition_marker, "sena");
    }
}
