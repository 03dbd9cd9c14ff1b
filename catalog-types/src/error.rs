//! Error types.
//!
//! Only catalog construction and configuration validation can fail. The
//! query path is total and never returns these.

use thiserror::Error;

/// Result alias for catalog construction.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors raised while building a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A record is missing a required value.
    #[error("malformed record {id:?}: {reason}")]
    MalformedRecord {
        /// Identifier of the offending record (may be empty).
        id: String,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// Two records share the same identifier.
    #[error("duplicate record id {0:?}")]
    DuplicateId(String),

    /// The dataset cannot be addressed with 32-bit record handles.
    #[error("too many records: {count} (max {max})")]
    TooManyRecords {
        /// Number of records supplied.
        count: usize,
        /// Maximum supported.
        max: usize,
    },

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

/// A label did not name any variant of a facet enum.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} label: {value:?}")]
pub struct ParseLabelError {
    /// Which enum was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = CatalogError::MalformedRecord {
            id: "p-1".into(),
            reason: "duration must be positive",
        };
        assert_eq!(
            err.to_string(),
            "malformed record \"p-1\": duration must be positive"
        );

        assert_eq!(
            CatalogError::DuplicateId("x".into()).to_string(),
            "duplicate record id \"x\""
        );

        let err = ParseLabelError {
            kind: "level",
            value: "Bachillerato".into(),
        };
        assert_eq!(err.to_string(), "unknown level label: \"Bachillerato\"");
    }
}
