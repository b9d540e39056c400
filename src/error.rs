//! Error types for the text highlighter
//!
//! Structured errors are defined with thiserror; the binary propagates them
//! through anyhow.

use crate::types::UnitId;
use thiserror::Error;

/// Main error type for highlighting operations
#[derive(Error, Debug)]
pub enum HighlightError {
    /// Search term is empty or whitespace-only
    #[error("Search term must not be empty")]
    EmptyTerm,

    /// Text colour is not `#RRGGBB` or `default`
    #[error("Invalid text color: {0}")]
    InvalidColor(String),

    /// Highlight token is not part of the palette
    #[error("Unknown highlight color: {0}")]
    UnknownHighlight(String),

    /// Revert requested before any successful apply
    #[error("Nothing to revert")]
    NothingToRevert,

    /// The host could not read or rewrite a text unit
    #[error("Text unit {unit} is unavailable: {reason}")]
    UnitUnavailable { unit: UnitId, reason: String },

    /// A host-resolved range does not fit the unit text
    #[error("Invalid range {start}..{end} in text unit {unit} (length {len})")]
    InvalidRange {
        unit: UnitId,
        start: usize,
        end: usize,
        len: usize,
    },

    /// Delegated search requested from a host without a search primitive
    #[error("Host document does not provide a native search")]
    NativeSearchUnsupported,

    /// Escaped search term failed to compile
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl HighlightError {
    /// Whether this error came from the host document rather than from input
    /// validation. Host errors abort a pass.
    pub fn is_host_failure(&self) -> bool {
        matches!(
            self,
            HighlightError::UnitUnavailable { .. }
                | HighlightError::InvalidRange { .. }
                | HighlightError::NativeSearchUnsupported
        )
    }
}

/// Result type alias for highlighting operations
pub type Result<T> = std::result::Result<T, HighlightError>;

/// Convert anyhow::Error to HighlightError
impl From<anyhow::Error> for HighlightError {
    fn from(err: anyhow::Error) -> Self {
        HighlightError::Other(err.to_string())
    }
}
