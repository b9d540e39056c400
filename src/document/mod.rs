//! Host document collaborator
//!
//! The engine never owns document content. Everything it reads or rewrites
//! goes through [`HostDocument`]: unit enumeration, flattened text, run
//! replacement and, when the host has one, a native search primitive.

use crate::error::{HighlightError, Result};
use crate::types::{Highlight, MatchSpan, Rgb, SearchSpec, UnitId};
use serde::{Deserialize, Serialize};

pub mod memory;

pub use memory::{MemoryDocument, MemoryRange, Paragraph};

/// Character attributes carried by a run
///
/// `None` leaves the attribute at the host default; `Some` is an explicit
/// value set by an operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RunStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<Highlight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgb>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strikeout: Option<bool>,
}

impl RunStyle {
    /// No highlight, default text colour and no emphasis
    pub fn is_neutral(&self) -> bool {
        self.highlight.map_or(true, |h| h.is_none())
            && self.color.map_or(true, |c| c == Rgb::BLACK)
            && !self.bold.unwrap_or(false)
            && !self.italic.unwrap_or(false)
            && !self.underline.unwrap_or(false)
            && !self.strikeout.unwrap_or(false)
    }
}

/// An inline run of uniformly styled text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledRun {
    pub text: String,
    #[serde(default)]
    pub style: RunStyle,
}

impl StyledRun {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: RunStyle::default(),
        }
    }

    pub fn with_style(mut self, style: RunStyle) -> Self {
        self.style = style;
        self
    }
}

/// The narrow interface the engine needs from a rich-text host
pub trait HostDocument {
    /// Opaque match handle returned by [`HostDocument::native_search`]
    type RangeHandle;

    /// Text units in stable document order
    fn units(&self) -> Vec<UnitId>;

    /// Flattened text of a unit (concatenation of its runs)
    fn unit_text(&self, unit: UnitId) -> Result<String>;

    /// Current run sequence of a unit
    fn unit_runs(&self, unit: UnitId) -> Result<Vec<StyledRun>>;

    /// Replace the whole run sequence of a unit
    fn replace_runs(&mut self, unit: UnitId, runs: Vec<StyledRun>) -> Result<()>;

    /// Whether any unit has non-blank text
    fn has_text(&self) -> bool {
        self.units().into_iter().any(|unit| {
            self.unit_text(unit)
                .map(|text| !text.trim().is_empty())
                .unwrap_or(false)
        })
    }

    /// Open the batch that encloses one whole document walk
    fn begin_pass(&mut self) -> Result<()> {
        Ok(())
    }

    /// Close the batch opened by [`HostDocument::begin_pass`]
    fn end_pass(&mut self, _committed: bool) {}

    fn supports_native_search(&self) -> bool {
        false
    }

    /// Ask the host to find `spec` inside one unit
    fn native_search(&self, _unit: UnitId, _spec: &SearchSpec) -> Result<Vec<Self::RangeHandle>> {
        Err(HighlightError::NativeSearchUnsupported)
    }

    /// Turn a host handle back into offsets within `unit`
    fn resolve_range(&self, _unit: UnitId, _handle: &Self::RangeHandle) -> Result<MatchSpan> {
        Err(HighlightError::NativeSearchUnsupported)
    }
}
