//! Text Highlighter - find a phrase, restyle every occurrence
//!
//! A match-and-restyle engine for rich-text hosts:
//! - Literal phrase search, case-sensitive or not
//! - Lossless split of each paragraph into MATCH and PLAIN segments
//! - Highlight, text colour, bold/italic/underline/strikeout on every match
//! - Revert to a neutral style and "highlight more" from remembered parameters
//!
//! # Architecture
//!
//! - **Types**: Search/style parameters, match spans, segments
//! - **Document**: The [`HostDocument`] seam and an in-memory host
//! - **Engine**: Locator, span builder, style applicator, session, orchestrator
//! - **Panel**: Form and state machine driving the engine from a side panel
//!
//! # Example
//!
//! ```rust
//! use texthighlighter_core::{MemoryDocument, Orchestrator, SearchSpec, SessionState, StyleSpec};
//!
//! let mut doc = MemoryDocument::from("see the cat sit");
//! let mut session = SessionState::new();
//!
//! let search = SearchSpec::new("the", false)?;
//! let outcome = Orchestrator::literal().run_apply(&mut doc, &mut session, &search, &StyleSpec::default())?;
//!
//! assert_eq!(outcome.matches, 1);
//! assert_eq!(doc.paragraphs[0].runs.len(), 3);
//! # Ok::<(), texthighlighter_core::HighlightError>(())
//! ```

pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod panel;
pub mod types;

// Re-export commonly used types
pub use config::{HighlightOptions, HighlighterConfig, LocatorStrategy};
pub use document::{HostDocument, MemoryDocument, RunStyle, StyledRun};
pub use engine::{ApplyOutcome, Orchestrator, RevertColor, RevertOutcome, SessionState};
pub use error::{HighlightError, Result};
pub use panel::{Panel, PanelState};
pub use types::{Highlight, MatchSpan, Rgb, SearchSpec, Segment, SegmentKind, StyleSpec, TextColor, UnitId};
