//! Match-and-restyle engine
//!
//! ```text
//! ┌───────────────────────────────────────────┐
//! │  Orchestrator                             │
//! │  - walks every text unit in order         │
//! │  - records the session on success         │
//! └─────────────────┬─────────────────────────┘
//!                   │ per unit
//!    ┌──────────────┼──────────────┐
//!    │              │              │
//! ┌──▼─────┐   ┌────▼───┐   ┌──────▼─────┐
//! │Locator │──▶│ Spans  │──▶│ Applicator │
//! │literal/│   │ MATCH/ │   │ rewrites   │
//! │delegate│   │ PLAIN  │   │ host runs  │
//! └────────┘   └────────┘   └────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use texthighlighter_core::document::MemoryDocument;
//! use texthighlighter_core::engine::{Orchestrator, SessionState};
//! use texthighlighter_core::types::{SearchSpec, StyleSpec};
//!
//! let mut doc = MemoryDocument::from("Cat cat CAT");
//! let mut session = SessionState::new();
//! let orchestrator = Orchestrator::literal();
//!
//! let search = SearchSpec::new("cat", false).unwrap();
//! let outcome = orchestrator
//!     .run_apply(&mut doc, &mut session, &search, &StyleSpec::default())
//!     .unwrap();
//! assert_eq!(outcome.matches, 3);
//!
//! orchestrator.run_revert(&mut doc, &mut session).unwrap();
//! ```

pub mod applicator;
pub mod locator;
pub mod orchestrator;
pub mod session;
pub mod spans;

pub use applicator::{RevertColor, StyleAction, StyleApplicator};
pub use locator::{locate, DelegatedLocator, LiteralLocator, MatchLocator};
pub use orchestrator::{ApplyOutcome, Orchestrator, RevertOutcome};
pub use session::SessionState;
