//! Document walk: locate, split and restyle every unit
//!
//! Each operation is one synchronous pass bracketed by
//! [`HostDocument::begin_pass`] and [`HostDocument::end_pass`]. A host error
//! aborts the rest of the walk and leaves the session untouched. Units
//! styled before the failure keep their new runs; there is no rollback.

use super::{
    applicator::{StyleAction, StyleApplicator},
    locator::{DelegatedLocator, LiteralLocator, MatchLocator},
    session::SessionState,
    spans,
};
use crate::config::{HighlighterConfig, LocatorStrategy};
use crate::document::HostDocument;
use crate::error::{HighlightError, Result};
use crate::types::{SearchSpec, StyleSpec};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Result of [`Orchestrator::run_apply`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ApplyOutcome {
    /// Total matches styled across the document
    pub matches: usize,
    /// Units whose runs were rewritten
    pub units_styled: usize,
}

/// Result of [`Orchestrator::run_revert`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RevertOutcome {
    /// Matches found again and reset
    pub matches: usize,
    /// Units whose runs were rewritten
    pub units_reverted: usize,
}

#[derive(Debug, Default)]
struct PassTotals {
    matches: usize,
    units: usize,
}

/// Sequences locator, span builder and applicator over a document
pub struct Orchestrator<D: HostDocument> {
    locator: Box<dyn MatchLocator<D>>,
    applicator: StyleApplicator,
}

impl<D: HostDocument> Orchestrator<D> {
    pub fn new(locator: Box<dyn MatchLocator<D>>, applicator: StyleApplicator) -> Self {
        Self { locator, applicator }
    }

    /// Local literal scan with default settings
    pub fn literal() -> Self {
        Self::new(Box::new(LiteralLocator::new()), StyleApplicator::default())
    }

    pub fn from_config(config: &HighlighterConfig) -> Self {
        let literal = LiteralLocator::with_cache_capacity(config.pattern_cache_capacity);
        let locator: Box<dyn MatchLocator<D>> = match config.locator {
            LocatorStrategy::Literal => Box::new(literal),
            LocatorStrategy::Delegated if config.fallback_to_literal => {
                Box::new(DelegatedLocator::new().with_literal_fallback(literal))
            }
            LocatorStrategy::Delegated => Box::new(DelegatedLocator::new()),
        };

        Self::new(locator, StyleApplicator::new(config.revert_color))
    }

    pub fn locator_name(&self) -> &'static str {
        self.locator.name()
    }

    /// Style every occurrence of `search` and record the parameters
    ///
    /// Returns the total match count; zero is a normal result. On a host
    /// failure the walk stops, the error is returned and `session` is not
    /// updated, but units already rewritten stay styled.
    pub fn run_apply(
        &self,
        doc: &mut D,
        session: &mut SessionState,
        search: &SearchSpec,
        style: &StyleSpec,
    ) -> Result<ApplyOutcome> {
        let totals = self.pass(doc, search, StyleAction::Apply(style))?;

        session.record_apply(search.clone(), style.clone());
        if totals.matches == 0 {
            session.record_nothing_pending();
        }

        info!(
            "Applied style to {} match(es) of {:?} in {} unit(s)",
            totals.matches,
            search.term(),
            totals.units
        );

        Ok(ApplyOutcome {
            matches: totals.matches,
            units_styled: totals.units,
        })
    }

    /// Re-locate the last applied search and reset its units to neutral
    pub fn run_revert(&self, doc: &mut D, session: &mut SessionState) -> Result<RevertOutcome> {
        let search = session
            .last_search()
            .cloned()
            .ok_or(HighlightError::NothingToRevert)?;

        let totals = self.pass(doc, &search, StyleAction::Revert)?;
        session.record_nothing_pending();

        info!(
            "Reverted {} match(es) of {:?} in {} unit(s)",
            totals.matches,
            search.term(),
            totals.units
        );

        Ok(RevertOutcome {
            matches: totals.matches,
            units_reverted: totals.units,
        })
    }

    /// Count matches without touching the document
    pub fn count(&self, doc: &D, search: &SearchSpec) -> Result<usize> {
        let mut total = 0;
        for unit in doc.units() {
            let text = doc.unit_text(unit)?;
            if !text.is_empty() {
                total += self.locator.locate(doc, unit, &text, search)?.len();
            }
        }
        Ok(total)
    }

    fn pass(&self, doc: &mut D, search: &SearchSpec, action: StyleAction<'_>) -> Result<PassTotals> {
        doc.begin_pass()?;

        let mut totals = PassTotals::default();
        let result = self.walk(doc, search, action, &mut totals);
        doc.end_pass(result.is_ok());

        if let Err(ref e) = result {
            warn!(
                "Pass aborted after {} unit(s) using {} locator: {}",
                totals.units,
                self.locator.name(),
                e
            );
        }

        result.map(|_| totals)
    }

    fn walk(
        &self,
        doc: &mut D,
        search: &SearchSpec,
        action: StyleAction<'_>,
        totals: &mut PassTotals,
    ) -> Result<()> {
        for unit in doc.units() {
            let text = doc.unit_text(unit)?;
            if text.is_empty() {
                continue;
            }

            let matches = self.locator.locate(doc, unit, &text, search)?;
            if matches.is_empty() {
                continue;
            }

            let segments = spans::build(&text, &matches);
            self.applicator.apply(doc, unit, &segments, action)?;

            debug!(
                "Unit {}: {} match(es), {} run(s)",
                unit,
                matches.len(),
                segments.len()
            );
            totals.matches += matches.len();
            totals.units += 1;
        }

        Ok(())
    }
}

impl<D: HostDocument> Default for Orchestrator<D> {
    fn default() -> Self {
        Self::literal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{MemoryDocument, RunStyle};
    use crate::types::{Highlight, UnitId};

    fn search(term: &str) -> SearchSpec {
        SearchSpec::new(term, false).unwrap()
    }

    fn bold_yellow() -> StyleSpec {
        StyleSpec {
            highlight: Highlight::Yellow,
            bold: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_apply_counts_matches_across_units() {
        let mut doc = MemoryDocument::from("Cat cat CAT\nno felines\nthe cat");
        let mut session = SessionState::new();
        let orch = Orchestrator::literal();

        let outcome = orch
            .run_apply(&mut doc, &mut session, &search("cat"), &bold_yellow())
            .unwrap();

        assert_eq!(outcome, ApplyOutcome { matches: 4, units_styled: 2 });
        assert_eq!(doc.paragraphs[0].runs.len(), 5);
        assert_eq!(doc.paragraphs[1].runs.len(), 1);
        assert!(session.has_pending());
        assert_eq!(doc.committed_passes(), 1);
    }

    #[test]
    fn test_no_match_leaves_document_untouched() {
        let mut doc = MemoryDocument::from("hello world");
        doc.paragraphs[0].runs[0].style.italic = Some(true);
        let before = doc.paragraphs.clone();
        let mut session = SessionState::new();

        let outcome = Orchestrator::literal()
            .run_apply(&mut doc, &mut session, &search("xyz"), &bold_yellow())
            .unwrap();

        assert_eq!(outcome.matches, 0);
        assert_eq!(doc.paragraphs, before);
        assert!(!session.has_pending());
        assert_eq!(session.last_search().unwrap().term(), "xyz");
    }

    #[test]
    fn test_empty_document() {
        let mut doc = MemoryDocument::new();
        let mut session = SessionState::new();
        let outcome = Orchestrator::literal()
            .run_apply(&mut doc, &mut session, &search("a"), &bold_yellow())
            .unwrap();
        assert_eq!(outcome, ApplyOutcome::default());
    }

    #[test]
    fn test_revert_without_session() {
        let mut doc = MemoryDocument::from("cat");
        let mut session = SessionState::new();
        let result = Orchestrator::literal().run_revert(&mut doc, &mut session);
        assert!(matches!(result, Err(HighlightError::NothingToRevert)));
        assert_eq!(doc.paragraphs[0].runs[0].style, RunStyle::default());
    }

    #[test]
    fn test_revert_resets_to_neutral_and_keeps_session() {
        let mut doc = MemoryDocument::from("the cat sat\nnothing here");
        let mut session = SessionState::new();
        let orch = Orchestrator::literal();

        orch.run_apply(&mut doc, &mut session, &search("cat"), &bold_yellow())
            .unwrap();
        let outcome = orch.run_revert(&mut doc, &mut session).unwrap();

        assert_eq!(outcome, RevertOutcome { matches: 1, units_reverted: 1 });
        assert!(doc.paragraphs[0].runs.iter().all(|r| r.style.is_neutral()));
        assert!(doc.paragraphs[1].is_unstyled());
        assert_eq!(doc.unit_text(UnitId(0)).unwrap(), "the cat sat");

        // Revert is repeatable
        let again = orch.run_revert(&mut doc, &mut session).unwrap();
        assert_eq!(again.matches, 1);
        assert_eq!(session.last_search().unwrap().term(), "cat");
    }

    #[test]
    fn test_host_failure_aborts_without_recording() {
        let mut doc = MemoryDocument::from("cat one\ncat two\ncat three");
        doc.invalidate(UnitId(1));
        let mut session = SessionState::new();

        let result = Orchestrator::literal().run_apply(
            &mut doc,
            &mut session,
            &search("cat"),
            &bold_yellow(),
        );

        assert!(matches!(result, Err(HighlightError::UnitUnavailable { .. })));
        assert!(session.is_empty());
        assert_eq!(doc.aborted_passes(), 1);
        // Earlier unit keeps its styling, later unit was never reached
        assert_eq!(doc.paragraphs[0].runs.len(), 2);
        assert!(doc.paragraphs[2].is_unstyled());
    }

    #[test]
    fn test_from_config_delegated() {
        let config = HighlighterConfig {
            locator: LocatorStrategy::Delegated,
            fallback_to_literal: false,
            ..Default::default()
        };
        let orch: Orchestrator<MemoryDocument> = Orchestrator::from_config(&config);
        assert_eq!(orch.locator_name(), "delegated");

        let mut plain = MemoryDocument::from("cat");
        let mut session = SessionState::new();
        let result = orch.run_apply(&mut plain, &mut session, &search("cat"), &bold_yellow());
        assert!(matches!(result, Err(HighlightError::NativeSearchUnsupported)));

        let mut native = MemoryDocument::from("cat Cat").with_native_search(true);
        let outcome = orch
            .run_apply(&mut native, &mut session, &search("cat"), &bold_yellow())
            .unwrap();
        assert_eq!(outcome.matches, 2);
    }
}
