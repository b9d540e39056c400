//! Side panel controller
//!
//! Holds the form and the [`PanelState`] and turns user actions into
//! orchestrator calls. Host lifecycle callbacks (`on_open`,
//! `on_selection_changed`, `on_close`) land here.

use crate::config::HighlightOptions;
use crate::document::HostDocument;
use crate::engine::{ApplyOutcome, Orchestrator, RevertOutcome, SessionState};
use crate::error::{HighlightError, Result};
use tracing::{debug, warn};

pub mod state;

pub use state::{PanelEvent, PanelState};

/// Form plus display state of the panel
#[derive(Debug, Clone, Default)]
pub struct Panel {
    form: HighlightOptions,
    state: PanelState,
    open: bool,
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &HighlightOptions {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut HighlightOptions {
        &mut self.form
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The Apply control is enabled only for a non-blank term, a document
    /// with text, and no pass in flight
    pub fn can_submit<D: HostDocument>(&self, doc: &D) -> bool {
        self.state.accepts_submission() && self.form.has_term() && doc.has_text()
    }

    /// Panel shown; repopulate the form from the last apply
    pub fn on_open(&mut self, session: &SessionState) {
        self.open = true;
        if let Some((search, style)) = session.last() {
            self.form = HighlightOptions::from_specs(search, style);
        }
        self.fire(PanelEvent::Reopened);
    }

    pub fn on_close(&mut self) {
        self.open = false;
    }

    /// Prefill the term from the current document selection
    pub fn on_selection_changed(&mut self, selection: &str) {
        let selection = selection.trim();
        if !selection.is_empty() {
            self.form.term = selection.to_string();
        }
    }

    /// "Highlight more": reopen with the remembered parameters
    pub fn highlight_more(&mut self, session: &SessionState) -> bool {
        if session.is_empty() {
            return false;
        }
        self.on_open(session);
        true
    }

    /// Validate the form and run an apply pass
    pub fn submit_apply<D: HostDocument>(
        &mut self,
        orchestrator: &Orchestrator<D>,
        doc: &mut D,
        session: &mut SessionState,
    ) -> Result<ApplyOutcome> {
        self.ensure_idle()?;
        let (search, style) = self.form.to_specs()?;

        self.fire(PanelEvent::ApplySubmitted);
        match orchestrator.run_apply(doc, session, &search, &style) {
            Ok(outcome) => {
                self.fire(PanelEvent::ApplyCompleted(outcome.matches));
                if let PanelState::Done {
                    close_requested: true,
                    ..
                } = self.state
                {
                    self.on_close();
                }
                Ok(outcome)
            }
            Err(e) => {
                self.fire(PanelEvent::ApplyFailed);
                Err(e)
            }
        }
    }

    /// Run a revert pass over the last applied search
    pub fn submit_revert<D: HostDocument>(
        &mut self,
        orchestrator: &Orchestrator<D>,
        doc: &mut D,
        session: &mut SessionState,
    ) -> Result<RevertOutcome> {
        self.ensure_idle()?;

        self.fire(PanelEvent::RevertSubmitted);
        match orchestrator.run_revert(doc, session) {
            Ok(outcome) => {
                self.fire(PanelEvent::RevertCompleted(outcome.matches));
                Ok(outcome)
            }
            Err(HighlightError::NothingToRevert) => {
                self.fire(PanelEvent::NothingToRevert);
                Err(HighlightError::NothingToRevert)
            }
            Err(e) => {
                self.fire(PanelEvent::ApplyFailed);
                Err(e)
            }
        }
    }

    fn ensure_idle(&self) -> Result<()> {
        if self.state.accepts_submission() {
            Ok(())
        } else {
            Err(HighlightError::Other("a pass is already running".to_string()))
        }
    }

    fn fire(&mut self, event: PanelEvent) {
        match self.state.transition(event) {
            Some(next) => {
                debug!("Panel {:?} --{:?}--> {:?}", self.state, event, next);
                self.state = next;
            }
            None => warn!("Ignoring {:?} while panel is {:?}", event, self.state),
        }
    }
}
