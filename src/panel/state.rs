//! Panel state machine
//!
//! ```text
//!            ApplySubmitted / RevertSubmitted
//!  Input ───────────────────────────────▶ Loading
//!    ▲                                     │
//!    │ Reopened / failure / revert done    │ ApplyCompleted(n)
//!    │                                     ▼
//!    └──────────── NoResults (n == 0) ◀────┴───▶ Done (n > 0)
//! ```

use serde::Serialize;

/// What the panel is showing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum PanelState {
    /// Form is editable
    #[default]
    Input,
    /// A pass is running; submission is disabled
    Loading,
    /// Apply finished without a match
    NoResults,
    /// Apply styled `matches` occurrences
    Done {
        matches: usize,
        /// The "highlight more" link is offered
        highlight_more: bool,
        /// The host shell should close the panel so the document is visible
        close_requested: bool,
    },
}

/// Something that happened to the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEvent {
    ApplySubmitted,
    ApplyCompleted(usize),
    ApplyFailed,
    RevertSubmitted,
    RevertCompleted(usize),
    NothingToRevert,
    Reopened,
}

impl PanelState {
    /// Whether Apply/Revert may be submitted
    pub fn accepts_submission(&self) -> bool {
        !matches!(self, PanelState::Loading)
    }

    /// Next state, or `None` when `event` is not valid here
    pub fn transition(&self, event: PanelEvent) -> Option<PanelState> {
        use PanelEvent::*;

        match (self, event) {
            (PanelState::Loading, ApplyCompleted(0)) => Some(PanelState::NoResults),
            (PanelState::Loading, ApplyCompleted(matches)) => Some(PanelState::Done {
                matches,
                highlight_more: true,
                close_requested: true,
            }),
            (PanelState::Loading, ApplyFailed | RevertCompleted(_) | NothingToRevert) => {
                Some(PanelState::Input)
            }
            (PanelState::Loading, _) => None,
            (_, ApplySubmitted | RevertSubmitted) => Some(PanelState::Loading),
            (_, Reopened) => Some(PanelState::Input),
            _ => None,
        }
    }
}
