//! Session state: the last successful apply
//!
//! Lives as long as the panel session. Only a successful apply writes the
//! parameters; revert reads them and never clears them, so revert can be
//! repeated and apply re-run with the same values.

use crate::error::Result;
use crate::types::{SearchSpec, StyleSpec};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LastApply {
    search: SearchSpec,
    style: StyleSpec,
}

/// Remembered search and style parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    last: Option<LastApply>,
    #[serde(default)]
    pending: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace both parameters together and mark styling as pending
    pub fn record_apply(&mut self, search: SearchSpec, style: StyleSpec) {
        self.last = Some(LastApply { search, style });
        self.pending = true;
    }

    /// Nothing is styled any more; the parameters stay remembered
    pub fn record_nothing_pending(&mut self) {
        self.pending = false;
    }

    pub fn last_search(&self) -> Option<&SearchSpec> {
        self.last.as_ref().map(|l| &l.search)
    }

    pub fn last_style(&self) -> Option<&StyleSpec> {
        self.last.as_ref().map(|l| &l.style)
    }

    /// Both parameters of the last apply
    pub fn last(&self) -> Option<(&SearchSpec, &StyleSpec)> {
        self.last.as_ref().map(|l| (&l.search, &l.style))
    }

    /// Whether the last apply left styling that revert could remove
    pub fn has_pending(&self) -> bool {
        self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.last.is_none()
    }

    /// Load a session saved by [`SessionState::save`]; a missing file is a
    /// fresh session
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
