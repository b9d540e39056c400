//! In-memory host document
//!
//! A serde-backed paragraph/run model. The CLI loads it from JSON and the
//! tests use it as the host.

use super::{HostDocument, RunStyle, StyledRun};
use crate::error::{HighlightError, Result};
use crate::types::{MatchSpan, SearchSpec, UnitId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// A paragraph: an ordered run sequence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    #[serde(default)]
    pub runs: Vec<StyledRun>,
}

impl Paragraph {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            runs: vec![StyledRun::new(text)],
        }
    }

    pub fn from_runs(runs: Vec<StyledRun>) -> Self {
        Self { runs }
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Whether every run carries the host default style
    pub fn is_unstyled(&self) -> bool {
        self.runs.iter().all(|r| r.style == RunStyle::default())
    }
}

/// Range handle returned by the in-memory native search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryRange {
    pub start: usize,
    pub end: usize,
}

/// Paragraph list with optional native search
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryDocument {
    pub paragraphs: Vec<Paragraph>,

    /// Whether [`HostDocument::native_search`] is available
    #[serde(default)]
    pub native_search: bool,

    #[serde(skip)]
    invalid: HashSet<usize>,

    #[serde(skip)]
    pass_open: bool,

    #[serde(skip)]
    committed_passes: usize,

    #[serde(skip)]
    aborted_passes: usize,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// One single-run paragraph per string
    pub fn from_paragraphs<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paragraphs: texts.into_iter().map(Paragraph::new).collect(),
            ..Default::default()
        }
    }

    pub fn with_native_search(mut self, enabled: bool) -> Self {
        self.native_search = enabled;
        self
    }

    pub fn push(&mut self, paragraph: Paragraph) -> UnitId {
        self.paragraphs.push(paragraph);
        UnitId(self.paragraphs.len() - 1)
    }

    /// Make every later access to `unit` fail, as if the host removed it
    pub fn invalidate(&mut self, unit: UnitId) {
        self.invalid.insert(unit.0);
    }

    pub fn paragraph(&self, unit: UnitId) -> Option<&Paragraph> {
        self.paragraphs.get(unit.0)
    }

    pub fn committed_passes(&self) -> usize {
        self.committed_passes
    }

    pub fn aborted_passes(&self) -> usize {
        self.aborted_passes
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    fn get(&self, unit: UnitId) -> Result<&Paragraph> {
        if self.invalid.contains(&unit.0) {
            return Err(HighlightError::UnitUnavailable {
                unit,
                reason: "paragraph was removed".to_string(),
            });
        }
        self.paragraphs
            .get(unit.0)
            .ok_or_else(|| HighlightError::UnitUnavailable {
                unit,
                reason: "no such paragraph".to_string(),
            })
    }
}

impl HostDocument for MemoryDocument {
    type RangeHandle = MemoryRange;

    fn units(&self) -> Vec<UnitId> {
        (0..self.paragraphs.len()).map(UnitId).collect()
    }

    fn unit_text(&self, unit: UnitId) -> Result<String> {
        self.get(unit).map(Paragraph::text)
    }

    fn unit_runs(&self, unit: UnitId) -> Result<Vec<StyledRun>> {
        self.get(unit).map(|p| p.runs.clone())
    }

    fn replace_runs(&mut self, unit: UnitId, runs: Vec<StyledRun>) -> Result<()> {
        self.get(unit)?;
        self.paragraphs[unit.0].runs = runs;
        Ok(())
    }

    fn begin_pass(&mut self) -> Result<()> {
        if self.pass_open {
            return Err(HighlightError::Other("a pass is already open".to_string()));
        }
        self.pass_open = true;
        Ok(())
    }

    fn end_pass(&mut self, committed: bool) {
        self.pass_open = false;
        if committed {
            self.committed_passes += 1;
        } else {
            self.aborted_passes += 1;
        }
    }

    fn supports_native_search(&self) -> bool {
        self.native_search
    }

    fn native_search(&self, unit: UnitId, spec: &SearchSpec) -> Result<Vec<MemoryRange>> {
        if !self.native_search {
            return Err(HighlightError::NativeSearchUnsupported);
        }
        let text = self.unit_text(unit)?;
        Ok(scan(&text, spec.term(), spec.case_sensitive()))
    }

    fn resolve_range(&self, unit: UnitId, handle: &MemoryRange) -> Result<MatchSpan> {
        self.get(unit)?;
        Ok(MatchSpan::new(handle.start, handle.end))
    }
}

/// Character-wise scan used as this host's search primitive
fn scan(text: &str, term: &str, case_sensitive: bool) -> Vec<MemoryRange> {
    let same = |a: char, b: char| {
        if case_sensitive {
            a == b
        } else {
            a == b || a.to_lowercase().eq(b.to_lowercase())
        }
    };

    let mut ranges = Vec::new();
    let mut resume = 0;

    for (start, _) in text.char_indices() {
        if start < resume {
            continue;
        }

        let mut rest = text[start..].char_indices();
        let mut end = start;
        let mut matched = true;
        for wanted in term.chars() {
            match rest.next() {
                Some((offset, c)) if same(c, wanted) => end = start + offset + c.len_utf8(),
                _ => {
                    matched = false;
                    break;
                }
            }
        }

        if matched && end > start {
            ranges.push(MemoryRange { start, end });
            resume = end;
        }
    }

    ranges
}

impl From<&str> for MemoryDocument {
    fn from(text: &str) -> Self {
        MemoryDocument::from_paragraphs(text.lines())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units_and_text() {
        let doc = MemoryDocument::from_paragraphs(["one", "", "three"]);
        assert_eq!(doc.units(), vec![UnitId(0), UnitId(1), UnitId(2)]);
        assert_eq!(doc.unit_text(UnitId(2)).unwrap(), "three");
        assert!(doc.has_text());

        assert!(!MemoryDocument::from_paragraphs(["", "  "]).has_text());
    }

    #[test]
    fn test_invalidated_unit_fails() {
        let mut doc = MemoryDocument::from("a\nb");
        doc.invalidate(UnitId(1));
        assert!(doc.unit_text(UnitId(0)).is_ok());
        assert!(matches!(
            doc.replace_runs(UnitId(1), vec![]),
            Err(HighlightError::UnitUnavailable { .. })
        ));
    }

    #[test]
    fn test_native_search_requires_flag() {
        let doc = MemoryDocument::from("Cat cat");
        let spec = SearchSpec::new("cat", false).unwrap();
        assert!(matches!(
            doc.native_search(UnitId(0), &spec),
            Err(HighlightError::NativeSearchUnsupported)
        ));

        let doc = doc.with_native_search(true);
        let ranges = doc.native_search(UnitId(0), &spec).unwrap();
        assert_eq!(
            ranges,
            vec![MemoryRange { start: 0, end: 3 }, MemoryRange { start: 4, end: 7 }]
        );
    }

    #[test]
    fn test_scan_non_overlapping() {
        let ranges = scan("aaaa", "aa", true);
        assert_eq!(
            ranges,
            vec![MemoryRange { start: 0, end: 2 }, MemoryRange { start: 2, end: 4 }]
        );
    }

    #[test]
    fn test_json_round_trip() {
        let json = r#"{"paragraphs":[{"runs":[{"text":"hi ","style":{"bold":true}},{"text":"there"}]}]}"#;
        let doc: MemoryDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.unit_text(UnitId(0)).unwrap(), "hi there");
        assert_eq!(doc.paragraphs[0].runs[0].style.bold, Some(true));
        assert!(!doc.native_search);
    }
}
