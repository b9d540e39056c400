//! Rewrites a unit's runs from its segments
//!
//! The only place in the engine that mutates host content.

use crate::document::{HostDocument, RunStyle, StyledRun};
use crate::error::Result;
use crate::types::{Highlight, Rgb, Segment, StyleSpec, TextColor, UnitId};
use serde::{Deserialize, Serialize};

/// What to do with the MATCH segments of a unit
#[derive(Debug, Clone, Copy)]
pub enum StyleAction<'a> {
    /// Style matches with the given spec
    Apply(&'a StyleSpec),
    /// Reset every run of the unit to the neutral style
    Revert,
}

/// Colour written by revert
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevertColor {
    /// Explicit black (0, 0, 0)
    #[default]
    Black,
    /// Drop the colour override entirely
    Clear,
}

/// Builds fresh runs for a unit and hands them to the host
#[derive(Debug, Clone, Default)]
pub struct StyleApplicator {
    revert_color: RevertColor,
}

impl StyleApplicator {
    pub fn new(revert_color: RevertColor) -> Self {
        Self { revert_color }
    }

    pub fn revert_color(&self) -> RevertColor {
        self.revert_color
    }

    /// Replace the run sequence of `unit` with one run per segment
    pub fn apply<D: HostDocument>(
        &self,
        doc: &mut D,
        unit: UnitId,
        segments: &[Segment],
        action: StyleAction<'_>,
    ) -> Result<()> {
        doc.replace_runs(unit, self.runs_for(segments, action))
    }

    /// Runs for `segments`; each starts from [`RunStyle::default`] and
    /// carries only what `action` assigns
    pub fn runs_for(&self, segments: &[Segment], action: StyleAction<'_>) -> Vec<StyledRun> {
        segments
            .iter()
            .map(|segment| {
                let style = match action {
                    StyleAction::Apply(spec) if segment.is_match() => match_style(spec),
                    StyleAction::Apply(_) => RunStyle::default(),
                    StyleAction::Revert => self.neutral_style(),
                };
                StyledRun::new(segment.text.clone()).with_style(style)
            })
            .collect()
    }

    /// Style written by revert
    pub fn neutral_style(&self) -> RunStyle {
        RunStyle {
            highlight: Some(Highlight::None),
            color: match self.revert_color {
                RevertColor::Black => Some(Rgb::BLACK),
                RevertColor::Clear => None,
            },
            bold: Some(false),
            italic: Some(false),
            underline: Some(false),
            strikeout: Some(false),
        }
    }
}

/// Sentinels and false flags leave the attribute unset
fn match_style(spec: &StyleSpec) -> RunStyle {
    let flag = |on: bool| on.then_some(true);

    RunStyle {
        highlight: (!spec.highlight.is_none()).then_some(spec.highlight),
        color: match spec.text_color {
            TextColor::Default => None,
            TextColor::Rgb(rgb) => Some(rgb),
        },
        bold: flag(spec.bold),
        italic: flag(spec.italic),
        underline: flag(spec.underline),
        strikeout: flag(spec.strikeout),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments() -> Vec<Segment> {
        vec![
            Segment::plain("see "),
            Segment::matched("the"),
            Segment::plain(" cat sit"),
        ]
    }

    #[test]
    fn test_apply_styles_only_matches() {
        let spec = StyleSpec {
            highlight: Highlight::Cyan,
            text_color: TextColor::Rgb(Rgb::new(200, 0, 0)),
            bold: true,
            strikeout: true,
            ..Default::default()
        };
        let runs = StyleApplicator::default().runs_for(&segments(), StyleAction::Apply(&spec));

        let texts: Vec<_> = runs.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["see ", "the", " cat sit"]);

        assert_eq!(runs[0].style, RunStyle::default());
        assert_eq!(runs[2].style, RunStyle::default());

        let styled = &runs[1].style;
        assert_eq!(styled.highlight, Some(Highlight::Cyan));
        assert_eq!(styled.color, Some(Rgb::new(200, 0, 0)));
        assert_eq!(styled.bold, Some(true));
        assert_eq!(styled.strikeout, Some(true));
        assert_eq!(styled.italic, None);
        assert_eq!(styled.underline, None);
    }

    #[test]
    fn test_apply_skips_sentinels() {
        let spec = StyleSpec {
            highlight: Highlight::None,
            text_color: TextColor::Default,
            italic: true,
            ..Default::default()
        };
        let runs = StyleApplicator::default().runs_for(&segments(), StyleAction::Apply(&spec));
        let styled = &runs[1].style;
        assert_eq!(styled.highlight, None);
        assert_eq!(styled.color, None);
        assert_eq!(styled.italic, Some(true));
    }

    #[test]
    fn test_revert_is_neutral() {
        let runs = StyleApplicator::default().runs_for(&segments(), StyleAction::Revert);
        for run in &runs {
            assert_eq!(run.style.highlight, Some(Highlight::None));
            assert_eq!(run.style.color, Some(Rgb::BLACK));
            assert_eq!(run.style.bold, Some(false));
            assert_eq!(run.style.italic, Some(false));
            assert_eq!(run.style.underline, Some(false));
            assert_eq!(run.style.strikeout, Some(false));
            assert!(run.style.is_neutral());
        }
    }

    #[test]
    fn test_revert_clear_color() {
        let applicator = StyleApplicator::new(RevertColor::Clear);
        assert_eq!(applicator.neutral_style().color, None);
        assert!(applicator.neutral_style().is_neutral());
    }
}
