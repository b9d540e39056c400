//! Core data types for search and styling
//!
//! Search parameters ([`SearchSpec`], [`StyleSpec`]), offsets produced by a
//! locate pass ([`MatchSpan`]) and the split of a text unit into
//! [`Segment`]s.

use crate::error::{HighlightError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

/// Address of a text unit (paragraph) inside a host document
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnitId(pub usize);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What to search for
///
/// The term is always a literal phrase. It is stored trimmed and is never
/// empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSearchSpec", rename_all = "camelCase")]
pub struct SearchSpec {
    term: String,
    case_sensitive: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSearchSpec {
    term: String,
    #[serde(default)]
    case_sensitive: bool,
}

impl TryFrom<RawSearchSpec> for SearchSpec {
    type Error = HighlightError;

    fn try_from(raw: RawSearchSpec) -> Result<Self> {
        SearchSpec::new(raw.term, raw.case_sensitive)
    }
}

impl SearchSpec {
    /// Create a search spec, rejecting blank terms
    pub fn new(term: impl Into<String>, case_sensitive: bool) -> Result<Self> {
        let term = term.into();
        let trimmed = term.trim();
        if trimmed.is_empty() {
            return Err(HighlightError::EmptyTerm);
        }

        Ok(Self {
            term: trimmed.to_string(),
            case_sensitive,
        })
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }
}

/// 24-bit text colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

fn hex_color() -> &'static Regex {
    static PATTERN: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("Valid hex color regex"));
    &PATTERN
}

impl FromStr for Rgb {
    type Err = HighlightError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if !hex_color().is_match(s) {
            return Err(HighlightError::InvalidColor(s.to_string()));
        }

        let channel = |range: Range<usize>| {
            u8::from_str_radix(&s[range], 16).map_err(|_| HighlightError::InvalidColor(s.to_string()))
        };

        Ok(Rgb::new(channel(1..3)?, channel(3..5)?, channel(5..7)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = HighlightError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(rgb: Rgb) -> Self {
        rgb.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Highlight (background fill) palette
///
/// `None` is the "no fill" sentinel: apply leaves the fill alone, revert
/// sets it explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Highlight {
    None,
    Yellow,
    Green,
    Cyan,
    Magenta,
    Blue,
    Red,
    DarkBlue,
    DarkCyan,
    DarkGreen,
    DarkMagenta,
    DarkRed,
    DarkYellow,
    DarkGray,
    LightGray,
    Black,
}

impl Highlight {
    pub const PALETTE: [Highlight; 16] = [
        Highlight::None,
        Highlight::Yellow,
        Highlight::Green,
        Highlight::Cyan,
        Highlight::Magenta,
        Highlight::Blue,
        Highlight::Red,
        Highlight::DarkBlue,
        Highlight::DarkCyan,
        Highlight::DarkGreen,
        Highlight::DarkMagenta,
        Highlight::DarkRed,
        Highlight::DarkYellow,
        Highlight::DarkGray,
        Highlight::LightGray,
        Highlight::Black,
    ];

    /// Host token for this colour
    pub fn token(&self) -> &'static str {
        match self {
            Highlight::None => "none",
            Highlight::Yellow => "yellow",
            Highlight::Green => "green",
            Highlight::Cyan => "cyan",
            Highlight::Magenta => "magenta",
            Highlight::Blue => "blue",
            Highlight::Red => "red",
            Highlight::DarkBlue => "darkBlue",
            Highlight::DarkCyan => "darkCyan",
            Highlight::DarkGreen => "darkGreen",
            Highlight::DarkMagenta => "darkMagenta",
            Highlight::DarkRed => "darkRed",
            Highlight::DarkYellow => "darkYellow",
            Highlight::DarkGray => "darkGray",
            Highlight::LightGray => "lightGray",
            Highlight::Black => "black",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Highlight::None)
    }
}

impl FromStr for Highlight {
    type Err = HighlightError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        if wanted.eq_ignore_ascii_case("nofill") {
            return Ok(Highlight::None);
        }

        Highlight::PALETTE
            .iter()
            .copied()
            .find(|h| h.token().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| HighlightError::UnknownHighlight(wanted.to_string()))
    }
}

impl TryFrom<String> for Highlight {
    type Error = HighlightError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Highlight> for String {
    fn from(h: Highlight) -> Self {
        h.token().to_string()
    }
}

impl fmt::Display for Highlight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Text colour choice; `Default` means "leave the run's colour alone"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TextColor {
    #[default]
    Default,
    Rgb(Rgb),
}

impl FromStr for TextColor {
    type Err = HighlightError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("default") {
            Ok(TextColor::Default)
        } else {
            s.parse().map(TextColor::Rgb)
        }
    }
}

impl TryFrom<String> for TextColor {
    type Error = HighlightError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<TextColor> for String {
    fn from(color: TextColor) -> Self {
        match color {
            TextColor::Default => "default".to_string(),
            TextColor::Rgb(rgb) => rgb.to_string(),
        }
    }
}

/// Character styling applied to every match
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleSpec {
    pub highlight: Highlight,
    pub text_color: TextColor,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikeout: bool,
}

impl Default for StyleSpec {
    fn default() -> Self {
        Self {
            highlight: Highlight::Yellow,
            text_color: TextColor::Default,
            bold: false,
            italic: false,
            underline: false,
            strikeout: false,
        }
    }
}

impl StyleSpec {
    /// A spec that changes nothing on a matched run
    pub fn is_noop(&self) -> bool {
        self.highlight.is_none()
            && self.text_color == TextColor::Default
            && !(self.bold || self.italic || self.underline || self.strikeout)
    }
}

/// One located occurrence, as byte offsets into a unit's flattened text
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
}

impl MatchSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for MatchSpan {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// Segment tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentKind {
    Match,
    Plain,
}

/// A MATCH- or PLAIN-tagged slice of a unit's text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub kind: SegmentKind,
    pub text: String,
}

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            kind: SegmentKind::Plain,
            text: text.into(),
        }
    }

    pub fn matched(text: impl Into<String>) -> Self {
        Self {
            kind: SegmentKind::Match,
            text: text.into(),
        }
    }

    pub fn is_match(&self) -> bool {
        self.kind == SegmentKind::Match
    }
}
