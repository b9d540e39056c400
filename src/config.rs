//! Configuration for the highlighter
//!
//! [`HighlighterConfig`] controls how the engine runs and is layered from
//! defaults, an optional file and `TEXTHIGHLIGHTER_*` environment
//! variables. [`HighlightOptions`] is the option surface the panel
//! collects from the user.

use crate::error::{HighlightError, Result};
use crate::types::{Highlight, SearchSpec, StyleSpec, TextColor};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

pub use crate::engine::applicator::RevertColor;

/// Environment variable prefix for [`HighlighterConfig`]
pub const ENV_PREFIX: &str = "TEXTHIGHLIGHTER";

/// Which match locator the engine uses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocatorStrategy {
    /// Local literal-phrase scan
    #[default]
    Literal,
    /// Host native search
    Delegated,
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlighterConfig {
    /// Match locator strategy
    pub locator: LocatorStrategy,

    /// Colour written on revert
    pub revert_color: RevertColor,

    /// Scan locally when the delegated strategy meets a host without search
    pub fallback_to_literal: bool,

    /// Compiled search terms kept by the literal locator
    pub pattern_cache_capacity: usize,
}

impl Default for HighlighterConfig {
    fn default() -> Self {
        Self {
            locator: LocatorStrategy::Literal,
            revert_color: RevertColor::Black,
            fallback_to_literal: true,
            pattern_cache_capacity: crate::engine::locator::DEFAULT_PATTERN_CACHE,
        }
    }
}

impl HighlighterConfig {
    /// Defaults, then `path` (if given), then environment variables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            debug!("Loading highlighter config from {}", path.display());
            builder = builder.add_source(File::from(path));
        }
        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        let config: HighlighterConfig = builder.build()?.try_deserialize()?;
        Ok(config)
    }
}

/// Options collected by the panel form
///
/// Colours stay as the raw UI strings until [`HighlightOptions::to_specs`]
/// validates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HighlightOptions {
    pub term: String,
    pub case_sensitive: bool,
    /// Palette token or `none`
    pub highlight_color: String,
    /// `#RRGGBB` or `default`
    pub text_color: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikeout: bool,
}

impl Default for HighlightOptions {
    fn default() -> Self {
        Self::from_style("", false, &StyleSpec::default())
    }
}

impl HighlightOptions {
    /// Repopulate a form from remembered specs
    pub fn from_specs(search: &SearchSpec, style: &StyleSpec) -> Self {
        Self::from_style(search.term(), search.case_sensitive(), style)
    }

    fn from_style(term: &str, case_sensitive: bool, style: &StyleSpec) -> Self {
        Self {
            term: term.to_string(),
            case_sensitive,
            highlight_color: style.highlight.token().to_string(),
            text_color: String::from(style.text_color),
            bold: style.bold,
            italic: style.italic,
            underline: style.underline,
            strikeout: style.strikeout,
        }
    }

    /// Whether the term would be accepted
    pub fn has_term(&self) -> bool {
        !self.term.trim().is_empty()
    }

    /// Validate every field and build the engine specs
    pub fn to_specs(&self) -> Result<(SearchSpec, StyleSpec)> {
        let search = SearchSpec::new(self.term.as_str(), self.case_sensitive)?;
        let style = StyleSpec {
            highlight: self.highlight_color.parse::<Highlight>()?,
            text_color: self.text_color.parse::<TextColor>()?,
            bold: self.bold,
            italic: self.italic,
            underline: self.underline,
            strikeout: self.strikeout,
        };
        Ok((search, style))
    }

    /// Read options from a `.toml` or `.json` file
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str(&raw)
                .map_err(|e| HighlightError::Other(format!("{}: {}", path.display(), e))),
            _ => Ok(serde_json::from_str(&raw)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rgb;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = HighlighterConfig::default();
        assert_eq!(config.locator, LocatorStrategy::Literal);
        assert_eq!(config.revert_color, RevertColor::Black);
        assert!(config.fallback_to_literal);
    }

    #[test]
    #[serial]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "locator = \"delegated\"\nrevert_color = \"clear\"").unwrap();

        let config = HighlighterConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.locator, LocatorStrategy::Delegated);
        assert_eq!(config.revert_color, RevertColor::Clear);
        assert_eq!(config.pattern_cache_capacity, 16);
    }

    #[test]
    #[serial]
    fn test_environment_overrides() {
        std::env::set_var("TEXTHIGHLIGHTER_LOCATOR", "delegated");
        std::env::set_var("TEXTHIGHLIGHTER_PATTERN_CACHE_CAPACITY", "4");
        let config = HighlighterConfig::load(None);
        std::env::remove_var("TEXTHIGHLIGHTER_LOCATOR");
        std::env::remove_var("TEXTHIGHLIGHTER_PATTERN_CACHE_CAPACITY");

        let config = config.unwrap();
        assert_eq!(config.locator, LocatorStrategy::Delegated);
        assert_eq!(config.pattern_cache_capacity, 4);
    }

    #[test]
    fn test_options_to_specs() {
        let options = HighlightOptions {
            term: "  cat ".to_string(),
            highlight_color: "NoFill".to_string(),
            text_color: "#FF0000".to_string(),
            underline: true,
            ..Default::default()
        };
        let (search, style) = options.to_specs().unwrap();
        assert_eq!(search.term(), "cat");
        assert_eq!(style.highlight, Highlight::None);
        assert_eq!(style.text_color, TextColor::Rgb(Rgb::new(255, 0, 0)));
        assert!(style.underline);
    }

    #[test]
    fn test_options_validation_errors() {
        let blank = HighlightOptions::default();
        assert!(matches!(blank.to_specs(), Err(HighlightError::EmptyTerm)));

        let bad_color = HighlightOptions {
            term: "x".into(),
            text_color: "red".into(),
            ..Default::default()
        };
        assert!(matches!(bad_color.to_specs(), Err(HighlightError::InvalidColor(_))));

        let bad_highlight = HighlightOptions {
            term: "x".into(),
            highlight_color: "plaid".into(),
            ..Default::default()
        };
        assert!(matches!(
            bad_highlight.to_specs(),
            Err(HighlightError::UnknownHighlight(_))
        ));
    }

    #[test]
    fn test_options_round_trip_through_specs() {
        let options = HighlightOptions {
            term: "dog".into(),
            case_sensitive: true,
            highlight_color: "darkGreen".into(),
            text_color: "#0a0b0c".into(),
            bold: true,
            ..Default::default()
        };
        let (search, style) = options.to_specs().unwrap();
        assert_eq!(HighlightOptions::from_specs(&search, &style), options);
    }

    #[test]
    fn test_options_from_files() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = dir.path().join("opts.toml");
        std::fs::write(&toml_path, "term = \"cat\"\ncaseSensitive = true\nbold = true\n").unwrap();
        let options = HighlightOptions::from_file(&toml_path).unwrap();
        assert_eq!(options.term, "cat");
        assert!(options.case_sensitive);
        assert_eq!(options.highlight_color, "yellow");

        let json_path = dir.path().join("opts.json");
        std::fs::write(&json_path, r##"{"term":"dog","textColor":"#112233"}"##).unwrap();
        let options = HighlightOptions::from_file(&json_path).unwrap();
        assert_eq!(options.text_color, "#112233");
    }
}
