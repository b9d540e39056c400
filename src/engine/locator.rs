//! Match location strategies
//!
//! [`LiteralLocator`] scans text locally after escaping the term, so pattern
//! metacharacters are ordinary characters. [`DelegatedLocator`] asks the host
//! for range handles and normalizes them into the same offset form. Either
//! way the result is sorted and non-overlapping.

use crate::document::HostDocument;
use crate::error::{HighlightError, Result};
use crate::types::{MatchSpan, SearchSpec, UnitId};
use lru::LruCache;
use regex::{Regex, RegexBuilder};
use std::cell::RefCell;
use std::num::NonZeroUsize;
use tracing::{debug, warn};

/// Default number of compiled terms kept by [`LiteralLocator`]
pub const DEFAULT_PATTERN_CACHE: usize = 16;

/// Strategy for locating a search term inside one text unit
pub trait MatchLocator<D: HostDocument> {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Locate every occurrence of `spec` in `text`, the current flattened
    /// text of `unit`
    fn locate(&self, doc: &D, unit: UnitId, text: &str, spec: &SearchSpec) -> Result<Vec<MatchSpan>>;
}

/// Local literal-phrase scan
pub struct LiteralLocator {
    patterns: RefCell<LruCache<SearchSpec, Regex>>,
}

impl LiteralLocator {
    pub fn new() -> Self {
        Self::with_cache_capacity(DEFAULT_PATTERN_CACHE)
    }

    pub fn with_cache_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            patterns: RefCell::new(LruCache::new(capacity)),
        }
    }

    /// Find all non-overlapping occurrences of the term in `text`
    pub fn find(&self, text: &str, spec: &SearchSpec) -> Result<Vec<MatchSpan>> {
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let pattern = self.pattern(spec)?;
        Ok(pattern
            .find_iter(text)
            .filter(|m| m.start() < m.end())
            .map(|m| MatchSpan::new(m.start(), m.end()))
            .collect())
    }

    /// Number of compiled terms currently cached
    pub fn cached_patterns(&self) -> usize {
        self.patterns.borrow().len()
    }

    fn pattern(&self, spec: &SearchSpec) -> Result<Regex> {
        if let Some(pattern) = self.patterns.borrow_mut().get(spec) {
            return Ok(pattern.clone());
        }

        let pattern = compile(spec)?;
        self.patterns.borrow_mut().put(spec.clone(), pattern.clone());
        Ok(pattern)
    }
}

impl Default for LiteralLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: HostDocument> MatchLocator<D> for LiteralLocator {
    fn name(&self) -> &'static str {
        "literal"
    }

    fn locate(&self, _doc: &D, _unit: UnitId, text: &str, spec: &SearchSpec) -> Result<Vec<MatchSpan>> {
        self.find(text, spec)
    }
}

/// Compile the escaped term; case-insensitive mode uses Unicode simple
/// case folding
fn compile(spec: &SearchSpec) -> Result<Regex> {
    let pattern = RegexBuilder::new(&regex::escape(spec.term()))
        .case_insensitive(!spec.case_sensitive())
        .build()?;
    Ok(pattern)
}

/// Locate `spec` in `text` with a throwaway [`LiteralLocator`]
pub fn locate(text: &str, spec: &SearchSpec) -> Result<Vec<MatchSpan>> {
    LiteralLocator::with_cache_capacity(1).find(text, spec)
}

/// Host-delegated search
pub struct DelegatedLocator {
    fallback: Option<LiteralLocator>,
}

impl DelegatedLocator {
    /// Fail with [`HighlightError::NativeSearchUnsupported`] when the host has
    /// no search primitive
    pub fn new() -> Self {
        Self { fallback: None }
    }

    /// Scan locally when the host has no search primitive
    pub fn with_literal_fallback(mut self, locator: LiteralLocator) -> Self {
        self.fallback = Some(locator);
        self
    }
}

impl Default for DelegatedLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: HostDocument> MatchLocator<D> for DelegatedLocator {
    fn name(&self) -> &'static str {
        "delegated"
    }

    fn locate(&self, doc: &D, unit: UnitId, text: &str, spec: &SearchSpec) -> Result<Vec<MatchSpan>> {
        if !doc.supports_native_search() {
            return match &self.fallback {
                Some(literal) => {
                    debug!("Host lacks native search, scanning unit {} locally", unit);
                    literal.find(text, spec)
                }
                None => Err(HighlightError::NativeSearchUnsupported),
            };
        }

        let handles = doc.native_search(unit, spec)?;
        let spans = handles
            .iter()
            .map(|handle| doc.resolve_range(unit, handle))
            .collect::<Result<Vec<_>>>()?;

        normalize_spans(unit, text, spans)
    }
}

/// Validate host-resolved spans against `text`, sort them and drop any span
/// overlapping an earlier one
pub fn normalize_spans(unit: UnitId, text: &str, mut spans: Vec<MatchSpan>) -> Result<Vec<MatchSpan>> {
    for span in &spans {
        let fits = span.start < span.end
            && span.end <= text.len()
            && text.is_char_boundary(span.start)
            && text.is_char_boundary(span.end);
        if !fits {
            return Err(HighlightError::InvalidRange {
                unit,
                start: span.start,
                end: span.end,
                len: text.len(),
            });
        }
    }

    spans.sort();

    let mut normalized: Vec<MatchSpan> = Vec::with_capacity(spans.len());
    for span in spans {
        match normalized.last() {
            Some(prev) if span.start < prev.end => {
                warn!(
                    "Dropping overlapping host range {}..{} in unit {}",
                    span.start, span.end, unit
                );
            }
            _ => normalized.push(span),
        }
    }

    Ok(normalized)
}
