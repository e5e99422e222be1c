//! Compiled path expression

use crate::jsonpath::ast::JsonSelector;
use crate::jsonpath::state_machine::FrameIdentifier;

/// Compiled path expression optimized for streaming evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPathExpression {
    selectors: Vec<JsonSelector>,
    original: String,
}

impl JsonPathExpression {
    #[inline]
    #[must_use]
    pub fn new(selectors: Vec<JsonSelector>, original: String) -> Self {
        Self {
            selectors,
            original,
        }
    }

    /// Get original expression string
    #[inline]
    #[must_use]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Get compiled selector chain
    #[inline]
    #[must_use]
    pub fn selectors(&self) -> &[JsonSelector] {
        &self.selectors
    }

    /// Nesting depth of the values this expression selects
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.selectors.len()
    }

    /// Whether a value reached through `frames` is selected by this expression
    ///
    /// `frames` holds one entry per enclosing container, outermost first. An
    /// object frame without a recorded key never matches a `Child` selector.
    #[must_use]
    pub fn matches(&self, frames: &[FrameIdentifier]) -> bool {
        frames.len() == self.selectors.len()
            && self
                .selectors
                .iter()
                .zip(frames)
                .all(|(selector, frame)| match (selector, frame) {
                    (JsonSelector::Child(name), FrameIdentifier::Property(Some(key))) => {
                        name == key
                    }
                    (JsonSelector::ArrayItems, FrameIdentifier::Index(_)) => true,
                    (JsonSelector::Wildcard, _) => true,
                    _ => false,
                })
    }
}

impl std::fmt::Display for JsonPathExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("$")?;
        for selector in &self.selectors {
            write!(f, "{selector}")?;
        }
        Ok(())
    }
}
