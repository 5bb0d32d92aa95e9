//! Tag filtering of compiled pickles.

use thiserror::Error;
use tracing::trace;

use super::ast::{TagExprError, TagExpression};
use crate::model::Pickle;

/// The tag filter rejected its expression.
#[derive(Debug, Error)]
pub enum TagFilterError {
    /// The expression could not be parsed.
    #[error("invalid tag filter \"{expression}\": {source}")]
    InvalidExpression {
        /// The expression as supplied by the caller.
        expression: String,
        /// Parse failure.
        #[source]
        source: TagExprError,
    },
}

/// Narrows a feature's pickles to those matching a filter expression.
///
/// The discovery pipeline hands the expression over verbatim. An empty
/// expression means "no filtering" and must keep every pickle.
pub trait TagFilter {
    /// Return the pickles that satisfy `expression`, in their original order.
    ///
    /// # Errors
    ///
    /// Implementations return [`TagFilterError`] when the expression cannot
    /// be evaluated.
    fn apply(&self, expression: &str, pickles: Vec<Pickle>) -> Result<Vec<Pickle>, TagFilterError>;
}

/// [`TagFilter`] backed by [`TagExpression`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpressionTagFilter;

impl TagFilter for ExpressionTagFilter {
    fn apply(&self, expression: &str, pickles: Vec<Pickle>) -> Result<Vec<Pickle>, TagFilterError> {
        if expression.trim().is_empty() {
            return Ok(pickles);
        }
        let expr = TagExpression::parse(expression).map_err(|source| {
            TagFilterError::InvalidExpression {
                expression: expression.to_string(),
                source,
            }
        })?;
        Ok(pickles
            .into_iter()
            .filter(|pickle| {
                let keep = expr.evaluate(pickle.tag_names());
                trace!(pickle = %pickle.name, uri = %pickle.uri, keep, "evaluated tag filter");
                keep
            })
            .collect())
    }
}
