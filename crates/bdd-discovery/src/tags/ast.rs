//! Abstract syntax tree and evaluation for tag expressions.
//!
//! Expressions combine tags (`@tag`) with `not`, `and`, `or` and parentheses.
//! `not` binds tighter than `and`, which binds tighter than `or`; binary
//! operators associate to the left, so `@a or @b and @c` reads as
//! `@a or (@b and @c)`.
//!
//! Evaluation takes the tag names of a pickle (leading `@` retained) and
//! short-circuits the same way the parser nests the operators.

use std::collections::HashSet;
use std::fmt;

use thiserror::Error;

use super::parser;

/// Parsed representation of a tag expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagExpression {
    root: Expr,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) enum Expr {
    Tag(String),
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}

/// A tag expression failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid tag expression at byte {offset}: {reason}")]
pub struct TagExprError {
    offset: usize,
    reason: String,
}

impl TagExprError {
    pub(super) fn new(offset: usize, reason: impl Into<String>) -> Self {
        Self {
            offset,
            reason: reason.into(),
        }
    }

    /// Byte offset into the expression where parsing failed.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Human-readable reason for the failure.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl TagExpression {
    /// Parse a tag expression.
    ///
    /// # Errors
    ///
    /// Returns [`TagExprError`] when the input is empty, contains an unknown
    /// identifier or character, or has unbalanced parentheses.
    pub fn parse(input: &str) -> Result<Self, TagExprError> {
        parser::parse(input).map(|root| Self { root })
    }

    /// Evaluate the expression against a set of tag names.
    pub fn evaluate<'a, I>(&self, tags: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        let set: HashSet<&'a str> = tags.into_iter().collect();
        self.root.eval(&set)
    }
}

impl fmt::Display for TagExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)
    }
}

impl Expr {
    fn eval(&self, tags: &HashSet<&str>) -> bool {
        match self {
            Self::Tag(tag) => tags.contains(tag.as_str()),
            Self::Not(inner) => !inner.eval(tags),
            Self::And(lhs, rhs) => lhs.eval(tags) && rhs.eval(tags),
            Self::Or(lhs, rhs) => lhs.eval(tags) || rhs.eval(tags),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tag(tag) => f.write_str(tag),
            Self::Not(inner) => write!(f, "not ( {inner} )"),
            Self::And(lhs, rhs) => write!(f, "( {lhs} and {rhs} )"),
            Self::Or(lhs, rhs) => write!(f, "( {lhs} or {rhs} )"),
        }
    }
}
