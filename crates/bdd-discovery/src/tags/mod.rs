//! Tag expressions and the tag filter applied to discovered pickles.
//!
//! [`TagExpression`] parses and evaluates Cucumber-style expressions such as
//! `@smoke and not (@wip or @slow)`. [`TagFilter`] is the seam the discovery
//! pipeline depends on; [`ExpressionTagFilter`] implements it on top of the
//! expression parser.
mod ast;
mod filter;
mod lexer;
mod parser;
mod sets;

pub use ast::{TagExprError, TagExpression};
pub use filter::{ExpressionTagFilter, TagFilter, TagFilterError};
pub(crate) use sets::merge_tag_sets;
