//! Feature discovery and scenario selection for Gherkin test runners.
//!
//! Given a list of path specifiers (files, directories, or files suffixed
//! with `:<line>`) or named in-memory content, the crate produces a
//! deduplicated, deterministically ordered list of [`Feature`]s. Each one
//! carries the [`Pickle`]s (executable scenario instances) that survive the
//! line restriction and an optional tag expression.
//!
//! # Overview
//!
//! - Specifiers are resolved against a [`FeatureFs`]: a capability-scoped
//!   `cap_std::fs_utf8::Dir` that refuses paths outside it, or an
//!   [`AmbientFs`] anchored at a working directory.
//! - Sources are parsed through a [`DocumentParser`]; [`GherkinParser`]
//!   wraps the `gherkin` crate and compiles pickles.
//! - Pickles are narrowed through a [`TagFilter`];
//!   [`ExpressionTagFilter`] evaluates expressions such as
//!   `@smoke and not (@wip or @slow)`.
//!
//! # Configuration
//!
//! The bundled binary reads these environment variables:
//!
//! - `BDD_DISCOVERY_LOG_LEVEL`: Log verbosity (trace, debug, info, warn,
//!   error)
//! - `BDD_DISCOVERY_TAGS`: Default tag expression
//! - `BDD_DISCOVERY_DIALECT`: Default Gherkin dialect
//!
//! # Example
//!
//! ```ignore
//! use bdd_discovery::parse_features;
//! use cap_std::{ambient_authority, fs_utf8::Dir};
//!
//! let root = Dir::open_ambient_dir(".", ambient_authority())?;
//! let features = parse_features(&root, "@smoke", "", &["features", "login.feature:12"])?;
//! for feature in &features {
//!     println!("{} ({} scenarios)", feature.uri, feature.pickles.len());
//! }
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod fs;
pub mod ids;
pub mod logging;
pub mod model;
pub mod parser;
pub mod path_spec;
pub mod source;
pub mod tags;

#[cfg(test)]
mod test_support;

pub use discovery::{
    FeatureDiscovery, aggregate, filter_by_line, parse_features, parse_from_bytes, post_filter,
};
pub use error::DiscoveryError;
pub use fs::{AmbientFs, EntryKind, FeatureFs};
pub use ids::IdGenerator;
pub use model::{
    Feature, FeatureContent, GherkinDocument, Pickle, PickleStep, PickleStepArgument, PickleTag,
    ScenarioNode,
};
pub use parser::{DocumentError, DocumentParser, GherkinParser, ParsedDocument};
pub use path_spec::{PathLineSpec, extract_feature_path_line};
pub use tags::{ExpressionTagFilter, TagExprError, TagExpression, TagFilter, TagFilterError};
