//! The discovery pipeline.
//!
//! Each specifier is split into a base path and an optional line, read from
//! the file system, parsed, and narrowed to the requested scenario. Features
//! from every specifier are then merged by uri, filtered by tag expression,
//! and stripped of documents left without pickles.
//!
//! Any failure aborts the run; callers never receive partial results.

use tracing::debug;

use crate::error::DiscoveryError;
use crate::fs::FeatureFs;
use crate::ids::IdGenerator;
use crate::model::{Feature, FeatureContent};
use crate::parser::{DocumentParser, GherkinParser, resolve_dialect};
use crate::path_spec::extract_feature_path_line;
use crate::source::{SourceSet, read_sources};
use crate::tags::{ExpressionTagFilter, TagFilter};

mod aggregate;
mod line_filter;

pub use aggregate::aggregate;
pub use line_filter::filter_by_line;

/// Resolves specifiers and in-memory content into filtered features.
///
/// The parser and tag filter are injected so callers can swap either out.
/// Every call to [`parse_features`](Self::parse_features) or
/// [`parse_from_bytes`](Self::parse_from_bytes) uses a fresh
/// [`IdGenerator`] shared by all documents of that call.
#[derive(Debug, Clone)]
pub struct FeatureDiscovery<P = GherkinParser, F = ExpressionTagFilter> {
    parser: P,
    tag_filter: F,
    dialect: String,
}

impl Default for FeatureDiscovery {
    fn default() -> Self {
        Self::new(GherkinParser, ExpressionTagFilter)
    }
}

impl<P, F> FeatureDiscovery<P, F>
where
    P: DocumentParser,
    F: TagFilter,
{
    /// Create a pipeline using the default dialect.
    #[must_use]
    pub fn new(parser: P, tag_filter: F) -> Self {
        Self {
            parser,
            tag_filter,
            dialect: String::new(),
        }
    }

    /// Parse every document with `dialect`; an empty string selects the
    /// default dialect.
    #[must_use]
    pub fn with_dialect(mut self, dialect: impl Into<String>) -> Self {
        self.dialect = dialect.into();
        self
    }

    /// The dialect handed to the parser.
    #[must_use]
    pub fn dialect(&self) -> &str {
        resolve_dialect(&self.dialect)
    }

    /// Discover features from path specifiers resolved against `fs`.
    ///
    /// A specifier is a file or directory path, optionally suffixed with
    /// `:<line>` to select the scenario starting on that line. The line is
    /// ignored for directories. `filter` is a tag expression; an empty one
    /// keeps every pickle.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError`] when a path cannot be read, a document
    /// fails to parse, or the tag filter rejects `filter`.
    pub fn parse_features<Fs, S>(
        &self,
        fs: &Fs,
        filter: &str,
        paths: &[S],
    ) -> Result<Vec<Feature>, DiscoveryError>
    where
        Fs: FeatureFs + ?Sized,
        S: AsRef<str>,
    {
        let mut ids = IdGenerator::new();
        let mut discovered = Vec::new();
        for raw in paths {
            let raw = raw.as_ref();
            let spec = extract_feature_path_line(raw);
            debug!(
                specifier = raw,
                base_path = %spec.base_path,
                line = ?spec.line,
                "resolving feature path"
            );
            let sources = read_sources(fs, &spec.base_path)
                .map_err(|err| DiscoveryError::from_io(raw, err))?;
            match sources {
                SourceSet::File(source) => {
                    let mut feature =
                        self.parse_source(source.path.as_str(), source.bytes, &mut ids)?;
                    filter_by_line(&mut feature, spec.line);
                    discovered.push(feature);
                }
                SourceSet::Dir(sources) => {
                    if let Some(line) = spec.line {
                        debug!(specifier = raw, line, "ignoring line for directory");
                    }
                    for source in sources {
                        discovered.push(self.parse_source(
                            source.path.as_str(),
                            source.bytes,
                            &mut ids,
                        )?);
                    }
                }
            }
        }
        self.select(filter, discovered)
    }

    /// Discover features from named in-memory content.
    ///
    /// Each name becomes the feature uri verbatim; no line suffix is
    /// recognised.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError`] when a document fails to parse or the tag
    /// filter rejects `filter`.
    pub fn parse_from_bytes(
        &self,
        filter: &str,
        contents: &[FeatureContent],
    ) -> Result<Vec<Feature>, DiscoveryError> {
        let mut ids = IdGenerator::new();
        let discovered = contents
            .iter()
            .map(|content| self.parse_source(&content.name, content.contents.clone(), &mut ids))
            .collect::<Result<Vec<_>, _>>()?;
        self.select(filter, discovered)
    }

    fn parse_source(
        &self,
        uri: &str,
        bytes: Vec<u8>,
        ids: &mut IdGenerator,
    ) -> Result<Feature, DiscoveryError> {
        let parsed = self
            .parser
            .parse(uri, &bytes, self.dialect(), ids)
            .map_err(|source| DiscoveryError::Parse {
                path: uri.to_string(),
                source,
            })?;
        debug!(uri, pickles = parsed.pickles.len(), "parsed feature");
        Ok(Feature {
            uri: uri.to_string(),
            document: parsed.document,
            pickles: parsed.pickles,
            content: bytes,
        })
    }

    fn select(
        &self,
        filter: &str,
        discovered: Vec<Feature>,
    ) -> Result<Vec<Feature>, DiscoveryError> {
        let mut selected = Vec::new();
        for mut feature in aggregate(discovered) {
            let pickles = std::mem::take(&mut feature.pickles);
            feature.pickles = self.tag_filter.apply(filter, pickles)?;
            if post_filter(&feature) {
                selected.push(feature);
            } else {
                debug!(uri = %feature.uri, "dropping feature without selected pickles");
            }
        }
        Ok(selected)
    }
}

/// Whether a feature belongs in the final result.
///
/// A feature is kept only when its document holds a Gherkin feature and at
/// least one pickle survived filtering.
#[must_use]
pub fn post_filter(feature: &Feature) -> bool {
    feature.document.feature.is_some() && !feature.pickles.is_empty()
}

/// [`FeatureDiscovery::parse_features`] with the bundled parser and tag
/// filter.
///
/// # Errors
///
/// See [`FeatureDiscovery::parse_features`].
pub fn parse_features<Fs, S>(
    fs: &Fs,
    filter: &str,
    dialect: &str,
    paths: &[S],
) -> Result<Vec<Feature>, DiscoveryError>
where
    Fs: FeatureFs + ?Sized,
    S: AsRef<str>,
{
    FeatureDiscovery::default()
        .with_dialect(dialect)
        .parse_features(fs, filter, paths)
}

/// [`FeatureDiscovery::parse_from_bytes`] with the bundled parser and tag
/// filter.
///
/// # Errors
///
/// See [`FeatureDiscovery::parse_from_bytes`].
pub fn parse_from_bytes(
    filter: &str,
    dialect: &str,
    contents: &[FeatureContent],
) -> Result<Vec<Feature>, DiscoveryError> {
    FeatureDiscovery::default()
        .with_dialect(dialect)
        .parse_from_bytes(filter, contents)
}
