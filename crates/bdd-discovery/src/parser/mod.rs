//! Turns raw feature sources into documents and pickles.
//!
//! [`DocumentParser`] is the seam the discovery pipeline parses through.
//! [`GherkinParser`] implements it with the `gherkin` crate for syntax and
//! compiles pickles itself, drawing every AST node and pickle id from the
//! run's [`IdGenerator`].

use std::sync::LazyLock;

use gherkin::GherkinEnv;
use regex::Regex;
use thiserror::Error;

use crate::ids::IdGenerator;
use crate::model::{GherkinDocument, Pickle};

mod pickles;

/// Dialect used when the caller passes an empty one.
pub const DEFAULT_DIALECT: &str = "en";

#[expect(
    clippy::expect_used,
    reason = "the pattern is a literal and compiling it cannot fail"
)]
static LANGUAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*#\s*language\s*:\s*(\S+)\s*$").expect("valid language directive pattern")
});

/// Errors raised while parsing a single source.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The source is not valid UTF-8.
    #[error("source is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
    /// The requested dialect is not known to the parser.
    #[error("unsupported dialect \"{0}\"")]
    Dialect(String),
    /// The source violates the grammar.
    #[error("{0}")]
    Syntax(String),
    /// The `gherkin` crate rejected the source.
    #[error("{0}")]
    Gherkin(#[from] gherkin::ParseError),
}

/// A parsed document together with the pickles compiled from it.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    /// The structured document and its scenario index.
    pub document: GherkinDocument,
    /// Every pickle compiled from the document, in document order.
    pub pickles: Vec<Pickle>,
}

/// Parses feature sources into documents and pickles.
pub trait DocumentParser {
    /// Parse `source` as the document named `uri`.
    ///
    /// `dialect` selects the keyword localisation; an empty string selects
    /// [`DEFAULT_DIALECT`]. All ids must come from `ids`.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError`] when the source cannot be decoded or parsed.
    fn parse(
        &self,
        uri: &str,
        source: &[u8],
        dialect: &str,
        ids: &mut IdGenerator,
    ) -> Result<ParsedDocument, DocumentError>;
}

/// Editors on some platforms prefix UTF-8 files with this marker.
const BYTE_ORDER_MARK: char = '\u{feff}';

/// [`DocumentParser`] built on the `gherkin` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct GherkinParser;

impl DocumentParser for GherkinParser {
    fn parse(
        &self,
        uri: &str,
        source: &[u8],
        dialect: &str,
        ids: &mut IdGenerator,
    ) -> Result<ParsedDocument, DocumentError> {
        let decoded = std::str::from_utf8(source)?;
        let text = decoded.strip_prefix(BYTE_ORDER_MARK).unwrap_or(decoded);
        let language = detect_language(text).unwrap_or_else(|| resolve_dialect(dialect));

        if !has_gherkin_content(text) {
            return Ok(ParsedDocument {
                document: GherkinDocument {
                    uri: uri.to_string(),
                    feature: None,
                    scenarios: Vec::new(),
                },
                pickles: Vec::new(),
            });
        }

        let env = GherkinEnv::new(language)
            .map_err(|_| DocumentError::Dialect(language.to_string()))?;
        let feature = gherkin::Feature::parse(with_trailing_newline(text), env)?;
        Ok(pickles::compile(uri, language, feature, ids))
    }
}

/// Map an empty dialect onto [`DEFAULT_DIALECT`].
#[must_use]
pub fn resolve_dialect(dialect: &str) -> &str {
    let trimmed = dialect.trim();
    if trimmed.is_empty() {
        DEFAULT_DIALECT
    } else {
        trimmed
    }
}

/// Read a `# language: xx` directive from the comment block heading the
/// source.
fn detect_language(text: &str) -> Option<&str> {
    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !trimmed.starts_with('#') {
            return None;
        }
        if let Some(lang) = LANGUAGE_RE.captures(line).and_then(|caps| caps.get(1)) {
            return Some(lang.as_str());
        }
    }
    None
}

/// Whether the source has anything besides blank lines and comments.
fn has_gherkin_content(text: &str) -> bool {
    text.lines().any(|line| {
        let trimmed = line.trim();
        !trimmed.is_empty() && !trimmed.starts_with('#')
    })
}

fn with_trailing_newline(text: &str) -> String {
    let mut owned = text.to_string();
    if !owned.ends_with('\n') {
        owned.push('\n');
    }
    owned
}
