//! Semantic error types for feature discovery.
//!
//! Every variant names the specifier or source that failed so the message
//! can be shown to users unchanged. Any error aborts the whole discovery run;
//! callers never receive partial results.

use std::io;

use thiserror::Error;

use crate::fs::is_outside_root;
use crate::parser::DocumentError;
use crate::tags::TagFilterError;

/// Errors that can occur while discovering and filtering features.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The specifier's base path does not exist.
    #[error("feature path \"{path}\" is not available")]
    NotAvailable {
        /// Specifier as supplied by the caller.
        path: String,
    },

    /// The specifier's base path exists but cannot be opened.
    #[error("feature path \"{path}\" is not accessible")]
    NotAccessible {
        /// Specifier as supplied by the caller.
        path: String,
    },

    /// The specifier names a path a sandboxed file system cannot reach.
    #[error("feature path \"{path}\" is outside the root directory")]
    OutsideRoot {
        /// Specifier as supplied by the caller.
        path: String,
    },

    /// The document parser rejected a source.
    #[error("{path} - {source}")]
    Parse {
        /// Path or in-memory name of the rejected source.
        path: String,
        /// Parser failure.
        #[source]
        source: DocumentError,
    },

    /// Any other I/O failure while reading a specifier.
    #[error("{path}: {source}")]
    Io {
        /// Specifier as supplied by the caller.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The tag filter could not evaluate the filter expression.
    #[error(transparent)]
    TagFilter(#[from] TagFilterError),

    /// An invalid configuration value was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl DiscoveryError {
    /// Classify an I/O failure for the given specifier.
    ///
    /// Missing paths and permission failures map onto their dedicated
    /// variants, as do paths a sandboxed [`Dir`](cap_std::fs_utf8::Dir)
    /// refuses. Everything else keeps the original error as its source.
    #[must_use]
    pub fn from_io(path: impl Into<String>, err: io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            _ if is_outside_root(&err) => Self::OutsideRoot { path },
            io::ErrorKind::NotFound => Self::NotAvailable { path },
            io::ErrorKind::PermissionDenied => Self::NotAccessible { path },
            _ => Self::Io { path, source: err },
        }
    }
}
