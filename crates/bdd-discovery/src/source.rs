//! Resolves a specifier's base path into raw feature sources.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::trace;

use crate::fs::{EntryKind, FeatureFs};

/// The bytes of one feature file and the path they were read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSource {
    /// Path relative to the file-system root, as it becomes the feature uri.
    pub path: Utf8PathBuf,
    /// Unparsed file contents.
    pub bytes: Vec<u8>,
}

/// Sources produced for one base path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSet {
    /// The base path named a single file.
    File(RawSource),
    /// The base path named a directory; holds every feature file below it.
    Dir(Vec<RawSource>),
}

impl SourceSet {
    /// Flatten into the sources in discovery order.
    #[must_use]
    pub fn into_sources(self) -> Vec<RawSource> {
        match self {
            Self::File(source) => vec![source],
            Self::Dir(sources) => sources,
        }
    }
}

/// Read the file or directory tree at `base_path`.
///
/// A file is read whatever its extension; a directory contributes only its
/// `.feature` files.
///
/// # Errors
///
/// Returns the first I/O error met while stating, walking or reading.
pub fn read_sources<F>(fs: &F, base_path: &str) -> io::Result<SourceSet>
where
    F: FeatureFs + ?Sized,
{
    let path = Utf8Path::new(base_path);
    match fs.kind(path)? {
        EntryKind::File => {
            let bytes = fs.read_file(path)?;
            Ok(SourceSet::File(RawSource {
                path: path.to_path_buf(),
                bytes,
            }))
        }
        EntryKind::Dir => {
            let mut sources = Vec::new();
            for file in fs.walk_features(path)? {
                trace!(path = %file, "reading feature file");
                let bytes = fs.read_file(&file)?;
                sources.push(RawSource { path: file, bytes });
            }
            Ok(SourceSet::Dir(sources))
        }
    }
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests require explicit panic messages for debugging failures"
)]
mod tests {
    use super::*;
    use crate::test_support::MemoryFs;

    #[test]
    fn reads_a_single_file_regardless_of_extension() {
        let fs = MemoryFs::default().with_file("notes.txt", "Feature: x\n");
        let set = read_sources(&fs, "notes.txt").expect("read file");
        assert_eq!(
            set,
            SourceSet::File(RawSource {
                path: Utf8PathBuf::from("notes.txt"),
                bytes: b"Feature: x\n".to_vec(),
            })
        );
    }

    #[test]
    fn reads_every_feature_below_a_directory() {
        let fs = MemoryFs::default()
            .with_dir("features")
            .with_file("features/a.feature", "a")
            .with_file("features/b.feature", "b")
            .with_file("features/readme.md", "c");
        let sources = read_sources(&fs, "features")
            .expect("read dir")
            .into_sources();
        let paths: Vec<&str> = sources.iter().map(|s| s.path.as_str()).collect();
        assert_eq!(paths, ["features/a.feature", "features/b.feature"]);
    }

    #[test]
    fn propagates_missing_paths() {
        let fs = MemoryFs::default();
        let Err(err) = read_sources(&fs, "missing") else {
            panic!("expected error");
        };
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
