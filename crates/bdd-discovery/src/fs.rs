//! File-system seam used by the source reader.
//!
//! Discovery never touches paths on its own. Callers hand in a
//! [`FeatureFs`]: a capability-scoped [`Dir`] that confines every specifier
//! to one directory tree, or an [`AmbientFs`] that resolves relative
//! specifiers against a working directory and accepts absolute ones.

use std::io;

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use cap_std::fs_utf8::Dir;
use thiserror::Error;
use walkdir::WalkDir;

/// File-name suffix that marks a feature file during directory walks.
pub const FEATURE_EXTENSION: &str = ".feature";

/// What a specifier's base path resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A file, or anything else that is not a directory.
    File,
    /// A directory to walk.
    Dir,
}

/// Read-only file-system access needed by discovery.
pub trait FeatureFs {
    /// Stat `path`, following symlinks.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the path cannot be inspected.
    fn kind(&self, path: &Utf8Path) -> io::Result<EntryKind>;

    /// Read the whole file at `path`.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the file cannot be read.
    fn read_file(&self, path: &Utf8Path) -> io::Result<Vec<u8>>;

    /// List every feature file below `dir`, depth first, with the entries of
    /// each directory sorted by name.
    ///
    /// Only names ending in [`FEATURE_EXTENSION`] are returned. Symlinked
    /// directories are not descended into; a symlink is listed only when it
    /// resolves to a regular file.
    ///
    /// # Errors
    ///
    /// Returns the first I/O error met during the walk.
    fn walk_features(&self, dir: &Utf8Path) -> io::Result<Vec<Utf8PathBuf>>;
}

/// Payload of the I/O error raised when a path would leave a [`Dir`] root.
#[derive(Debug, Error)]
#[error("path leads outside the root directory")]
pub struct OutsideRoot;

/// Whether `err` was raised for a path outside a [`Dir`] root.
#[must_use]
pub fn is_outside_root(err: &io::Error) -> bool {
    err.get_ref().is_some_and(|inner| inner.is::<OutsideRoot>())
}

fn outside_root() -> io::Error {
    io::Error::other(OutsideRoot)
}

/// Reject absolute paths and paths whose `..` components climb above the
/// root.
fn ensure_contained(path: &Utf8Path) -> io::Result<()> {
    let mut depth = 0_usize;
    for component in path.components() {
        match component {
            Utf8Component::Prefix(_) | Utf8Component::RootDir => return Err(outside_root()),
            Utf8Component::ParentDir => {
                depth = depth.checked_sub(1).ok_or_else(outside_root)?;
            }
            Utf8Component::CurDir => {}
            Utf8Component::Normal(_) => depth += 1,
        }
    }
    Ok(())
}

impl FeatureFs for Dir {
    fn kind(&self, path: &Utf8Path) -> io::Result<EntryKind> {
        ensure_contained(path)?;
        let metadata = self.metadata(path)?;
        Ok(if metadata.is_dir() {
            EntryKind::Dir
        } else {
            EntryKind::File
        })
    }

    fn read_file(&self, path: &Utf8Path) -> io::Result<Vec<u8>> {
        ensure_contained(path)?;
        self.read(path)
    }

    fn walk_features(&self, dir: &Utf8Path) -> io::Result<Vec<Utf8PathBuf>> {
        ensure_contained(dir)?;
        let mut found = Vec::new();
        walk_into(self, dir, &mut found)?;
        Ok(found)
    }
}

fn walk_into(root: &Dir, dir: &Utf8Path, found: &mut Vec<Utf8PathBuf>) -> io::Result<()> {
    let mut entries = root
        .read_dir(dir)?
        .map(|entry| {
            let entry = entry?;
            Ok((entry.file_name()?, entry.file_type()?))
        })
        .collect::<io::Result<Vec<_>>>()?;
    entries.sort_by(|(left, _), (right, _)| left.cmp(right));

    for (name, file_type) in entries {
        let path = join(dir, &name);
        if file_type.is_dir() {
            walk_into(root, &path, found)?;
            continue;
        }
        if !name.ends_with(FEATURE_EXTENSION) {
            continue;
        }
        if file_type.is_symlink() && !root.metadata(&path)?.is_file() {
            continue;
        }
        found.push(path);
    }
    Ok(())
}

/// Ambient file system anchored at a working directory.
///
/// Relative specifiers resolve against the working directory and may climb
/// out of it with `..`; absolute specifiers are used as given. Walked paths
/// keep the form of the specifier that produced them.
#[derive(Debug, Clone)]
pub struct AmbientFs {
    root: Utf8PathBuf,
}

impl AmbientFs {
    /// Anchor relative specifiers at `root`.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &Utf8Path) -> Utf8PathBuf {
        // Joining an absolute path replaces the root.
        self.root.join(path)
    }
}

impl FeatureFs for AmbientFs {
    fn kind(&self, path: &Utf8Path) -> io::Result<EntryKind> {
        let metadata = std::fs::metadata(self.resolve(path))?;
        Ok(if metadata.is_dir() {
            EntryKind::Dir
        } else {
            EntryKind::File
        })
    }

    fn read_file(&self, path: &Utf8Path) -> io::Result<Vec<u8>> {
        std::fs::read(self.resolve(path))
    }

    fn walk_features(&self, dir: &Utf8Path) -> io::Result<Vec<Utf8PathBuf>> {
        let base = self.resolve(dir);
        let mut found = Vec::new();
        for next in WalkDir::new(&base).follow_links(false).sort_by_file_name() {
            let entry = next.map_err(walk_error)?;
            let file_type = entry.file_type();
            if file_type.is_dir() {
                continue;
            }
            let is_feature = entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.ends_with(FEATURE_EXTENSION));
            if !is_feature {
                continue;
            }
            if file_type.is_symlink() && !std::fs::metadata(entry.path())?.is_file() {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(&base)
                .map_err(io::Error::other)?;
            let relative = Utf8Path::from_path(relative).ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("non UTF-8 path below {dir}"),
                )
            })?;
            found.push(join(dir, relative.as_str()));
        }
        Ok(found)
    }
}

fn walk_error(err: walkdir::Error) -> io::Error {
    let message = err.to_string();
    err.into_io_error()
        .unwrap_or_else(|| io::Error::other(message))
}

/// Join without the `./` prefix a walk rooted at `.` would otherwise add.
fn join(dir: &Utf8Path, name: &str) -> Utf8PathBuf {
    if dir.as_str() == "." {
        Utf8PathBuf::from(name)
    } else {
        dir.join(name)
    }
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests require explicit panic messages for debugging failures"
)]
mod tests {
    use cap_std::ambient_authority;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    use super::*;

    struct Workspace {
        temp: TempDir,
        dir: Dir,
    }

    #[fixture]
    fn workspace() -> Workspace {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = Utf8Path::from_path(temp.path()).expect("utf-8 temp path");
        let dir = Dir::open_ambient_dir(path, ambient_authority()).expect("open temp dir");
        for sub in ["features", "features/nested", "features/b"] {
            dir.create_dir_all(sub).expect("create sub dir");
        }
        for file in [
            "features/b/two.feature",
            "features/a.feature",
            "features/notes.txt",
            "features/nested/deep.feature",
            "features/UPPER.FEATURE",
        ] {
            dir.write(file, "Feature: x\n").expect("write file");
        }
        Workspace { temp, dir }
    }

    #[rstest]
    fn walks_depth_first_in_name_order(workspace: Workspace) {
        let found = workspace
            .dir
            .walk_features(Utf8Path::new("features"))
            .expect("walk features");
        assert_eq!(
            found,
            [
                Utf8PathBuf::from("features/a.feature"),
                Utf8PathBuf::from("features/b/two.feature"),
                Utf8PathBuf::from("features/nested/deep.feature"),
            ]
        );
    }

    #[rstest]
    fn walk_from_dot_has_no_prefix(workspace: Workspace) {
        let found = workspace
            .dir
            .walk_features(Utf8Path::new("."))
            .expect("walk root");
        let first = found.first().map(Utf8PathBuf::as_path);
        assert_eq!(first.map(Utf8Path::as_str), Some("features/a.feature"));
    }

    #[rstest]
    fn reports_entry_kinds(workspace: Workspace) {
        assert_eq!(
            workspace.dir.kind(Utf8Path::new("features")).expect("stat dir"),
            EntryKind::Dir
        );
        assert_eq!(
            workspace
                .dir
                .kind(Utf8Path::new("features/a.feature"))
                .expect("stat file"),
            EntryKind::File
        );
    }

    #[rstest]
    fn missing_paths_report_not_found(workspace: Workspace) {
        let Err(err) = workspace.dir.kind(Utf8Path::new("missing")) else {
            panic!("expected missing path error");
        };
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(!is_outside_root(&err));
    }

    #[rstest]
    #[case("../outside.feature")]
    #[case("features/../../outside.feature")]
    #[case("/etc/outside.feature")]
    fn dir_refuses_paths_leaving_the_root(workspace: Workspace, #[case] path: &str) {
        let path = Utf8Path::new(path);
        let kind = workspace.dir.kind(path).map(|_| ());
        let read = workspace.dir.read_file(path).map(|_| ());
        let walk = workspace.dir.walk_features(path).map(|_| ());
        for result in [kind, read, walk] {
            let Err(err) = result else {
                panic!("expected {path} to be refused");
            };
            assert!(is_outside_root(&err), "{err:?}");
        }
    }

    #[rstest]
    fn dir_allows_parent_steps_that_stay_inside(workspace: Workspace) {
        let kind = workspace
            .dir
            .kind(Utf8Path::new("features/nested/../a.feature"))
            .expect("stat file");
        assert_eq!(kind, EntryKind::File);
    }

    fn ambient(workspace: &Workspace) -> (AmbientFs, Utf8PathBuf) {
        let root = Utf8Path::from_path(workspace.temp.path())
            .expect("utf-8 temp path")
            .to_path_buf();
        (AmbientFs::new(root.clone()), root)
    }

    #[rstest]
    fn ambient_walk_matches_dir_walk(workspace: Workspace) {
        let (fs, _) = ambient(&workspace);
        let expected = workspace
            .dir
            .walk_features(Utf8Path::new("features"))
            .expect("walk dir");
        let found = fs
            .walk_features(Utf8Path::new("features"))
            .expect("walk ambient");
        assert_eq!(found, expected);
        let from_root = fs.walk_features(Utf8Path::new(".")).expect("walk root");
        let first = from_root.first().map(Utf8PathBuf::as_path);
        assert_eq!(first.map(Utf8Path::as_str), Some("features/a.feature"));
    }

    #[rstest]
    fn ambient_accepts_absolute_paths(workspace: Workspace) {
        let (fs, root) = ambient(&workspace);
        let file = root.join("features/a.feature");
        assert_eq!(fs.kind(&file).expect("stat file"), EntryKind::File);
        assert_eq!(fs.read_file(&file).expect("read file"), b"Feature: x\n");

        let dir = root.join("features/b");
        assert_eq!(
            fs.walk_features(&dir).expect("walk absolute dir"),
            [dir.join("two.feature")]
        );
    }

    #[rstest]
    #[case::absolute(true)]
    #[case::parent_relative(false)]
    fn ambient_reports_missing_paths_as_not_found(workspace: Workspace, #[case] absolute: bool) {
        let (fs, root) = ambient(&workspace);
        let path = if absolute {
            root.join("missing.feature")
        } else {
            Utf8PathBuf::from("../missing-bdd-discovery.feature")
        };
        let Err(err) = fs.kind(&path) else {
            panic!("expected {path} to be missing");
        };
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
