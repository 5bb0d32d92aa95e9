//! Shared fakes for unit tests.

use std::collections::BTreeMap;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};

use crate::fs::{EntryKind, FEATURE_EXTENSION, FeatureFs};
use crate::model::{Feature, GherkinDocument, Pickle, PickleTag, ScenarioNode};

/// In-memory file system keyed by path.
#[derive(Debug, Default)]
pub(crate) struct MemoryFs {
    files: BTreeMap<String, Vec<u8>>,
    dirs: Vec<String>,
    denied: Vec<String>,
}

impl MemoryFs {
    pub(crate) fn with_file(mut self, path: &str, contents: &str) -> Self {
        self.files
            .insert(path.to_string(), contents.as_bytes().to_vec());
        self
    }

    pub(crate) fn with_dir(mut self, path: &str) -> Self {
        self.dirs.push(path.to_string());
        self
    }

    pub(crate) fn with_denied(mut self, path: &str) -> Self {
        self.denied.push(path.to_string());
        self
    }

    fn check(&self, path: &Utf8Path) -> io::Result<()> {
        if self.denied.iter().any(|denied| denied == path.as_str()) {
            return Err(io::Error::from(io::ErrorKind::PermissionDenied));
        }
        Ok(())
    }
}

impl FeatureFs for MemoryFs {
    fn kind(&self, path: &Utf8Path) -> io::Result<EntryKind> {
        self.check(path)?;
        if self.dirs.iter().any(|dir| dir == path.as_str()) {
            Ok(EntryKind::Dir)
        } else if self.files.contains_key(path.as_str()) {
            Ok(EntryKind::File)
        } else {
            Err(io::Error::from(io::ErrorKind::NotFound))
        }
    }

    fn read_file(&self, path: &Utf8Path) -> io::Result<Vec<u8>> {
        self.check(path)?;
        self.files
            .get(path.as_str())
            .cloned()
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }

    fn walk_features(&self, dir: &Utf8Path) -> io::Result<Vec<Utf8PathBuf>> {
        let prefix = format!("{dir}/");
        Ok(self
            .files
            .keys()
            .filter(|path| path.starts_with(&prefix) && path.ends_with(FEATURE_EXTENSION))
            .map(Utf8PathBuf::from)
            .collect())
    }
}

/// Build a pickle compiled from `scenario_id` with the given tags.
pub(crate) fn pickle(id: &str, uri: &str, scenario_id: &str, tags: &[&str]) -> Pickle {
    Pickle {
        id: id.to_string(),
        uri: uri.to_string(),
        name: format!("pickle {id}"),
        language: "en".to_string(),
        ast_node_ids: vec![scenario_id.to_string()],
        tags: tags
            .iter()
            .map(|tag| PickleTag {
                name: (*tag).to_string(),
            })
            .collect(),
        steps: Vec::new(),
    }
}

/// Build a feature whose scenario index holds `(id, line)` entries.
pub(crate) fn feature(uri: &str, scenarios: &[(&str, usize)], pickles: Vec<Pickle>) -> Feature {
    let document = GherkinDocument {
        uri: uri.to_string(),
        feature: Some(gherkin_feature()),
        scenarios: scenarios
            .iter()
            .map(|(id, line)| ScenarioNode {
                id: (*id).to_string(),
                keyword: "Scenario".to_string(),
                name: format!("scenario {id}"),
                line: *line,
                rule: None,
            })
            .collect(),
    };
    Feature {
        uri: uri.to_string(),
        document,
        pickles,
        content: Vec::new(),
    }
}

#[expect(
    clippy::expect_used,
    reason = "the fixture source is a literal known to parse"
)]
fn gherkin_feature() -> gherkin::Feature {
    let env = gherkin::GherkinEnv::new("en").expect("english dialect");
    gherkin::Feature::parse("Feature: fixture\n", env).expect("fixture feature parses")
}
