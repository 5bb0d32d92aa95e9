//! Helpers for rendering the feature listing.

use std::io::Write;

use bdd_discovery::{Feature, Pickle};
use eyre::{Context, Result};

/// Write each feature uri followed by one indented line per pickle.
pub(crate) fn write_features(writer: &mut dyn Write, features: &[Feature]) -> Result<()> {
    for feature in features {
        writeln!(writer, "{}", feature.uri)
            .wrap_err_with(|| format!("failed to write feature {}", feature.uri))?;
        for pickle in &feature.pickles {
            write_pickle(writer, pickle)?;
        }
    }
    Ok(())
}

fn write_pickle(writer: &mut dyn Write, pickle: &Pickle) -> Result<()> {
    let mut line = format!("  {} ({})", pickle.name, pickle.uri);
    append_pickle_tags(&mut line, pickle);
    writeln!(writer, "{line}")
        .wrap_err_with(|| format!("failed to write scenario {} :: {}", pickle.uri, pickle.name))
}

fn append_pickle_tags(line: &mut String, pickle: &Pickle) {
    let tags: Vec<&str> = pickle.tag_names().collect();
    if !tags.is_empty() {
        line.push_str(" [");
        line.push_str(&tags.join(", "));
        line.push(']');
    }
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests require explicit panic messages for debugging failures"
)]
mod tests {
    use bdd_discovery::{FeatureContent, parse_from_bytes};

    use super::*;

    #[test]
    fn lists_features_and_tagged_pickles() {
        let source = "\
Feature: listing
  @fast @smoke
  Scenario: tagged
    Given a step

  Scenario: plain
    Given a step
";
        let features = parse_from_bytes("", "", &[FeatureContent::new("list.feature", source)])
            .expect("discovery succeeds");
        let mut buffer = Vec::new();
        write_features(&mut buffer, &features).expect("write listing");
        assert_eq!(
            String::from_utf8(buffer).expect("utf-8 output"),
            "list.feature\n  tagged (list.feature) [@fast, @smoke]\n  plain (list.feature)\n"
        );
    }

    #[test]
    fn empty_result_writes_nothing() {
        let mut buffer = Vec::new();
        write_features(&mut buffer, &[]).expect("write listing");
        assert!(buffer.is_empty());
    }
}
