//! Restricts a feature to the scenario starting at a given line.

use tracing::trace;

use crate::model::Feature;

/// Keep only the pickles whose scenario starts exactly at `line`.
///
/// Without a line the feature is left untouched. With one, the feature uri
/// and every kept pickle uri gain a `:<line>` suffix, even when no pickle
/// matched. An outline line selects every row of that outline.
pub fn filter_by_line(feature: &mut Feature, line: Option<usize>) {
    let Some(line) = line else {
        return;
    };
    let suffix = format!(":{line}");
    feature.uri.push_str(&suffix);

    let document = &feature.document;
    let pickles = std::mem::take(&mut feature.pickles);
    feature.pickles = pickles
        .into_iter()
        .filter_map(|mut pickle| {
            let scenario = pickle
                .scenario_id()
                .and_then(|id| document.find_scenario(id));
            debug_assert!(
                scenario.is_some(),
                "pickle {} refers to an unknown scenario",
                pickle.id
            );
            let scenario_line = scenario?.line;
            trace!(pickle = %pickle.name, scenario_line, line, "matching pickle by line");
            if scenario_line != line {
                return None;
            }
            pickle.uri.push_str(&suffix);
            Some(pickle)
        })
        .collect();
}
