//! Pickle compilation for parsed `gherkin` features.
//!
//! Ids are handed out in two passes: first every AST node the pickles refer
//! to (scenarios, steps, examples rows) in document order, then every pickle
//! and pickle step. Background steps are prepended to each scenario that has
//! steps of its own; rule backgrounds follow the feature background.

use gherkin::{Background, Examples, Scenario, Step};

use super::ParsedDocument;
use crate::ids::IdGenerator;
use crate::model::{
    GherkinDocument, Pickle, PickleStep, PickleStepArgument, PickleTag, ScenarioNode,
};
use crate::tags::merge_tag_sets;

struct IdentifiedStep<'a> {
    id: String,
    step: &'a Step,
}

struct ExampleRow<'a> {
    id: String,
    values: &'a [String],
}

struct ExamplesBlock<'a> {
    tags: &'a [String],
    header: &'a [String],
    rows: Vec<ExampleRow<'a>>,
}

struct IdentifiedScenario<'a, 'b> {
    id: String,
    scenario: &'a Scenario,
    /// Tags inherited from the feature and enclosing rule.
    inherited_tags: Vec<String>,
    background: Vec<&'b IdentifiedStep<'a>>,
    steps: Vec<IdentifiedStep<'a>>,
    examples: Vec<ExamplesBlock<'a>>,
}

/// Outline substitutions for one examples row.
struct RowContext<'a> {
    row_id: &'a str,
    header: &'a [String],
    values: &'a [String],
    tags: &'a [String],
}

pub(super) fn compile(
    uri: &str,
    language: &str,
    feature: gherkin::Feature,
    ids: &mut IdGenerator,
) -> ParsedDocument {
    let (index, pickles) = {
        let feature_background = identify_background(feature.background.as_ref(), ids);
        let rule_backgrounds: Vec<_> = feature
            .rules
            .iter()
            .map(|rule| identify_background(rule.background.as_ref(), ids))
            .collect();

        let mut scenarios = Vec::new();
        let mut index = Vec::new();
        for scenario in &feature.scenarios {
            let inherited = merge_tag_sets([feature.tags.as_slice()]);
            let background = feature_background.iter().collect();
            let identified = identify_scenario(scenario, inherited, background, ids);
            index.push(scenario_node(&identified, None));
            scenarios.push(identified);
        }
        for (rule, rule_background) in feature.rules.iter().zip(&rule_backgrounds) {
            let inherited = merge_tag_sets([feature.tags.as_slice(), rule.tags.as_slice()]);
            for scenario in &rule.scenarios {
                let background = feature_background
                    .iter()
                    .chain(rule_background.iter())
                    .collect();
                let identified = identify_scenario(scenario, inherited.clone(), background, ids);
                index.push(scenario_node(&identified, Some(rule.name.clone())));
                scenarios.push(identified);
            }
        }

        let mut pickles = Vec::new();
        for scenario in &scenarios {
            if scenario.scenario.examples.is_empty() {
                pickles.push(compile_plain(uri, language, scenario, ids));
                continue;
            }
            for block in &scenario.examples {
                for row in &block.rows {
                    let ctx = RowContext {
                        row_id: &row.id,
                        header: block.header,
                        values: row.values,
                        tags: block.tags,
                    };
                    pickles.push(compile_outline_row(uri, language, scenario, &ctx, ids));
                }
            }
        }
        (index, pickles)
    };

    ParsedDocument {
        document: GherkinDocument {
            uri: uri.to_string(),
            feature: Some(feature),
            scenarios: index,
        },
        pickles,
    }
}

fn identify_background<'a>(
    background: Option<&'a Background>,
    ids: &mut IdGenerator,
) -> Vec<IdentifiedStep<'a>> {
    background.map_or_else(Vec::new, |bg| identify_steps(&bg.steps, ids))
}

fn identify_steps<'a>(steps: &'a [Step], ids: &mut IdGenerator) -> Vec<IdentifiedStep<'a>> {
    steps
        .iter()
        .map(|step| IdentifiedStep {
            id: ids.next_id(),
            step,
        })
        .collect()
}

fn identify_examples<'a>(
    examples: &'a Examples,
    ids: &mut IdGenerator,
) -> Option<ExamplesBlock<'a>> {
    let table = examples.table.as_ref()?;
    let (header, body) = table.rows.split_first()?;
    let rows = body
        .iter()
        .map(|values| ExampleRow {
            id: ids.next_id(),
            values,
        })
        .collect();
    Some(ExamplesBlock {
        tags: &examples.tags,
        header,
        rows,
    })
}

fn identify_scenario<'a, 'b>(
    scenario: &'a Scenario,
    inherited_tags: Vec<String>,
    background: Vec<&'b IdentifiedStep<'a>>,
    ids: &mut IdGenerator,
) -> IdentifiedScenario<'a, 'b> {
    let id = ids.next_id();
    let steps = identify_steps(&scenario.steps, ids);
    let examples = scenario
        .examples
        .iter()
        .filter_map(|examples| identify_examples(examples, ids))
        .collect();
    IdentifiedScenario {
        id,
        scenario,
        inherited_tags,
        background,
        steps,
        examples,
    }
}

fn scenario_node(identified: &IdentifiedScenario<'_, '_>, rule: Option<String>) -> ScenarioNode {
    ScenarioNode {
        id: identified.id.clone(),
        keyword: identified.scenario.keyword.clone(),
        name: identified.scenario.name.clone(),
        line: identified.scenario.position.line,
        rule,
    }
}

fn pickle_tags(layers: &[&[String]]) -> Vec<PickleTag> {
    merge_tag_sets(layers.iter().copied())
        .into_iter()
        .map(|name| PickleTag { name })
        .collect()
}

fn compile_plain(
    uri: &str,
    language: &str,
    scenario: &IdentifiedScenario<'_, '_>,
    ids: &mut IdGenerator,
) -> Pickle {
    let mut steps = Vec::new();
    if !scenario.steps.is_empty() {
        for step in scenario.background.iter().copied().chain(&scenario.steps) {
            steps.push(pickle_step(step, None, ids));
        }
    }
    Pickle {
        id: ids.next_id(),
        uri: uri.to_string(),
        name: scenario.scenario.name.clone(),
        language: language.to_string(),
        ast_node_ids: vec![scenario.id.clone()],
        tags: pickle_tags(&[
            scenario.inherited_tags.as_slice(),
            scenario.scenario.tags.as_slice(),
        ]),
        steps,
    }
}

fn compile_outline_row(
    uri: &str,
    language: &str,
    scenario: &IdentifiedScenario<'_, '_>,
    row: &RowContext<'_>,
    ids: &mut IdGenerator,
) -> Pickle {
    let mut steps = Vec::new();
    if !scenario.steps.is_empty() {
        for step in &scenario.background {
            steps.push(pickle_step(step, None, ids));
        }
        for step in &scenario.steps {
            steps.push(pickle_step(step, Some(row), ids));
        }
    }
    Pickle {
        id: ids.next_id(),
        uri: uri.to_string(),
        name: interpolate(&scenario.scenario.name, row),
        language: language.to_string(),
        ast_node_ids: vec![scenario.id.clone(), row.row_id.to_string()],
        tags: pickle_tags(&[
            scenario.inherited_tags.as_slice(),
            scenario.scenario.tags.as_slice(),
            row.tags,
        ]),
        steps,
    }
}

fn pickle_step(
    identified: &IdentifiedStep<'_>,
    row: Option<&RowContext<'_>>,
    ids: &mut IdGenerator,
) -> PickleStep {
    let step = identified.step;
    let substitute =
        |text: &str| row.map_or_else(|| text.to_string(), |ctx| interpolate(text, ctx));
    let argument = match (&step.docstring, &step.table) {
        (Some(doc), _) => Some(PickleStepArgument::DocString(substitute(doc.as_str()))),
        (None, Some(table)) => Some(PickleStepArgument::DataTable(
            table
                .rows
                .iter()
                .map(|cells| cells.iter().map(|cell| substitute(cell.as_str())).collect())
                .collect(),
        )),
        (None, None) => None,
    };
    let mut ast_node_ids = vec![identified.id.clone()];
    if let Some(ctx) = row {
        ast_node_ids.push(ctx.row_id.to_string());
    }
    PickleStep {
        id: ids.next_id(),
        keyword: step.keyword.clone(),
        step_type: step.ty,
        text: substitute(step.value.as_str()),
        ast_node_ids,
        argument,
    }
}

/// Replace `<column>` placeholders with the row's values.
fn interpolate(text: &str, row: &RowContext<'_>) -> String {
    row.header
        .iter()
        .zip(row.values)
        .fold(text.to_string(), |acc, (name, value)| {
            acc.replace(&format!("<{name}>"), value)
        })
}
