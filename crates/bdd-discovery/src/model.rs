//! Documents and scenario instances produced by discovery.
//!
//! A [`Feature`] couples a parsed Gherkin document with the pickles compiled
//! from it. Pickles refer back to their originating scenario by id through
//! [`Pickle::ast_node_ids`]; the document keeps a flat scenario index so that
//! lookup stays cheap without walking the AST.

use gherkin::StepType;

/// One discovered feature document and its selected pickles.
#[derive(Debug, Clone)]
pub struct Feature {
    /// Resolved path or in-memory name, suffixed with `:<line>` when a line
    /// restriction was applied. [`GherkinDocument::uri`] keeps the bare path.
    pub uri: String,
    /// The parsed document.
    pub document: GherkinDocument,
    /// Pickles that survived line and tag filtering.
    pub pickles: Vec<Pickle>,
    /// Raw bytes the document was parsed from.
    pub content: Vec<u8>,
}

impl Feature {
    /// Look up the scenario a pickle was compiled from.
    #[must_use]
    pub fn find_scenario(&self, id: &str) -> Option<&ScenarioNode> {
        self.document.find_scenario(id)
    }
}

/// A parsed Gherkin source plus the scenario index used for pickle lookups.
#[derive(Debug, Clone)]
pub struct GherkinDocument {
    /// Path or name the document was parsed from.
    ///
    /// Never carries a `:<line>` suffix, even when [`Feature::uri`] and the
    /// pickle URIs do.
    pub uri: String,
    /// The feature, or `None` when the source held no Gherkin content.
    pub feature: Option<gherkin::Feature>,
    /// Every scenario and scenario outline in document order, rules included.
    pub scenarios: Vec<ScenarioNode>,
}

impl GherkinDocument {
    /// Find a scenario by its AST node id.
    #[must_use]
    pub fn find_scenario(&self, id: &str) -> Option<&ScenarioNode> {
        self.scenarios.iter().find(|scenario| scenario.id == id)
    }
}

/// Index entry for a scenario or scenario outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioNode {
    /// AST node id assigned during parsing.
    pub id: String,
    /// Keyword as written in the source (`Scenario`, `Scenario Outline`, ...).
    pub keyword: String,
    /// Scenario title.
    pub name: String,
    /// 1-based line of the scenario keyword.
    pub line: usize,
    /// Name of the enclosing rule, if any.
    pub rule: Option<String>,
}

/// An executable scenario instance.
///
/// Plain scenarios compile to one pickle; outlines compile to one pickle per
/// examples row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pickle {
    /// Pickle id.
    pub id: String,
    /// Source uri, suffixed with `:<line>` when selected by line.
    pub uri: String,
    /// Scenario name with outline placeholders substituted.
    pub name: String,
    /// Gherkin dialect the source was parsed with.
    pub language: String,
    /// Scenario id, followed by the examples row id for outline pickles.
    pub ast_node_ids: Vec<String>,
    /// Inherited and own tags.
    pub tags: Vec<PickleTag>,
    /// Background steps followed by scenario steps.
    pub steps: Vec<PickleStep>,
}

impl Pickle {
    /// The id of the scenario this pickle was compiled from.
    #[must_use]
    pub fn scenario_id(&self) -> Option<&str> {
        self.ast_node_ids.first().map(String::as_str)
    }

    /// Iterate over tag names, each with its leading `@`.
    pub fn tag_names(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|tag| tag.name.as_str())
    }
}

/// A tag attached to a pickle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickleTag {
    /// Tag name including the leading `@`.
    pub name: String,
}

/// A single step of a pickle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickleStep {
    /// Pickle step id.
    pub id: String,
    /// Keyword as written in the source, including `And` and `But`.
    pub keyword: String,
    /// Given/When/Then type resolved by the parser.
    pub step_type: StepType,
    /// Step text with outline placeholders substituted.
    pub text: String,
    /// Source step id, followed by the examples row id for outline steps.
    pub ast_node_ids: Vec<String>,
    /// Attached doc string or data table.
    pub argument: Option<PickleStepArgument>,
}

/// Argument attached to a pickle step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickleStepArgument {
    /// Doc string content.
    DocString(String),
    /// Data table rows.
    DataTable(Vec<Vec<String>>),
}

/// Named in-memory feature content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureContent {
    /// Name used as the document uri.
    pub name: String,
    /// Raw Gherkin source.
    pub contents: Vec<u8>,
}

impl FeatureContent {
    /// Create named content from anything convertible to bytes.
    #[must_use]
    pub fn new(name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }
}
