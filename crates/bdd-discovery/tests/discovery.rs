//! End-to-end discovery over real directories opened as capability handles.
#![expect(
    clippy::expect_used,
    reason = "fixtures fail loudly when the workspace cannot be created"
)]

use bdd_discovery::{DiscoveryError, Feature, FeatureDiscovery, parse_features};
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use rstest::{fixture, rstest};
use tempfile::TempDir;

const CHECKOUT: &str = "\
@shop
Feature: checkout

  Background:
    Given an empty basket

  Scenario: pay by card
    When I pay by card
    Then the order is placed

  @slow
  Scenario Outline: pay <amount>
    When I pay <amount>

    Examples:
      | amount |
      | 10     |
      | 20     |
";

const SEARCH: &str = "\
Feature: search

  Rule: results

    @smoke
    Scenario: find a product
      When I search for \"tea\"
";

const GERMAN: &str = "\
# language: de
Funktionalität: Anmeldung

  Szenario: gültiges Passwort
    Angenommen ein Benutzer
";

struct Project {
    _temp: TempDir,
    root: Dir,
}

#[fixture]
fn project() -> Project {
    let temp = tempfile::tempdir().expect("create temp dir");
    let path = Utf8Path::from_path(temp.path()).expect("utf-8 temp path");
    let root = Dir::open_ambient_dir(path, ambient_authority()).expect("open temp dir");
    root.create_dir_all("features/shop").expect("create features");
    root.create_dir_all("features/i18n").expect("create i18n");
    root.write("features/shop/checkout.feature", CHECKOUT)
        .expect("write checkout");
    root.write("features/search.feature", SEARCH)
        .expect("write search");
    root.write("features/i18n/login.feature", GERMAN)
        .expect("write german");
    root.write("features/README.md", "# docs\n").expect("write readme");
    root.write("features/empty.feature", "\n# todo\n")
        .expect("write empty");
    root.write("broken.feature", "Scenario without a feature\n")
        .expect("write broken");
    Project { _temp: temp, root }
}

fn uris(features: &[Feature]) -> Vec<&str> {
    features.iter().map(|f| f.uri.as_str()).collect()
}

fn names(feature: Option<&Feature>) -> Vec<&str> {
    feature
        .map(|f| f.pickles.iter().map(|p| p.name.as_str()).collect())
        .unwrap_or_default()
}

fn run(project: &Project, filter: &str, paths: &[&str]) -> Result<Vec<Feature>, DiscoveryError> {
    parse_features(&project.root, filter, "", paths)
}

#[rstest]
fn walks_directories_in_name_order(project: Project) {
    let features = run(&project, "", &["features"]).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(
        uris(&features),
        [
            "features/i18n/login.feature",
            "features/search.feature",
            "features/shop/checkout.feature",
        ]
    );
    assert_eq!(names(features.first()), ["gültiges Passwort"]);
    assert_eq!(names(features.get(1)), ["find a product"]);
    assert_eq!(
        names(features.get(2)),
        ["pay by card", "pay 10", "pay 20"]
    );
}

#[rstest]
fn line_specifier_selects_one_scenario(project: Project) {
    let features = run(&project, "", &["features/shop/checkout.feature:7"])
        .unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(uris(&features), ["features/shop/checkout.feature:7"]);
    assert_eq!(names(features.first()), ["pay by card"]);
    let steps: Vec<&str> = features
        .first()
        .and_then(|f| f.pickles.first())
        .map(|p| p.steps.iter().map(|s| s.text.as_str()).collect())
        .unwrap_or_default();
    assert_eq!(steps, ["an empty basket", "I pay by card", "the order is placed"]);
}

#[rstest]
fn same_file_with_and_without_line_are_distinct(project: Project) {
    let features = run(
        &project,
        "",
        &[
            "features/shop/checkout.feature:12",
            "features/shop/checkout.feature",
            "features/shop",
        ],
    )
    .unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(
        uris(&features),
        [
            "features/shop/checkout.feature:12",
            "features/shop/checkout.feature",
        ]
    );
    assert_eq!(names(features.first()), ["pay 10", "pay 20"]);
}

#[rstest]
#[case("@smoke", &["features/search.feature"])]
#[case("@shop and not @slow", &["features/shop/checkout.feature"])]
#[case("@nothing", &[])]
#[case("", &["features/i18n/login.feature", "features/search.feature", "features/shop/checkout.feature"])]
fn tag_filters_select_features(
    project: Project,
    #[case] filter: &str,
    #[case] expected: &[&str],
) {
    let features = run(&project, filter, &["features"]).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(uris(&features), expected);
}

#[rstest]
fn rule_scenarios_are_discovered(project: Project) {
    let features = run(&project, "", &["features/search.feature"])
        .unwrap_or_else(|e| panic!("{e}"));
    let rule = features
        .first()
        .and_then(|f| f.document.scenarios.first())
        .and_then(|s| s.rule.clone());
    assert_eq!(rule.as_deref(), Some("results"));
}

#[rstest]
fn explicit_dialect_is_used_without_header(project: Project) {
    let source = "Fonctionnalité: recherche\n  Scénario: trouver\n    Soit un produit\n";
    project
        .root
        .write("french.feature", source)
        .unwrap_or_else(|e| panic!("{e}"));
    let features = FeatureDiscovery::default()
        .with_dialect("fr")
        .parse_features(&project.root, "", &["french.feature"])
        .unwrap_or_else(|e| panic!("{e}"));
    let language = features
        .first()
        .and_then(|f| f.pickles.first())
        .map(|p| p.language.clone());
    assert_eq!(language.as_deref(), Some("fr"));
}

#[rstest]
fn missing_specifier_reports_not_available(project: Project) {
    let Err(err) = run(&project, "", &["features", "nope.feature:4"]) else {
        panic!("expected failure for a missing path");
    };
    assert_eq!(err.to_string(), "feature path \"nope.feature:4\" is not available");
}

#[rstest]
#[case("../outside.feature")]
#[case("/outside.feature:3")]
fn paths_outside_the_root_are_refused(project: Project, #[case] specifier: &str) {
    let Err(err) = run(&project, "", &[specifier]) else {
        panic!("expected failure for {specifier}");
    };
    assert!(matches!(err, DiscoveryError::OutsideRoot { .. }), "{err:?}");
    assert_eq!(
        err.to_string(),
        format!("feature path \"{specifier}\" is outside the root directory")
    );
}

#[rstest]
fn malformed_file_aborts_the_run(project: Project) {
    let Err(err) = run(&project, "", &["features", "broken.feature"]) else {
        panic!("expected parse failure");
    };
    assert!(err.to_string().starts_with("broken.feature - "), "{err}");
}

#[rstest]
fn invalid_tag_expression_aborts_the_run(project: Project) {
    let Err(err) = run(&project, "(@smoke", &["features"]) else {
        panic!("expected tag filter failure");
    };
    assert!(matches!(err, DiscoveryError::TagFilter(_)));
    assert!(err.to_string().contains("missing ')'"), "{err}");
}
