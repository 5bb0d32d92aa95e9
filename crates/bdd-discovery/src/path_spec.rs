//! Splits feature path specifiers into a base path and an optional line.
//!
//! Specifiers follow the `path/to/file.feature:12` convention. Only a
//! trailing colon followed by ASCII digits counts as a line suffix; anything
//! else is left untouched and treated as part of the path.

use std::sync::LazyLock;

use regex::Regex;

#[expect(
    clippy::expect_used,
    reason = "the pattern is a literal and compiling it cannot fail"
)]
static PATH_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":([0-9]+)$").expect("valid path line pattern"));

/// A feature specifier split into its path and line restriction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathLineSpec {
    /// The path with any `:<line>` suffix removed.
    pub base_path: String,
    /// The requested scenario line, when the specifier carried one.
    pub line: Option<usize>,
}

/// Split a raw specifier into its base path and optional line number.
///
/// A digit suffix that does not fit in `usize` is treated as part of the path
/// rather than reported as an error.
///
/// # Examples
///
/// ```
/// use bdd_discovery::extract_feature_path_line;
///
/// let spec = extract_feature_path_line("features/login.feature:12");
/// assert_eq!(spec.base_path, "features/login.feature");
/// assert_eq!(spec.line, Some(12));
///
/// let spec = extract_feature_path_line("features");
/// assert_eq!(spec.base_path, "features");
/// assert_eq!(spec.line, None);
/// ```
#[must_use]
pub fn extract_feature_path_line(raw: &str) -> PathLineSpec {
    let split = PATH_LINE_RE.captures(raw).and_then(|caps| {
        let whole = caps.get(0)?;
        let line = caps.get(1)?.as_str().parse::<usize>().ok()?;
        let base = raw.get(..whole.start())?;
        Some((base, line))
    });

    split.map_or_else(
        || PathLineSpec {
            base_path: raw.to_string(),
            line: None,
        },
        |(base, line)| PathLineSpec {
            base_path: base.to_string(),
            line: Some(line),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("features/login.feature:12", "features/login.feature", Some(12))]
    #[case("login.feature:0", "login.feature", Some(0))]
    #[case("dir/with:colon/a.feature:7", "dir/with:colon/a.feature", Some(7))]
    #[case("a.feature:3:4", "a.feature:3", Some(4))]
    fn strips_trailing_line_suffix(
        #[case] raw: &str,
        #[case] base: &str,
        #[case] line: Option<usize>,
    ) {
        let spec = extract_feature_path_line(raw);
        assert_eq!(spec.base_path, base);
        assert_eq!(spec.line, line);
    }

    #[rstest]
    #[case("features")]
    #[case("features/login.feature")]
    #[case("login.feature:")]
    #[case("login.feature:12a")]
    #[case("login.feature:-3")]
    #[case("C:")]
    fn leaves_specifiers_without_digit_suffix_untouched(#[case] raw: &str) {
        let spec = extract_feature_path_line(raw);
        assert_eq!(spec.base_path, raw);
        assert_eq!(spec.line, None);
    }

    #[test]
    fn overflowing_line_is_not_a_restriction() {
        let raw = "a.feature:99999999999999999999999999";
        let spec = extract_feature_path_line(raw);
        assert_eq!(spec.base_path, raw);
        assert_eq!(spec.line, None);
    }
}
