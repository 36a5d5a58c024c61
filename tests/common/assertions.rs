//! Domain-specific assertion macros for condy harnesses.
//!
//! These add context-rich failure messages that make it clear *which* match
//! set property was violated.

use condy_core::Candidate;

/// Display names of `list`, in order. Missing names render as `"?"`.
pub fn names(list: &[Candidate]) -> Vec<String> {
    list.iter().map(|c| c.display("name", "?").into_owned()).collect()
}

/// Assert the match set holds exactly the named candidates, in order.
///
/// ```rust
/// assert_names!(selector.matches(), ["Ana Silva", "Anderson Lima"]);
/// ```
#[macro_export]
macro_rules! assert_names {
    ($matches:expr, [$($name:expr),* $(,)?]) => {{
        let actual = $crate::common::names(&$matches);
        let expected: Vec<String> = vec![$($name.to_string()),*];
        pretty_assertions::assert_eq!(actual, expected, "match set names differ");
    }};
}

/// Assert every candidate of `$subset` appears in `$all`, preserving order.
#[macro_export]
macro_rules! assert_ordered_subset {
    ($subset:expr, $all:expr) => {{
        let subset: &[condy_core::Candidate] = &$subset;
        let all: &[condy_core::Candidate] = &$all;
        let mut rest = all.iter();
        for (i, item) in subset.iter().enumerate() {
            if !rest.any(|c| c == item) {
                panic!(
                    "assert_ordered_subset! failed: match #{} ({:?}) is missing from the candidate list or out of order",
                    i,
                    item.text("name")
                );
            }
        }
    }};
}
