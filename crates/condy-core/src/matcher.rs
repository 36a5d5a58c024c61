//! Matching policy — decides which candidates satisfy a query.
//!
//! The default policy is a case-insensitive substring test against the
//! primary and (optional) secondary display fields. Callers can plug in their
//! own policy by implementing [`Matcher`], or by passing any
//! `Fn(&[Candidate], &str) -> Vec<Candidate>` closure.
//!
//! Whatever the policy, [`match_set`] enforces the two selector invariants:
//! nothing matches below the minimum query length, and at most
//! [`MAX_MATCHES`] candidates come back, in the order the policy produced.

use crate::candidate::Candidate;

/// Upper bound on the number of candidates in a match set.
pub const MAX_MATCHES: usize = 10;

/// Default minimum query length (in characters) before matching starts.
pub const DEFAULT_MIN_QUERY_LEN: usize = 2;

/// Default primary display field.
pub const DEFAULT_PRIMARY_FIELD: &str = "name";

/// A filtering strategy over a candidate list.
///
/// Implementations receive the full candidate list and the raw query and
/// return the subset to show. The selector truncates the result to
/// [`MAX_MATCHES`] but does not re-filter or reorder it.
pub trait Matcher: Send + Sync {
    fn filter(&self, candidates: &[Candidate], query: &str) -> Vec<Candidate>;
}

impl<F> Matcher for F
where
    F: Fn(&[Candidate], &str) -> Vec<Candidate> + Send + Sync,
{
    fn filter(&self, candidates: &[Candidate], query: &str) -> Vec<Candidate> {
        self(candidates, query)
    }
}

// ---------------------------------------------------------------------------
// Default policy
// ---------------------------------------------------------------------------

/// Case-insensitive substring match on a primary and optional secondary field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstringMatcher {
    primary: String,
    secondary: Option<String>,
}

impl Default for SubstringMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_PRIMARY_FIELD, None::<String>)
    }
}

impl SubstringMatcher {
    pub fn new(primary: impl Into<String>, secondary: Option<impl Into<String>>) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.map(Into::into),
        }
    }

    pub fn primary(&self) -> &str {
        &self.primary
    }

    pub fn secondary(&self) -> Option<&str> {
        self.secondary.as_deref()
    }

    /// `needle` must already be lowercase.
    fn is_match(&self, candidate: &Candidate, needle: &str) -> bool {
        let contains = |field: &str| {
            candidate
                .text(field)
                .is_some_and(|text| text.to_lowercase().contains(needle))
        };
        contains(&self.primary) || self.secondary.as_deref().is_some_and(contains)
    }
}

impl Matcher for SubstringMatcher {
    fn filter(&self, candidates: &[Candidate], query: &str) -> Vec<Candidate> {
        let needle = query.to_lowercase();
        candidates
            .iter()
            .filter(|c| self.is_match(c, &needle))
            .take(MAX_MATCHES)
            .cloned()
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Compute the match set for `query`.
///
/// Pure: the result depends only on the arguments. Empty when the query is
/// shorter than `min_query_len` characters; never longer than
/// [`MAX_MATCHES`].
pub fn match_set(
    candidates: &[Candidate],
    query: &str,
    min_query_len: usize,
    matcher: &dyn Matcher,
) -> Vec<Candidate> {
    if query.chars().count() < min_query_len {
        return Vec::new();
    }
    let mut matches = matcher.filter(candidates, query);
    matches.truncate(MAX_MATCHES);
    matches
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
