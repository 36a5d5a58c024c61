//! Filterable selector — query in, bounded match set out, selection reported
//! back to the caller.
//!
//! The selector owns its transient UI state (dropdown visibility, the
//! "has been focused" latch, the highlighted row) and a copy of the current
//! query. The candidate list is handed in explicitly and never mutated.
//! Results flow back to the caller as [`SelectorEvent`] values; the caller
//! owns whatever happens next (filling other form fields, for example).
//!
//! # States
//!
//! | State    | Meaning                                                   |
//! |----------|-----------------------------------------------------------|
//! | `Idle`   | query below the minimum length, dropdown hidden           |
//! | `Open`   | query long enough, at least one match, dropdown visible   |
//! | `Empty`  | query long enough, no matches, focused before: no-results |
//! | `Closed` | dropdown hidden right after a selection or a clear        |
//!
//! The state is derived from the underlying flags on every call to
//! [`Selector::state`], so it can never drift from the match set.

use crate::candidate::Candidate;
use crate::matcher::{self, Matcher, SubstringMatcher, DEFAULT_MIN_QUERY_LEN, DEFAULT_PRIMARY_FIELD};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Placeholder shown for candidates missing their primary field.
pub const DEFAULT_PLACEHOLDER: &str = "no name";

/// Text of the no-results presentation.
pub const DEFAULT_NO_RESULTS_TEXT: &str = "no results found";

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorState {
    Idle,
    Open,
    Empty,
    Closed,
}

impl SelectorState {
    /// Whether anything (matches or the no-results message) is shown below
    /// the field.
    pub fn is_dropdown_visible(self) -> bool {
        matches!(self, SelectorState::Open | SelectorState::Empty)
    }
}

/// Notifications from the selector to its caller.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorEvent {
    /// The user edited the query. Emitted on every keystroke and on clear.
    QueryChanged(String),
    /// The user picked a candidate. Emitted exactly once per selection.
    Selected(Candidate),
    /// The host should dismiss the input method (leave insert mode).
    DismissInput,
}

/// Glyph shown before the field text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Icon {
    Car,
    Person,
    Key,
    #[default]
    None,
}

impl FromStr for Icon {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "car" | "driver" => Ok(Icon::Car),
            "person" | "resident" => Ok(Icon::Person),
            "key" => Ok(Icon::Key),
            "" | "none" => Ok(Icon::None),
            other => Err(format!("unknown icon: {other}")),
        }
    }
}

impl Icon {
    /// Parse an icon name, falling back to [`Icon::None`] for unknown names.
    pub fn parse_lossy(s: &str) -> Self {
        s.parse().unwrap_or_else(|err: String| {
            tracing::warn!(%err, "falling back to no icon");
            Icon::None
        })
    }
}

/// Caller-supplied configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorOptions {
    /// Field used as the main display text and matched first.
    pub primary_field: String,
    /// Optional second display line, also matched.
    pub secondary_field: Option<String>,
    pub icon: Icon,
    /// Minimum query length, in characters, before matching starts.
    pub min_query_len: usize,
    /// Shown for candidates missing `primary_field`.
    pub placeholder: String,
    pub no_results_text: String,
    /// A disabled selector ignores focus and selection.
    pub disabled: bool,
}

impl Default for SelectorOptions {
    fn default() -> Self {
        Self {
            primary_field: DEFAULT_PRIMARY_FIELD.to_string(),
            secondary_field: None,
            icon: Icon::None,
            min_query_len: DEFAULT_MIN_QUERY_LEN,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            no_results_text: DEFAULT_NO_RESULTS_TEXT.to_string(),
            disabled: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Selector
// ---------------------------------------------------------------------------

pub struct Selector {
    options: SelectorOptions,
    candidates: Vec<Candidate>,
    default_matcher: SubstringMatcher,
    custom_matcher: Option<Arc<dyn Matcher>>,
    query: String,
    matches: Vec<Candidate>,
    /// Set by typing at/above the minimum and by focus; cleared by select/clear.
    visible: bool,
    /// One-way latch: never reset once the field has been focused.
    has_focused: bool,
    /// True between a select/clear and the next keystroke or focus.
    dismissed: bool,
    highlighted: usize,
    error: Option<String>,
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selector")
            .field("options", &self.options)
            .field("candidates", &self.candidates.len())
            .field("custom_matcher", &self.custom_matcher.is_some())
            .field("query", &self.query)
            .field("matches", &self.matches.len())
            .field("state", &self.state())
            .finish()
    }
}

impl Selector {
    pub fn new(options: SelectorOptions, candidates: Vec<Candidate>) -> Self {
        let default_matcher =
            SubstringMatcher::new(options.primary_field.clone(), options.secondary_field.clone());
        Self {
            options,
            candidates,
            default_matcher,
            custom_matcher: None,
            query: String::new(),
            matches: Vec::new(),
            visible: false,
            has_focused: false,
            dismissed: false,
            highlighted: 0,
            error: None,
        }
    }

    /// Replace the default substring policy with a custom one.
    pub fn with_matcher(mut self, matcher: impl Matcher + 'static) -> Self {
        self.custom_matcher = Some(Arc::new(matcher));
        self.recompute();
        self
    }

    pub fn options(&self) -> &SelectorOptions {
        &self.options
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// The current match set, at most [`matcher::MAX_MATCHES`] long.
    pub fn matches(&self) -> &[Candidate] {
        &self.matches
    }

    pub fn has_focused(&self) -> bool {
        self.has_focused
    }

    pub fn is_disabled(&self) -> bool {
        self.options.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.options.disabled = disabled;
    }

    /// Error message displayed under the field, owned by the caller.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    pub fn state(&self) -> SelectorState {
        let long_enough = self.query_len() >= self.options.min_query_len;
        if self.visible && long_enough {
            if !self.matches.is_empty() {
                return SelectorState::Open;
            }
            if self.has_focused {
                return SelectorState::Empty;
            }
        }
        if self.dismissed {
            SelectorState::Closed
        } else {
            SelectorState::Idle
        }
    }

    /// Index of the highlighted row within [`Selector::matches`].
    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn highlighted_candidate(&self) -> Option<&Candidate> {
        self.matches.get(self.highlighted)
    }

    // --- operations ---------------------------------------------------------

    /// Keystroke-driven query update: re-evaluates the match set and shows or
    /// hides the dropdown according to the minimum length.
    pub fn update_query(&mut self, query: impl Into<String>) -> SelectorState {
        let before = self.state();
        self.query = query.into();
        self.recompute();
        self.visible = self.query_len() >= self.options.min_query_len;
        self.dismissed = false;
        self.log_transition(before, "update_query");
        self.state()
    }

    /// Programmatic query update from the caller (e.g. writing the selected
    /// name back into the field). Re-evaluates the match set without
    /// reopening a dismissed dropdown.
    pub fn set_query(&mut self, query: impl Into<String>) -> SelectorState {
        let before = self.state();
        self.query = query.into();
        self.recompute();
        self.log_transition(before, "set_query");
        self.state()
    }

    /// Replace the candidate list. The match set is re-evaluated against the
    /// current query; visibility is unchanged.
    pub fn set_candidates(&mut self, candidates: Vec<Candidate>) {
        let before = self.state();
        self.candidates = candidates;
        self.recompute();
        self.log_transition(before, "set_candidates");
    }

    pub fn focus(&mut self) -> SelectorState {
        if self.options.disabled {
            tracing::debug!("selector: focus ignored (disabled)");
            return self.state();
        }
        let before = self.state();
        self.has_focused = true;
        if self.query_len() >= self.options.min_query_len {
            self.visible = true;
            self.dismissed = false;
        }
        self.log_transition(before, "focus");
        self.state()
    }

    /// Report `candidate` to the caller and close the dropdown.
    ///
    /// Returns the selection followed by an input-dismiss request, or nothing
    /// when the selector is disabled.
    pub fn select(&mut self, candidate: Candidate) -> Vec<SelectorEvent> {
        if self.options.disabled {
            tracing::debug!("selector: select ignored (disabled)");
            return Vec::new();
        }
        tracing::debug!(id = ?candidate.id, "selector: candidate selected");
        self.close_with(candidate)
    }

    /// Select the highlighted match, if the dropdown is showing one.
    pub fn select_highlighted(&mut self) -> Vec<SelectorEvent> {
        if self.options.disabled || self.state() != SelectorState::Open {
            return Vec::new();
        }
        match self.highlighted_candidate().cloned() {
            Some(candidate) => {
                tracing::debug!(
                    key = %candidate.key(self.highlighted),
                    "selector: highlighted candidate selected"
                );
                self.close_with(candidate)
            }
            None => Vec::new(),
        }
    }

    fn close_with(&mut self, candidate: Candidate) -> Vec<SelectorEvent> {
        let before = self.state();
        self.visible = false;
        self.dismissed = true;
        self.log_transition(before, "select");
        vec![SelectorEvent::Selected(candidate), SelectorEvent::DismissInput]
    }

    /// Empty the query and hide the dropdown. Never reports a selection.
    pub fn clear(&mut self) -> Vec<SelectorEvent> {
        let before = self.state();
        self.query.clear();
        self.recompute();
        self.visible = false;
        self.dismissed = true;
        self.log_transition(before, "clear");
        vec![SelectorEvent::QueryChanged(String::new())]
    }

    /// Move the highlight through the match set, wrapping at both ends.
    /// Returns `false` when there is nothing to move through.
    pub fn move_highlight(&mut self, direction: isize) -> bool {
        if self.state() != SelectorState::Open {
            return false;
        }
        let len = self.matches.len() as isize;
        let current = self.highlighted as isize;
        self.highlighted = ((current + direction + len) % len) as usize;
        true
    }

    // --- internals ----------------------------------------------------------

    fn query_len(&self) -> usize {
        self.query.chars().count()
    }

    fn recompute(&mut self) {
        let policy: &dyn Matcher = match &self.custom_matcher {
            Some(custom) => custom.as_ref(),
            None => &self.default_matcher,
        };
        self.matches = matcher::match_set(
            &self.candidates,
            &self.query,
            self.options.min_query_len,
            policy,
        );
        self.highlighted = 0;
    }

    fn log_transition(&self, before: SelectorState, op: &'static str) {
        let after = self.state();
        tracing::debug!(
            op,
            query = %self.query,
            matches = self.matches.len(),
            from = ?before,
            to = ?after,
            "selector: transition"
        );
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn drivers() -> Vec<Candidate> {
        vec![
            Candidate::new().with_field("name", "Ana Silva").with_field("plate", "ABC1234"),
            Candidate::new().with_field("name", "Bruno Costa").with_field("plate", "XYZ9999"),
            Candidate::new().with_field("name", "Anderson Lima").with_field("plate", "RST2B34"),
        ]
    }

    fn selector() -> Selector {
        let options = SelectorOptions {
            secondary_field: Some("plate".to_string()),
            ..SelectorOptions::default()
        };
        Selector::new(options, drivers())
    }

    #[test]
    fn select_outside_match_set_leaves_highlight_alone() {
        let mut s = selector();
        s.update_query("an");
        s.move_highlight(1);
        let outsider = Candidate::new().with_id("drv-x").with_field("name", "Zé Ninguém");
        let events = s.select(outsider.clone());
        assert_eq!(events, vec![SelectorEvent::Selected(outsider), SelectorEvent::DismissInput]);
        assert_eq!(s.highlighted(), 1);
        assert_eq!(s.state(), SelectorState::Closed);
    }

    #[test]
    fn starts_idle() {
        let s = selector();
        assert_eq!(s.state(), SelectorState::Idle);
        assert!(s.matches().is_empty());
    }

    #[test]
    fn typing_opens_and_closes() {
        let mut s = selector();
        assert_eq!(s.update_query("A"), SelectorState::Idle);
        assert_eq!(s.update_query("An"), SelectorState::Open);
        assert_eq!(s.matches().len(), 2);
        assert_eq!(s.update_query("A"), SelectorState::Idle);
    }

    #[test]
    fn no_results_requires_prior_focus() {
        let mut s = selector();
        assert_eq!(s.update_query("zz"), SelectorState::Idle);
        assert_eq!(s.focus(), SelectorState::Empty);
        assert_eq!(s.update_query("zzz"), SelectorState::Empty);
    }

    #[test]
    fn focus_latch_never_resets() {
        let mut s = selector();
        s.focus();
        s.clear();
        s.update_query("zz");
        assert!(s.has_focused());
        assert_eq!(s.state(), SelectorState::Empty);
    }

    #[test]
    fn select_closes_and_reports_once() {
        let mut s = selector();
        s.focus();
        s.update_query("Bru");
        let chosen = s.matches()[0].clone();
        let events = s.select(chosen.clone());
        assert_eq!(
            events,
            vec![SelectorEvent::Selected(chosen), SelectorEvent::DismissInput]
        );
        assert_eq!(s.state(), SelectorState::Closed);
    }

    #[test]
    fn programmatic_query_keeps_dropdown_closed() {
        let mut s = selector();
        s.update_query("Bru");
        let chosen = s.matches()[0].clone();
        s.select(chosen);
        assert_eq!(s.set_query("Bruno Costa"), SelectorState::Closed);
        assert_eq!(s.matches().len(), 1);
    }

    #[test]
    fn focus_reopens_after_select() {
        let mut s = selector();
        s.update_query("An");
        s.select_highlighted();
        assert_eq!(s.state(), SelectorState::Closed);
        assert_eq!(s.focus(), SelectorState::Open);
    }

    #[test]
    fn clear_empties_query_without_selection() {
        let mut s = selector();
        s.update_query("Ana");
        let events = s.clear();
        assert_eq!(events, vec![SelectorEvent::QueryChanged(String::new())]);
        assert_eq!(s.query(), "");
        assert_eq!(s.state(), SelectorState::Closed);
        assert_eq!(s.focus(), SelectorState::Closed);
    }

    #[test]
    fn highlight_wraps() {
        let mut s = selector();
        s.update_query("An");
        assert!(s.move_highlight(-1));
        assert_eq!(s.highlighted(), 1);
        assert!(s.move_highlight(1));
        assert_eq!(s.highlighted(), 0);
    }

    #[test]
    fn highlight_resets_on_recompute() {
        let mut s = selector();
        s.update_query("An");
        s.move_highlight(1);
        s.update_query("And");
        assert_eq!(s.highlighted(), 0);
    }

    #[test]
    fn select_highlighted_when_hidden_is_noop() {
        let mut s = selector();
        s.update_query("A");
        assert!(s.select_highlighted().is_empty());
    }

    #[test]
    fn disabled_ignores_focus_and_select() {
        let mut s = selector();
        s.set_disabled(true);
        s.focus();
        assert!(!s.has_focused());
        s.update_query("Ana");
        assert!(s.select_highlighted().is_empty());
        assert_eq!(s.state(), SelectorState::Open);
    }

    #[test]
    fn new_candidates_recompute_matches() {
        let mut s = selector();
        s.update_query("Car");
        assert!(s.matches().is_empty());
        s.set_candidates(vec![Candidate::new().with_field("name", "Carla Dias")]);
        assert_eq!(s.state(), SelectorState::Open);
    }

    #[test]
    fn custom_matcher_is_used() {
        let plate_prefix = |all: &[Candidate], q: &str| {
            all.iter()
                .filter(|c| c.text("plate").is_some_and(|p| p.starts_with(q)))
                .cloned()
                .collect::<Vec<_>>()
        };
        let mut s = selector().with_matcher(plate_prefix);
        s.update_query("XY");
        assert_eq!(s.matches().len(), 1);
        s.update_query("Ana");
        assert!(s.matches().is_empty());
    }

    #[test]
    fn icon_parsing() {
        assert_eq!("Car".parse::<Icon>(), Ok(Icon::Car));
        assert_eq!("none".parse::<Icon>(), Ok(Icon::None));
        assert!("rocket".parse::<Icon>().is_err());
        assert_eq!(Icon::parse_lossy("rocket"), Icon::None);
    }
}
