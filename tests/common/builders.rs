//! Test builders — ergonomic constructors for candidates and selectors.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use condy_core::{Candidate, Icon, Selector, SelectorOptions};

// ---------------------------------------------------------------------------
// CandidateBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Candidate`] test fixtures.
///
/// ```rust
/// let driver = CandidateBuilder::driver("Ana Silva", "ABC1234").id("drv-1").build();
/// ```
pub struct CandidateBuilder {
    candidate: Candidate,
}

impl CandidateBuilder {
    pub fn new() -> Self {
        Self {
            candidate: Candidate::new(),
        }
    }

    /// A driver record with a name and a plate.
    pub fn driver(name: &str, plate: &str) -> Self {
        Self::new().field("name", name).field("plate", plate)
    }

    pub fn id(mut self, id: &str) -> Self {
        self.candidate = self.candidate.with_id(id);
        self
    }

    pub fn field(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.candidate = self.candidate.with_field(key, value);
        self
    }

    pub fn build(self) -> Candidate {
        self.candidate
    }
}

// ---------------------------------------------------------------------------
// SelectorBuilder
// ---------------------------------------------------------------------------

/// Builds a [`Selector`] over `candidates` with name/plate display fields.
pub struct SelectorBuilder {
    options: SelectorOptions,
    candidates: Vec<Candidate>,
}

impl SelectorBuilder {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self {
            options: SelectorOptions {
                secondary_field: Some("plate".to_string()),
                icon: Icon::Car,
                ..SelectorOptions::default()
            },
            candidates,
        }
    }

    pub fn min_len(mut self, n: usize) -> Self {
        self.options.min_query_len = n;
        self
    }

    pub fn primary(mut self, field: &str) -> Self {
        self.options.primary_field = field.to_string();
        self
    }

    pub fn no_secondary(mut self) -> Self {
        self.options.secondary_field = None;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.options.disabled = true;
        self
    }

    pub fn build(self) -> Selector {
        Selector::new(self.options, self.candidates)
    }
}
