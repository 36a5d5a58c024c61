//! condy-core — the driver selector and access-request model behind condy.
//!
//! # Architecture
//!
//! ```text
//! candidate directory ──► Selector ──► SelectorEvent::Selected ──► AccessRequestDraft
//!                           │                                          │
//!                        Matcher                                   validate()
//! ```
//!
//! Everything here is synchronous and UI-agnostic; `condy-tui` drives it from
//! the terminal event loop.

pub mod candidate;
pub mod config;
pub mod error;
pub mod matcher;
pub mod selector;
pub mod validation;

pub use candidate::Candidate;
pub use error::{CondyError, Result};
pub use matcher::{match_set, Matcher, SubstringMatcher, MAX_MATCHES};
pub use selector::{Icon, Selector, SelectorEvent, SelectorOptions, SelectorState};
pub use validation::{AccessRequest, AccessRequestDraft, Field, FieldError, ValidationReport};
