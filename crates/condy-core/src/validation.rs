//! Access request form — the selector's caller.
//!
//! An [`AccessRequestDraft`] holds the raw text of each form field. Picking a
//! driver in the selector fills the name and plate via
//! [`AccessRequestDraft::apply_selection`]; [`AccessRequestDraft::validate`]
//! turns the draft into an [`AccessRequest`] or a [`ValidationReport`] listing
//! every failing field.

use crate::candidate::Candidate;
use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

/// Maximum length of the free-text note, in characters.
pub const NOTE_MAX_CHARS: usize = 140;

/// Legacy `ABC1234` / `ABC-1234` and Mercosul `ABC1D23`, upper case.
static PLATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z]{3}(?:-?[0-9]{4}|[0-9][A-Z][0-9]{2})$").expect("plate regex is valid")
});

// ---------------------------------------------------------------------------
// Field + errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    DriverName,
    Plate,
    ValidUntil,
    Note,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::DriverName, Field::Plate, Field::ValidUntil, Field::Note];
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::DriverName => write!(f, "driver name"),
            Field::Plate => write!(f, "plate"),
            Field::ValidUntil => write!(f, "valid until"),
            Field::Note => write!(f, "note"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("{0} is required")]
    Required(Field),

    #[error("invalid plate {0:?}: expected ABC1234 or ABC1D23")]
    InvalidPlate(String),

    #[error("invalid date {0:?}: expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("{0} is in the past")]
    DateInPast(NaiveDate),

    #[error("note is too long ({len} > {max} characters)")]
    NoteTooLong { len: usize, max: usize },
}

/// Every field error found by one validation pass, in form order.
#[derive(Error, Debug, Clone, Default, PartialEq, Eq)]
#[error("{} field(s) failed validation", .errors.len())]
pub struct ValidationReport {
    pub errors: Vec<(Field, FieldError)>,
}

impl ValidationReport {
    pub fn error_for(&self, field: Field) -> Option<&FieldError> {
        self.errors
            .iter()
            .find_map(|(f, err)| (*f == field).then_some(err))
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Draft + request
// ---------------------------------------------------------------------------

/// A validated access request, ready to hand to whatever submits it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<String>,
    pub driver_name: String,
    /// Upper case, without a dash.
    pub plate: String,
    pub valid_until: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessRequestDraft {
    pub driver_id: Option<String>,
    pub driver_name: String,
    pub plate: String,
    pub valid_until: String,
    pub note: String,
}

impl AccessRequestDraft {
    /// Text of `field` as typed.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::DriverName => &self.driver_name,
            Field::Plate => &self.plate,
            Field::ValidUntil => &self.valid_until,
            Field::Note => &self.note,
        }
    }

    pub fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::DriverName => &mut self.driver_name,
            Field::Plate => &mut self.plate,
            Field::ValidUntil => &mut self.valid_until,
            Field::Note => &mut self.note,
        }
    }

    /// Fill name and plate from a selected driver. Missing fields leave the
    /// current text untouched.
    pub fn apply_selection(&mut self, candidate: &Candidate, name_field: &str, plate_field: &str) {
        self.driver_id = candidate.id.clone();
        if let Some(name) = candidate.text(name_field) {
            self.driver_name = name.into_owned();
        }
        if let Some(plate) = candidate.text(plate_field) {
            self.plate = plate.into_owned();
        }
        tracing::debug!(
            driver_id = ?self.driver_id,
            driver_name = %self.driver_name,
            plate = %self.plate,
            "access form: driver applied"
        );
    }

    /// Validate every field against `today`.
    pub fn validate(&self, today: NaiveDate) -> Result<AccessRequest, ValidationReport> {
        let mut report = ValidationReport::default();

        let driver_name = self.driver_name.trim();
        if driver_name.is_empty() {
            report.errors.push((Field::DriverName, FieldError::Required(Field::DriverName)));
        }

        let plate = match normalize_plate(&self.plate) {
            Ok(plate) => Some(plate),
            Err(err) => {
                report.errors.push((Field::Plate, err));
                None
            }
        };

        let valid_until = match parse_valid_until(&self.valid_until, today) {
            Ok(date) => Some(date),
            Err(err) => {
                report.errors.push((Field::ValidUntil, err));
                None
            }
        };

        let note = self.note.trim();
        let note_len = note.chars().count();
        if note_len > NOTE_MAX_CHARS {
            report.errors.push((
                Field::Note,
                FieldError::NoteTooLong {
                    len: note_len,
                    max: NOTE_MAX_CHARS,
                },
            ));
        }

        match (plate, valid_until) {
            (Some(plate), Some(valid_until)) if report.is_empty() => Ok(AccessRequest {
                driver_id: self.driver_id.clone(),
                driver_name: driver_name.to_string(),
                plate,
                valid_until,
                note: (!note.is_empty()).then(|| note.to_string()),
            }),
            _ => {
                tracing::debug!(errors = report.errors.len(), "access form: validation failed");
                Err(report)
            }
        }
    }
}

/// Upper-case a plate, check its shape, and drop the dash.
pub fn normalize_plate(raw: &str) -> Result<String, FieldError> {
    let plate = raw.trim().to_ascii_uppercase();
    if plate.is_empty() {
        return Err(FieldError::Required(Field::Plate));
    }
    if !PLATE_RE.is_match(&plate) {
        return Err(FieldError::InvalidPlate(raw.trim().to_string()));
    }
    Ok(plate.replace('-', ""))
}

fn parse_valid_until(raw: &str, today: NaiveDate) -> Result<NaiveDate, FieldError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FieldError::Required(Field::ValidUntil));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| FieldError::InvalidDate(raw.to_string()))?;
    if date < today {
        return Err(FieldError::DateInPast(date));
    }
    Ok(date)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
