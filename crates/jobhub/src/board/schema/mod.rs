//! Field-level validation for writes.
//!
//! Every create and update funnels through one of the `validate` functions here. A write is
//! either accepted whole or rejected with one [`FieldError`] per offending field.

mod employer;
mod job;
mod user;

pub use employer::{EmployerDraft, EmployerPatch};
pub use job::{JobDraft, JobPatch};
pub use user::{validate_user, UserUpdate};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::RecordId;

/// A single rejected field with the message shown to API callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every field-level problem found while validating one write.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("validation failed: {}", self.messages().join("; "))]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|error| error.message.clone()).collect()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|error| error.field == field)
    }

    /// Yields `value` only when nothing was recorded.
    pub(crate) fn finish<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

/// Identity and timestamps carried onto a validated record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    pub id: RecordId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Stamp {
    pub fn fresh(now: DateTime<Utc>) -> Self {
        Self {
            id: RecordId::generate(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touched(id: RecordId, created_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self {
            id,
            created_at,
            updated_at: now,
        }
    }
}

pub(crate) fn required_text(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<&str>,
    message: &str,
) -> String {
    let trimmed = value.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        errors.push(field, message);
    }
    trimmed.to_string()
}

pub(crate) fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

pub(crate) fn max_chars(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<&str>,
    max: usize,
    message: &str,
) {
    if value.is_some_and(|text| text.chars().count() > max) {
        errors.push(field, message);
    }
}

pub(crate) fn enum_value<T: Copy>(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<&str>,
    required_message: &str,
    all: &[T],
    label: fn(T) -> &'static str,
) -> Option<T> {
    let raw = value.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        errors.push(field, required_message);
        return None;
    }

    match all.iter().copied().find(|candidate| label(*candidate) == raw) {
        Some(parsed) => Some(parsed),
        None => {
            let allowed = all
                .iter()
                .map(|candidate| label(*candidate))
                .collect::<Vec<_>>()
                .join(", ");
            errors.push(
                field,
                format!("'{raw}' is not a valid {field}; expected one of: {allowed}"),
            );
            None
        }
    }
}

/// Patch semantics for text: absent or blank input leaves the current value in place.
pub(crate) fn overwrite_text(target: &mut Option<String>, incoming: Option<String>) {
    if let Some(value) = incoming.filter(|value| !value.trim().is_empty()) {
        *target = Some(value);
    }
}
