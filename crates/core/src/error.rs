//! Validation error types.
//!
//! Validation never reports just the first problem: every violated field is
//! collected so callers can present field-level feedback in one pass.

use thiserror::Error;

/// A single violated field with a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct FieldViolation {
    /// Field name, using the wire-level (camelCase) spelling. Nested item
    /// violations are prefixed, e.g. `items[2].name`.
    pub field: String,
    /// Why the field was rejected.
    pub reason: String,
}

/// Shape/range validation failure for an item or envelope.
///
/// Carries the complete list of violated fields. An empty list is never
/// constructed; use [`Violations::finish`] to build one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed: {}", render(.violations))]
pub struct ValidationError {
    /// Every violated field, in the order the checks ran.
    pub violations: Vec<FieldViolation>,
}

fn render(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// Build an error from a single violation.
    pub fn single(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError {
            violations: vec![FieldViolation {
                field: field.into(),
                reason: reason.into(),
            }],
        }
    }

    /// Names of all violated fields, in check order.
    pub fn fields(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.field.as_str()).collect()
    }
}

/// Accumulator for field violations.
///
/// Checks push into this as they run; [`finish`](Violations::finish) turns a
/// non-empty accumulator into a [`ValidationError`].
#[derive(Debug, Default)]
pub struct Violations {
    list: Vec<FieldViolation>,
}

impl Violations {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation.
    pub fn push(&mut self, field: impl Into<String>, reason: impl Into<String>) {
        self.list.push(FieldViolation {
            field: field.into(),
            reason: reason.into(),
        });
    }

    /// Fold a nested error in, prefixing each field name.
    pub fn extend_prefixed(&mut self, prefix: &str, err: ValidationError) {
        for v in err.violations {
            self.list.push(FieldViolation {
                field: format!("{}.{}", prefix, v.field),
                reason: v.reason,
            });
        }
    }

    /// Whether any violation has been recorded.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// `Ok(())` if no violations were recorded, the full error otherwise.
    pub fn finish(self) -> Result<(), ValidationError> {
        if self.list.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { violations: self.list })
        }
    }
}
