// Field-level value handling for form inputs.
//
// A form field arrives from the host framework either empty or as some
// textual/numeric payload. It is normalized exactly once at the boundary
// into `FieldValue`; everything downstream works on the tagged union
// instead of re-checking for null/number/string at every step.

use serde::{Deserialize, Serialize};

/// A single transient field value as captured at an edit event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldValue {
    Empty,
    Numeric(String),
}

impl FieldValue {
    /// Normalizes raw textual input. Whitespace-only input counts as empty.
    pub fn from_input(raw: Option<&str>) -> Self {
        match raw {
            None => FieldValue::Empty,
            Some(s) if s.trim().is_empty() => FieldValue::Empty,
            Some(s) => FieldValue::Numeric(s.trim().to_string()),
        }
    }

    /// Normalizes a value that already arrived as a number.
    pub fn from_number(value: f64) -> Self {
        FieldValue::Numeric(format!("{}", value))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Empty)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Empty => None,
            FieldValue::Numeric(text) => Some(text.as_str()),
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Empty
    }
}

/// Result of a field-level format check. `Rejected` carries the user-facing
/// reason; the form-binding layer decides how to apply it (reset the field,
/// show the message). The check itself performs no side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Accepted,
    Rejected { reason: String },
}

impl ValidationOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationOutcome::Accepted)
    }
}

/// User-facing message for an over-long integer part. The example uses the
/// German comma notation shown to users, while the check below splits on
/// `.` only; see DESIGN.md for the recorded discrepancy.
pub const DECIMAL_FORMAT_MESSAGE: &str =
    "Only 2 digits are allowed before the decimal separator. Example: 15,42";

/// Checks that the integer part of a wage field has at most 2 characters.
///
/// Empty input is always accepted. The integer part is the substring before
/// the first `.`, or the whole string when no `.` is present, so a comma
/// separator keeps the full string in the count and a leading `-` counts
/// toward the budget.
pub fn validate_decimal_format(value: &FieldValue) -> ValidationOutcome {
    let text = match value {
        FieldValue::Empty => return ValidationOutcome::Accepted,
        FieldValue::Numeric(text) => text,
    };

    let integer_part = match text.find('.') {
        Some(pos) => &text[..pos],
        None => text.as_str(),
    };

    if integer_part.chars().count() > 2 {
        ValidationOutcome::Rejected {
            reason: DECIMAL_FORMAT_MESSAGE.to_string(),
        }
    } else {
        ValidationOutcome::Accepted
    }
}
