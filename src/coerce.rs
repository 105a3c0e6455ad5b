// Field coercion: turns free-form text typed at a prompt into a decision
// about a field slot. Both functions are pure.

use crate::book::{Field, FieldValue};

/// Outcome of interpreting one line of input against a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Leave the field as it is.
    Skip,
    /// Replace the field. `None` clears it to null.
    Set(Option<FieldValue>),
}

impl Edit {
    pub fn should_update(&self) -> bool {
        matches!(self, Edit::Set(_))
    }
}

/// Decide how an update prompt's raw input applies to a field's current value.
///
/// Only an exactly empty line or a single space skips; any other input
/// is trimmed before interpretation. A field currently holding an integer
/// keeps integers when the input parses, but non-numeric input is stored
/// as text rather than rejected.
pub fn decide(current: Option<&FieldValue>, raw: &str) -> Edit {
    if raw.is_empty() || raw == " " {
        return Edit::Skip;
    }

    let candidate = raw.trim();
    if is_null(candidate) {
        return Edit::Set(None);
    }

    if let Some(FieldValue::Int(_)) = current {
        return match candidate.parse::<i64>() {
            Ok(n) => Edit::Set(Some(FieldValue::Int(n))),
            Err(_) => Edit::Set(Some(FieldValue::text(candidate))),
        };
    }

    if looks_like_integer(candidate) {
        // Digit runs too long for i64 fall through to text.
        if let Ok(n) = candidate.parse::<i64>() {
            return Edit::Set(Some(FieldValue::Int(n)));
        }
    }

    Edit::Set(Some(FieldValue::text(candidate)))
}

/// Coerce the input given for a field while a new book is being added.
///
/// Blank or `null` input leaves the field absent. Numeric fields keep only
/// a valid integer; anything else becomes absent.
pub fn for_new(field: Field, raw: &str) -> Option<FieldValue> {
    let candidate = raw.trim();
    if candidate.is_empty() || is_null(candidate) {
        return None;
    }

    if field.is_numeric() {
        candidate.parse::<i64>().ok().map(FieldValue::Int)
    } else {
        Some(FieldValue::text(candidate))
    }
}

fn is_null(candidate: &str) -> bool {
    candidate.eq_ignore_ascii_case("null")
}

/// Optional leading `-` followed by at least one ASCII digit and nothing else.
fn looks_like_integer(candidate: &str) -> bool {
    let digits = candidate.strip_prefix('-').unwrap_or(candidate);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
