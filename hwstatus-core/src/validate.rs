//! Structural checks on the raw poll response
//!
//! The client hands the decoded body over without looking at its shape, so
//! a malformed response surfaces here as a [`SchemaError`] rather than as a
//! decode failure.

use serde_json::Value;

use crate::error::SchemaError;

/// Checks the response shape and returns the raw `homeworks` array.
///
/// The array is returned untouched, most-recent-first as the API sends it.
/// An empty array is valid and means "nothing new since the cursor".
pub fn validate_response(raw: &Value) -> Result<&Vec<Value>, SchemaError> {
    let object = raw.as_object().ok_or(SchemaError::NotAMapping)?;

    let homeworks = object
        .get("homeworks")
        .ok_or(SchemaError::MissingHomeworks)?;

    homeworks.as_array().ok_or(SchemaError::HomeworksNotAList)
}

/// Server-reported watermark for the next poll, when present.
pub fn current_date(raw: &Value) -> Option<i64> {
    raw.get("current_date").and_then(Value::as_i64)
}
