//! Homework record domain model
//!
//! A record lives for a single poll cycle: parsed from the raw response,
//! rendered into a notification, dropped.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::status::ReviewStatus;
use crate::error::SchemaError;

/// One homework entry from a poll response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeworkRecord {
    /// Name of the homework as shown to the student
    pub name: String,

    /// Current review status
    pub status: ReviewStatus,
}

impl HomeworkRecord {
    /// Parses one element of the `homeworks` array.
    ///
    /// Both `homework_name` and `status` must be present as strings, and the
    /// status must belong to the known set.
    pub fn from_value(raw: &Value) -> Result<Self, SchemaError> {
        let name = raw
            .get("homework_name")
            .and_then(Value::as_str)
            .ok_or(SchemaError::MissingField("homework_name"))?;

        let status = raw
            .get("status")
            .and_then(Value::as_str)
            .ok_or(SchemaError::MissingField("status"))?;

        Ok(Self {
            name: name.to_string(),
            status: ReviewStatus::parse(status)?,
        })
    }

    /// Renders the message announcing this record's status change.
    pub fn notification_text(&self) -> String {
        format!(
            "Изменился статус проверки работы \"{}\". {}",
            self.name,
            self.status.verdict()
        )
    }
}
