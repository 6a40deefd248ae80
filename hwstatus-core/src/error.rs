//! Schema violation taxonomy
//!
//! A schema violation is any deviation of a decoded response from the
//! documented shape. Decoding failures are not represented here; those are
//! the client's business.

use thiserror::Error;

/// Ways a decoded poll response can deviate from the documented shape
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The response body is not a JSON object
    #[error("response is not a mapping")]
    NotAMapping,

    /// The response object has no `homeworks` key
    #[error("response is missing the homeworks key")]
    MissingHomeworks,

    /// The `homeworks` value is not an array
    #[error("homeworks is not a list")]
    HomeworksNotAList,

    /// A homework record lacks a required field
    #[error("homework record is missing field {0}")]
    MissingField(&'static str),

    /// A homework record carries a status outside the known set
    #[error("unknown homework status {0:?}")]
    UnknownStatus(String),
}
