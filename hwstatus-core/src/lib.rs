//! hwstatus core
//!
//! Domain types and pure logic for the homework status watcher.
//!
//! This crate contains:
//! - Domain types: review statuses, verdicts, homework records
//! - Validation: structural checks on the raw poll response
//!
//! Nothing in here performs I/O; the HTTP side lives in `hwstatus-client`
//! and the loop that ties everything together lives in the bot binary.

pub mod domain;
pub mod error;
pub mod validate;

// Re-export commonly used types
pub use domain::{HomeworkRecord, ReviewStatus};
pub use error::SchemaError;
