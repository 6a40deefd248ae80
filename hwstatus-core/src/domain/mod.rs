//! Core domain types
//!
//! The fundamental entities of the watcher: the closed set of review
//! statuses with their verdict texts, and the homework record parsed out of
//! a poll response.

pub mod homework;
pub mod status;

pub use homework::HomeworkRecord;
pub use status::ReviewStatus;
