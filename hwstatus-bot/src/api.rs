//! Polling seam over the homework statuses client
//!
//! The watcher talks to the API through this trait so cycle behavior can be
//! exercised against in-memory fakes.

use async_trait::async_trait;
use hwstatus_client::{ClientError, HomeworkClient};
use serde_json::Value;

/// Source of homework status changes
#[async_trait]
pub trait HomeworkApi: Send + Sync {
    /// Fetches status changes registered after `from_date`.
    async fn homework_statuses(&self, from_date: i64) -> Result<Value, ClientError>;
}

#[async_trait]
impl HomeworkApi for HomeworkClient {
    async fn homework_statuses(&self, from_date: i64) -> Result<Value, ClientError> {
        HomeworkClient::homework_statuses(self, from_date).await
    }
}
