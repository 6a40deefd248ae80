//! Homework statuses HTTP client
//!
//! A small, single-purpose client for the homework review status API: one
//! GET per call, fetching every homework whose review status changed since
//! a given cursor.
//!
//! The decoded body is returned as raw JSON on purpose. The caller decides
//! whether the shape is acceptable, so a body that fails to parse at all
//! ([`ClientError::Decode`]) stays distinguishable from a parseable body of
//! the wrong shape (the caller's schema checks).
//!
//! # Example
//!
//! ```no_run
//! use hwstatus_client::HomeworkClient;
//!
//! #[tokio::main]
//! async fn main() -> hwstatus_client::Result<()> {
//!     let client = HomeworkClient::new(
//!         "https://practicum.yandex.ru/api/user_api/homework_statuses/",
//!         "oauth-token",
//!     );
//!
//!     let response = client.homework_statuses(0).await?;
//!     println!("{response}");
//!     Ok(())
//! }
//! ```

pub mod error;

// Re-export commonly used types
pub use error::{ClientError, Result};

use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use tracing::debug;

/// HTTP client for the homework statuses endpoint
#[derive(Debug, Clone)]
pub struct HomeworkClient {
    /// Full URL of the homework statuses endpoint
    endpoint: String,
    /// OAuth token sent with every request
    token: String,
    /// HTTP client instance
    client: Client,
}

impl HomeworkClient {
    /// Create a new client for the given endpoint and OAuth token
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_client(endpoint, token, Client::new())
    }

    /// Create a client with a caller-configured HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use hwstatus_client::HomeworkClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = HomeworkClient::with_client(
    ///     "https://practicum.yandex.ru/api/user_api/homework_statuses/",
    ///     "oauth-token",
    ///     http_client,
    /// );
    /// ```
    pub fn with_client(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        client: Client,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: token.into(),
            client,
        }
    }

    /// Get the endpoint this client polls
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch homework status changes registered after `from_date`
    ///
    /// Issues exactly one GET with `from_date` as a query parameter and an
    /// `Authorization: OAuth <token>` header. The body is decoded as JSON
    /// but not validated beyond decodability.
    pub async fn homework_statuses(&self, from_date: i64) -> Result<Value> {
        debug!(from_date, endpoint = %self.endpoint, "requesting homework statuses");

        let response = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|source| ClientError::Transport { from_date, source })?;

        let status = response.status();

        // The API contract pins success to exactly 200.
        if status.as_u16() != 200 {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                from_date,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| ClientError::Transport { from_date, source })?;

        serde_json::from_str(&body).map_err(|source| ClientError::Decode { from_date, source })
    }
}
