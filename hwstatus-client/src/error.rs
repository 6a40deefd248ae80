//! Error types for the homework statuses client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while polling the homework statuses API
///
/// Every variant carries the `from_date` the failing request was issued
/// with, so a log line is enough to replay the request by hand.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced an HTTP response
    #[error("request with from_date={from_date} failed: {source}")]
    Transport {
        /// Cursor the request was issued with
        from_date: i64,
        /// Underlying transport failure
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with something other than 200
    #[error("unexpected status {status} for from_date={from_date}")]
    UnexpectedStatus {
        /// HTTP status code of the response
        status: u16,
        /// Cursor the request was issued with
        from_date: i64,
    },

    /// The response body is not valid JSON
    #[error("undecodable response body for from_date={from_date}: {source}")]
    Decode {
        /// Cursor the request was issued with
        from_date: i64,
        /// Underlying JSON parse failure
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    /// HTTP status code carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Cursor value the failing request was issued with.
    pub fn from_date(&self) -> i64 {
        match self {
            Self::Transport { from_date, .. }
            | Self::UnexpectedStatus { from_date, .. }
            | Self::Decode { from_date, .. } => *from_date,
        }
    }

    /// Check if the server answered with a 5xx status
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::UnexpectedStatus { status, .. } if *status >= 500)
    }
}
