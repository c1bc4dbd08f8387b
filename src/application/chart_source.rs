// Data source trait for widget chart payloads
use crate::domain::error::DecodeError;
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Why a widget's data could not be fetched.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response.
    #[error("request to {endpoint:?} failed: {reason}")]
    Transport { endpoint: String, reason: String },

    /// The endpoint answered with a non-success status.
    #[error("{endpoint:?} answered with status {status}")]
    Status { endpoint: String, status: u16 },

    /// The response body was not JSON.
    #[error("{endpoint:?} returned an unreadable body: {reason}")]
    Body { endpoint: String, reason: String },

    /// The JSON did not have the chart shape.
    #[error("unusable chart payload: {0}")]
    Malformed(#[from] DecodeError),
}

#[async_trait]
pub trait ChartDataSource: Send + Sync {
    /// Read the raw chart payload behind `endpoint`
    async fn fetch(&self, endpoint: &str) -> Result<Value, FetchError>;
}
