use crate::domain::operation::Operation;
use crate::domain::order::OrderValidationError;
use crate::domain::response::OrderConfirmResponse;
use miette::Diagnostic;
use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SatimError>;

/// Everything a gateway call or an order draft can fail with.
///
/// Transport, decode and gateway failures are kept apart so callers can
/// decide their own retry policy. The gateway's raw code and message are
/// preserved for diagnostics.
#[derive(Error, Diagnostic, Debug)]
pub enum SatimError {
    #[error("HTTP request failed: {0}")]
    #[diagnostic(code(satim::transport::http))]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("HTTP request to {operation} failed with status code: {status}")]
    #[diagnostic(code(satim::transport::status))]
    Status { operation: Operation, status: u16 },

    #[error("{operation} call did not complete within {after:?}")]
    #[diagnostic(code(satim::transport::timeout))]
    Timeout { operation: Operation, after: Duration },

    #[error("failed to decode {operation} response body: {source}")]
    #[diagnostic(code(satim::decode::body))]
    Decode {
        operation: Operation,
        #[source]
        source: serde_json::Error,
    },

    #[error("{operation} response carries no error code")]
    #[diagnostic(
        code(satim::decode::missing_error_code),
        help("the gateway always reports an error code; a body without one is treated as malformed")
    )]
    MissingErrorCode { operation: Operation },

    #[error(
        "gateway rejected {operation} with code {code}: {}",
        .message.as_deref().unwrap_or("no message")
    )]
    #[diagnostic(code(satim::gateway::rejected))]
    Gateway {
        operation: Operation,
        code: String,
        message: Option<String>,
    },

    #[error("order already confirmed")]
    #[diagnostic(code(satim::gateway::already_confirmed))]
    AlreadyConfirmed(Box<OrderConfirmResponse>),

    #[error("invalid order: {0}")]
    #[diagnostic(code(satim::order::invalid))]
    Validation(#[from] OrderValidationError),

    #[error("failed to encode request parameters: {0}")]
    #[diagnostic(code(satim::encode))]
    Encode(#[source] serde_json::Error),

    #[error("invalid gateway URL: {0}")]
    #[diagnostic(code(satim::config::url))]
    InvalidUrl(#[from] url::ParseError),

    #[error("configuration error: {0}")]
    #[diagnostic(code(satim::config::invalid))]
    Config(String),
}

impl SatimError {
    /// The gateway code behind a rejection, if the gateway produced one.
    pub fn gateway_code(&self) -> Option<&str> {
        match self {
            SatimError::Gateway { code, .. } => Some(code),
            SatimError::AlreadyConfirmed(response) => response.error_code.as_deref(),
            _ => None,
        }
    }
}

// Request URLs carry the merchant credentials in their query string.
impl From<reqwest::Error> for SatimError {
    fn from(err: reqwest::Error) -> Self {
        SatimError::Http(Box::new(err.without_url()))
    }
}
