use crate::error::Result;
use async_trait::async_trait;
use url::Url;

/// Status and raw body of an HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Performs a single GET against the gateway.
///
/// Implementations only move bytes; status checks and decoding belong to
/// the transport.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    async fn get(&self, url: &Url) -> Result<RawResponse>;
}

pub type HttpBackendBox = Box<dyn HttpBackend>;
