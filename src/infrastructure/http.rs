use crate::config::SatimConfig;
use crate::domain::ports::{HttpBackend, RawResponse};
use crate::error::Result;
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::instrument;
use url::Url;

/// Production backend issuing real HTTP requests through `reqwest`.
///
/// The inner `Client` pools connections, so one backend should be shared
/// for the lifetime of the [`SatimClient`](crate::application::client::SatimClient).
/// Only the connect phase is bounded here; the deadline for a whole call
/// belongs to the client.
#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    client: Client,
}

impl ReqwestBackend {
    /// Creates a new backend whose connections give up after `connect_timeout`.
    pub fn new(connect_timeout: Duration) -> Result<Self> {
        let client = Self::client_builder(connect_timeout).build()?;
        Ok(Self { client })
    }

    /// Creates a new backend from the connect timeout in `config`.
    pub fn from_config(config: &SatimConfig) -> Result<Self> {
        Self::new(config.connect_timeout())
    }

    /// The builder behind [`ReqwestBackend::new`], for callers that need to
    /// add TLS or proxy settings before handing the client to [`with_client`].
    ///
    /// [`with_client`]: ReqwestBackend::with_client
    pub fn client_builder(connect_timeout: Duration) -> ClientBuilder {
        Client::builder().connect_timeout(connect_timeout)
    }

    /// Wraps an existing client, e.g. one with custom TLS or proxy settings.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    #[instrument(skip_all, fields(path = url.path()))]
    async fn get(&self, url: &Url) -> Result<RawResponse> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        Ok(RawResponse::new(status, body.to_vec()))
    }
}
