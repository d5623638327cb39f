use super::transport::GatewayTransport;
use crate::config::SatimConfig;
use crate::domain::operation::Operation;
use crate::domain::order::{FORCE_TERMINAL_ID_KEY, OrderBuilder, OrderDetails};
use crate::domain::params::QueryParams;
use crate::domain::ports::HttpBackendBox;
use crate::domain::response::{
    OrderConfirmResponse, OrderRefundResponse, OrderStatusResponse, RegisterOrderResponse,
};
use crate::error::{Result, SatimError};
use crate::infrastructure::http::ReqwestBackend;
use std::fmt;
use std::future::Future;
use std::time::Duration;
use tracing::{info, instrument};
use url::Url;

pub const TEST_ENDPOINT: &str = "https://test.satim.dz/payment/rest";
pub const LIVE_ENDPOINT: &str = "https://cib.satim.dz/payment/rest";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Which gateway host the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Test,
    Live,
}

impl Environment {
    pub fn from_test_mode(test_mode: bool) -> Self {
        if test_mode {
            Environment::Test
        } else {
            Environment::Live
        }
    }

    pub fn endpoint(self) -> &'static str {
        match self {
            Environment::Test => TEST_ENDPOINT,
            Environment::Live => LIVE_ENDPOINT,
        }
    }
}

/// Merchant credentials sent with every call.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub terminal_id: String,
}

impl Credentials {
    /// Creates a new set of merchant credentials.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        terminal_id: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            terminal_id: terminal_id.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .field("terminal_id", &self.terminal_id)
            .finish()
    }
}

/// Entry point for the gateway.
///
/// Binds an endpoint and merchant credentials to the four operations. The
/// client is immutable once built and every call is a single round trip:
/// no retries, no caching. Each call is bounded by the configured timeout,
/// and dropping the returned future abandons the request.
pub struct SatimClient {
    transport: GatewayTransport,
    credentials: Credentials,
    timeout: Duration,
}

impl SatimClient {
    /// Creates a client for the test or live gateway with default timeouts.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        terminal_id: impl Into<String>,
        test_mode: bool,
    ) -> Result<Self> {
        let backend = ReqwestBackend::new(DEFAULT_CONNECT_TIMEOUT)?;
        Self::with_backend(
            Credentials::new(username, password, terminal_id),
            Environment::from_test_mode(test_mode).endpoint(),
            Box::new(backend),
        )
    }

    /// Creates a client from a validated [`SatimConfig`].
    pub fn from_config(config: &SatimConfig) -> Result<Self> {
        config.validate()?;
        let backend = ReqwestBackend::from_config(config)?;
        let endpoint = config
            .endpoint
            .as_deref()
            .unwrap_or_else(|| Environment::from_test_mode(config.test_mode).endpoint());

        let client = Self::with_backend(
            Credentials::new(&config.username, &config.password, &config.terminal_id),
            endpoint,
            Box::new(backend),
        )?;
        Ok(client.with_timeout(config.timeout()))
    }

    /// Creates a client over any [`HttpBackend`](crate::domain::ports::HttpBackend).
    pub fn with_backend(
        credentials: Credentials,
        endpoint: &str,
        backend: HttpBackendBox,
    ) -> Result<Self> {
        let endpoint = Url::parse(endpoint)?;
        Ok(Self {
            transport: GatewayTransport::new(endpoint, backend),
            credentials,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Sets the deadline applied to each gateway call. Expiry yields
    /// [`SatimError::Timeout`].
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL every operation path is appended to.
    pub fn endpoint(&self) -> &Url {
        self.transport.endpoint()
    }

    /// Starts a new order draft with default currency and language.
    pub fn new_order(&self) -> OrderBuilder {
        OrderBuilder::new()
    }

    /// Registers an order and returns the gateway order id and payment form URL.
    ///
    /// The user-defined fields are sent as one JSON object in `jsonParams`,
    /// with `force_terminal_id` set to the merchant terminal.
    #[instrument(skip_all)]
    pub async fn register_order(&self, order: OrderDetails) -> Result<RegisterOrderResponse> {
        let (mut query, mut user_defined_fields) = order.into_parts();
        query.extend(self.credential_params());
        user_defined_fields.insert(
            FORCE_TERMINAL_ID_KEY.to_string(),
            self.credentials.terminal_id.clone(),
        );
        let json_params = serde_json::to_string(&user_defined_fields).map_err(SatimError::Encode)?;
        query.insert("jsonParams".to_string(), json_params.into());

        let response = self
            .bounded(
                Operation::Register,
                self.transport.register_order_query(&query),
            )
            .await?;
        info!(order_id = response.order_id.as_deref(), "order registered");
        Ok(response)
    }

    /// Confirms a paid order. An order confirmed earlier yields
    /// [`SatimError::AlreadyConfirmed`].
    #[instrument(skip(self))]
    pub async fn confirm_order(&self, order_id: &str) -> Result<OrderConfirmResponse> {
        let query = self.order_params(order_id);
        self.bounded(Operation::Confirm, self.transport.confirm_order_query(&query))
            .await
    }

    /// Fetches the current state of an order. Code `"2"` is accepted as
    /// informational.
    #[instrument(skip(self))]
    pub async fn get_order_status(&self, order_id: &str) -> Result<OrderStatusResponse> {
        let query = self.order_params(order_id);
        self.bounded(
            Operation::GetStatus,
            self.transport.get_order_status_query(&query),
        )
        .await
    }

    /// Refunds `amount` minor units of a deposited order.
    #[instrument(skip(self))]
    pub async fn refund_order(&self, order_id: &str, amount: i64) -> Result<OrderRefundResponse> {
        let mut query = self.order_params(order_id);
        query.insert("amount".to_string(), amount.into());
        self.bounded(Operation::Refund, self.transport.refund_order_query(&query))
            .await
    }

    fn credential_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.insert(
            "userName".to_string(),
            self.credentials.username.as_str().into(),
        );
        params.insert(
            "password".to_string(),
            self.credentials.password.as_str().into(),
        );
        params
    }

    fn order_params(&self, order_id: &str) -> QueryParams {
        let mut params = self.credential_params();
        params.insert("orderId".to_string(), order_id.into());
        params
    }

    async fn bounded<T, F>(&self, operation: Operation, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| SatimError::Timeout {
                operation,
                after: self.timeout,
            })?
    }
}
