use crate::domain::operation::Operation;
use crate::domain::params::QueryParams;
use crate::domain::ports::HttpBackendBox;
use crate::domain::response::{
    CODE_ALREADY_CONFIRMED, CODE_STATUS_INFORMATIONAL, CODE_SUCCESS, GatewayReply,
    OrderConfirmResponse, OrderRefundResponse, OrderStatusResponse, RegisterOrderResponse,
};
use crate::error::{Result, SatimError};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

/// Issues one GET per gateway operation and applies that operation's
/// success policy to the decoded body.
///
/// The policies differ on purpose: code `"2"` is informational for
/// `getOrderStatus.do` but means "already confirmed" for `confirmOrder.do`,
/// and is a plain failure everywhere else.
pub struct GatewayTransport {
    endpoint: Url,
    backend: HttpBackendBox,
}

impl GatewayTransport {
    pub fn new(endpoint: Url, backend: HttpBackendBox) -> Self {
        Self { endpoint, backend }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// `<endpoint>/<operation>.do?<params>`, with params form-urlencoded.
    pub fn operation_url(&self, operation: Operation, params: &QueryParams) -> Result<Url> {
        let base = self.endpoint.as_str().trim_end_matches('/');
        let mut url = Url::parse(&format!("{base}/{}", operation.path()))?;
        if !params.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(params.iter().map(|(key, value)| (key, value.to_string())));
        }
        Ok(url)
    }

    pub async fn register_order_query(
        &self,
        params: &QueryParams,
    ) -> Result<RegisterOrderResponse> {
        let response: RegisterOrderResponse = self.fetch(Operation::Register, params).await?;
        if response.error_code() == Some(CODE_SUCCESS) {
            return Ok(response);
        }
        Err(rejected(Operation::Register, &response))
    }

    pub async fn get_order_status_query(
        &self,
        params: &QueryParams,
    ) -> Result<OrderStatusResponse> {
        let response: OrderStatusResponse = self.fetch(Operation::GetStatus, params).await?;
        match response.error_code() {
            Some(CODE_SUCCESS | CODE_STATUS_INFORMATIONAL) => Ok(response),
            _ => Err(rejected(Operation::GetStatus, &response)),
        }
    }

    pub async fn confirm_order_query(&self, params: &QueryParams) -> Result<OrderConfirmResponse> {
        let response: OrderConfirmResponse = self.fetch(Operation::Confirm, params).await?;
        match response.error_code() {
            Some(CODE_SUCCESS) => Ok(response),
            Some(CODE_ALREADY_CONFIRMED) => {
                warn!("order already confirmed");
                Err(SatimError::AlreadyConfirmed(Box::new(response)))
            }
            _ => Err(rejected(Operation::Confirm, &response)),
        }
    }

    pub async fn refund_order_query(&self, params: &QueryParams) -> Result<OrderRefundResponse> {
        let response: OrderRefundResponse = self.fetch(Operation::Refund, params).await?;
        if response.error_code() == Some(CODE_SUCCESS) {
            return Ok(response);
        }
        Err(rejected(Operation::Refund, &response))
    }

    #[instrument(skip(self, params))]
    async fn fetch<T>(&self, operation: Operation, params: &QueryParams) -> Result<T>
    where
        T: DeserializeOwned + GatewayReply,
    {
        // The query string carries credentials; only the path is logged.
        let url = self.operation_url(operation, params)?;
        debug!(path = url.path(), "sending gateway request");

        let raw = self.backend.get(&url).await?;
        if raw.status != 200 {
            warn!(status = raw.status, "gateway answered with non-200 status");
            return Err(SatimError::Status {
                operation,
                status: raw.status,
            });
        }

        let response: T = serde_json::from_slice(&raw.body)
            .map_err(|source| SatimError::Decode { operation, source })?;
        if response.error_code().is_none() {
            return Err(SatimError::MissingErrorCode { operation });
        }

        debug!(code = response.error_code(), "gateway replied");
        Ok(response)
    }
}

fn rejected<T: GatewayReply>(operation: Operation, response: &T) -> SatimError {
    let code = response.error_code().unwrap_or_default().to_string();
    let message = response.error_message().map(str::to_string);
    warn!(%operation, %code, message = message.as_deref(), "gateway rejected request");
    SatimError::Gateway {
        operation,
        code,
        message,
    }
}
