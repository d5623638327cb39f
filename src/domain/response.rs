//! Response payloads of the gateway endpoints.
//!
//! Every field is optional because the gateway omits whatever does not
//! apply to the order. Key casing differs between endpoints (`errorCode` on
//! register/refund, `ErrorCode` on status/confirm) and is mirrored exactly.

use super::status::OrderStatus;
use serde::{Deserialize, Serialize};

/// Success code shared by every endpoint.
pub const CODE_SUCCESS: &str = "0";
/// `getOrderStatus.do` reports this for orders that are not paid. Not a failure.
pub const CODE_STATUS_INFORMATIONAL: &str = "2";
/// `confirmOrder.do` reports this when the order was confirmed earlier.
pub const CODE_ALREADY_CONFIRMED: &str = "2";

/// Uniform access to the error code and message of a gateway payload.
pub trait GatewayReply {
    fn error_code(&self) -> Option<&str>;
    fn error_message(&self) -> Option<&str>;
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
pub struct RegisterOrderResponse {
    #[serde(rename = "orderId")]
    pub order_id: Option<String>,
    #[serde(rename = "formUrl")]
    pub form_url: Option<String>,
    #[serde(rename = "errorCode")]
    pub error_code: Option<String>,
    #[serde(rename = "errorMessage")]
    pub error_message: Option<String>,
}

impl RegisterOrderResponse {
    pub fn is_successful(&self) -> bool {
        self.error_code.as_deref() == Some(CODE_SUCCESS)
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
pub struct OrderConfirmResponse {
    #[serde(rename = "ErrorCode")]
    pub error_code: Option<String>,
    #[serde(rename = "ErrorMessage")]
    pub error_message: Option<String>,
    #[serde(rename = "depositAmount")]
    pub deposit_amount: Option<i64>,
    #[serde(rename = "approvalCode")]
    pub approval_code: Option<String>,
    pub currency: Option<String>,
    pub params: Option<serde_json::Value>,
    #[serde(rename = "actionCode")]
    pub action_code: Option<i64>,
    #[serde(rename = "actionCodeDescription")]
    pub action_code_description: Option<String>,
    #[serde(rename = "OrderStatus")]
    pub order_status: Option<i64>,
    #[serde(rename = "OrderNumber")]
    pub order_number: Option<String>,
    #[serde(rename = "Pan")]
    pub pan: Option<String>,
    #[serde(rename = "Amount")]
    pub amount: Option<i64>,
    pub expiration: Option<String>,
    #[serde(rename = "Ip")]
    pub ip: Option<String>,
    #[serde(rename = "SvfeResponse")]
    pub svfe_response: Option<String>,
}

impl OrderConfirmResponse {
    pub fn is_successful(&self) -> bool {
        self.error_code.as_deref() == Some(CODE_SUCCESS)
    }

    pub fn is_already_confirmed(&self) -> bool {
        self.error_code.as_deref() == Some(CODE_ALREADY_CONFIRMED)
    }

    pub fn status(&self) -> Option<OrderStatus> {
        self.order_status.map(OrderStatus::from_code)
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
pub struct OrderStatusResponse {
    #[serde(rename = "ErrorCode")]
    pub error_code: Option<String>,
    #[serde(rename = "ErrorMessage")]
    pub error_message: Option<String>,
    #[serde(rename = "OrderNumber")]
    pub order_number: Option<String>,
    #[serde(rename = "OrderStatus")]
    pub order_status: Option<i64>,
    #[serde(rename = "depositAmount")]
    pub deposit_amount: Option<i64>,
    pub currency: Option<String>,
    #[serde(rename = "Amount")]
    pub amount: Option<i64>,
    pub params: Option<serde_json::Value>,
    #[serde(rename = "approvalCode")]
    pub approval_code: Option<String>,
    #[serde(rename = "Pan")]
    pub pan: Option<String>,
    pub expiration: Option<String>,
    #[serde(rename = "Ip")]
    pub ip: Option<String>,
    #[serde(rename = "SvfeResponse")]
    pub svfe_response: Option<String>,
}

impl OrderStatusResponse {
    /// Code "2" is informational on this endpoint, not a failure.
    pub fn is_successful(&self) -> bool {
        matches!(self.error_code.as_deref(), Some(CODE_SUCCESS | CODE_STATUS_INFORMATIONAL))
    }

    /// The symbolic status, or `None` when the gateway omitted `OrderStatus`.
    pub fn status(&self) -> Option<OrderStatus> {
        self.order_status.map(OrderStatus::from_code)
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
pub struct OrderRefundResponse {
    #[serde(rename = "errorCode")]
    pub error_code: Option<String>,
    #[serde(rename = "errorMessage")]
    pub error_message: Option<String>,
}

impl OrderRefundResponse {
    pub fn is_successful(&self) -> bool {
        self.error_code.as_deref() == Some(CODE_SUCCESS)
    }
}

macro_rules! impl_gateway_reply {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl GatewayReply for $ty {
                fn error_code(&self) -> Option<&str> {
                    self.error_code.as_deref()
                }

                fn error_message(&self) -> Option<&str> {
                    self.error_message.as_deref()
                }
            }
        )+
    };
}

impl_gateway_reply!(
    RegisterOrderResponse,
    OrderConfirmResponse,
    OrderStatusResponse,
    OrderRefundResponse,
);
