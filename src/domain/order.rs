use super::params::{ParamValue, QueryParams};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;

/// Smallest amount, in minor units, the gateway accepts for DZD orders.
pub const MIN_AMOUNT: i64 = 5000;
/// Maximum length of a user-defined field key or value.
pub const MAX_USER_FIELD_LEN: usize = 20;
/// User-defined field the client injects on registration.
pub const FORCE_TERMINAL_ID_KEY: &str = "force_terminal_id";

/// ISO 4217 numeric currency code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Currency(String);

impl Currency {
    pub const DZD: &'static str = "012";

    /// Creates a new currency from a numeric code such as `"012"`.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Algerian dinar, the only currency the gateway settles in.
    pub fn dzd() -> Self {
        Self::new(Self::DZD)
    }

    pub fn code(&self) -> &str {
        &self.0
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::dzd()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Language of the hosted payment page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    Ar,
    #[default]
    Fr,
    En,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::Ar => "AR",
            Language::Fr => "FR",
            Language::En => "EN",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The first rule an order draft broke.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderValidationError {
    #[error("orderNumber is required")]
    MissingOrderNumber,
    #[error("amount is required")]
    MissingAmount,
    #[error("amount must be at least {minimum}, got {amount}")]
    AmountTooLow { amount: i64, minimum: i64 },
    #[error("returnUrl is required")]
    MissingReturnUrl,
    #[error("currency is required")]
    MissingCurrency,
    #[error("userDefinedFields[{key}] must have a value")]
    EmptyUserDefinedValue { key: String },
    #[error("userDefinedFields key {key:?} is longer than {} characters", MAX_USER_FIELD_LEN)]
    UserDefinedKeyTooLong { key: String },
    #[error("userDefinedFields[{key}] value is longer than {} characters", MAX_USER_FIELD_LEN)]
    UserDefinedValueTooLong { key: String },
}

#[derive(Debug, Default)]
struct DraftState {
    order_number: Option<String>,
    amount: Option<i64>,
    currency: Currency,
    language: Language,
    return_url: Option<String>,
    fail_url: Option<String>,
    description: Option<String>,
    user_defined_fields: BTreeMap<String, String>,
}

impl DraftState {
    fn validate(&self) -> Result<(), OrderValidationError> {
        if self.order_number.is_none() {
            return Err(OrderValidationError::MissingOrderNumber);
        }

        let amount = self.amount.ok_or(OrderValidationError::MissingAmount)?;
        if amount < MIN_AMOUNT {
            return Err(OrderValidationError::AmountTooLow {
                amount,
                minimum: MIN_AMOUNT,
            });
        }

        if self.return_url.is_none() {
            return Err(OrderValidationError::MissingReturnUrl);
        }

        if self.currency.code().is_empty() {
            return Err(OrderValidationError::MissingCurrency);
        }

        for (key, value) in &self.user_defined_fields {
            if value.is_empty() {
                return Err(OrderValidationError::EmptyUserDefinedValue { key: key.clone() });
            }
            if key.chars().count() > MAX_USER_FIELD_LEN {
                return Err(OrderValidationError::UserDefinedKeyTooLong { key: key.clone() });
            }
            if value.chars().count() > MAX_USER_FIELD_LEN {
                return Err(OrderValidationError::UserDefinedValueTooLong { key: key.clone() });
            }
        }

        Ok(())
    }
}

/// A validated, immutable order ready for registration.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDetails {
    data: QueryParams,
    user_defined_fields: BTreeMap<String, String>,
}

impl OrderDetails {
    /// Core order fields keyed by gateway parameter name.
    pub fn data(&self) -> &QueryParams {
        &self.data
    }

    /// Merchant fields, forwarded to the gateway as `jsonParams`.
    pub fn user_defined_fields(&self) -> &BTreeMap<String, String> {
        &self.user_defined_fields
    }

    /// Splits the order into its query parameters and user-defined fields.
    pub fn into_parts(self) -> (QueryParams, BTreeMap<String, String>) {
        (self.data, self.user_defined_fields)
    }
}

/// In-progress order configuration.
///
/// Setters take `&self` so a draft wrapped in an `Arc` can be filled from
/// several tasks at once. All state sits behind one `RwLock`: setters
/// serialize on the write half, and [`generate_order_details`] reads a
/// consistent snapshot through the read half. Nothing is validated until
/// [`generate_order_details`] is called.
///
/// [`generate_order_details`]: OrderBuilder::generate_order_details
#[derive(Debug, Default)]
pub struct OrderBuilder {
    state: RwLock<DraftState>,
}

impl OrderBuilder {
    /// A draft with DZD currency and French as page language.
    pub fn new() -> Self {
        Self::default()
    }

    // A panicking writer cannot leave DraftState half-updated, so a
    // poisoned lock still guards valid data.
    fn read(&self) -> RwLockReadGuard<'_, DraftState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, DraftState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn with_order_number(&self, order_number: impl Into<String>) -> &Self {
        self.write().order_number = Some(order_number.into());
        self
    }

    /// Amount in minor units.
    pub fn with_amount(&self, amount: i64) -> &Self {
        self.write().amount = Some(amount);
        self
    }

    pub fn with_currency(&self, currency: Currency) -> &Self {
        self.write().currency = currency;
        self
    }

    pub fn with_language(&self, language: Language) -> &Self {
        self.write().language = language;
        self
    }

    pub fn with_return_url(&self, return_url: impl Into<String>) -> &Self {
        self.write().return_url = Some(return_url.into());
        self
    }

    pub fn with_fail_url(&self, fail_url: impl Into<String>) -> &Self {
        self.write().fail_url = Some(fail_url.into());
        self
    }

    pub fn with_description(&self, description: impl Into<String>) -> &Self {
        self.write().description = Some(description.into());
        self
    }

    /// Sets a user-defined field. The last write for a key wins.
    pub fn with_user_defined_field(
        &self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> &Self {
        self.write()
            .user_defined_fields
            .insert(key.into(), value.into());
        self
    }

    pub fn user_defined_field(&self, key: &str) -> Option<String> {
        self.read().user_defined_fields.get(key).cloned()
    }

    pub fn user_defined_fields(&self) -> BTreeMap<String, String> {
        self.read().user_defined_fields.clone()
    }

    /// Validates the draft and freezes it into [`OrderDetails`].
    ///
    /// Stops at the first broken rule. The draft itself is left untouched,
    /// so it can be corrected and finalized again.
    pub fn generate_order_details(&self) -> Result<OrderDetails, OrderValidationError> {
        let state = self.read();
        state.validate()?;

        let mut data = QueryParams::new();
        if let Some(amount) = state.amount {
            data.insert("amount".to_string(), ParamValue::Int(amount));
        }
        data.insert("currency".to_string(), state.currency.code().into());
        data.insert("language".to_string(), state.language.code().into());
        if let Some(return_url) = &state.return_url {
            data.insert("returnUrl".to_string(), return_url.as_str().into());
        }
        if let Some(order_number) = &state.order_number {
            data.insert("orderNumber".to_string(), order_number.as_str().into());
        }
        if let Some(fail_url) = &state.fail_url {
            data.insert("failUrl".to_string(), fail_url.as_str().into());
        }
        if let Some(description) = &state.description {
            data.insert("description".to_string(), description.as_str().into());
        }

        Ok(OrderDetails {
            data,
            user_defined_fields: state.user_defined_fields.clone(),
        })
    }
}
