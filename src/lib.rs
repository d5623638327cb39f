//! Client for the SATIM (CIB/Edahabia) payment gateway REST API.
//!
//! ```no_run
//! # async fn example() -> satim::error::Result<()> {
//! use satim::SatimClient;
//!
//! let client = SatimClient::new("merchant", "password", "E010900001", true)?;
//! let draft = client.new_order();
//! draft
//!     .with_order_number("ORD1")
//!     .with_amount(10000)
//!     .with_return_url("https://shop.example/return");
//!
//! let registered = client.register_order(draft.generate_order_details()?).await?;
//! let order_id = registered.order_id.unwrap_or_default();
//!
//! let status = client.get_order_status(&order_id).await?;
//! println!("{:?}", status.status());
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use application::client::{Credentials, Environment, SatimClient};
pub use config::SatimConfig;
pub use domain::order::{Currency, Language, OrderBuilder, OrderDetails};
pub use domain::status::OrderStatus;
pub use error::{Result, SatimError};
