//! Application layer: the gateway client and the transport it drives.
//!
//! `SatimClient` merges merchant credentials into order and lookup
//! parameters, and `GatewayTransport` turns each call into one HTTP GET
//! whose JSON reply is checked against that operation's success rule.

pub mod client;
pub mod transport;
