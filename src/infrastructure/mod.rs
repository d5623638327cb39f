//! Adapters implementing the [`HttpBackend`](crate::domain::ports::HttpBackend) port.

pub mod http;
pub mod in_memory;
