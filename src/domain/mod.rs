//! Gateway vocabulary: order drafts, parameters, response payloads and the
//! HTTP port the transport is written against.

pub mod operation;
pub mod order;
pub mod params;
pub mod ports;
pub mod response;
pub mod status;
