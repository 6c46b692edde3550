//! Data Transfer Objects
//!
//! DTOs for RPC request/response serialization.

pub mod request;
pub mod response;
