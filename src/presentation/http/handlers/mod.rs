//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints, one module per engine.

pub mod chat;
pub mod comment;
pub mod friend;
pub mod group;
pub mod health;
