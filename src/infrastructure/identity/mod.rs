//! Identity Service Clients
//!
//! Implementations of the domain `IdentityResolver` contract:
//! - `HttpIdentityResolver` calls the account service over HTTP
//! - `CachingIdentityResolver` puts a Redis read-through cache in front of any resolver

mod caching_resolver;
mod http_resolver;

pub use caching_resolver::CachingIdentityResolver;
pub use http_resolver::HttpIdentityResolver;
