//! # Social Network Server Library
//!
//! Backend for the social features of a small network:
//! - Friend graph with requests, acceptance and blocking
//! - Capacity-bounded chat groups
//! - Chat message storage with room-based read authorization
//! - Threaded post comments with likes and soft delete
//!
//! Every operation is exposed as `POST /rpc/<MethodName>` with JSON bodies.
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Entities, repository traits, room ids, roster and thread logic
//! - **Application Layer**: One service per engine and the RPC DTOs
//! - **Infrastructure Layer**: PostgreSQL, Redis, identity service client, metrics
//! - **Presentation Layer**: Axum routes, handlers and middleware
//!
//! ## Module Structure
//!
//! ```text
//! social_network/
//! +-- config/         Configuration management
//! +-- domain/         Domain entities, value objects, and traits
//! +-- application/    Application services and DTOs
//! +-- infrastructure/ Database, cache and identity client implementations
//! +-- presentation/   HTTP routes and middleware
//! +-- shared/         Common utilities (errors, validation, time)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
