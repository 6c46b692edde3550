//! # Domain Layer
//!
//! The domain layer contains the core business rules of the social network.
//! It is independent of any external frameworks or infrastructure concerns.
//!
//! ## Structure
//!
//! - **entities**: Core domain entities (FriendRelation, Group, Message, Comment, etc.)
//! - **value_objects**: Immutable value types (RoomId)
//! - **services**: Domain services for roster admission, thread assembly and
//!   the identity contract
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Repository traits define data access contracts
//! - Entities encapsulate domain behavior

pub mod entities;
pub mod services;
pub mod value_objects;

// Re-export commonly used types
pub use entities::*;
pub use value_objects::*;
