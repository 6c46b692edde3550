//! # Domain Value Objects
//!
//! Immutable value types that represent domain concepts without identity.
//!
//! - **RoomId**: parsed chat room identifier (direct pair or group)

mod room_id;

pub use room_id::*;
