//! Domain Services
//!
//! Business logic that does not belong to a single entity.
//!
//! - **RosterPlanner**: group admission (capacity and duplicate rules)
//! - **comment_tree**: thread assembly from flat comments
//! - **IdentityResolver**: contract of the identity collaborator

pub mod comment_tree;
pub mod identity;
pub mod roster;

pub use comment_tree::{assemble, ThreadNode, MAX_THREAD_DEPTH};
pub use identity::{IdentityDirectory, IdentityResolver, UserIdentity};
pub use roster::{AdmissionMode, RosterPlanner};
