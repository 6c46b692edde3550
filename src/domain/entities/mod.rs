//! # Domain Entities
//!
//! Core domain entities of the social network. All entities map directly to
//! their corresponding database tables.
//!
//! - **FriendRelation**: an edge of the friend graph with a lifecycle status
//! - **Group** / **Membership**: capacity-bounded chat groups
//! - **Message**: a chat message addressed by room identifier
//! - **Comment** / **CommentLike**: threaded post comments and their likes
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait defining data access operations.
//! These traits are implemented in the infrastructure layer, following the
//! dependency inversion principle.

mod relation;
mod group;
mod membership;
mod message;
mod comment;
mod comment_like;

pub use relation::{FriendRelation, RelationRepository, RelationStatus};
pub use group::{Group, GroupRepository, NewGroup, DEFAULT_MAX_MEMBER};
pub use membership::{MemberRole, Membership, MembershipRepository};
pub use message::{Message, MessageRepository};
pub use comment::{Comment, CommentRepository, NewComment, ROOT_PARENT_ID};
pub use comment_like::{CommentLike, CommentLikeRepository};
