//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **RelationshipService**: friend requests, friendships and blocking
//! - **GroupService**: group creation and roster management
//! - **ChatService**: room-scoped messages with read authorization
//! - **CommentService**: comment threads, soft delete and likes
//!
//! Services that render names or avatars share one [`IdentityEnricher`].

pub mod chat_service;
pub mod comment_service;
pub mod enrichment;
pub mod group_service;
pub mod relationship_service;

pub use chat_service::{ChatService, ChatServiceImpl, MessageDto};
pub use comment_service::{CommentNodeDto, CommentService, CommentServiceImpl, TOMBSTONE_TEXT};
pub use enrichment::IdentityEnricher;
pub use group_service::{CreateGroupDto, GroupDto, GroupService, GroupServiceImpl, MembershipDto};
pub use relationship_service::{
    FriendDto, FriendRequestDto, RelationDto, RelationshipService, RelationshipServiceImpl,
};
