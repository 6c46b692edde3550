//! Repository Implementations
//!
//! PostgreSQL implementations of domain repository traits.
//!
//! ## Available Repositories
//!
//! - **RelationRepository** - Friend graph edges and their status
//! - **GroupRepository** - Groups, created together with their initial roster
//! - **MembershipRepository** - Capacity-bounded group admission
//! - **MessageRepository** - Chat messages keyed by room id
//! - **CommentRepository** - Comment threads with soft delete
//! - **CommentLikeRepository** - Insert-if-absent likes
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use sqlx::PgPool;
//! use social_network::infrastructure::repositories::{
//!     PgGroupRepository, PgMembershipRepository, PgRelationRepository,
//! };
//!
//! async fn setup_repositories(pool: PgPool) {
//!     let relations = PgRelationRepository::new(pool.clone());
//!     let groups = PgGroupRepository::new(pool.clone());
//!     let members = PgMembershipRepository::new(pool);
//! }
//! ```

pub mod comment_like_repository;
pub mod comment_repository;
pub mod group_repository;
pub mod membership_repository;
pub mod message_repository;
pub mod relation_repository;

pub use comment_like_repository::PgCommentLikeRepository;
pub use comment_repository::PgCommentRepository;
pub use group_repository::PgGroupRepository;
pub use membership_repository::PgMembershipRepository;
pub use message_repository::PgMessageRepository;
pub use relation_repository::PgRelationRepository;
