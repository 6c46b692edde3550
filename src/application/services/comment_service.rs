//! Comment Service
//!
//! Comment persistence, thread assembly, soft delete and like counting.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::application::services::enrichment::IdentityEnricher;
use crate::domain::services::{assemble, IdentityDirectory, ThreadNode};
use crate::domain::{Comment, CommentLikeRepository, CommentRepository, NewComment, ROOT_PARENT_ID};
use crate::shared::error::AppError;
use crate::shared::time::to_iso;
use crate::shared::validation::{require_id, require_text};

/// Shown in place of the content of a soft-deleted comment.
pub const TOMBSTONE_TEXT: &str = "This comment has been deleted";

/// Comment service trait
#[async_trait]
pub trait CommentService: Send + Sync {
    /// Create a root comment (`parent_id == 0`) or a reply
    async fn create_comment(
        &self,
        post_id: i64,
        parent_id: i64,
        user_id: i64,
        content: &str,
    ) -> Result<CommentNodeDto, AppError>;

    /// The whole thread forest of a post as seen by `user_id`
    async fn get_all_comment(
        &self,
        post_id: i64,
        user_id: i64,
    ) -> Result<Vec<CommentNodeDto>, AppError>;

    /// One comment without identity or like information
    async fn get_comment(&self, comment_id: i64) -> Result<CommentNodeDto, AppError>;

    /// Replace the content; author only
    async fn update_comment(
        &self,
        comment_id: i64,
        user_id: i64,
        content: &str,
    ) -> Result<(), AppError>;

    /// Soft-delete; author only. Replies stay attached.
    async fn delete_comment(&self, comment_id: i64, user_id: i64) -> Result<(), AppError>;

    /// Like once per user; repeated likes change nothing
    async fn like_comment(&self, comment_id: i64, user_id: i64) -> Result<(), AppError>;

    /// Remove the like and decrement the counter
    async fn unlike_comment(&self, comment_id: i64, user_id: i64) -> Result<(), AppError>;
}

/// A comment as rendered to readers, with its replies.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentNodeDto {
    pub id: i64,
    pub post_id: i64,
    pub parent_id: i64,
    pub user_id: i64,
    pub content: String,
    pub created_at: String,
    pub like_count: i32,
    pub is_liked_by_current_user: bool,
    pub is_delete: bool,
    pub realname: String,
    pub avatar_url: String,
    pub children: Vec<CommentNodeDto>,
}

impl CommentNodeDto {
    fn render(comment: Comment, liked: bool, identities: &IdentityDirectory) -> Self {
        let identity = identities.get(comment.user_id);
        let content = if comment.is_delete {
            TOMBSTONE_TEXT.to_string()
        } else {
            comment.content
        };

        Self {
            id: comment.id,
            post_id: comment.post_id,
            parent_id: comment.parent_id,
            user_id: comment.user_id,
            content,
            created_at: to_iso(comment.created_at),
            like_count: comment.like_count,
            is_liked_by_current_user: liked,
            is_delete: comment.is_delete,
            realname: identity.realname.clone(),
            avatar_url: identity.avatar_url.clone(),
            children: Vec::new(),
        }
    }
}

impl ThreadNode for CommentNodeDto {
    fn node_id(&self) -> i64 {
        self.id
    }

    fn parent_node_id(&self) -> i64 {
        self.parent_id
    }

    fn attach_child(&mut self, child: Self) {
        self.children.push(child);
    }
}

/// CommentService implementation
pub struct CommentServiceImpl<C, L>
where
    C: CommentRepository,
    L: CommentLikeRepository,
{
    comment_repo: Arc<C>,
    like_repo: Arc<L>,
    enricher: IdentityEnricher,
}

impl<C, L> CommentServiceImpl<C, L>
where
    C: CommentRepository,
    L: CommentLikeRepository,
{
    pub fn new(comment_repo: Arc<C>, like_repo: Arc<L>, enricher: IdentityEnricher) -> Self {
        Self {
            comment_repo,
            like_repo,
            enricher,
        }
    }

    async fn find_existing(&self, comment_id: i64) -> Result<Comment, AppError> {
        self.comment_repo
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Comment not found".into()))
    }

    /// Load a comment the caller authored.
    async fn find_authored(&self, comment_id: i64, user_id: i64) -> Result<Comment, AppError> {
        let comment = self.find_existing(comment_id).await?;
        if !comment.is_author(user_id) {
            debug!(author = comment.user_id, "Caller is not the author");
            return Err(AppError::PermissionDenied(
                "Only the author can modify this comment".into(),
            ));
        }
        Ok(comment)
    }
}

#[async_trait]
impl<C, L> CommentService for CommentServiceImpl<C, L>
where
    C: CommentRepository + 'static,
    L: CommentLikeRepository + 'static,
{
    #[instrument(skip(self, content))]
    async fn create_comment(
        &self,
        post_id: i64,
        parent_id: i64,
        user_id: i64,
        content: &str,
    ) -> Result<CommentNodeDto, AppError> {
        let post_id = require_id(post_id, "postId")?;
        let user_id = require_id(user_id, "userId")?;
        let content = require_text(content, "content")?;

        if parent_id != ROOT_PARENT_ID {
            let parent = self
                .comment_repo
                .find_by_id(parent_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Parent comment not found".into()))?;

            if parent.post_id != post_id {
                debug!(parent_post = parent.post_id, "Parent belongs to another post");
                return Err(AppError::InvalidArgument(
                    "Parent comment does not belong to this post".into(),
                ));
            }

            if parent.is_delete {
                debug!("Parent is deleted");
                return Err(AppError::FailedPrecondition(
                    "Cannot reply to a deleted comment".into(),
                ));
            }
        }

        let comment = self
            .comment_repo
            .create(&NewComment {
                post_id,
                parent_id,
                user_id,
                content: content.to_string(),
            })
            .await?;

        info!(comment_id = comment.id, "Comment created");

        let identities = self.enricher.lookup([user_id]).await?;
        Ok(CommentNodeDto::render(comment, false, &identities))
    }

    #[instrument(skip(self))]
    async fn get_all_comment(
        &self,
        post_id: i64,
        user_id: i64,
    ) -> Result<Vec<CommentNodeDto>, AppError> {
        let post_id = require_id(post_id, "postId")?;
        let user_id = require_id(user_id, "userId")?;

        let comments = self.comment_repo.find_by_post(post_id).await?;
        if comments.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = comments.iter().map(|c| c.id).collect();
        let liked: HashSet<i64> = self
            .like_repo
            .find_liked_comment_ids(user_id, &ids)
            .await?
            .into_iter()
            .collect();

        let identities = self.enricher.lookup(comments.iter().map(|c| c.user_id)).await?;

        let nodes = comments
            .into_iter()
            .map(|c| {
                let is_liked = liked.contains(&c.id);
                CommentNodeDto::render(c, is_liked, &identities)
            })
            .collect();

        Ok(assemble(nodes))
    }

    #[instrument(skip(self))]
    async fn get_comment(&self, comment_id: i64) -> Result<CommentNodeDto, AppError> {
        let comment = self
            .comment_repo
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| AppError::InvalidArgument("Comment not found".into()))?;

        Ok(CommentNodeDto::render(comment, false, &IdentityDirectory::default()))
    }

    #[instrument(skip(self, content))]
    async fn update_comment(
        &self,
        comment_id: i64,
        user_id: i64,
        content: &str,
    ) -> Result<(), AppError> {
        let comment = self.find_authored(comment_id, user_id).await?;

        if comment.is_delete {
            debug!("Comment is deleted");
            return Err(AppError::FailedPrecondition("Comment has been deleted".into()));
        }

        let content = require_text(content, "content")?;
        self.comment_repo.update_content(comment.id, content).await?;

        info!(comment_id, "Comment updated");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_comment(&self, comment_id: i64, user_id: i64) -> Result<(), AppError> {
        let comment = self.find_authored(comment_id, user_id).await?;

        self.comment_repo.mark_deleted(comment.id).await?;

        info!(comment_id, "Comment soft-deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn like_comment(&self, comment_id: i64, user_id: i64) -> Result<(), AppError> {
        let comment = self.find_existing(comment_id).await?;

        if self.like_repo.like(comment.id, user_id).await? {
            info!(comment_id, "Comment liked");
        } else {
            debug!(comment_id, "Already liked");
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn unlike_comment(&self, comment_id: i64, user_id: i64) -> Result<(), AppError> {
        // The counter moves even when there was no like to remove
        let removed = self.like_repo.unlike(comment_id, user_id).await?;

        debug!(comment_id, removed, "Comment unliked");
        Ok(())
    }
}
