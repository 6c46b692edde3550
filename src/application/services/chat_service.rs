//! Chat Service
//!
//! Room-scoped message storage and retrieval.
//!
//! Authorization is derived from the room id alone: `dm:<a>:<b>` rooms are
//! readable by `a` and `b`, `group:<id>` rooms by members of the group. Saving
//! is not authorized; reading is.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use chrono_tz::Tz;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::application::services::enrichment::IdentityEnricher;
use crate::application::services::group_service::GroupService;
use crate::domain::services::IdentityDirectory;
use crate::domain::{Message, MessageRepository, RoomId};
use crate::shared::error::AppError;
use crate::shared::time::to_chat_local;
use crate::shared::validation::{require_id, require_text};

/// Chat service trait
#[async_trait]
pub trait ChatService: Send + Sync {
    /// Store a message in a room
    async fn save_message(
        &self,
        room_id: &str,
        user_id: i64,
        content: &str,
    ) -> Result<MessageDto, AppError>;

    /// All messages of a room, oldest first, if `user_id` may read it
    async fn get_message(&self, room_id: &str, user_id: i64) -> Result<Vec<MessageDto>, AppError>;
}

/// Chat message with author identity
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    pub id: i64,
    pub room_id: String,
    pub user_id: i64,
    pub content: String,
    /// Local wall-clock time, `HH:MM:SS DD/MM/YYYY`
    #[serde(rename = "create_at")]
    pub created_at: String,
    pub realname: String,
    pub avatar_url: String,
}

impl MessageDto {
    fn render(message: Message, tz: Tz, identities: &IdentityDirectory) -> Self {
        let identity = identities.get(message.user_id);
        Self {
            id: message.id,
            room_id: message.room_id,
            user_id: message.user_id,
            content: message.content,
            created_at: to_chat_local(message.created_at, tz),
            realname: identity.realname.clone(),
            avatar_url: identity.avatar_url.clone(),
        }
    }
}

/// ChatService implementation
pub struct ChatServiceImpl<M>
where
    M: MessageRepository,
{
    message_repo: Arc<M>,
    groups: Arc<dyn GroupService>,
    enricher: IdentityEnricher,
    timezone: Tz,
}

impl<M> ChatServiceImpl<M>
where
    M: MessageRepository,
{
    pub fn new(
        message_repo: Arc<M>,
        groups: Arc<dyn GroupService>,
        enricher: IdentityEnricher,
        timezone: Tz,
    ) -> Self {
        Self {
            message_repo,
            groups,
            enricher,
            timezone,
        }
    }

    /// Whether `user_id` may read `room`. Unscoped rooms have no readers.
    async fn authorize(&self, room: &RoomId, user_id: i64) -> Result<bool, AppError> {
        match room {
            RoomId::Direct(..) => {
                if !room.is_direct_participant(user_id) {
                    debug!("Requester is not a participant of the direct room");
                    return Err(AppError::PermissionDenied(
                        "You are not a participant of this conversation".into(),
                    ));
                }
                Ok(true)
            }
            RoomId::Group(group_id) => {
                if !self.groups.check_group_user(user_id, *group_id).await? {
                    debug!(group_id, "Requester is not a member of the group");
                    return Err(AppError::PermissionDenied(
                        "You are not a member of this group".into(),
                    ));
                }
                Ok(true)
            }
            RoomId::Unscoped(_) => Ok(false),
        }
    }
}

#[async_trait]
impl<M> ChatService for ChatServiceImpl<M>
where
    M: MessageRepository + 'static,
{
    #[instrument(skip(self, content), fields(content_len = content.len()))]
    async fn save_message(
        &self,
        room_id: &str,
        user_id: i64,
        content: &str,
    ) -> Result<MessageDto, AppError> {
        let room_id = require_text(room_id, "roomId")?;
        let user_id = require_id(user_id, "userId")?;
        let content = require_text(content, "content")?;

        let message = self
            .message_repo
            .create(room_id, user_id, content, Utc::now())
            .await?;

        info!(message_id = message.id, "Message saved");
        Ok(MessageDto::render(message, self.timezone, &IdentityDirectory::default()))
    }

    #[instrument(skip(self))]
    async fn get_message(&self, room_id: &str, user_id: i64) -> Result<Vec<MessageDto>, AppError> {
        let user_id = require_id(user_id, "userId")?;
        let room = RoomId::parse(require_text(room_id, "roomId")?)?;

        if !self.authorize(&room, user_id).await? {
            debug!("Unscoped room, returning no messages");
            return Ok(Vec::new());
        }

        let messages = self.message_repo.find_by_room(room_id).await?;
        let identities = self.enricher.lookup(messages.iter().map(|m| m.user_id)).await?;

        Ok(messages
            .into_iter()
            .map(|m| MessageDto::render(m, self.timezone, &identities))
            .collect())
    }
}
