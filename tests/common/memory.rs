//! In-memory repositories
//!
//! One store implements every repository trait. A tokio mutex around the
//! whole state stands in for the group row lock, and admission goes through
//! the same `RosterPlanner` the PostgreSQL repositories use.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;

use social_network::domain::services::{AdmissionMode, RosterPlanner};
use social_network::domain::{
    Comment, CommentLikeRepository, CommentRepository, FriendRelation, Group, GroupRepository,
    MemberRole, Membership, MembershipRepository, Message, MessageRepository, NewComment,
    NewGroup, RelationRepository, RelationStatus,
};
use social_network::shared::error::AppError;

#[derive(Debug, Clone, Default)]
struct State {
    next_id: i64,
    relations: Vec<FriendRelation>,
    groups: Vec<Group>,
    members: Vec<Membership>,
    messages: Vec<Message>,
    comments: Vec<Comment>,
    likes: HashSet<(i64, i64)>,
}

impl State {
    /// Ids and timestamps both increase with every insert.
    fn next(&mut self) -> (i64, DateTime<Utc>) {
        self.next_id += 1;
        let base = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap_or_default();
        (self.next_id, base + Duration::seconds(self.next_id))
    }

    fn pair_matches(relation: &FriendRelation, a: i64, b: i64) -> bool {
        (relation.user_id == a && relation.friend_id == b)
            || (relation.user_id == b && relation.friend_id == a)
    }

    fn admit(
        &mut self,
        group_id: i64,
        user_ids: &[i64],
        role: MemberRole,
        mode: AdmissionMode,
    ) -> Result<Vec<Membership>, AppError> {
        let max_member = self
            .groups
            .iter()
            .find(|g| g.id == group_id)
            .map(|g| g.max_member)
            .ok_or_else(|| AppError::NotFound("Group not found".into()))?;

        let current = self.members.iter().filter(|m| m.group_id == group_id).count() as i64;
        let existing: HashSet<i64> = self
            .members
            .iter()
            .filter(|m| m.group_id == group_id && user_ids.contains(&m.user_id))
            .map(|m| m.user_id)
            .collect();

        let fresh = RosterPlanner::plan(max_member, current, user_ids, &existing, mode)?;

        let mut admitted = Vec::with_capacity(fresh.len());
        for user_id in fresh {
            let (id, joined_at) = self.next();
            let membership = Membership { id, group_id, user_id, role, joined_at };
            self.members.push(membership.clone());
            admitted.push(membership);
        }
        Ok(admitted)
    }
}

/// Shared in-memory backing for every repository trait.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    like_counter_fault: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `like_count` update fail until switched off again.
    pub fn fail_like_counter(&self, fail: bool) {
        self.like_counter_fault.store(fail, Ordering::SeqCst);
    }

    fn adjust_like_count(
        &self,
        state: &mut State,
        comment_id: i64,
        delta: i32,
    ) -> Result<(), AppError> {
        if self.like_counter_fault.load(Ordering::SeqCst) {
            return Err(AppError::Internal("like counter update failed".into()));
        }
        if let Some(comment) = state.comments.iter_mut().find(|c| c.id == comment_id) {
            comment.like_count += delta;
        }
        Ok(())
    }

    pub async fn like_rows(&self, comment_id: i64) -> usize {
        let state = self.state.lock().await;
        state.likes.iter().filter(|(_, c)| *c == comment_id).count()
    }

    /// Insert a comment bypassing every service rule.
    pub async fn seed_comment(&self, post_id: i64, parent_id: i64, user_id: i64, content: &str) -> i64 {
        let mut state = self.state.lock().await;
        let (id, created_at) = state.next();
        state.comments.push(Comment {
            id,
            post_id,
            parent_id,
            user_id,
            content: content.into(),
            like_count: 0,
            is_delete: false,
            created_at,
        });
        id
    }

    pub async fn relations_between(&self, a: i64, b: i64) -> Vec<FriendRelation> {
        let state = self.state.lock().await;
        state
            .relations
            .iter()
            .filter(|r| State::pair_matches(r, a, b))
            .cloned()
            .collect()
    }

    pub async fn member_count(&self, group_id: i64) -> usize {
        let state = self.state.lock().await;
        state.members.iter().filter(|m| m.group_id == group_id).count()
    }

    pub async fn members_of(&self, group_id: i64) -> Vec<Membership> {
        let state = self.state.lock().await;
        state.members.iter().filter(|m| m.group_id == group_id).cloned().collect()
    }

    pub async fn group_count(&self) -> usize {
        self.state.lock().await.groups.len()
    }

    pub async fn comment(&self, id: i64) -> Option<Comment> {
        let state = self.state.lock().await;
        state.comments.iter().find(|c| c.id == id).cloned()
    }

    pub async fn message_count(&self) -> usize {
        self.state.lock().await.messages.len()
    }
}

#[async_trait]
impl RelationRepository for MemoryStore {
    async fn find_by_id_with_status(
        &self,
        id: i64,
        status: RelationStatus,
    ) -> Result<Option<FriendRelation>, AppError> {
        let state = self.state.lock().await;
        Ok(state.relations.iter().find(|r| r.id == id && r.status == status).cloned())
    }

    async fn find_between(&self, a: i64, b: i64) -> Result<Option<FriendRelation>, AppError> {
        let state = self.state.lock().await;
        Ok(state.relations.iter().find(|r| State::pair_matches(r, a, b)).cloned())
    }

    async fn find_between_with_status(
        &self,
        a: i64,
        b: i64,
        status: RelationStatus,
    ) -> Result<Option<FriendRelation>, AppError> {
        let state = self.state.lock().await;
        Ok(state
            .relations
            .iter()
            .find(|r| State::pair_matches(r, a, b) && r.status == status)
            .cloned())
    }

    async fn find_outgoing(
        &self,
        user_id: i64,
        status: RelationStatus,
    ) -> Result<Vec<FriendRelation>, AppError> {
        let state = self.state.lock().await;
        let mut rows: Vec<FriendRelation> = state
            .relations
            .iter()
            .filter(|r| r.user_id == user_id && r.status == status)
            .cloned()
            .collect();
        rows.sort_by(|x, y| (y.created_at, y.id).cmp(&(x.created_at, x.id)));
        Ok(rows)
    }

    async fn find_incoming(
        &self,
        user_id: i64,
        status: RelationStatus,
    ) -> Result<Vec<FriendRelation>, AppError> {
        let state = self.state.lock().await;
        let mut rows: Vec<FriendRelation> = state
            .relations
            .iter()
            .filter(|r| r.friend_id == user_id && r.status == status)
            .cloned()
            .collect();
        rows.sort_by(|x, y| (y.created_at, y.id).cmp(&(x.created_at, x.id)));
        Ok(rows)
    }

    async fn find_touching(
        &self,
        user_id: i64,
        status: RelationStatus,
    ) -> Result<Vec<FriendRelation>, AppError> {
        let state = self.state.lock().await;
        let mut rows: Vec<FriendRelation> = state
            .relations
            .iter()
            .filter(|r| r.involves(user_id) && r.status == status)
            .cloned()
            .collect();
        rows.sort_by(|x, y| (y.created_at, y.id).cmp(&(x.created_at, x.id)));
        Ok(rows)
    }

    async fn create(
        &self,
        user_id: i64,
        friend_id: i64,
        status: RelationStatus,
    ) -> Result<FriendRelation, AppError> {
        let mut state = self.state.lock().await;
        if state.relations.iter().any(|r| State::pair_matches(r, user_id, friend_id)) {
            return Err(AppError::AlreadyExists("Relation already exists".into()));
        }

        let (id, created_at) = state.next();
        let relation = FriendRelation { id, user_id, friend_id, status, created_at };
        state.relations.push(relation.clone());
        Ok(relation)
    }

    async fn upsert_blocked(
        &self,
        blocker_id: i64,
        blocked_id: i64,
    ) -> Result<FriendRelation, AppError> {
        let mut state = self.state.lock().await;
        if let Some(row) = state
            .relations
            .iter_mut()
            .find(|r| State::pair_matches(r, blocker_id, blocked_id))
        {
            row.user_id = blocker_id;
            row.friend_id = blocked_id;
            row.status = RelationStatus::Blocked;
            return Ok(row.clone());
        }

        let (id, created_at) = state.next();
        let relation = FriendRelation {
            id,
            user_id: blocker_id,
            friend_id: blocked_id,
            status: RelationStatus::Blocked,
            created_at,
        };
        state.relations.push(relation.clone());
        Ok(relation)
    }

    async fn update(&self, relation: &FriendRelation) -> Result<FriendRelation, AppError> {
        let mut state = self.state.lock().await;
        let row = state
            .relations
            .iter_mut()
            .find(|r| r.id == relation.id)
            .ok_or_else(|| AppError::NotFound("Relation not found".into()))?;

        row.user_id = relation.user_id;
        row.friend_id = relation.friend_id;
        row.status = relation.status;
        Ok(row.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut state = self.state.lock().await;
        state.relations.retain(|r| r.id != id);
        Ok(())
    }
}

#[async_trait]
impl GroupRepository for MemoryStore {
    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Group>, AppError> {
        let state = self.state.lock().await;
        Ok(state.groups.iter().filter(|g| ids.contains(&g.id)).cloned().collect())
    }

    async fn create_with_roster(
        &self,
        group: &NewGroup,
        initial_user_ids: &[i64],
    ) -> Result<(Group, Vec<Membership>), AppError> {
        let mut state = self.state.lock().await;

        // Work on a copy; it replaces the live state only when every step succeeds
        let mut draft = state.clone();
        let (id, created_at) = draft.next();
        let created = Group {
            id,
            name: group.name.clone(),
            avatar_url: group.avatar_url.clone(),
            description: group.description.clone(),
            owner_id: group.owner_id,
            max_member: group.max_member,
            created_at,
            updated_at: created_at,
        };
        draft.groups.push(created.clone());

        let mut members =
            draft.admit(id, &[group.owner_id], MemberRole::Owner, AdmissionMode::Single)?;
        if !initial_user_ids.is_empty() {
            members.extend(draft.admit(
                id,
                initial_user_ids,
                MemberRole::Member,
                AdmissionMode::Bulk,
            )?);
        }

        *state = draft;
        Ok((created, members))
    }
}

#[async_trait]
impl MembershipRepository for MemoryStore {
    async fn admit(
        &self,
        group_id: i64,
        user_ids: &[i64],
        role: MemberRole,
        mode: AdmissionMode,
    ) -> Result<Vec<Membership>, AppError> {
        let mut state = self.state.lock().await;
        state.admit(group_id, user_ids, role, mode)
    }

    async fn exists(&self, group_id: i64, user_id: i64) -> Result<bool, AppError> {
        let state = self.state.lock().await;
        Ok(state.members.iter().any(|m| m.group_id == group_id && m.user_id == user_id))
    }

    async fn find_group_ids_by_user(&self, user_id: i64) -> Result<Vec<i64>, AppError> {
        let state = self.state.lock().await;
        Ok(state
            .members
            .iter()
            .filter(|m| m.user_id == user_id)
            .map(|m| m.group_id)
            .collect())
    }
}

#[async_trait]
impl MessageRepository for MemoryStore {
    async fn create(
        &self,
        room_id: &str,
        user_id: i64,
        content: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Message, AppError> {
        let mut state = self.state.lock().await;
        let (id, _) = state.next();
        let message = Message {
            id,
            room_id: room_id.into(),
            user_id,
            content: content.into(),
            created_at,
        };
        state.messages.push(message.clone());
        Ok(message)
    }

    async fn find_by_room(&self, room_id: &str) -> Result<Vec<Message>, AppError> {
        let state = self.state.lock().await;
        let mut rows: Vec<Message> =
            state.messages.iter().filter(|m| m.room_id == room_id).cloned().collect();
        rows.sort_by_key(|m| (m.created_at, m.id));
        Ok(rows)
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Comment>, AppError> {
        let state = self.state.lock().await;
        Ok(state.comments.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_post(&self, post_id: i64) -> Result<Vec<Comment>, AppError> {
        let state = self.state.lock().await;
        let mut rows: Vec<Comment> =
            state.comments.iter().filter(|c| c.post_id == post_id).cloned().collect();
        rows.sort_by_key(|c| (c.created_at, c.id));
        Ok(rows)
    }

    async fn create(&self, comment: &NewComment) -> Result<Comment, AppError> {
        let mut state = self.state.lock().await;
        let (id, created_at) = state.next();
        let created = Comment {
            id,
            post_id: comment.post_id,
            parent_id: comment.parent_id,
            user_id: comment.user_id,
            content: comment.content.clone(),
            like_count: 0,
            is_delete: false,
            created_at,
        };
        state.comments.push(created.clone());
        Ok(created)
    }

    async fn update_content(&self, id: i64, content: &str) -> Result<(), AppError> {
        let mut state = self.state.lock().await;
        let comment = state
            .comments
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::NotFound("Comment not found".into()))?;
        comment.content = content.into();
        Ok(())
    }

    async fn mark_deleted(&self, id: i64) -> Result<(), AppError> {
        let mut state = self.state.lock().await;
        let comment = state
            .comments
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::NotFound("Comment not found".into()))?;
        comment.is_delete = true;
        Ok(())
    }
}

#[async_trait]
impl CommentLikeRepository for MemoryStore {
    async fn like(&self, comment_id: i64, user_id: i64) -> Result<bool, AppError> {
        let mut state = self.state.lock().await;
        let mut draft = state.clone();

        let inserted = draft.likes.insert((user_id, comment_id));
        if inserted {
            self.adjust_like_count(&mut draft, comment_id, 1)?;
        }

        *state = draft;
        Ok(inserted)
    }

    async fn unlike(&self, comment_id: i64, user_id: i64) -> Result<bool, AppError> {
        let mut state = self.state.lock().await;
        let mut draft = state.clone();

        let removed = draft.likes.remove(&(user_id, comment_id));
        self.adjust_like_count(&mut draft, comment_id, -1)?;

        *state = draft;
        Ok(removed)
    }

    async fn find_liked_comment_ids(
        &self,
        user_id: i64,
        comment_ids: &[i64],
    ) -> Result<Vec<i64>, AppError> {
        let state = self.state.lock().await;
        Ok(comment_ids
            .iter()
            .copied()
            .filter(|id| state.likes.contains(&(user_id, *id)))
            .collect())
    }
}
