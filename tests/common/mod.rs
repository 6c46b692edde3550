//! Common Test Utilities
//!
//! Shared helpers, fixtures, and test infrastructure.

#![allow(dead_code)]

pub mod memory;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{body::Body, http::Request, response::Response, Router};
use chrono_tz::Tz;
use mockall::mock;
use serde_json::Value;
use tower::ServiceExt;

use social_network::application::services::{
    ChatService, ChatServiceImpl, CommentService, CommentServiceImpl, GroupService,
    GroupServiceImpl, IdentityEnricher, RelationshipService, RelationshipServiceImpl,
};
use social_network::domain::services::{IdentityResolver, UserIdentity};
use social_network::presentation::http::routes::create_router;
use social_network::shared::error::AppError;
use social_network::startup::AppState;

pub use memory::MemoryStore;

mock! {
    pub Resolver {}

    #[async_trait]
    impl IdentityResolver for Resolver {
        async fn resolve(&self, user_ids: &[i64]) -> Result<HashMap<i64, UserIdentity>, AppError>;
    }
}

/// Answers every lookup with `User <id>` and a predictable avatar.
pub struct NamingResolver;

#[async_trait]
impl IdentityResolver for NamingResolver {
    async fn resolve(&self, user_ids: &[i64]) -> Result<HashMap<i64, UserIdentity>, AppError> {
        Ok(user_ids.iter().map(|id| (*id, identity_of(*id))).collect())
    }
}

/// Never answers within any reasonable deadline.
pub struct StalledResolver;

#[async_trait]
impl IdentityResolver for StalledResolver {
    async fn resolve(&self, _user_ids: &[i64]) -> Result<HashMap<i64, UserIdentity>, AppError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(HashMap::new())
    }
}

pub fn identity_of(user_id: i64) -> UserIdentity {
    UserIdentity {
        realname: format!("User {}", user_id),
        avatar_url: format!("https://cdn.example.com/avatars/{}.png", user_id),
    }
}

pub fn enricher(resolver: impl IdentityResolver + 'static) -> IdentityEnricher {
    IdentityEnricher::new(Arc::new(resolver), Duration::from_millis(200))
}

pub fn timezone() -> Tz {
    chrono_tz::Asia::Ho_Chi_Minh
}

/// All four engines over one in-memory store.
pub struct Engines {
    pub store: Arc<MemoryStore>,
    pub relationships: Arc<dyn RelationshipService>,
    pub groups: Arc<dyn GroupService>,
    pub chat: Arc<dyn ChatService>,
    pub comments: Arc<dyn CommentService>,
}

impl Engines {
    pub fn new() -> Self {
        Self::with_resolver(NamingResolver)
    }

    pub fn with_resolver(resolver: impl IdentityResolver + 'static) -> Self {
        let store = Arc::new(MemoryStore::new());
        let enricher = enricher(resolver);

        let relationships: Arc<dyn RelationshipService> =
            Arc::new(RelationshipServiceImpl::new(store.clone(), enricher.clone()));
        let groups: Arc<dyn GroupService> =
            Arc::new(GroupServiceImpl::new(store.clone(), store.clone(), 500));
        let chat: Arc<dyn ChatService> = Arc::new(ChatServiceImpl::new(
            store.clone(),
            groups.clone(),
            enricher.clone(),
            timezone(),
        ));
        let comments: Arc<dyn CommentService> =
            Arc::new(CommentServiceImpl::new(store.clone(), store.clone(), enricher));

        Self { store, relationships, groups, chat, comments }
    }

    pub fn state(&self) -> AppState {
        AppState::new(
            self.relationships.clone(),
            self.groups.clone(),
            self.chat.clone(),
            self.comments.clone(),
        )
    }
}

/// Test application driving the real router over in-memory engines
pub struct TestApp {
    pub router: Router,
    pub engines: Engines,
}

impl TestApp {
    pub fn new() -> Self {
        let engines = Engines::new();
        let router = create_router(engines.state());
        Self { router, engines }
    }

    /// Make a GET request to the application
    pub async fn get(&self, uri: &str) -> Response {
        self.router
            .clone()
            .oneshot(Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    /// Make a POST request with a raw body
    pub async fn post_raw(&self, uri: &str, body: &str) -> Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    /// Call `POST /rpc/<method>` with a JSON body
    pub async fn rpc(&self, method: &str, body: Value) -> Response {
        self.post_raw(&format!("/rpc/{}", method), &body.to_string()).await
    }
}

/// Read a response body as JSON
pub async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Read a response body as text
pub async fn text_body(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
