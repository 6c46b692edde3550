//! Relationship engine tests

use pretty_assertions::assert_eq;
use test_case::test_case;

use social_network::domain::RelationStatus;
use social_network::shared::error::ErrorKind;

use crate::common::Engines;

#[test_case(1, 2 ; "same direction")]
#[test_case(2, 1 ; "reverse direction")]
#[tokio::test]
async fn test_second_request_on_pair_already_exists(user_id: i64, friend_id: i64) {
    let engines = Engines::new();
    engines.relationships.add_friend(1, 2).await.unwrap();

    let err = engines.relationships.add_friend(user_id, friend_id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    assert_eq!(engines.store.relations_between(1, 2).await.len(), 1);
}

#[tokio::test]
async fn test_add_friend_creates_pending_relation() {
    let engines = Engines::new();

    let relation = engines.relationships.add_friend(10, 20).await.unwrap();

    assert_eq!(relation.user_id, 10);
    assert_eq!(relation.friend_id, 20);
    assert_eq!(relation.status, RelationStatus::Pending.code());
}

#[tokio::test]
async fn test_add_friend_rejects_self_and_missing_ids() {
    let engines = Engines::new();

    let err = engines.relationships.add_friend(7, 7).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    let err = engines.relationships.add_friend(0, 7).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[tokio::test]
async fn test_sent_and_incoming_lists_are_enriched_newest_first() {
    let engines = Engines::new();
    engines.relationships.add_friend(1, 2).await.unwrap();
    engines.relationships.add_friend(1, 3).await.unwrap();
    engines.relationships.add_friend(4, 1).await.unwrap();

    let sent = engines.relationships.get_sent_friend(1).await.unwrap();
    let sent_to: Vec<i64> = sent.iter().map(|r| r.friend_id).collect();
    assert_eq!(sent_to, vec![3, 2]);
    assert_eq!(sent[0].friend_realname, "User 3");
    assert_eq!(sent[0].avatar_url, "https://cdn.example.com/avatars/3.png");

    let incoming = engines.relationships.get_incoming_friend(1).await.unwrap();
    assert_eq!(incoming.len(), 1);
    assert_eq!(incoming[0].friend_id, 4);
    assert_eq!(incoming[0].friend_realname, "User 4");
}

#[tokio::test]
async fn test_only_recipient_accepts_and_only_once() {
    let engines = Engines::new();
    let relation = engines.relationships.add_friend(1, 2).await.unwrap();

    let err = engines
        .relationships
        .accept_friend(relation.relation_id, 1)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PermissionDenied);

    let accepted = engines
        .relationships
        .accept_friend(relation.relation_id, 2)
        .await
        .unwrap();
    assert_eq!(accepted.friend_id, 1);
    assert_eq!(accepted.status, RelationStatus::Accepted.code());

    let err = engines
        .relationships
        .accept_friend(relation.relation_id, 2)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_either_party_may_reject_but_not_a_stranger() {
    let engines = Engines::new();
    let first = engines.relationships.add_friend(1, 2).await.unwrap();
    let second = engines.relationships.add_friend(3, 4).await.unwrap();

    let err = engines
        .relationships
        .reject_friend(first.relation_id, 9)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PermissionDenied);

    // Requester cancels
    engines.relationships.reject_friend(first.relation_id, 1).await.unwrap();
    // Recipient declines
    engines.relationships.reject_friend(second.relation_id, 4).await.unwrap();

    assert!(engines.store.relations_between(1, 2).await.is_empty());
    assert!(engines.store.relations_between(3, 4).await.is_empty());

    let err = engines
        .relationships
        .reject_friend(first.relation_id, 1)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_friend_list_resolves_counterpart_from_either_side() {
    let engines = Engines::new();
    let a = engines.relationships.add_friend(1, 2).await.unwrap();
    let b = engines.relationships.add_friend(3, 1).await.unwrap();
    engines.relationships.add_friend(1, 5).await.unwrap();
    engines.relationships.accept_friend(a.relation_id, 2).await.unwrap();
    engines.relationships.accept_friend(b.relation_id, 1).await.unwrap();

    let mut friends: Vec<i64> = engines
        .relationships
        .get_all_friend(1)
        .await
        .unwrap()
        .into_iter()
        .map(|f| f.friend_id)
        .collect();
    friends.sort();

    assert_eq!(friends, vec![2, 3]);
}

#[tokio::test]
async fn test_unfriend_requires_accepted_relation() {
    let engines = Engines::new();
    let relation = engines.relationships.add_friend(1, 2).await.unwrap();

    let err = engines.relationships.unfriend(1, 2).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    engines.relationships.accept_friend(relation.relation_id, 2).await.unwrap();
    engines.relationships.unfriend(2, 1).await.unwrap();

    assert!(engines.store.relations_between(1, 2).await.is_empty());
}

#[tokio::test]
async fn test_blocking_twice_leaves_one_blocked_row() {
    let engines = Engines::new();

    engines.relationships.block_user(1, 2).await.unwrap();
    engines.relationships.block_user(1, 2).await.unwrap();

    let rows = engines.store.relations_between(1, 2).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status, RelationStatus::Blocked);
    assert_eq!(rows[0].user_id, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_blocks_on_fresh_pair_all_succeed() {
    let engines = Engines::new();

    let tasks: Vec<_> = (0..8)
        .map(|i| {
            let relationships = engines.relationships.clone();
            let (blocker, blocked) = if i % 2 == 0 { (5, 6) } else { (6, 5) };
            tokio::spawn(async move { relationships.block_user(blocker, blocked).await })
        })
        .collect();

    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let rows = engines.store.relations_between(5, 6).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status, RelationStatus::Blocked);
}

#[tokio::test]
async fn test_block_overwrites_existing_relation_with_blocker_direction() {
    let engines = Engines::new();
    let relation = engines.relationships.add_friend(1, 2).await.unwrap();
    engines.relationships.accept_friend(relation.relation_id, 2).await.unwrap();

    engines.relationships.block_user(2, 1).await.unwrap();

    let rows = engines.store.relations_between(1, 2).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, relation.relation_id);
    assert_eq!((rows[0].user_id, rows[0].friend_id), (2, 1));
    assert_eq!(rows[0].status, RelationStatus::Blocked);

    let err = engines.relationships.block_user(3, 3).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[tokio::test]
async fn test_can_chat_only_for_accepted_friends() {
    let engines = Engines::new();
    let relation = engines.relationships.add_friend(1, 2).await.unwrap();

    let err = engines.relationships.can_chat(1, 2).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    engines.relationships.accept_friend(relation.relation_id, 2).await.unwrap();
    assert!(engines.relationships.can_chat(2, 1).await.unwrap());

    // A blocked pair is simply "not friends"
    engines.relationships.block_user(1, 2).await.unwrap();
    let err = engines.relationships.can_chat(1, 2).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = engines.relationships.can_chat(4, 4).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}
