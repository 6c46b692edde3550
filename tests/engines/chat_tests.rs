//! Chat access engine tests

use pretty_assertions::assert_eq;
use test_case::test_case;

use social_network::application::services::CreateGroupDto;
use social_network::shared::error::ErrorKind;

use crate::common::Engines;

#[test_case(5 ; "first participant")]
#[test_case(9 ; "second participant")]
#[tokio::test]
async fn test_direct_room_readable_by_participants(user_id: i64) {
    let engines = Engines::new();
    engines.chat.save_message("dm:5:9", 5, "hello").await.unwrap();
    engines.chat.save_message("dm:5:9", 9, "hi there").await.unwrap();

    let messages = engines.chat.get_message("dm:5:9", user_id).await.unwrap();

    let contents: Vec<&str> = messages.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["hello", "hi there"]);
    assert_eq!(messages[0].realname, "User 5");
    assert_eq!(messages[1].avatar_url, "https://cdn.example.com/avatars/9.png");
}

#[test_case(1 ; "unrelated user")]
#[test_case(59 ; "digit concatenation")]
#[tokio::test]
async fn test_direct_room_denied_to_outsiders(user_id: i64) {
    let engines = Engines::new();
    engines.chat.save_message("dm:5:9", 5, "secret").await.unwrap();

    let err = engines.chat.get_message("dm:5:9", user_id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PermissionDenied);
}

#[tokio::test]
async fn test_group_room_requires_membership() {
    let engines = Engines::new();
    let group = engines
        .groups
        .create_group(CreateGroupDto {
            name: "Book club".into(),
            owner_id: 1,
            initial_user_ids: vec![2],
            ..Default::default()
        })
        .await
        .unwrap();
    let room = format!("group:{}", group.id);

    engines.chat.save_message(&room, 2, "chapter 3?").await.unwrap();

    let messages = engines.chat.get_message(&room, 1).await.unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].user_id, 2);

    let err = engines.chat.get_message(&room, 3).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PermissionDenied);
}

#[tokio::test]
async fn test_unscoped_room_reads_as_empty() {
    let engines = Engines::new();
    engines.chat.save_message("lobby", 1, "anyone?").await.unwrap();

    let messages = engines.chat.get_message("lobby", 1).await.unwrap();
    assert!(messages.is_empty());
    assert_eq!(engines.store.message_count().await, 1);
}

#[test_case("dm:5" ; "missing second id")]
#[test_case("dm:a:9" ; "non numeric id")]
#[test_case("group:" ; "empty group id")]
#[tokio::test]
async fn test_malformed_room_ids_are_invalid(room_id: &str) {
    let engines = Engines::new();

    let err = engines.chat.get_message(room_id, 5).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[tokio::test]
async fn test_save_message_requires_every_field() {
    let engines = Engines::new();

    for (room, user, content) in [("", 1, "x"), ("dm:1:2", 0, "x"), ("dm:1:2", 1, "")] {
        let err = engines.chat.save_message(room, user, content).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    let err = engines.chat.get_message("dm:1:2", 0).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(engines.store.message_count().await, 0);
}

#[tokio::test]
async fn test_saving_is_not_authorized() {
    let engines = Engines::new();

    // Nobody checks that user 3 belongs to the room on write
    let saved = engines.chat.save_message("dm:1:2", 3, "hi").await.unwrap();

    assert_eq!(saved.room_id, "dm:1:2");
    assert_eq!(saved.user_id, 3);
    assert_eq!(saved.created_at.len(), "HH:MM:SS DD/MM/YYYY".len());
}
