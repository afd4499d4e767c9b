use std::sync::Arc;

use reading_core::model::{QuizContent, Session, Stage};
use storage::repository::KeyValueRepository;
use storage::sqlite::SqliteRepository;
use storage::{DEFAULT_SLOT_KEY, SessionRecord, SessionSlot, Storage};

async fn connect(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

#[tokio::test]
async fn sqlite_put_get_overwrite() {
    let repo = connect("memdb_kv").await;

    assert_eq!(repo.get_value("k").await.unwrap(), None);
    repo.put_value("k", "one").await.unwrap();
    repo.put_value("k", "two").await.unwrap();
    assert_eq!(repo.get_value("k").await.unwrap().as_deref(), Some("two"));
}

#[tokio::test]
async fn sqlite_migrations_are_idempotent() {
    let repo = connect("memdb_migrate").await;
    repo.put_value("k", "v").await.unwrap();
    repo.migrate().await.expect("second migrate");
    assert_eq!(repo.get_value("k").await.unwrap().as_deref(), Some("v"));
}

#[tokio::test]
async fn sqlite_session_slot_round_trip() {
    let repo = connect("memdb_slot").await;
    let slot = SessionSlot::new(Arc::new(repo.clone()), DEFAULT_SLOT_KEY);
    let content = QuizContent::cambridge_demo();

    let mut session = Session::new(content.duration_secs());
    session.set_answer(content.questions(), "q5", "True");
    session.set_stage(Stage::Reviewing);
    slot.save(&SessionRecord::from_session(&session)).await.unwrap();

    let restored = slot.load().await.expect("stored").into_session(&content);
    assert_eq!(restored, session);
}

#[tokio::test]
async fn sqlite_slot_tolerates_corrupt_value() {
    let repo = connect("memdb_corrupt").await;
    repo.put_value(DEFAULT_SLOT_KEY, "]]").await.unwrap();
    let slot = SessionSlot::new(Arc::new(repo), DEFAULT_SLOT_KEY);
    assert_eq!(slot.load().await, None);
}

#[tokio::test]
async fn storage_sqlite_builds_value_repository() {
    let storage = Storage::sqlite("sqlite:file:memdb_storage?mode=memory&cache=shared")
        .await
        .expect("storage");
    storage.values.put_value("a", "b").await.unwrap();
    assert_eq!(storage.values.get_value("a").await.unwrap().as_deref(), Some("b"));
}
