use lingo_core::model::{LanguageCode, QuizResult, UserProgress};
use lingo_core::time::{CalendarZone, fixed_now};
use storage::progress::{PROGRESS_KEY, decode_progress, encode_progress};
use storage::repository::{KeyValueStore, Storage};
use storage::sqlite::SqliteRepository;

#[tokio::test]
async fn sqlite_set_get_remove() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_kv_roundtrip?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert_eq!(repo.get("missing").await.unwrap(), None);

    repo.set("greeting", "namaste").await.unwrap();
    repo.set("greeting", "vanakkam").await.unwrap();
    assert_eq!(
        repo.get("greeting").await.unwrap().as_deref(),
        Some("vanakkam")
    );

    repo.remove("greeting").await.unwrap();
    repo.remove("greeting").await.unwrap();
    assert_eq!(repo.get("greeting").await.unwrap(), None);
}

#[tokio::test]
async fn sqlite_migrations_are_idempotent() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_kv_migrate?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("first migrate");
    repo.set("k", "v").await.unwrap();
    repo.migrate().await.expect("second migrate");
    assert_eq!(repo.get("k").await.unwrap().as_deref(), Some("v"));
}

#[tokio::test]
async fn sqlite_storage_persists_progress_document() {
    let storage = Storage::sqlite("sqlite:file:memdb_kv_progress?mode=memory&cache=shared")
        .await
        .expect("storage");

    let mut progress = UserProgress::new(fixed_now());
    let tamil = LanguageCode::new("tamil").unwrap();
    progress.apply_quiz_result(
        &tamil,
        QuizResult::new(12, 15).unwrap(),
        fixed_now(),
        CalendarZone::utc(),
    );

    let raw = encode_progress(&progress).unwrap();
    storage.kv.set(PROGRESS_KEY, &raw).await.unwrap();

    let stored = storage.kv.get(PROGRESS_KEY).await.unwrap().expect("document");
    let decoded = decode_progress(&stored, &UserProgress::new(fixed_now())).unwrap();
    assert_eq!(decoded, progress);
    assert!(decoded.language(&tamil).unwrap().completed);
}
