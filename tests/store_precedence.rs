// tests/store_precedence.rs
// Migrate a phrase file into SQLite, then check which store the provider picks

use daily_phrase::CorpusProvider;
use daily_phrase::migrate::migrate_file;
use daily_phrase::server::db::{create_pool, ensure_schema};

#[tokio::test]
async fn test_migrated_database_takes_precedence_over_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("phrases.txt");
    std::fs::write(
        &file,
        "\"Carpe diem.\" - Horace ⚔️\n\nKeep going | Someone\nPlain phrase only\n",
    )
    .unwrap();
    let db_url = format!("sqlite:{}", dir.path().join("phrases.db").display());

    let pool = create_pool(&db_url).await.unwrap();
    let report = migrate_file(&file, &pool).await.unwrap();
    pool.close().await;
    assert_eq!(report.inserted, 3);
    assert_eq!(report.skipped, 1);

    // Diverge the file so the chosen store is observable
    std::fs::write(&file, "only in the file\n").unwrap();

    let provider = CorpusProvider::open(&db_url, &file).await;
    assert_eq!(provider.source_name(), "sqlite");
    assert_eq!(provider.size().await, 3);
    assert_eq!(provider.get(0).await.author, "Horace");
    assert_eq!(provider.get(4).await.text, "Keep going");
}

#[tokio::test]
async fn test_empty_database_falls_through_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("phrases.txt");
    std::fs::write(&file, "only in the file\n").unwrap();
    let db_url = format!("sqlite:{}", dir.path().join("phrases.db").display());

    let pool = create_pool(&db_url).await.unwrap();
    ensure_schema(&pool).await.unwrap();
    pool.close().await;

    let provider = CorpusProvider::open(&db_url, &file).await;
    assert_eq!(provider.source_name(), "file");
    assert_eq!(provider.get(12).await.text, "only in the file");
}
