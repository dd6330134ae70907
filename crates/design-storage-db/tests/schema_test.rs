//! Integration tests for schema initialization using in-memory SurrealDB.

use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

#[tokio::test]
async fn schema_migration_applies_successfully() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    design_storage_db::run_migrations(&db).await.unwrap();

    let mut result = db.query("INFO FOR DB").await.unwrap();
    let info: Option<surrealdb_types::Value> = result.take(0).unwrap();
    let info = info.expect("INFO FOR DB should return a value");
    let info_str = format!("{:?}", info);

    assert!(info_str.contains("design"), "missing design table");
    assert!(info_str.contains("design_id"), "missing design_id sequence");
    assert!(info_str.contains("_migration"), "missing _migration table");
}

#[tokio::test]
async fn migration_is_idempotent() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    design_storage_db::run_migrations(&db).await.unwrap();
    design_storage_db::run_migrations(&db).await.unwrap();

    let mut result = db.query("SELECT * FROM _migration").await.unwrap();
    let records: Vec<surrealdb_types::Value> = result.take(0).unwrap();
    assert_eq!(records.len(), 1, "expected exactly one migration record");
}

#[tokio::test]
async fn raw_schema_applies_without_runner() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    db.query(design_storage_db::schema_v1())
        .await
        .unwrap()
        .check()
        .unwrap();
}

#[tokio::test]
async fn manager_migrates_and_serves_repository() {
    use design_storage_core::repository::DesignRepository;
    use design_storage_core::scope::ResourceScope;

    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    let store = design_storage_db::DbManager::from_client(db).await.unwrap();
    let repo = store.repository();

    repo.ping().await.unwrap();
    let designs = repo.list_visible(&ResourceScope::default()).await.unwrap();
    assert!(designs.is_empty());
}
