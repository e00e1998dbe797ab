use goalgraph_core::db::migrations::latest_version;
use goalgraph_core::db::{open_db, open_db_in_memory};
use goalgraph_core::{
    CategoryKind, CategoryList, CategoryStore, RepoError, SlotRepository, SqliteSlotRepository,
    CATEGORY_SLOT_KEY,
};
use rusqlite::Connection;

#[test]
fn open_db_applies_latest_schema() {
    let conn = open_db_in_memory().unwrap();
    let version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, latest_version());

    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'kv_slots'
            );",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1);
}

#[test]
fn repository_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteSlotRepository::try_new(&conn).err().unwrap();
    assert!(matches!(
        err,
        RepoError::UninitializedConnection {
            actual_version: 0,
            ..
        }
    ));
}

#[test]
fn sqlite_slots_upsert() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();

    assert_eq!(repo.read_slot("k").unwrap(), None);
    repo.write_slot("k", "one").unwrap();
    repo.write_slot("k", "two").unwrap();
    assert_eq!(repo.read_slot("k").unwrap().as_deref(), Some("two"));

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_slots;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn save_then_load_round_trips_in_memory_db() {
    let conn = open_db_in_memory().unwrap();

    let saved = {
        let mut store = CategoryStore::open(SqliteSlotRepository::try_new(&conn).unwrap());
        store.append(CategoryKind::Output);
        store.append(CategoryKind::Input);
        store.categories().clone()
    };

    let reloaded = CategoryStore::open(SqliteSlotRepository::try_new(&conn).unwrap());
    assert_eq!(reloaded.categories(), &saved);
    assert_eq!(reloaded.categories().len(), 8);
}

#[test]
fn save_then_load_round_trips_across_file_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("goalgraph.sqlite3");

    let saved = {
        let conn = open_db(&db_path).unwrap();
        let mut store = CategoryStore::open(SqliteSlotRepository::try_new(&conn).unwrap());
        store.append(CategoryKind::Input);
        store.categories().clone()
    };

    let conn = open_db(&db_path).unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();
    let raw = repo.read_slot(CATEGORY_SLOT_KEY).unwrap().unwrap();
    assert_eq!(CategoryList::from_snapshot(&raw).unwrap(), saved);

    let reloaded = CategoryStore::open(repo);
    assert_eq!(reloaded.categories(), &saved);
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("future.sqlite3");
    {
        let conn = Connection::open(&db_path).unwrap();
        conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version() + 1))
            .unwrap();
    }

    let err = open_db(&db_path).err().unwrap();
    assert!(err.to_string().contains("newer than supported"));
}
