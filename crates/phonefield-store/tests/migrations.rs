use phonefield_store::Store;
use tempfile::TempDir;

#[test]
fn migrations_apply_once() {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");
    store.migrate().expect("migrate again");

    let version: i64 = store
        .connection()
        .query_row("SELECT version FROM phonefield_schema LIMIT 1;", [], |row| {
            row.get(0)
        })
        .expect("schema version");
    assert_eq!(version, 1);
    assert_eq!(store.schema_version().expect("schema version"), 1);
}

#[test]
fn schema_version_is_zero_before_migrating() {
    let store = Store::open_in_memory().expect("open in memory");
    assert_eq!(store.schema_version().expect("schema version"), 0);
}

#[test]
fn migrations_reject_newer_database() {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");
    store
        .connection()
        .execute("UPDATE phonefield_schema SET version = 99;", [])
        .expect("bump version");

    let err = store.migrate().unwrap_err();
    assert!(err.to_string().contains("newer than available migrations"));
}

#[test]
fn file_database_survives_reopen() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("phonefield.sqlite3");
    {
        let store = Store::open(&path).expect("open");
        store.migrate().expect("migrate");
    }

    let store = Store::open(&path).expect("reopen");
    assert_eq!(store.schema_version().expect("schema version"), 1);

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&path).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o077, 0);
    }
}
