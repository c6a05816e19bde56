use jabdb::{Adapter, DbError, Entry, ErrorKind, SingleFileAdapter, SingleFileConfig, Table};
use serde_json::{Value, json};
use std::path::Path;

const PREFILLED: &str = r#"{
    "meta": {"owner": "tests"},
    "tables": {
        "test_table": {
            "name": "test_table",
            "entries": {
                "1": {"id": "1", "value": {"number": 1, "string": "lorem"}},
                "2": {"id": "2", "value": {"number": 2, "string": "ipsum"}}
            }
        },
        "test_table2": {"name": "test_table2", "entries": {}}
    }
}"#;

async fn prefilled_adapter(dir: &Path) -> SingleFileAdapter {
    let path = dir.join("prefilled.json");
    tokio::fs::write(&path, PREFILLED).await.unwrap();
    let adapter = SingleFileAdapter::new(&path);
    adapter.connect().await.unwrap();
    adapter
}

async fn read_json(path: &Path) -> Value {
    serde_json::from_slice(&tokio::fs::read(path).await.unwrap()).unwrap()
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<_> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn connect_initializes_missing_source() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("db.json");

    let adapter = SingleFileAdapter::new(&path);
    adapter.connect().await.unwrap();

    assert_eq!(read_json(&path).await, json!({"meta": {}, "tables": {}}));

    // Connecting again keeps the existing document.
    adapter.save_table(&Table::new("t")).await.unwrap();
    adapter.connect().await.unwrap();
    assert!(adapter.has_table("t").await.unwrap());
}

#[tokio::test]
async fn connect_rejects_malformed_source() {
    let dir = tempfile::tempdir().unwrap();

    let path = dir.path().join("missing_meta.json");
    tokio::fs::write(&path, r#"{"tables": {}}"#).await.unwrap();
    let err = SingleFileAdapter::new(&path).connect().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedSourceFile);

    let path = dir.path().join("garbage.json");
    tokio::fs::write(&path, "{ not json").await.unwrap();
    let err = SingleFileAdapter::new(&path).connect().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedSourceFile);
}

#[tokio::test]
async fn json_extension_is_enforced_unless_disabled() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.store");

    let err = SingleFileAdapter::new(&path).connect().await.unwrap_err();
    assert!(matches!(err, DbError::MalformedSourceFile(_)));
    assert!(!path.exists());

    let adapter = SingleFileAdapter::with_config(
        SingleFileConfig::new(&path).require_json_extension(false),
    );
    adapter.connect().await.unwrap();
    assert!(path.exists());
}

#[tokio::test]
async fn directory_source_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("folder.json");
    tokio::fs::create_dir(&path).await.unwrap();

    let err = SingleFileAdapter::new(&path).connect().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[tokio::test]
async fn get_table_reads_prefilled_entries() {
    let dir = tempfile::tempdir().unwrap();
    let adapter = prefilled_adapter(dir.path()).await;

    let table = adapter.get_table("test_table").await.unwrap();
    assert_eq!(table.name, "test_table");
    assert_eq!(table.len(), 2);
    assert_eq!(table.get("1").unwrap().value["string"], "lorem");

    let err = adapter.get_table("__notexisting__").await.unwrap_err();
    assert!(matches!(err, DbError::TableNotFound(name) if name == "__notexisting__"));
}

#[tokio::test]
async fn save_table_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let adapter = SingleFileAdapter::new(dir.path().join("writable.json"));
    adapter.connect().await.unwrap();

    let empty = Table::new("table1");
    adapter.save_table(&empty).await.unwrap();
    assert_eq!(adapter.get_table("table1").await.unwrap(), empty);

    let mut table = Table::new("table1");
    table.insert(Entry::new("1", json!({"number": 1, "string": "lorem"})));
    table.insert(Entry::new("b", json!([1, 2, 3])));
    adapter.save_table(&table).await.unwrap();
    assert_eq!(adapter.get_table("table1").await.unwrap(), table);
}

#[tokio::test]
async fn save_table_preserves_other_tables_and_meta() {
    let dir = tempfile::tempdir().unwrap();
    let adapter = prefilled_adapter(dir.path()).await;

    adapter.save_table(&Table::new("fresh")).await.unwrap();

    let doc = read_json(adapter.path()).await;
    assert_eq!(doc["meta"], json!({"owner": "tests"}));
    assert_eq!(doc["tables"]["test_table"]["entries"]["2"]["value"]["number"], 2);
    assert_eq!(doc["tables"]["fresh"], json!({"name": "fresh", "entries": {}}));
}

#[tokio::test]
async fn delete_table_removes_it() {
    let dir = tempfile::tempdir().unwrap();
    let adapter = prefilled_adapter(dir.path()).await;

    adapter.get_table("test_table2").await.unwrap();
    adapter.delete_table("test_table2").await.unwrap();

    let err = adapter.get_table("test_table2").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TableNotFound);

    let err = adapter.delete_table("test_table2").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TableNotFound);
}

#[tokio::test]
async fn pretty_output_is_still_readable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pretty.json");
    let adapter = SingleFileAdapter::with_config(SingleFileConfig::new(&path).pretty(true));
    adapter.connect().await.unwrap();
    adapter.save_table(&Table::new("t")).await.unwrap();

    let text = tokio::fs::read_to_string(&path).await.unwrap();
    assert!(text.contains('\n'));
    assert!(adapter.has_table("t").await.unwrap());
    assert_eq!(file_names(dir.path()), vec!["pretty.json"]);
}

#[tokio::test]
async fn external_corruption_surfaces_on_next_read() {
    let dir = tempfile::tempdir().unwrap();
    let adapter = prefilled_adapter(dir.path()).await;

    tokio::fs::write(adapter.path(), r#"{"meta": {}}"#).await.unwrap();

    let err = adapter.get_table("test_table").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedSourceFile);
}

#[tokio::test]
async fn empty_table_array_source_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.json");
    tokio::fs::write(&path, r#"{"meta": {}, "tables": []}"#)
        .await
        .unwrap();

    let adapter = SingleFileAdapter::new(&path);
    adapter.connect().await.unwrap();
    assert!(!adapter.has_table("t").await.unwrap());

    let mut table = Table::new("t");
    table.insert(Entry::new("0", json!("zero")));
    adapter.save_table(&table).await.unwrap();

    let stored = adapter.get_table("t").await.unwrap();
    assert_eq!(stored.get("0").unwrap().value, json!("zero"));
    assert!(read_json(&path).await["tables"].is_object());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn overlapping_saves_never_fail_or_corrupt_the_source() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("busy.json");
    let adapter = SingleFileAdapter::new(&path);
    adapter.connect().await.unwrap();

    for round in 0..5 {
        let mut handles = Vec::new();
        for writer in 0..8 {
            let adapter = adapter.clone();
            handles.push(tokio::spawn(async move {
                let mut table = Table::new(format!("t{}", writer));
                table.insert(Entry::new("0", json!(round)));
                adapter.save_table(&table).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        // Racing writers may drop each other's tables, but every read must
        // still see a complete document.
        let raw = read_json(&path).await;
        assert!(raw["tables"].is_object());
        assert!(adapter.get_table("missing").await.unwrap_err().is_not_found());
    }

    assert_eq!(file_names(dir.path()), vec!["busy.json"]);
}
