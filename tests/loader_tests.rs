
use scripture_probe::error::ProbeError;
use scripture_probe::loader::{load_json, load_translation, locate, DocumentShape};
use scripture_probe::reconcile::reconcile;
use scripture_probe::sink::{JsonFileSink, RecordSink};
use serde_json::{json, Value};
use std::fs;
use test_utils::translation_doc;

#[test]
fn loads_translation_and_skips_non_object_verses() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("indo_tb.json");
    let doc = translation_doc(json!([
        {"book_name": "Amsal", "book": 20, "chapter": 10, "verse": 16, "text": "Upah orang benar"},
        "garbage",
        {"book_name": "Amsal", "book": 20, "chapter": 10, "verse": 18, "text": "Siapa menyembunyikan"}
    ]));
    fs::write(&path, doc.to_string()).unwrap();

    let t = load_translation(&path).unwrap();
    assert_eq!(t.top_level_keys, vec!["metadata".to_string(), "verses".to_string()]);
    assert_eq!(t.verses.len(), 2);
    assert_eq!(t.skipped, 1);
    assert_eq!(t.verses[1].verse, Some(18));
    assert_eq!(t.verses[1].extra["book"], json!(20));
    assert_eq!(t.metadata.unwrap()["shortname"], "TB");
}

#[test]
fn rejects_documents_without_verses() {
    let dir = tempfile::tempdir().unwrap();

    let list = dir.path().join("list.json");
    fs::write(&list, "[1, 2]").unwrap();
    assert!(matches!(load_translation(&list), Err(ProbeError::NotAnObject { found: "array", .. })));

    let missing = dir.path().join("missing.json");
    fs::write(&missing, r#"{"metadata": {}}"#).unwrap();
    assert!(matches!(load_translation(&missing), Err(ProbeError::MissingVerses { .. })));

    let wrong = dir.path().join("wrong.json");
    fs::write(&wrong, r#"{"verses": {"a": 1}}"#).unwrap();
    assert!(matches!(load_translation(&wrong), Err(ProbeError::VersesNotArray { found: "object", .. })));
}

#[test]
fn reports_io_and_parse_failures() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(load_json(&dir.path().join("nope.json")), Err(ProbeError::Io { .. })));

    let bad = dir.path().join("bad.json");
    fs::write(&bad, "{\"verses\": [").unwrap();
    let err = load_json(&bad).unwrap_err();
    assert!(matches!(err, ProbeError::Json { .. }));
    assert!(err.to_string().contains("bad.json"));
}

#[test]
fn locate_falls_back_to_assets_dir() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("daily")).unwrap();
    fs::write(dir.path().join("daily/daily.json"), "[]").unwrap();

    let found = locate("daily/daily.json".as_ref(), dir.path()).unwrap();
    assert_eq!(found, dir.path().join("daily/daily.json"));
    assert!(locate("daily/absent.json".as_ref(), dir.path()).is_none());
}

#[test]
fn document_shape_describes_top_level() {
    assert_eq!(
        DocumentShape::of(&json!([{"id": 1}, {"id": 2}])),
        DocumentShape::Array { len: 2, first: Some(json!({"id": 1})) }
    );
    assert_eq!(
        DocumentShape::of(&json!({"verses": [], "metadata": {}})),
        DocumentShape::Object { keys: vec!["metadata".to_string(), "verses".to_string()] }
    );
    assert_eq!(DocumentShape::of(&json!("x")), DocumentShape::Scalar { type_name: "string" });
}

#[test]
fn file_sink_writes_pretty_unescaped_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("daily").join("verses.json");
    let records = reconcile(&[json!({"reference": "Kej 1:1", "text": "Pada mulanya Allah — menciptakan"})]);

    JsonFileSink::new(path.clone()).persist(&records).unwrap();

    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\n  {\n    \"id\": 1,"));
    assert!(raw.contains("Allah — menciptakan"));
    let back: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(back, json!([{"id": 1, "ayat": "Kej 1:1", "content": "Pada mulanya Allah — menciptakan"}]));
}

#[test]
fn file_sink_backs_up_previous_target() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("verses.json");
    fs::write(&path, r#"[{"old": true}]"#).unwrap();

    let sink = JsonFileSink::new(path.clone()).with_backup(true);
    sink.persist(&reconcile(&[json!({"text": "baru"})])).unwrap();

    let backups: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with("verses.json.") && name.ends_with(".bak"))
        .collect();
    assert_eq!(backups.len(), 1);
    assert_eq!(fs::read_to_string(dir.path().join(&backups[0])).unwrap(), r#"[{"old": true}]"#);
}

#[test]
fn backup_name_uses_timestamp() {
    use chrono::TimeZone;
    let sink = JsonFileSink::new("assets/daily/verses.json".into());
    let at = chrono::Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
    assert_eq!(
        sink.backup_path_at(at),
        std::path::PathBuf::from("assets/daily/verses.json.20240309_070501_000.bak")
    );
}
