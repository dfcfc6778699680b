use std::io::Write;

use vidpulse_core::{export_enriched_csv, load_dataset, DatasetError, ValidationError};

fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).expect("create fixture");
    file.write_all(content.as_bytes()).expect("write fixture");
    path
}

#[test]
fn loads_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "videos.json",
        r#"[
            {"id": "a", "title": "One", "channel_name": "X", "view_count": 100, "like_count": 1, "comment_count": 0,
             "published_at": "2026-01-02T03:04:05Z"},
            {"id": "b", "title": "Two", "channel_name": "X", "view_count": 200, "like_count": 1, "comment_count": 0}
        ]"#,
    );
    let ds = load_dataset(&path).unwrap();
    assert_eq!(ds.len(), 2);
    assert!(ds.records()[0].published_at.is_some());
    assert!(ds.records()[1].published_at.is_none());
}

#[test]
fn loads_collector_csv_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "videos.CSV",
        "video_id,title,description,channel_id,channel_title,published_at,view_count,like_count,comment_count,collected_at\n\
         v1,Daily Om Namah Shivaya,chant,UC1,Bhakti,2026-03-01T10:00:00Z,1500,120,40,2026-03-02T00:00:00\n",
    );
    let ds = load_dataset(&path).unwrap();
    assert_eq!(ds.len(), 1);
    let r = &ds.records()[0];
    assert_eq!(r.id, "v1");
    assert_eq!(r.channel_id, "UC1");
    assert_eq!(r.channel_name, "Bhakti");
    assert_eq!((r.view_count, r.like_count, r.comment_count), (1500, 120, 40));
}

#[test]
fn rejects_unknown_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "videos.parquet", "");
    let err = load_dataset(&path).unwrap_err();
    assert!(
        matches!(err, DatasetError::UnsupportedFormat(ref ext) if ext == "parquet"),
        "expected UnsupportedFormat, got: {err:?}"
    );
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_dataset(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, DatasetError::Io { .. }), "got: {err:?}");
}

#[test]
fn csv_duplicate_ids_fail_validation() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "dup.csv", "id,title\na,x\na,y\n");
    let err = load_dataset(&path).unwrap_err();
    assert!(matches!(
        err,
        DatasetError::Validation(ValidationError::DuplicateId(ref id)) if id == "a"
    ));
}

#[test]
fn export_then_load_preserves_order_and_counts() {
    let dir = tempfile::tempdir().unwrap();
    let src = write_file(
        &dir,
        "in.json",
        r#"[{"id": "z", "view_count": 3}, {"id": "a", "view_count": 1}, {"id": "m", "view_count": 2}]"#,
    );
    let ds = load_dataset(&src).unwrap();
    let out = dir.path().join("out.csv");
    export_enriched_csv(&ds, &out).unwrap();
    let reloaded = load_dataset(&out).unwrap();
    let ids: Vec<&str> = reloaded.records().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["z", "a", "m"]);
    let views: Vec<u64> = reloaded.records().iter().map(|r| r.view_count).collect();
    assert_eq!(views, vec![3, 1, 2]);
}
