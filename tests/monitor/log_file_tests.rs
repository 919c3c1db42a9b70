use wifiscope::core::monitor::EventLogFile;

#[test]
fn creates_missing_parent_directories() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("a").join("b").join("events.ndjson");

    let mut sink = EventLogFile::create(path.clone()).expect("create sink");
    sink.append(r#"{"type":"wifi_on"}"#);

    assert!(path.exists());
}

#[test]
fn appends_one_json_document_per_line() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("events.ndjson");

    let mut sink = EventLogFile::create(path.clone()).expect("create sink");
    sink.append(r#"{"type":"wifi_on","details":{}}"#);
    sink.append(r#"{"type":"connected","details":{"network_name":"A"}}"#);

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    for line in &lines {
        let value: serde_json::Value = serde_json::from_str(line).expect("valid JSON line");
        assert!(value.is_object());
    }
    assert!(contents.ends_with('\n'));
}

#[test]
fn follows_an_externally_rotated_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("events.ndjson");
    let rotated = dir.path().join("events.ndjson.1");

    let mut sink = EventLogFile::create(path.clone()).expect("create sink");
    sink.append(r#"{"seq":1}"#);
    std::fs::rename(&path, &rotated).unwrap();
    sink.append(r#"{"seq":2}"#);

    assert_eq!(std::fs::read_to_string(&rotated).unwrap(), "{\"seq\":1}\n");
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{\"seq\":2}\n");
}

#[test]
fn appends_to_preexisting_contents() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("events.ndjson");
    std::fs::write(&path, "{\"seq\":0}\n").unwrap();

    let mut sink = EventLogFile::create(path.clone()).expect("create sink");
    sink.append(r#"{"seq":1}"#);

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "{\"seq\":0}\n{\"seq\":1}\n"
    );
}
