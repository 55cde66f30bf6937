use chrono::NaiveDate;
use seminarplan::{
    Break, JsonSemesterStore, LecturePeriod, PersistenceError, SemesterConfig, SemesterStore,
    load_semesters_from_json, save_semesters_to_json,
};
use std::collections::BTreeMap;
use std::io::Write;
use tempfile::NamedTempFile;

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn write_json(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

const SEMESTERS: &str = r#"{
  "SoSe 2024": {
    "lecture_period": ["2024-04-08", "2024-07-19"],
    "breaks": [["Pfingstpause", "2024-05-20", "2024-05-24"]]
  },
  "WiSe 2024/25": {
    "lecture_period": ["2024-10-07", "2025-02-07"]
  }
}"#;

#[test]
fn loads_semester_with_breaks() {
    let file = write_json(SEMESTERS);
    let store = JsonSemesterStore::new(file.path());

    let config = store.load("SoSe 2024").expect("load semester");
    assert_eq!(config.lecture_period, LecturePeriod::new(d(2024, 4, 8), d(2024, 7, 19)));
    assert_eq!(
        config.breaks,
        vec![Break::new("Pfingstpause", d(2024, 5, 20), d(2024, 5, 24))]
    );
}

#[test]
fn missing_breaks_default_to_empty() {
    let file = write_json(SEMESTERS);
    let store = JsonSemesterStore::new(file.path());
    let config = store.load("WiSe 2024/25").unwrap();
    assert!(config.breaks.is_empty());
    assert_eq!(config.lecture_period.years().into_iter().collect::<Vec<_>>(), vec![2024, 2025]);
}

#[test]
fn lists_semesters_in_sorted_order() {
    let file = write_json(SEMESTERS);
    let store = JsonSemesterStore::new(file.path());
    assert_eq!(
        store.list_semesters().unwrap(),
        vec!["SoSe 2024".to_string(), "WiSe 2024/25".to_string()]
    );
}

#[test]
fn unknown_semester_is_not_found() {
    let file = write_json(SEMESTERS);
    let store = JsonSemesterStore::new(file.path());
    let err = store.load("SoSe 1999").unwrap_err();
    assert!(matches!(&err, PersistenceError::SemesterNotFound(id) if id == "SoSe 1999"));
    assert_eq!(err.to_string(), "no dates found for semester \"SoSe 1999\"");
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonSemesterStore::new(dir.path().join("absent.json"));
    assert!(matches!(store.load("SoSe 2024"), Err(PersistenceError::Io(_))));
}

#[test]
fn malformed_json_is_a_serialization_error() {
    let file = write_json(r#"{ "SoSe 2024": { "lecture_period": ["2024-04-08"] } }"#);
    let store = JsonSemesterStore::new(file.path());
    assert!(matches!(
        store.load("SoSe 2024"),
        Err(PersistenceError::Serialization(_))
    ));
}

#[test]
fn inverted_lecture_period_is_invalid_data() {
    let file = write_json(
        r#"{ "Broken": { "lecture_period": ["2024-09-01", "2024-08-01"], "breaks": [] } }"#,
    );
    let store = JsonSemesterStore::new(file.path());
    match store.load("Broken") {
        Err(PersistenceError::InvalidData(msg)) => assert!(msg.contains("Broken")),
        other => panic!("expected invalid data, got {other:?}"),
    }
}

#[test]
fn save_then_load_preserves_configuration() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("semesters.json");

    let mut semesters = BTreeMap::new();
    semesters.insert(
        "SoSe 2025".to_string(),
        SemesterConfig::new(
            LecturePeriod::new(d(2025, 4, 22), d(2025, 7, 25)),
            vec![Break::new("Pfingstpause", d(2025, 6, 10), d(2025, 6, 13))],
        ),
    );
    save_semesters_to_json(&semesters, &path).expect("save semesters");

    let loaded = load_semesters_from_json(&path).expect("load semesters");
    assert_eq!(loaded, semesters);

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"lecture_period\""));
    assert!(raw.contains("\"2025-06-10\""));
}

#[test]
fn save_rejects_inverted_break() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("semesters.json");

    let mut semesters = BTreeMap::new();
    semesters.insert(
        "SoSe 2025".to_string(),
        SemesterConfig::new(
            LecturePeriod::new(d(2025, 4, 22), d(2025, 7, 25)),
            vec![Break::new("Kaputt", d(2025, 6, 13), d(2025, 6, 10))],
        ),
    );
    assert!(matches!(
        save_semesters_to_json(&semesters, &path),
        Err(PersistenceError::InvalidData(_))
    ));
    assert!(!path.exists());
}

#[test]
fn bundled_semester_file_is_valid() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data/semester_dates.json");
    let semesters = load_semesters_from_json(path).expect("bundled data loads");
    assert!(semesters.contains_key("SoSe 2024"));
}
