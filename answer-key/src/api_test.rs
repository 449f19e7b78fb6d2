use super::*;

// =============================================================
// Parsing
// =============================================================

#[test]
fn parse_save_response() {
    let r: SaveResponse = parse_json(r#"{"status":"ok","storage":"database"}"#).unwrap();
    assert_eq!(r, SaveResponse { status: "ok".into(), storage: Some("database".into()) });
}

#[test]
fn parse_save_response_without_storage() {
    let r: SaveResponse = parse_json(r#"{"status":"ok"}"#).unwrap();
    assert_eq!(r.storage, None);
}

#[test]
fn parse_fetch_questions() {
    let text = r#"{"questions":[
        {"number":1,"points":2,"correctChoice":3},
        {"number":35,"points":3,"correctChoices":[1,3],"metadata":{"electiveSubject":"언어와 매체"}}
    ]}"#;
    let questions = parse_fetch_response(text).unwrap();
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0].answer_text(), "3");
    assert_eq!(questions[1].answer_text(), "AC");
    assert_eq!(questions[1].elective_subject(), Some("언어와 매체"));
}

#[test]
fn parse_fetch_empty_variants() {
    assert!(parse_fetch_response("").unwrap().is_empty());
    assert!(parse_fetch_response("null").unwrap().is_empty());
    assert!(parse_fetch_response(r#"{"questions":[]}"#).unwrap().is_empty());
    assert!(parse_fetch_response(r#"{"questions":null}"#).unwrap().is_empty());
    assert!(parse_fetch_response("{}").unwrap().is_empty());
}

#[test]
fn parse_fetch_malformed_is_parse_error() {
    let err = parse_fetch_response("{not json").unwrap_err();
    assert!(matches!(err, ApiError::Parse(_)));
}

#[test]
fn parse_delete_and_existing_counts() {
    let deleted: DeleteResponse = parse_json(r#"{"status":"ok","deletedCount":12}"#).unwrap();
    assert_eq!(deleted.deleted_count, 12);
    let existing: ExistingResponse = parse_json(r#"{"existing_answer_count":4}"#).unwrap();
    assert_eq!(existing.existing_answer_count, 4);
}

// =============================================================
// Request shape
// =============================================================

#[test]
fn metadata_request_wraps_metadata() {
    let metadata = ExamMetadata {
        provider_name: "교육청".into(),
        exam_year: 2024,
        exam_month: 3,
        subject_code: Some("2".into()),
        subject_name: "수학".into(),
        ..Default::default()
    };
    let json = serde_json::to_value(MetadataRequest { metadata: &metadata }).unwrap();
    assert_eq!(json["metadata"]["providerName"], "교육청");
    assert_eq!(json["metadata"]["examMonth"], 3);
    assert_eq!(json["metadata"]["subjectName"], "수학");
}

// =============================================================
// Client
// =============================================================

#[test]
fn http_backend_builds_from_config() {
    let backend = HttpBackend::new(ApiConfig::default()).unwrap();
    assert_eq!(backend.config().endpoint(SAVE_PATH), "http://localhost:8000/api/exams/answer-keys");
}
