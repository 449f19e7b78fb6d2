#![allow(clippy::float_cmp)]

use super::*;
use crate::subject::ElectiveFamily;

fn metadata() -> ExamMetadata {
    ExamMetadata {
        provider_name: "평가원".into(),
        exam_year: 2025,
        exam_month: 6,
        subject_code: Some("1".into()),
        subject_name: "국어".into(),
        ..Default::default()
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| (*s).to_owned()).collect()
}

// =============================================================
// classify_answer
// =============================================================

#[test]
fn classify_single_digit_choice() {
    assert_eq!(classify_answer("3"), Some(CorrectAnswer::Choice(3)));
    assert_eq!(classify_answer(" 5 "), Some(CorrectAnswer::Choice(5)));
}

#[test]
fn classify_single_letter_choice() {
    assert_eq!(classify_answer("b"), Some(CorrectAnswer::Choice(2)));
    assert_eq!(classify_answer("E"), Some(CorrectAnswer::Choice(5)));
}

#[test]
fn classify_letter_set() {
    assert_eq!(classify_answer("AC"), Some(CorrectAnswer::Choices(vec![1, 3])));
    assert_eq!(classify_answer("dca"), Some(CorrectAnswer::Choices(vec![4, 3, 1])));
    assert_eq!(classify_answer("ACA"), Some(CorrectAnswer::Choices(vec![1, 3])));
}

#[test]
fn classify_text_fallbacks() {
    assert_eq!(classify_answer("37"), Some(CorrectAnswer::Text("37".into())));
    assert_eq!(classify_answer("6"), Some(CorrectAnswer::Text("6".into())));
    assert_eq!(classify_answer("0"), Some(CorrectAnswer::Text("0".into())));
    assert_eq!(classify_answer("AF"), Some(CorrectAnswer::Text("AF".into())));
    assert_eq!(classify_answer("x1"), Some(CorrectAnswer::Text("X1".into())));
}

#[test]
fn classify_blank_is_none() {
    assert_eq!(classify_answer(""), None);
    assert_eq!(classify_answer("   "), None);
}

// =============================================================
// parse_points
// =============================================================

#[test]
fn points_default_when_invalid() {
    assert_eq!(parse_points(""), 1.0);
    assert_eq!(parse_points("abc"), 1.0);
    assert_eq!(parse_points("0"), 1.0);
    assert_eq!(parse_points("-2"), 1.0);
}

#[test]
fn points_parse_decimals() {
    assert_eq!(parse_points("3"), 3.0);
    assert_eq!(parse_points("2.5"), 2.5);
}

// =============================================================
// build_payload
// =============================================================

#[test]
fn payload_refused_without_subject_code() {
    let items = vec![QuestionItem::grid(1)];
    let mut meta = metadata();
    meta.subject_code = None;
    let err = build_payload(&meta, &items, &strings(&["3"]), &strings(&["2"]), None);
    assert_eq!(err, Err(EditorError::MissingSubject));

    meta.subject_code = Some("  ".into());
    let err = build_payload(&meta, &items, &strings(&["3"]), &strings(&["2"]), None);
    assert_eq!(err, Err(EditorError::MissingSubject));
}

#[test]
fn payload_refused_without_items() {
    assert_eq!(build_payload(&metadata(), &[], &[], &[], None), Err(EditorError::NoQuestions));
}

#[test]
fn payload_refused_when_nothing_resolves() {
    let items = vec![QuestionItem { qid: "name".into(), kind: crate::items::QuestionKind::Digits, max_length: 3 }];
    let err = build_payload(&metadata(), &items, &strings(&["x"]), &strings(&[""]), None);
    assert_eq!(err, Err(EditorError::NoResolvableQuestions));
}

#[test]
fn payload_drops_blank_answers() {
    let items: Vec<QuestionItem> = (1..=3).map(QuestionItem::grid).collect();
    let payload = build_payload(&metadata(), &items, &strings(&["1", "", "AC"]), &strings(&["2", "", ""]), None);
    let payload = payload.unwrap();
    assert_eq!(payload.questions.len(), 2);
    assert_eq!(payload.questions[0].number, 1);
    assert_eq!(payload.questions[0].points, 2.0);
    assert_eq!(payload.questions[1].number, 3);
    assert_eq!(payload.questions[1].points, 1.0);
    assert_eq!(payload.questions[1].answer, CorrectAnswer::Choices(vec![1, 3]));
}

#[test]
fn payload_tags_elective_range_only() {
    let items: Vec<QuestionItem> = (33..=36).map(QuestionItem::grid).collect();
    let elective = ActiveElective { config: ElectiveFamily::Korean.config(), subject: "언어와 매체" };
    let payload =
        build_payload(&metadata(), &items, &strings(&["1", "2", "3", "4"]), &[], Some(elective)).unwrap();
    assert!(payload.questions[0].metadata.is_none());
    assert!(payload.questions[1].metadata.is_none());
    assert_eq!(
        payload.questions[2].metadata,
        Some(QuestionMetadata { elective_subject: Some("언어와 매체".into()) })
    );
    assert!(payload.questions[3].metadata.is_some());
}

#[test]
fn payload_serializes_wire_shape() {
    let items = vec![QuestionItem::grid(35), QuestionItem::digits(36, 10)];
    let elective = ActiveElective { config: ElectiveFamily::Korean.config(), subject: "화법과 작문" };
    let payload = build_payload(&metadata(), &items, &strings(&["3", "37"]), &strings(&["2", "3"]), Some(elective));
    let json = serde_json::to_value(payload.unwrap()).unwrap();
    assert_eq!(json["metadata"]["subjectCode"], "1");
    assert_eq!(json["metadata"]["examYear"], 2025);
    assert!(json["metadata"].get("examCode").is_none());
    assert_eq!(
        json["questions"][0],
        serde_json::json!({
            "number": 35,
            "points": 2.0,
            "correctChoice": 3,
            "metadata": { "electiveSubject": "화법과 작문" }
        })
    );
    assert_eq!(json["questions"][1]["correctText"], "37");
    assert!(json["questions"][1].get("correctChoice").is_none());
}

// =============================================================
// StoredQuestion
// =============================================================

#[test]
fn stored_question_answer_text() {
    let q = StoredQuestion { number: 1, correct_choice: Some(4), ..Default::default() };
    assert_eq!(q.answer_text(), "4");
    let q = StoredQuestion { number: 1, correct_choices: Some(vec![1, 3]), ..Default::default() };
    assert_eq!(q.answer_text(), "AC");
    let q = StoredQuestion { number: 1, correct_text: Some("37".into()), ..Default::default() };
    assert_eq!(q.answer_text(), "37");
    assert_eq!(StoredQuestion::default().answer_text(), "");
}

#[test]
fn stored_question_score_text() {
    let q = StoredQuestion { number: 1, points: Some(2.0), ..Default::default() };
    assert_eq!(q.score_text(), "2");
    let q = StoredQuestion { number: 1, points: Some(2.5), ..Default::default() };
    assert_eq!(q.score_text(), "2.5");
    assert_eq!(StoredQuestion::default().score_text(), "");
}

#[test]
fn stored_question_tolerates_null_fields() {
    let json = r#"{"number": 23, "points": 4, "correctChoice": null, "correctChoices": null,
        "correctText": "12", "metadata": {"electiveSubject": "미적분", "other": 1}}"#;
    let q: StoredQuestion = serde_json::from_str(json).unwrap();
    assert_eq!(q.answer_text(), "12");
    assert_eq!(q.score_text(), "4");
    assert_eq!(q.elective_subject(), Some("미적분"));
}

#[test]
fn metadata_subject_code_trims() {
    let mut meta = metadata();
    meta.subject_code = Some(" 7 ".into());
    assert_eq!(meta.subject_code(), Some("7"));
}
