//! Answer-key wire types, answer classification and payload construction.

#[cfg(test)]
#[path = "payload_test.rs"]
mod payload_test;

use serde::{Deserialize, Serialize};

use crate::error::EditorError;
use crate::items::QuestionItem;
use crate::subject::ElectiveConfig;

/// Highest choice number a bubble row offers.
pub const MAX_CHOICE: u32 = 5;
/// Points used when a score is missing, unparsable or not positive.
pub const DEFAULT_POINTS: f64 = 1.0;

// =============================================================================
// WIRE TYPES
// =============================================================================

/// Identity of one exam paper for one subject.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamMetadata {
    pub provider_name: String,
    pub exam_year: u32,
    pub exam_month: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_code: Option<String>,
    #[serde(default)]
    pub subject_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paper_label: Option<String>,
}

impl ExamMetadata {
    /// Subject code when present and non-blank.
    #[must_use]
    pub fn subject_code(&self) -> Option<&str> {
        self.subject_code.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }
}

/// The one populated answer field of a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CorrectAnswer {
    #[serde(rename = "correctChoice")]
    Choice(u32),
    #[serde(rename = "correctChoices")]
    Choices(Vec<u32>),
    #[serde(rename = "correctText")]
    Text(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elective_subject: Option<String>,
}

/// One question of an outgoing answer key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionAnswer {
    pub number: u32,
    pub points: f64,
    #[serde(flatten)]
    pub answer: CorrectAnswer,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<QuestionMetadata>,
}

/// Body of `POST /exams/answer-keys`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerKeyPayload {
    pub metadata: ExamMetadata,
    pub questions: Vec<QuestionAnswer>,
}

/// A question as returned by `POST /exams/answer-keys/fetch`.
///
/// The backend may send all three answer fields with nulls, so they are read
/// individually rather than as a [`CorrectAnswer`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredQuestion {
    pub number: u32,
    #[serde(default)]
    pub points: Option<f64>,
    #[serde(default)]
    pub correct_choice: Option<u32>,
    #[serde(default)]
    pub correct_choices: Option<Vec<u32>>,
    #[serde(default)]
    pub correct_text: Option<String>,
    #[serde(default)]
    pub metadata: Option<QuestionMetadata>,
}

impl StoredQuestion {
    /// Answer string as the editor shows it: `3`, `AC`, or the text verbatim.
    #[must_use]
    pub fn answer_text(&self) -> String {
        if let Some(choice) = self.correct_choice {
            return choice.to_string();
        }
        if let Some(choices) = self.correct_choices.as_deref().filter(|c| !c.is_empty()) {
            return choices.iter().filter_map(|&n| choice_letter(n)).collect();
        }
        self.correct_text.clone().unwrap_or_default()
    }

    /// Score string; whole numbers print without a decimal point.
    #[must_use]
    pub fn score_text(&self) -> String {
        self.points.filter(|p| p.is_finite()).map(|p| p.to_string()).unwrap_or_default()
    }

    #[must_use]
    pub fn elective_subject(&self) -> Option<&str> {
        self.metadata.as_ref().and_then(|m| m.elective_subject.as_deref())
    }
}

// =============================================================================
// CLASSIFICATION
// =============================================================================

fn choice_from_letter(c: char) -> Option<u32> {
    match c {
        'A'..='E' => Some(u32::from(c) - u32::from('A') + 1),
        _ => None,
    }
}

fn choice_letter(n: u32) -> Option<char> {
    if (1..=MAX_CHOICE).contains(&n) { char::from_u32(u32::from('A') + n - 1) } else { None }
}

/// Classify an entered answer by its shape.
///
/// The trimmed, upper-cased input is a single choice when it is one of `A`–`E`
/// or `1`–`5`, a multi-choice set when every character is `A`–`E`
/// (deduplicated, first occurrence order), and free text otherwise. Blank input
/// classifies as nothing.
#[must_use]
pub fn classify_answer(raw: &str) -> Option<CorrectAnswer> {
    let s = raw.trim().to_uppercase();
    if s.is_empty() {
        return None;
    }
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if let Some(n) = choice_from_letter(c) {
            return Some(CorrectAnswer::Choice(n));
        }
        if let Some(n) = c.to_digit(10).filter(|n| (1..=MAX_CHOICE).contains(n)) {
            return Some(CorrectAnswer::Choice(n));
        }
    }
    let letters: Option<Vec<u32>> = s.chars().map(choice_from_letter).collect();
    if let Some(letters) = letters {
        let mut unique = Vec::with_capacity(letters.len());
        for n in letters {
            if !unique.contains(&n) {
                unique.push(n);
            }
        }
        return Some(CorrectAnswer::Choices(unique));
    }
    Some(CorrectAnswer::Text(s))
}

/// Points from a score string: [`DEFAULT_POINTS`] unless it parses to a positive number.
#[must_use]
pub fn parse_points(score: &str) -> f64 {
    match score.trim().parse::<f64>() {
        Ok(p) if p.is_finite() && p > 0.0 => p,
        _ => DEFAULT_POINTS,
    }
}

// =============================================================================
// CONSTRUCTION
// =============================================================================

/// The active elective: its range and the selected subject name.
#[derive(Debug, Clone, Copy)]
pub struct ActiveElective<'a> {
    pub config: &'a ElectiveConfig,
    pub subject: &'a str,
}

/// Build the save payload from the editor's slots.
///
/// Slots without a question number or without an answer are left out.
///
/// # Errors
///
/// - [`EditorError::MissingSubject`] when the metadata has no subject code
/// - [`EditorError::NoQuestions`] when there are no slots
/// - [`EditorError::NoResolvableQuestions`] when no slot produced a question
pub fn build_payload(
    metadata: &ExamMetadata,
    items: &[QuestionItem],
    answers: &[String],
    scores: &[String],
    elective: Option<ActiveElective<'_>>,
) -> Result<AnswerKeyPayload, EditorError> {
    if metadata.subject_code().is_none() {
        return Err(EditorError::MissingSubject);
    }
    if items.is_empty() {
        return Err(EditorError::NoQuestions);
    }

    let mut questions = Vec::new();
    for (i, item) in items.iter().enumerate() {
        let Some(number) = item.number() else {
            continue;
        };
        let Some(answer) = answers.get(i).and_then(|a| classify_answer(a)) else {
            continue;
        };
        let points = scores.get(i).map_or(DEFAULT_POINTS, |s| parse_points(s));
        let metadata = elective
            .filter(|e| e.config.contains(number))
            .map(|e| QuestionMetadata { elective_subject: Some(e.subject.to_owned()) });
        questions.push(QuestionAnswer { number, points, answer, metadata });
    }

    if questions.is_empty() {
        return Err(EditorError::NoResolvableQuestions);
    }
    Ok(AnswerKeyPayload { metadata: metadata.clone(), questions })
}
