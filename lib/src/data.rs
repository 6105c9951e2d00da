use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ParseError, QuizError, ValidationError};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct QuizDocument {
    pub title: String,

    pub questions: Vec<Question>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Question {
    pub question: String,
    pub correct_answer: String,
    pub wrong_answers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub references: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Question {
    /// The correct answer followed by all wrong answers, in document order.
    pub fn all_answers(&self) -> Vec<String> {
        let mut answers = Vec::with_capacity(1 + self.wrong_answers.len());
        answers.push(self.correct_answer.clone());
        answers.extend(self.wrong_answers.iter().cloned());

        answers
    }
}

/// Parses `text` as JSON and validates it against the quiz schema.
pub fn load_and_validate(text: &str) -> Result<QuizDocument, QuizError> {
    let raw: Value = serde_json::from_str(text).map_err(ParseError::from)?;
    let document = validate(&raw)?;

    log::debug!(
        "loaded quiz `{}` with {} questions",
        document.title,
        document.questions.len()
    );

    Ok(document)
}

/// Checks a parsed JSON value against the quiz schema.
///
/// Checks run in a fixed order and stop at the first failure, so the
/// reported error is deterministic for a given document.
pub fn validate(raw: &Value) -> Result<QuizDocument, ValidationError> {
    let root = raw
        .as_object()
        .ok_or_else(|| ValidationError::wrong_type(None, "quiz document must be a JSON object"))?;

    for field in ["title", "questions"] {
        if !root.contains_key(field) {
            return Err(ValidationError::missing_field(None, field));
        }
    }

    let title = require_string(None, "title", &root["title"])?;

    let raw_questions = root["questions"]
        .as_array()
        .ok_or_else(|| ValidationError::wrong_type(None, "`questions` must be an array"))?;
    if raw_questions.is_empty() {
        return Err(ValidationError::empty_value(
            None,
            "`questions` must contain at least one question",
        ));
    }

    let questions = raw_questions
        .iter()
        .enumerate()
        .map(|(index, value)| validate_question(index + 1, value))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(QuizDocument { title, questions })
}

fn validate_question(index: usize, value: &Value) -> Result<Question, ValidationError> {
    let raw = value
        .as_object()
        .ok_or_else(|| ValidationError::wrong_type(Some(index), "question must be a JSON object"))?;

    for field in ["question", "correct_answer", "wrong_answers"] {
        if !raw.contains_key(field) {
            return Err(ValidationError::missing_field(Some(index), field));
        }
    }

    let question = require_string(Some(index), "question", &raw["question"])?;
    let correct_answer = require_string(Some(index), "correct_answer", &raw["correct_answer"])?;

    let wrong_answers = require_string_array(Some(index), "wrong_answers", &raw["wrong_answers"])?;
    if wrong_answers.is_empty() {
        return Err(ValidationError::empty_value(
            Some(index),
            "`wrong_answers` must contain at least one answer",
        ));
    }

    let mut seen = HashSet::new();
    for answer in std::iter::once(&correct_answer).chain(wrong_answers.iter()) {
        if !seen.insert(answer.as_str()) {
            return Err(ValidationError::duplicate_answer(index, answer));
        }
    }

    let explanation = optional_string(index, "explanation", raw)?;
    let category = optional_string(index, "category", raw)?;
    let references = match raw.get("references") {
        Some(value) => Some(require_string_array(Some(index), "references", value)?),
        None => None,
    };

    Ok(Question {
        question,
        correct_answer,
        wrong_answers,
        explanation,
        references,
        category,
    })
}

fn require_string(
    question: Option<usize>,
    field: &str,
    value: &Value,
) -> Result<String, ValidationError> {
    let text = value.as_str().ok_or_else(|| {
        ValidationError::wrong_type(question, format!("`{field}` must be a string"))
    })?;

    if text.trim().is_empty() {
        return Err(ValidationError::empty_value(
            question,
            format!("`{field}` must not be empty"),
        ));
    }

    Ok(text.to_owned())
}

fn require_string_array(
    question: Option<usize>,
    field: &str,
    value: &Value,
) -> Result<Vec<String>, ValidationError> {
    let items = value.as_array().ok_or_else(|| {
        ValidationError::wrong_type(question, format!("`{field}` must be an array"))
    })?;

    items
        .iter()
        .map(|item| require_string(question, field, item))
        .collect()
}

fn optional_string(
    index: usize,
    field: &str,
    raw: &serde_json::Map<String, Value>,
) -> Result<Option<String>, ValidationError> {
    match raw.get(field) {
        Some(value) => Ok(Some(require_string(Some(index), field, value)?)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::ValidationErrorKind;

    #[test]
    fn accepts_valid_document_and_preserves_fields() {
        let document = validate(&json!({
            "title": "Networking",
            "questions": [
                {
                    "question": "What does TCP stand for?",
                    "correct_answer": "Transmission Control Protocol",
                    "wrong_answers": ["Transfer Control Protocol", "Timed Control Protocol"],
                    "explanation": "Defined in RFC 9293.",
                    "references": ["https://www.rfc-editor.org/rfc/rfc9293"],
                    "category": "Protocols"
                },
                {
                    "question": "Default HTTPS port?",
                    "correct_answer": "443",
                    "wrong_answers": ["80"]
                }
            ]
        }))
        .unwrap();

        assert_eq!(document.title, "Networking");
        assert_eq!(document.questions.len(), 2);

        let first = &document.questions[0];
        assert_eq!(first.question, "What does TCP stand for?");
        assert_eq!(first.correct_answer, "Transmission Control Protocol");
        assert_eq!(
            first.wrong_answers,
            vec!["Transfer Control Protocol", "Timed Control Protocol"]
        );
        assert_eq!(first.explanation.as_deref(), Some("Defined in RFC 9293."));
        assert_eq!(
            first.references.as_deref(),
            Some(&["https://www.rfc-editor.org/rfc/rfc9293".to_owned()][..])
        );
        assert_eq!(first.category.as_deref(), Some("Protocols"));

        let second = &document.questions[1];
        assert_eq!(second.question, "Default HTTPS port?");
        assert!(second.explanation.is_none());
        assert!(second.references.is_none());
        assert!(second.category.is_none());
    }

    #[test]
    fn rejects_non_object_root() {
        let error = validate(&json!([1, 2, 3])).unwrap_err();

        assert_eq!(error.kind, ValidationErrorKind::WrongType);
        assert!(error.question.is_none());
    }

    #[test]
    fn rejects_missing_title() {
        let error = validate(&json!({ "questions": [] })).unwrap_err();

        assert_eq!(error.kind, ValidationErrorKind::MissingField);
        assert!(error.message.contains("`title`"));
    }

    #[test]
    fn rejects_missing_questions() {
        let error = validate(&json!({ "title": "T" })).unwrap_err();

        assert_eq!(error.kind, ValidationErrorKind::MissingField);
        assert!(error.message.contains("`questions`"));
    }

    #[test]
    fn rejects_blank_title() {
        let error = validate(&json!({ "title": "   ", "questions": [] })).unwrap_err();

        assert_eq!(error.kind, ValidationErrorKind::EmptyValue);
    }

    #[test]
    fn rejects_empty_question_list() {
        let error = validate(&json!({ "title": "T", "questions": [] })).unwrap_err();

        assert_eq!(error.kind, ValidationErrorKind::EmptyValue);
        assert!(error.question.is_none());
    }

    #[test]
    fn rejects_question_missing_correct_answer_with_one_based_index() {
        let error = validate(&json!({
            "title": "T",
            "questions": [
                { "question": "Q1", "correct_answer": "A", "wrong_answers": ["B"] },
                { "question": "Q2", "wrong_answers": ["B"] }
            ]
        }))
        .unwrap_err();

        assert_eq!(error.kind, ValidationErrorKind::MissingField);
        assert_eq!(error.question, Some(2));
        assert!(error.message.contains("`correct_answer`"));
    }

    #[test]
    fn rejects_non_array_wrong_answers() {
        let error = validate(&json!({
            "title": "T",
            "questions": [
                { "question": "Q1", "correct_answer": "A", "wrong_answers": "B" }
            ]
        }))
        .unwrap_err();

        assert_eq!(error.kind, ValidationErrorKind::WrongType);
        assert_eq!(error.question, Some(1));
    }

    #[test]
    fn rejects_empty_wrong_answers() {
        let error = validate(&json!({
            "title": "T",
            "questions": [
                { "question": "Q1", "correct_answer": "A", "wrong_answers": [] }
            ]
        }))
        .unwrap_err();

        assert_eq!(error.kind, ValidationErrorKind::EmptyValue);
        assert_eq!(error.question, Some(1));
    }

    #[test]
    fn rejects_correct_answer_duplicated_in_wrong_answers() {
        let error = validate(&json!({
            "title": "T",
            "questions": [
                { "question": "Q1", "correct_answer": "A", "wrong_answers": ["B", "A"] }
            ]
        }))
        .unwrap_err();

        assert_eq!(error.kind, ValidationErrorKind::DuplicateAnswer);
        assert_eq!(error.question, Some(1));
    }

    #[test]
    fn rejects_duplicate_wrong_answers() {
        let error = validate(&json!({
            "title": "T",
            "questions": [
                { "question": "Q1", "correct_answer": "A", "wrong_answers": ["B", "B"] }
            ]
        }))
        .unwrap_err();

        assert_eq!(error.kind, ValidationErrorKind::DuplicateAnswer);
    }

    #[test]
    fn answer_comparison_is_case_sensitive() {
        let document = validate(&json!({
            "title": "T",
            "questions": [
                { "question": "Q1", "correct_answer": "a", "wrong_answers": ["A"] }
            ]
        }));

        assert!(document.is_ok());
    }

    #[test]
    fn rejects_empty_optional_fields_when_present() {
        let error = validate(&json!({
            "title": "T",
            "questions": [
                {
                    "question": "Q1",
                    "correct_answer": "A",
                    "wrong_answers": ["B"],
                    "category": ""
                }
            ]
        }))
        .unwrap_err();

        assert_eq!(error.kind, ValidationErrorKind::EmptyValue);
        assert_eq!(error.question, Some(1));
    }

    #[test]
    fn rejects_non_string_reference_entries() {
        let error = validate(&json!({
            "title": "T",
            "questions": [
                {
                    "question": "Q1",
                    "correct_answer": "A",
                    "wrong_answers": ["B"],
                    "references": ["ok", 7]
                }
            ]
        }))
        .unwrap_err();

        assert_eq!(error.kind, ValidationErrorKind::WrongType);
        assert_eq!(error.question, Some(1));
    }

    #[test]
    fn first_failure_wins() {
        // Question 1 has an empty text and question 2 is missing fields
        // entirely; the earlier question must be the one reported.
        let error = validate(&json!({
            "title": "T",
            "questions": [
                { "question": "", "correct_answer": "A", "wrong_answers": ["B"] },
                { "question": "Q2" }
            ]
        }))
        .unwrap_err();

        assert_eq!(error.kind, ValidationErrorKind::EmptyValue);
        assert_eq!(error.question, Some(1));
    }

    #[test]
    fn load_and_validate_reports_parse_position() {
        let error = load_and_validate("{\n  \"title\": \"T\",\n  questions\n}").unwrap_err();

        match error {
            QuizError::Parse(parse) => {
                assert_eq!(parse.line, 3);
                assert!(parse.column > 0);
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn load_and_validate_accepts_valid_text() {
        let document = load_and_validate(
            r#"{
                "title": "T",
                "questions": [
                    { "question": "Q1", "correct_answer": "A", "wrong_answers": ["B", "C"] }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(document.questions[0].all_answers(), vec!["A", "B", "C"]);
    }
}
