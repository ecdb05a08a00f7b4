//! Quiz document loader.
//!
//! Parses pasted JSON quiz documents into a [`Quiz`], rejecting malformed
//! input with a descriptive [`LoadError`], and lints loaded quizzes for
//! non-fatal issues.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::error::LoadError;
use crate::model::{Question, Quiz};

/// Title used when the document has no `Title` field.
pub const DEFAULT_TITLE: &str = "Quiz";

/// Intermediate JSON structure for one question element.
#[derive(Debug, Deserialize)]
struct RawQuestion {
    #[serde(rename = "Question")]
    question: String,
    #[serde(rename = "Options")]
    options: Vec<String>,
    #[serde(rename = "Answer")]
    answer: RawAnswer,
    #[serde(rename = "Explanation", default)]
    explanation: String,
}

/// The `Answer` field is either a bare index or a single-element array
/// holding one index; both normalize to one `usize`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawAnswer {
    Index(usize),
    Wrapped(Vec<usize>),
}

impl RawAnswer {
    fn normalize(&self) -> Option<usize> {
        match self {
            RawAnswer::Index(i) => Some(*i),
            RawAnswer::Wrapped(v) => v.first().copied(),
        }
    }
}

/// Parse a raw quiz document into a [`Quiz`].
///
/// Pure and idempotent: the same input always yields the same quiz or the
/// same error kind. Syntax errors map to [`LoadError::ParseFailure`]; a
/// parseable document with a missing, non-array, or empty `Quiz` field (or a
/// malformed question) maps to [`LoadError::SchemaViolation`].
pub fn load_quiz(raw: &str) -> std::result::Result<Quiz, LoadError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LoadError::Empty);
    }

    let document: Value =
        serde_json::from_str(trimmed).map_err(|e| LoadError::ParseFailure(e.to_string()))?;

    let object = document
        .as_object()
        .ok_or_else(|| LoadError::SchemaViolation("top level is not an object".into()))?;

    let title = match object.get("Title") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        _ => DEFAULT_TITLE.to_string(),
    };

    let items = match object.get("Quiz") {
        None => {
            return Err(LoadError::SchemaViolation(
                "missing \"Quiz\" field".into(),
            ));
        }
        Some(Value::Array(items)) if items.is_empty() => {
            return Err(LoadError::SchemaViolation(
                "\"Quiz\" array is empty".into(),
            ));
        }
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(LoadError::SchemaViolation(
                "\"Quiz\" is not an array".into(),
            ));
        }
    };

    let questions = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let raw: RawQuestion = serde_json::from_value(item.clone())
                .map_err(|e| LoadError::SchemaViolation(format!("question {}: {e}", i + 1)))?;

            let correct_index = raw.answer.normalize().ok_or_else(|| {
                LoadError::SchemaViolation(format!("question {}: \"Answer\" array is empty", i + 1))
            })?;

            if raw.options.is_empty() {
                return Err(LoadError::SchemaViolation(format!(
                    "question {}: \"Options\" is empty",
                    i + 1
                )));
            }
            if correct_index >= raw.options.len() {
                return Err(LoadError::SchemaViolation(format!(
                    "question {}: answer index {} out of range for {} options",
                    i + 1,
                    correct_index,
                    raw.options.len()
                )));
            }

            Ok(Question {
                text: raw.question,
                options: raw.options,
                correct_index,
                explanation: raw.explanation,
            })
        })
        .collect::<std::result::Result<Vec<_>, LoadError>>()?;

    Ok(Quiz { title, questions })
}

/// Load a quiz from a JSON file on disk.
pub fn load_quiz_file(path: &Path) -> Result<Quiz> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quiz file: {}", path.display()))?;

    load_quiz(&content).with_context(|| format!("failed to load quiz: {}", path.display()))
}

/// A non-fatal advisory from quiz linting.
#[derive(Debug, Clone)]
pub struct LintWarning {
    /// One-based question number (if applicable).
    pub question: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Lint a loaded quiz for issues that do not prevent playing it.
pub fn lint_quiz(quiz: &Quiz) -> Vec<LintWarning> {
    let mut warnings = Vec::new();

    // Duplicate question text
    let mut seen = HashSet::new();
    for (i, q) in quiz.questions.iter().enumerate() {
        if !seen.insert(q.text.trim()) {
            warnings.push(LintWarning {
                question: Some(i + 1),
                message: format!("duplicate question text: {:?}", q.text),
            });
        }
    }

    for (i, q) in quiz.questions.iter().enumerate() {
        if q.text.trim().is_empty() {
            warnings.push(LintWarning {
                question: Some(i + 1),
                message: "question text is blank".into(),
            });
        }
        if q.explanation.trim().is_empty() {
            warnings.push(LintWarning {
                question: Some(i + 1),
                message: "explanation is blank".into(),
            });
        }
        // Number-key shortcuts only reach the first nine options
        if q.options.len() > 9 {
            warnings.push(LintWarning {
                question: Some(i + 1),
                message: format!(
                    "{} options; options beyond 9 cannot be selected with number keys",
                    q.options.len()
                ),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_JSON: &str = r#"{
        "Title": "Arithmetic",
        "Quiz": [
            {
                "Question": "2+2?",
                "Options": ["3", "4", "5"],
                "Answer": 1,
                "Explanation": "Basic math"
            },
            {
                "Question": "3*3?",
                "Options": ["6", "9"],
                "Answer": [1],
                "Explanation": "Times tables"
            }
        ]
    }"#;

    #[test]
    fn load_valid_document() {
        let quiz = load_quiz(VALID_JSON).unwrap();
        assert_eq!(quiz.title, "Arithmetic");
        assert_eq!(quiz.len(), 2);
        assert_eq!(quiz.questions[0].text, "2+2?");
        assert_eq!(quiz.questions[0].options, vec!["3", "4", "5"]);
        assert_eq!(quiz.questions[0].explanation, "Basic math");
    }

    #[test]
    fn answer_forms_normalize_identically() {
        let quiz = load_quiz(VALID_JSON).unwrap();
        // "Answer": 1 and "Answer": [1] both mean index 1
        assert_eq!(quiz.questions[0].correct_index, 1);
        assert_eq!(quiz.questions[1].correct_index, 1);
    }

    #[test]
    fn missing_title_defaults() {
        let quiz = load_quiz(
            r#"{"Quiz":[{"Question":"q","Options":["a","b"],"Answer":0,"Explanation":"e"}]}"#,
        )
        .unwrap();
        assert_eq!(quiz.title, DEFAULT_TITLE);
    }

    #[test]
    fn empty_input_rejected() {
        assert!(matches!(load_quiz(""), Err(LoadError::Empty)));
        assert!(matches!(load_quiz("   \n\t"), Err(LoadError::Empty)));
    }

    #[test]
    fn malformed_json_rejected() {
        assert!(matches!(
            load_quiz("{not json"),
            Err(LoadError::ParseFailure(_))
        ));
    }

    #[test]
    fn missing_quiz_field_rejected() {
        let err = load_quiz("{}").unwrap_err();
        assert!(err.is_schema_violation(), "got {err:?}");
    }

    #[test]
    fn non_array_quiz_field_rejected() {
        let err = load_quiz(r#"{"Quiz": "nope"}"#).unwrap_err();
        assert!(err.is_schema_violation());
    }

    #[test]
    fn empty_quiz_array_rejected() {
        let err = load_quiz(r#"{"Quiz": []}"#).unwrap_err();
        assert!(err.is_schema_violation());
    }

    #[test]
    fn non_object_top_level_rejected() {
        let err = load_quiz("[1, 2, 3]").unwrap_err();
        assert!(err.is_schema_violation());
    }

    #[test]
    fn out_of_range_answer_rejected() {
        let err = load_quiz(
            r#"{"Quiz":[{"Question":"q","Options":["a","b"],"Answer":5,"Explanation":"e"}]}"#,
        )
        .unwrap_err();
        assert!(err.is_schema_violation());
        assert!(err.to_string().contains("out of range"), "got: {err}");
    }

    #[test]
    fn empty_options_rejected() {
        let err = load_quiz(
            r#"{"Quiz":[{"Question":"q","Options":[],"Answer":0,"Explanation":"e"}]}"#,
        )
        .unwrap_err();
        assert!(err.is_schema_violation());
    }

    #[test]
    fn empty_answer_array_rejected() {
        let err = load_quiz(
            r#"{"Quiz":[{"Question":"q","Options":["a"],"Answer":[],"Explanation":"e"}]}"#,
        )
        .unwrap_err();
        assert!(err.is_schema_violation());
    }

    #[test]
    fn load_is_idempotent() {
        let first = load_quiz(VALID_JSON).unwrap();
        let second = load_quiz(VALID_JSON).unwrap();
        assert_eq!(first.title, second.title);
        assert_eq!(first.len(), second.len());
    }

    #[test]
    fn lint_duplicate_questions() {
        let quiz = load_quiz(
            r#"{"Quiz":[
                {"Question":"same","Options":["a","b"],"Answer":0,"Explanation":"e"},
                {"Question":"same","Options":["a","b"],"Answer":1,"Explanation":"e"}
            ]}"#,
        )
        .unwrap();
        let warnings = lint_quiz(&quiz);
        assert!(warnings.iter().any(|w| w.message.contains("duplicate")));
    }

    #[test]
    fn lint_blank_explanation() {
        let quiz =
            load_quiz(r#"{"Quiz":[{"Question":"q","Options":["a","b"],"Answer":0}]}"#).unwrap();
        let warnings = lint_quiz(&quiz);
        assert!(warnings.iter().any(|w| w.message.contains("explanation")));
        assert_eq!(warnings[0].question, Some(1));
    }

    #[test]
    fn lint_clean_quiz_no_warnings() {
        let quiz = load_quiz(VALID_JSON).unwrap();
        assert!(lint_quiz(&quiz).is_empty());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quiz.json");
        std::fs::write(&path, VALID_JSON).unwrap();

        let quiz = load_quiz_file(&path).unwrap();
        assert_eq!(quiz.title, "Arithmetic");
    }

    #[test]
    fn load_from_missing_file_fails() {
        assert!(load_quiz_file(Path::new("no_such_quiz.json")).is_err());
    }
}
