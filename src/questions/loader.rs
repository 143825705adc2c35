use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use crate::constants::WEIGHT_SUM_TOLERANCE;

use super::error::QuestionError;
use super::types::Question;

const REQUIRED_FIELDS: [&str; 9] = [
    "question_id",
    "topic",
    "subtopic",
    "difficulty",
    "question_text",
    "ideal_answers",
    "evaluation",
    "rag_references",
    "metadata",
];

const WEIGHT_KEYS: [&str; 3] = ["semantic", "keyword", "evidence"];

/// Reads and validates a JSON question bank.
#[derive(Debug, Clone)]
pub struct QuestionLoader {
    path: PathBuf,
}

impl QuestionLoader {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Vec<Question>, QuestionError> {
        let raw = std::fs::read_to_string(&self.path).map_err(|source| QuestionError::Io {
            path: self.path.clone(),
            source,
        })?;

        let questions = Self::from_json_str(&raw)?;

        info!(
            path = %self.path.display(),
            count = questions.len(),
            "Question bank loaded"
        );

        Ok(questions)
    }

    /// Parses a JSON array of question records, validating each before typing it.
    pub fn from_json_str(raw: &str) -> Result<Vec<Question>, QuestionError> {
        let document: Value = serde_json::from_str(raw)?;
        let Value::Array(records) = document else {
            return Err(QuestionError::NotAnArray);
        };

        records
            .into_iter()
            .enumerate()
            .map(|(position, record)| {
                validate_question(&record, position)?;
                let mut question: Question = serde_json::from_value(record)?;
                assign_answer_ids(&mut question);
                debug!(question_id = %question.question_id, "Question parsed");
                Ok(question)
            })
            .collect()
    }
}

/// Validates the raw shape of one question record.
///
/// `position` only labels records that lack a usable `question_id`.
pub fn validate_question(record: &Value, position: usize) -> Result<(), QuestionError> {
    let question_id = record
        .get("question_id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("#{position}"));

    for field in REQUIRED_FIELDS {
        if record.get(field).is_none() {
            return Err(QuestionError::MissingField {
                question_id,
                field: field.to_string(),
            });
        }
    }

    let answers = match record.get("ideal_answers") {
        Some(Value::Array(answers)) if !answers.is_empty() => answers,
        _ => return Err(QuestionError::EmptyIdealAnswers { question_id }),
    };

    for (index, answer) in answers.iter().enumerate() {
        if !answer.get("text").is_some_and(Value::is_string) {
            return Err(QuestionError::InvalidIdealAnswer {
                question_id,
                index,
                reason: "missing text".to_string(),
            });
        }

        let concepts = match answer.get("key_concepts") {
            Some(Value::Array(concepts)) if !concepts.is_empty() => concepts,
            _ => {
                return Err(QuestionError::InvalidIdealAnswer {
                    question_id,
                    index,
                    reason: "key_concepts must be a non-empty list".to_string(),
                });
            }
        };

        let well_formed = concepts
            .iter()
            .all(|kc| kc.get("concept").is_some() && kc.get("mandatory").is_some());
        if !well_formed {
            return Err(QuestionError::InvalidKeyConcept { question_id, index });
        }
    }

    let evaluation = record.get("evaluation").unwrap_or(&Value::Null);
    let mut total = 0.0;
    for key in WEIGHT_KEYS {
        let weight = evaluation
            .get(key)
            .and_then(|w| w.as_f64().or_else(|| w.get("weight").and_then(Value::as_f64)))
            .ok_or_else(|| QuestionError::InvalidEvaluation {
                question_id: question_id.clone(),
                reason: format!("missing numeric weight for '{key}'"),
            })?;
        total += weight;
    }

    if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(QuestionError::WeightSum { question_id, total });
    }

    Ok(())
}

fn assign_answer_ids(question: &mut Question) {
    for (n, answer) in question.ideal_answers.iter_mut().enumerate() {
        if answer.answer_id.is_empty() {
            answer.answer_id = format!("{}_A{}", question.question_id, n + 1);
        }
    }
}
