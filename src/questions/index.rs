use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use super::error::QuestionError;
use super::loader::QuestionLoader;
use super::types::Question;

/// Read-only question lookup keyed by `question_id`.
///
/// Built once and shared behind `Arc`; concurrent readers need no locking.
#[derive(Debug, Clone, Default)]
pub struct QuestionIndex {
    questions: HashMap<String, Arc<Question>>,
}

impl QuestionIndex {
    /// Indexes `questions`, rejecting duplicate ids.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuestionError> {
        let mut map = HashMap::with_capacity(questions.len());

        for question in questions {
            let id = question.question_id.clone();
            if map.insert(id.clone(), Arc::new(question)).is_some() {
                return Err(QuestionError::DuplicateId { question_id: id });
            }
        }

        Ok(Self { questions: map })
    }

    /// Loads, validates and indexes a question file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, QuestionError> {
        Self::new(QuestionLoader::new(path.as_ref()).load()?)
    }

    pub fn get(&self, question_id: &str) -> Option<Arc<Question>> {
        self.questions.get(question_id).cloned()
    }

    pub fn contains(&self, question_id: &str) -> bool {
        self.questions.contains_key(question_id)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Question ids in lexical order.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.questions.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}
