// src/models/question.rs

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use validator::{Validate, ValidationError};

/// One multiple-choice question as stored in `questions.json`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = validate_question))]
pub struct Question {
    /// Unique positive identifier.
    pub id: u32,

    /// The text content of the question.
    pub question: String,

    /// Ordered list of choices (e.g., ["Option A", "Option B"]).
    pub choices: Vec<String>,

    /// 0-based index of the correct choice.
    pub answer_index: usize,

    /// Optional explanation shown with the answer feedback.
    #[serde(default)]
    pub explanation: Option<String>,
}

fn validate_question(q: &Question) -> Result<(), ValidationError> {
    if q.id == 0 {
        return Err(ValidationError::new("id_must_be_positive"));
    }
    if q.question.is_empty() {
        return Err(ValidationError::new("question_cannot_be_empty"));
    }
    if q.choices.is_empty() {
        return Err(ValidationError::new("choices_cannot_be_empty"));
    }
    if q.answer_index >= q.choices.len() {
        return Err(ValidationError::new("answer_index_out_of_range"));
    }
    Ok(())
}

/// Error raised while loading the question catalog. Fatal at startup:
/// the process must not serve traffic with a broken catalog.
#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    InvalidQuestion { id: u32, reason: String },
    DuplicateId(u32),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Io(e) => write!(f, "failed to read questions file: {}", e),
            CatalogError::Parse(e) => write!(f, "failed to parse questions file: {}", e),
            CatalogError::InvalidQuestion { id, reason } => {
                write!(f, "invalid question {}: {}", id, reason)
            }
            CatalogError::DuplicateId(id) => write!(f, "duplicate question id {}", id),
        }
    }
}

impl std::error::Error for CatalogError {}

/// The immutable question catalog, loaded once at startup and shared
/// read-only with every request handler.
#[derive(Debug, Clone)]
pub struct Catalog {
    questions: Vec<Question>,
    by_id: HashMap<u32, usize>,
}

impl Catalog {
    /// Builds a catalog from an in-memory list, validating every record.
    pub fn new(questions: Vec<Question>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(questions.len());
        for (pos, q) in questions.iter().enumerate() {
            q.validate().map_err(|e| CatalogError::InvalidQuestion {
                id: q.id,
                reason: e.to_string(),
            })?;
            if by_id.insert(q.id, pos).is_some() {
                return Err(CatalogError::DuplicateId(q.id));
            }
        }
        Ok(Self { questions, by_id })
    }

    /// Reads and validates the catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path).map_err(CatalogError::Io)?;
        let questions: Vec<Question> =
            serde_json::from_str(&raw).map_err(CatalogError::Parse)?;
        Self::new(questions)
    }

    pub fn get(&self, id: u32) -> Option<&Question> {
        self.by_id.get(&id).map(|&pos| &self.questions[pos])
    }

    pub fn contains(&self, id: u32) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn count(&self) -> usize {
        self.questions.len()
    }

    /// Question ids in catalog order, used for the full-catalog quiz.
    pub fn ids(&self) -> Vec<u32> {
        self.questions.iter().map(|q| q.id).collect()
    }
}
