// src/models/session.rs

use serde::{Deserialize, Serialize};

use crate::models::question::{Catalog, Question};

/// Per-visitor quiz state, carried in the signed session cookie store.
/// `index == question_ids.len()` signals completion; that is a normal
/// terminal condition, not a fault.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSession {
    pub question_ids: Vec<u32>,
    pub index: usize,
    pub score: usize,
    /// Missed question ids in order of occurrence, duplicates preserved.
    pub missed: Vec<u32>,
    pub group_code: String,
    /// None when the store was unavailable at start; disables event
    /// persistence but never blocks the quiz flow.
    pub attempt_id: Option<i64>,
}

/// One-shot feedback stored beside the session and consumed on the next
/// quiz-page render.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Feedback {
    /// Validation message, e.g. "select an answer".
    Message { text: String },
    /// Grading outcome for a submitted choice.
    Graded {
        ok: bool,
        correct_index: usize,
        explanation: Option<String>,
    },
}

/// Outcome of a single answer submission.
#[derive(Debug, Clone)]
pub enum Submission {
    /// No choice provided; state unchanged.
    MissingChoice,
    /// The sequence is already finished; state unchanged.
    Complete,
    /// Graded against the catalog; score/missed updated.
    Graded {
        question_id: u32,
        selected_index: usize,
        is_correct: bool,
        feedback: Feedback,
    },
}

/// Final result, hydrated from the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct QuizResult {
    pub score: usize,
    pub total: usize,
    pub missed_questions: Vec<Question>,
}

impl QuizSession {
    /// Initializes a fresh InProgress session for the given sequence.
    pub fn start(group_code: &str, question_ids: Vec<u32>, attempt_id: Option<i64>) -> Self {
        Self {
            question_ids,
            index: 0,
            score: 0,
            missed: Vec::new(),
            group_code: group_code.to_string(),
            attempt_id,
        }
    }

    pub fn total(&self) -> usize {
        self.question_ids.len()
    }

    pub fn is_complete(&self) -> bool {
        self.index >= self.question_ids.len()
    }

    /// The id of the question at the current position, or None on completion.
    pub fn current_question_id(&self) -> Option<u32> {
        self.question_ids.get(self.index).copied()
    }

    /// Grades a submission against the catalog's stored answer.
    ///
    /// A missing selection changes nothing and yields a validation message
    /// upstream. `is_correct` is always derived from the catalog, never
    /// trusted from the client.
    pub fn submit(&mut self, catalog: &Catalog, selected: Option<usize>) -> Submission {
        let Some(question_id) = self.current_question_id() else {
            return Submission::Complete;
        };
        let Some(selected_index) = selected else {
            return Submission::MissingChoice;
        };

        // Session ids are taken from the registry/catalog at start, so the
        // lookup cannot miss; treat a miss as an already-finished sequence.
        let Some(question) = catalog.get(question_id) else {
            tracing::error!("session question {} missing from catalog", question_id);
            return Submission::Complete;
        };

        let is_correct = selected_index == question.answer_index;
        if is_correct {
            self.score += 1;
        } else {
            self.missed.push(question_id);
        }

        Submission::Graded {
            question_id,
            selected_index,
            is_correct,
            feedback: Feedback::Graded {
                ok: is_correct,
                correct_index: question.answer_index,
                explanation: question.explanation.clone(),
            },
        }
    }

    /// Moves to the next position. No bound check: completion is detected
    /// by `current_question_id`.
    pub fn advance(&mut self) {
        self.index += 1;
    }

    /// Final result; only available once the sequence is complete.
    pub fn result(&self, catalog: &Catalog) -> Option<QuizResult> {
        if !self.is_complete() {
            return None;
        }
        let missed_questions = self
            .missed
            .iter()
            .filter_map(|&id| catalog.get(id).cloned())
            .collect();
        Some(QuizResult {
            score: self.score,
            total: self.total(),
            missed_questions,
        })
    }
}
