// src/models/attempt.rs

use serde::Serialize;
use sqlx::FromRow;

/// Represents the 'quiz_attempts' table in the database.
/// One row per quiz start, insert-only.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Attempt {
    pub id: i64,
    pub group_code: String,
    pub started_at: chrono::DateTime<chrono::Utc>,
}

/// One grouped-count row from the 'quiz_answers' aggregation query:
/// how many times `selected_index` was chosen for `question_id`.
#[derive(Debug, Clone, FromRow)]
pub struct AnswerCountRow {
    pub question_id: i32,
    pub selected_index: i32,
    pub n: i64,
}

/// Per-question answer distribution for the stats payload.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionStats {
    pub question_id: u32,
    pub question: String,
    pub choices: Vec<String>,
    /// counts[i] = number of recorded selections of choice i.
    pub counts: Vec<i64>,
    pub answer_index: usize,
}

/// Body of `GET /api/stats/{group_code}`.
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub group: String,
    pub items: Vec<QuestionStats>,
}
