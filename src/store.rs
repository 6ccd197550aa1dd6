// src/store.rs

use chrono::Utc;
use sqlx::PgPool;
use std::collections::HashMap;

use crate::error::AppError;
use crate::models::attempt::{AnswerCountRow, Attempt, QuestionStats};
use crate::models::question::Catalog;

/// Creates the answer-store schema if it does not exist yet.
/// Run once at startup when a database is configured.
pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS quiz_attempts (
            id BIGSERIAL PRIMARY KEY,
            group_code TEXT NOT NULL,
            started_at TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS quiz_answers (
            id BIGSERIAL PRIMARY KEY,
            attempt_id BIGINT NOT NULL REFERENCES quiz_attempts(id),
            group_code TEXT NOT NULL,
            question_id INTEGER NOT NULL,
            selected_index INTEGER NOT NULL,
            is_correct BOOLEAN NOT NULL,
            answered_at TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Inserts one attempt row and returns its id.
///
/// Best-effort: without a configured pool, or on any storage fault, returns
/// None and the caller degrades to a no-persistence session. Never blocks
/// the quiz flow.
pub async fn create_attempt(pool: Option<&PgPool>, group_code: &str) -> Option<i64> {
    let pool = pool?;

    let inserted = sqlx::query_as::<_, Attempt>(
        r#"
        INSERT INTO quiz_attempts (group_code, started_at)
        VALUES ($1, $2)
        RETURNING id, group_code, started_at
        "#,
    )
    .bind(group_code)
    .bind(Utc::now())
    .fetch_one(pool)
    .await;

    match inserted {
        Ok(attempt) => Some(attempt.id),
        Err(e) => {
            tracing::error!("Failed to create attempt for group {}: {:?}", group_code, e);
            None
        }
    }
}

/// Appends one answer event.
///
/// No-op without a pool or attempt id. Storage faults are logged and
/// swallowed: feedback already shown to the visitor must not change.
/// Resubmissions append a second event for the same (attempt, question)
/// pair on purpose; the aggregation counts submissions, not visitors.
pub async fn record_answer(
    pool: Option<&PgPool>,
    attempt_id: Option<i64>,
    group_code: &str,
    question_id: u32,
    selected_index: usize,
    is_correct: bool,
) {
    let (Some(pool), Some(attempt_id)) = (pool, attempt_id) else {
        return;
    };

    let result = sqlx::query(
        r#"
        INSERT INTO quiz_answers
            (attempt_id, group_code, question_id, selected_index, is_correct, answered_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(attempt_id)
    .bind(group_code)
    .bind(question_id as i32)
    .bind(selected_index as i32)
    .bind(is_correct)
    .bind(Utc::now())
    .execute(pool)
    .await;

    if let Err(e) = result {
        tracing::error!(
            "Failed to record answer (attempt {}, question {}): {:?}",
            attempt_id,
            question_id,
            e
        );
    }
}

/// Aggregates stored answers for a group into per-question choice
/// distributions, in the given registry order.
pub async fn aggregate(
    pool: &PgPool,
    catalog: &Catalog,
    group_ids: &[u32],
    group_code: &str,
) -> Result<Vec<QuestionStats>, AppError> {
    let rows = sqlx::query_as::<_, AnswerCountRow>(
        r#"
        SELECT question_id, selected_index, COUNT(*) AS n
        FROM quiz_answers
        WHERE group_code = $1
        GROUP BY question_id, selected_index
        "#,
    )
    .bind(group_code)
    .fetch_all(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to aggregate answers for group {}: {:?}", group_code, e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(assemble_stats(&rows, group_ids, catalog))
}

/// Zero-filled assembly of grouped-count rows into registry-ordered stats.
///
/// Questions with no recorded events keep all-zero counts; selections with
/// an index outside the current choice list are dropped; ids absent from
/// the catalog are skipped.
fn assemble_stats(
    rows: &[AnswerCountRow],
    group_ids: &[u32],
    catalog: &Catalog,
) -> Vec<QuestionStats> {
    let mut counts_by_question: HashMap<u32, HashMap<usize, i64>> = HashMap::new();
    for row in rows {
        if row.question_id < 0 || row.selected_index < 0 {
            continue;
        }
        counts_by_question
            .entry(row.question_id as u32)
            .or_default()
            .insert(row.selected_index as usize, row.n);
    }

    group_ids
        .iter()
        .filter_map(|&id| catalog.get(id))
        .map(|q| {
            let per_choice = counts_by_question.get(&q.id);
            let counts = (0..q.choices.len())
                .map(|i| per_choice.and_then(|c| c.get(&i)).copied().unwrap_or(0))
                .collect();
            QuestionStats {
                question_id: q.id,
                question: q.question.clone(),
                choices: q.choices.clone(),
                counts,
                answer_index: q.answer_index,
            }
        })
        .collect()
}
