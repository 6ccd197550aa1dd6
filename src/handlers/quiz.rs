// src/handlers/quiz.rs

use axum::{
    Form,
    extract::{Path, State},
    response::Redirect,
};
use serde::Deserialize;
use sqlx::PgPool;
use std::sync::Arc;
use tower_sessions::Session;

use crate::{
    error::AppError,
    handlers::{FEEDBACK_KEY, SESSION_KEY},
    models::{
        group::GroupRegistry,
        question::Catalog,
        session::{Feedback, QuizSession, Submission},
    },
    store,
};

/// Group code recorded for full-catalog runs.
const FULL_CATALOG_CODE: &str = "full";

/// Form body of POST /answer. `choice` is absent when no radio button
/// was selected.
#[derive(Debug, Deserialize)]
pub struct AnswerForm {
    pub choice: Option<usize>,
}

async fn begin_session(
    session: &Session,
    pool: Option<&PgPool>,
    group_code: &str,
    question_ids: Vec<u32>,
) -> Result<(), AppError> {
    session.clear().await;

    // Best-effort: a None attempt id disables event persistence but the
    // quiz still runs.
    let attempt_id = store::create_attempt(pool, group_code).await;
    let quiz = QuizSession::start(group_code, question_ids, attempt_id);
    session.insert(SESSION_KEY, quiz).await?;
    Ok(())
}

/// POST /start - begins a session over the full catalog.
pub async fn start_full(
    session: Session,
    State(catalog): State<Arc<Catalog>>,
    State(pool): State<Option<PgPool>>,
) -> Result<Redirect, AppError> {
    begin_session(&session, pool.as_ref(), FULL_CATALOG_CODE, catalog.ids()).await?;
    Ok(Redirect::to("/quiz"))
}

/// POST /g/{group_code}/start - begins a session over one group's
/// sequence. 404 for unregistered codes.
pub async fn start_group(
    session: Session,
    Path(group_code): Path<String>,
    State(groups): State<Arc<GroupRegistry>>,
    State(pool): State<Option<PgPool>>,
) -> Result<Redirect, AppError> {
    let ids = groups.resolve(&group_code)?.to_vec();
    begin_session(&session, pool.as_ref(), &group_code, ids).await?;
    Ok(Redirect::to("/quiz"))
}

/// POST /answer - grades the current question.
///
/// A missing choice becomes a one-shot validation message with no state
/// change. A graded submission persists one answer event (best-effort)
/// before the feedback redirect.
pub async fn answer(
    session: Session,
    State(catalog): State<Arc<Catalog>>,
    State(pool): State<Option<PgPool>>,
    Form(form): Form<AnswerForm>,
) -> Result<Redirect, AppError> {
    let Some(mut quiz) = session.get::<QuizSession>(SESSION_KEY).await? else {
        return Ok(Redirect::to("/"));
    };

    match quiz.submit(&catalog, form.choice) {
        Submission::MissingChoice => {
            let message = Feedback::Message {
                text: "Select an answer.".to_string(),
            };
            session.insert(FEEDBACK_KEY, message).await?;
        }
        Submission::Complete => {
            return Ok(Redirect::to("/result"));
        }
        Submission::Graded {
            question_id,
            selected_index,
            is_correct,
            feedback,
        } => {
            store::record_answer(
                pool.as_ref(),
                quiz.attempt_id,
                &quiz.group_code,
                question_id,
                selected_index,
                is_correct,
            )
            .await;

            session.insert(FEEDBACK_KEY, feedback).await?;
            session.insert(SESSION_KEY, quiz).await?;
        }
    }

    Ok(Redirect::to("/quiz"))
}

/// POST /next - advances to the next question.
pub async fn next(session: Session) -> Result<Redirect, AppError> {
    let Some(mut quiz) = session.get::<QuizSession>(SESSION_KEY).await? else {
        return Ok(Redirect::to("/"));
    };
    quiz.advance();
    session.insert(SESSION_KEY, quiz).await?;
    Ok(Redirect::to("/quiz"))
}

/// POST /reset - discards all per-visitor state.
pub async fn reset(session: Session) -> Result<Redirect, AppError> {
    session.flush().await?;
    Ok(Redirect::to("/"))
}
