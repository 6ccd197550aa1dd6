// src/handlers/pages.rs

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use std::fmt::Write;
use std::sync::Arc;
use tower_sessions::Session;

use crate::{
    error::AppError,
    handlers::{FEEDBACK_KEY, SESSION_KEY},
    models::{
        group::GroupRegistry,
        question::Catalog,
        session::{Feedback, QuizSession},
    },
    utils::html::escape_text,
};

/// Wraps page content in the shared document shell.
fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!doctype html>
<html>
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
</head>
<body style="max-width:640px;margin:40px auto;font-family:Arial;padding:0 16px;">
{body}
</body>
</html>"#,
        title = escape_text(title),
        body = body,
    ))
}

/// GET / - home page with the total question count and a start form
/// covering the full catalog.
pub async fn home(State(catalog): State<Arc<Catalog>>) -> Html<String> {
    let body = format!(
        r#"<h1>Band Regulations Quiz</h1>
<p>{total} questions in total.</p>
<form method="post" action="/start"><button type="submit">Start quiz</button></form>"#,
        total = catalog.count(),
    );
    page("Band Regulations Quiz", &body)
}

/// GET /g/{group_code} - group landing page with that group's question
/// count and a start form. 404 for unregistered codes.
pub async fn group_landing(
    Path(group_code): Path<String>,
    State(groups): State<Arc<GroupRegistry>>,
) -> Result<Html<String>, AppError> {
    let ids = groups.resolve(&group_code)?;
    let code = escape_text(&group_code);

    let body = format!(
        r#"<h1>Quiz: {code}</h1>
<p>{total} questions.</p>
<form method="post" action="/g/{code}/start"><button type="submit">Start quiz</button></form>"#,
        code = code,
        total = ids.len(),
    );
    Ok(page(&format!("Quiz {}", group_code), &body))
}

fn feedback_block(feedback: &Feedback, question_choices: &[String]) -> String {
    match feedback {
        Feedback::Message { text } => format!(
            r#"<p style="color:#b00;">{}</p>"#,
            escape_text(text)
        ),
        Feedback::Graded {
            ok,
            correct_index,
            explanation,
        } => {
            let correct_text = question_choices
                .get(*correct_index)
                .map(|c| escape_text(c))
                .unwrap_or_default();
            let mut block = if *ok {
                r#"<p style="color:#080;">Correct!</p>"#.to_string()
            } else {
                format!(
                    r#"<p style="color:#b00;">Wrong. Correct answer: {}</p>"#,
                    correct_text
                )
            };
            if let Some(explanation) = explanation {
                let _ = write!(block, "<p>{}</p>", escape_text(explanation));
            }
            block.push_str(r#"<form method="post" action="/next"><button type="submit">Next</button></form>"#);
            block
        }
    }
}

/// GET /quiz - renders the current question plus one-shot feedback from
/// the previous submission. No session redirects home; a finished
/// session redirects to the result page.
pub async fn quiz_page(
    session: Session,
    State(catalog): State<Arc<Catalog>>,
) -> Result<Response, AppError> {
    let Some(quiz) = session.get::<QuizSession>(SESSION_KEY).await? else {
        return Ok(Redirect::to("/").into_response());
    };

    let Some(question_id) = quiz.current_question_id() else {
        return Ok(Redirect::to("/result").into_response());
    };

    let question = catalog.get(question_id).ok_or_else(|| {
        AppError::InternalServerError(format!("question {} not in catalog", question_id))
    })?;

    // One-shot: consumed here so a reload shows a clean question.
    let feedback = session.remove::<Feedback>(FEEDBACK_KEY).await?;

    let mut body = format!(
        "<h1>Question {} of {}</h1>\n<p>{}</p>\n",
        quiz.index + 1,
        quiz.total(),
        escape_text(&question.question),
    );

    body.push_str(r#"<form method="post" action="/answer">"#);
    for (i, choice) in question.choices.iter().enumerate() {
        let _ = write!(
            body,
            r#"<label style="display:block;margin:6px 0;"><input type="radio" name="choice" value="{i}"> {text}</label>"#,
            i = i,
            text = escape_text(choice),
        );
    }
    body.push_str(r#"<button type="submit">Answer</button></form>"#);

    if let Some(feedback) = &feedback {
        body.push_str(&feedback_block(feedback, &question.choices));
    }

    Ok(page("Quiz", &body).into_response())
}

/// GET /result - final score and review of missed questions. Only
/// available once the sequence is complete; otherwise redirects back
/// into the flow.
pub async fn result_page(
    session: Session,
    State(catalog): State<Arc<Catalog>>,
) -> Result<Response, AppError> {
    let Some(quiz) = session.get::<QuizSession>(SESSION_KEY).await? else {
        return Ok(Redirect::to("/").into_response());
    };

    let Some(result) = quiz.result(&catalog) else {
        return Ok(Redirect::to("/quiz").into_response());
    };

    let mut body = format!(
        "<h1>Result</h1>\n<p>Score: {} of {}</p>\n",
        result.score, result.total,
    );

    if result.missed_questions.is_empty() {
        body.push_str("<p>No missed questions. Well done!</p>\n");
    } else {
        body.push_str("<h2>Missed questions</h2>\n<ul>\n");
        for q in &result.missed_questions {
            let correct = q
                .choices
                .get(q.answer_index)
                .map(|c| escape_text(c))
                .unwrap_or_default();
            let _ = write!(
                body,
                "<li><p>{}</p><p>Correct answer: {}</p>",
                escape_text(&q.question),
                correct,
            );
            if let Some(explanation) = &q.explanation {
                let _ = write!(body, "<p>{}</p>", escape_text(explanation));
            }
            body.push_str("</li>\n");
        }
        body.push_str("</ul>\n");
    }

    body.push_str(r#"<form method="post" action="/reset"><button type="submit">Back to start</button></form>"#);

    Ok(page("Result", &body).into_response())
}
