// src/handlers/stats.rs

use axum::{
    Json,
    extract::{Path, State},
    response::Html,
};
use sqlx::PgPool;
use std::fmt::Write;
use std::sync::Arc;

use crate::{
    error::AppError,
    models::{attempt::StatsResponse, group::GroupRegistry, question::Catalog},
    store,
    utils::html::escape_text,
};

/// GET /api/stats/{group_code} - per-question answer distributions as
/// JSON. 404 for unregistered codes; 500 when no store is configured
/// (stats have no meaningful degraded mode).
pub async fn api_stats(
    Path(group_code): Path<String>,
    State(groups): State<Arc<GroupRegistry>>,
    State(catalog): State<Arc<Catalog>>,
    State(pool): State<Option<PgPool>>,
) -> Result<Json<StatsResponse>, AppError> {
    let ids = groups.resolve(&group_code)?;
    let pool = pool.ok_or(AppError::StorageUnavailable)?;

    let items = store::aggregate(&pool, &catalog, ids, &group_code).await?;

    Ok(Json(StatsResponse {
        group: group_code,
        items,
    }))
}

/// GET /stats/{group_code} - the same aggregation rendered as an HTML
/// table, with the correct choice marked. Same validation as the API.
pub async fn stats_page(
    Path(group_code): Path<String>,
    State(groups): State<Arc<GroupRegistry>>,
    State(catalog): State<Arc<Catalog>>,
    State(pool): State<Option<PgPool>>,
) -> Result<Html<String>, AppError> {
    let ids = groups.resolve(&group_code)?;
    let pool = pool.ok_or(AppError::StorageUnavailable)?;

    let items = store::aggregate(&pool, &catalog, ids, &group_code).await?;

    let mut body = format!("<h1>Stats: {}</h1>\n", escape_text(&group_code));
    for item in &items {
        let _ = write!(body, "<h2>{}</h2>\n<table border=\"1\" cellpadding=\"6\">\n", escape_text(&item.question));
        for (i, choice) in item.choices.iter().enumerate() {
            let marker = if i == item.answer_index { " ✓" } else { "" };
            let _ = write!(
                body,
                "<tr><td>{}{}</td><td>{}</td></tr>\n",
                escape_text(choice),
                marker,
                item.counts.get(i).copied().unwrap_or(0),
            );
        }
        body.push_str("</table>\n");
    }

    Ok(Html(format!(
        r#"<!doctype html>
<html>
<head><meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1"><title>Stats</title></head>
<body style="max-width:640px;margin:40px auto;font-family:Arial;padding:0 16px;">
{}
</body>
</html>"#,
        body
    )))
}
