// src/handlers/qr.rs

use axum::{
    extract::{Path, State},
    http::{HeaderMap, header},
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;

use crate::{
    error::AppError, models::group::GroupRegistry, qr, utils::html::escape_text,
};

/// Reconstructs the externally visible base URL of this request from the
/// Host header (scheme from X-Forwarded-Proto when behind a proxy).
fn request_base_url(headers: &HeaderMap) -> String {
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    format!("{}://{}", scheme, host)
}

/// GET /qr/{group_code}.png and GET /qr/{group_code}.
///
/// A single route because axum captures whole path segments; a ".png"
/// suffix selects the image, otherwise the display page. Both validate
/// the group before any image work.
pub async fn qr_entry(
    Path(name): Path<String>,
    State(groups): State<Arc<GroupRegistry>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    match name.strip_suffix(".png") {
        Some(group_code) => qr_png(group_code, &groups, &headers),
        None => qr_page(&name, &groups, &headers),
    }
}

/// PNG image encoding `{base}/g/{group_code}`.
fn qr_png(
    group_code: &str,
    groups: &GroupRegistry,
    headers: &HeaderMap,
) -> Result<Response, AppError> {
    if !groups.contains(group_code) {
        return Err(AppError::InvalidGroup);
    }

    let target = format!("{}/g/{}", request_base_url(headers), group_code);
    let png = qr::render_png(&target)?;

    Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response())
}

/// Display page: the QR image plus the encoded link text, for printing
/// or projecting.
fn qr_page(
    group_code: &str,
    groups: &GroupRegistry,
    headers: &HeaderMap,
) -> Result<Response, AppError> {
    if !groups.contains(group_code) {
        return Err(AppError::InvalidGroup);
    }

    let target = format!("{}/g/{}", request_base_url(headers), group_code);
    let code = escape_text(group_code);

    let html = format!(
        r#"<!doctype html>
<html>
<head><meta name="viewport" content="width=device-width, initial-scale=1"></head>
<body style="margin:0;display:flex;align-items:center;justify-content:center;min-height:100vh;font-family:Arial;background:#111;color:#fff;">
  <div style="text-align:center;padding:24px;">
    <h1 style="margin:0 0 16px 0;">{title}</h1>
    <img src="/qr/{code}.png" style="width:360px;max-width:90vw;background:#fff;padding:12px;border-radius:16px;">
    <p style="opacity:.85;margin-top:16px;">Link inside the QR:</p>
    <p style="word-break:break-all;opacity:.9;margin-top:6px;">{target}</p>
  </div>
</body>
</html>"#,
        title = code.to_uppercase(),
        code = code,
        target = escape_text(&target),
    );

    Ok(Html(html).into_response())
}
