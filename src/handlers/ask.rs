// src/handlers/ask.rs

use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use validator::Validate;

use crate::{
    error::AppError,
    models::ask::{AskRequest, AskResponse},
    tutor::Tutor,
};

/// Forwards a free-form question to the AI tutor.
///
/// Only citations with a link are returned. Any tutor failure becomes a
/// generic 502 message; the cause is logged.
pub async fn ask(
    State(tutor): State<Arc<dyn Tutor>>,
    Json(payload): Json<AskRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let answer = tutor.ask(payload.query.trim()).await?;

    Ok(Json(AskResponse {
        answer: answer.text,
        citations: answer.citations,
    }))
}
