// src/handlers/subjects.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::{
    catalogue::Catalogue,
    error::AppError,
    models::subject::{SubjectDetail, SubjectSummary},
};

/// Lists all subjects of the syllabus.
pub async fn list_subjects(
    State(catalogue): State<Arc<Catalogue>>,
) -> Result<impl IntoResponse, AppError> {
    let subjects: Vec<SubjectSummary> = catalogue
        .subjects()
        .iter()
        .map(SubjectSummary::from)
        .collect();

    Ok(Json(subjects))
}

/// Retrieves a subject with its chapters and study links.
/// Question banks are not included.
pub async fn get_subject(
    State(catalogue): State<Arc<Catalogue>>,
    Path(subject_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let subject = catalogue
        .subject(&subject_id)
        .ok_or(AppError::NotFound("Subject not found".to_string()))?;

    Ok(Json(SubjectDetail::from(subject)))
}
