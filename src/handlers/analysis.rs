// src/handlers/analysis.rs

use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};

use crate::{catalogue::Catalogue, error::AppError};

/// Returns the pre-computed exam analysis.
pub async fn get_analysis(
    State(catalogue): State<Arc<Catalogue>>,
) -> Result<impl IntoResponse, AppError> {
    let analysis = catalogue
        .analysis()
        .cloned()
        .ok_or(AppError::NotFound("Exam analysis not available".to_string()))?;

    Ok(Json(analysis))
}
