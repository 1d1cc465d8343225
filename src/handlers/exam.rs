// src/handlers/exam.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    catalogue::Catalogue,
    config::Config,
    error::AppError,
    exam::{
        builder::build_exam,
        session::ExamSession,
        store::{SessionStore, StoredExam},
    },
    models::exam::{
        CreateExamRequest, ExamResponse, ExamResult, SetAnswerRequest, SetAnswerResponse,
    },
};

fn exam_not_found() -> AppError {
    AppError::NotFound("Exam not found".to_string())
}

/// Starts a model exam for one chapter.
///
/// Picks up to `exam_question_limit` random questions from the chapter's bank.
/// A chapter without questions yields an empty exam, which the client shows
/// as "no questions yet".
pub async fn create_exam(
    State(catalogue): State<Arc<Catalogue>>,
    State(store): State<SessionStore>,
    State(config): State<Config>,
    Json(req): Json<CreateExamRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let (subject, chapter) = catalogue
        .chapter(&req.subject_id, &req.chapter_id)
        .ok_or(AppError::NotFound("Chapter not found".to_string()))?;

    let questions = build_exam(
        &chapter.questions,
        config.exam_question_limit,
        &mut rand::thread_rng(),
    );

    let stored = StoredExam {
        subject_id: subject.id.clone(),
        subject_name: subject.name.clone(),
        chapter_id: chapter.id.clone(),
        chapter_name: chapter.name.clone(),
        session: ExamSession::new(questions),
        created_at: Utc::now(),
    };
    let response_seed = stored.clone();

    let exam_id = store.insert(stored).await;
    tracing::info!(
        "Exam {} started for {}/{} with {} of {} questions",
        exam_id,
        subject.id,
        chapter.id,
        response_seed.session.questions().len(),
        chapter.questions.len()
    );

    Ok((
        StatusCode::CREATED,
        Json(ExamResponse::from_stored(exam_id, &response_seed)),
    ))
}

/// Returns the current state of an exam, including the result once submitted.
pub async fn get_exam(
    State(store): State<SessionStore>,
    Path(exam_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let exam = store
        .with_exam(exam_id, |stored| ExamResponse::from_stored(exam_id, stored))
        .await
        .ok_or_else(exam_not_found)?;

    Ok(Json(exam))
}

/// Records the answer to one question.
///
/// Questions outside the exam and exams already submitted are left
/// untouched; the response reports `accepted: false`.
pub async fn set_answer(
    State(store): State<SessionStore>,
    Path((exam_id, question_id)): Path<(Uuid, String)>,
    Json(req): Json<SetAnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let accepted = store
        .with_exam_mut(exam_id, |stored| {
            stored.session.set_answer(&question_id, req.answer)
        })
        .await
        .ok_or_else(exam_not_found)?;

    if !accepted {
        tracing::debug!(
            "Ignored answer for question '{}' on exam {}",
            question_id,
            exam_id
        );
    }

    Ok(Json(SetAnswerResponse { accepted }))
}

/// Submits an exam and returns the graded result.
///
/// Submitting twice is harmless and returns the same result.
pub async fn submit_exam(
    State(store): State<SessionStore>,
    Path(exam_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let (first_submit, result) = store
        .with_exam_mut(exam_id, |stored| {
            let first_submit = stored.session.submit();
            (first_submit, ExamResult::from_session(&stored.session))
        })
        .await
        .ok_or_else(exam_not_found)?;

    let result = result.ok_or(AppError::InternalServerError(format!(
        "Exam {} has no result after submission",
        exam_id
    )))?;

    if first_submit {
        tracing::info!(
            "Exam {} submitted: {}/{} correct",
            exam_id,
            result.correct,
            result.scorable
        );
    }

    Ok(Json(result))
}
