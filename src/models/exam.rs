// src/models/exam.rs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    exam::{
        session::{ExamSession, SessionState},
        store::StoredExam,
    },
    models::question::{PublicQuestion, Question, QuestionKind},
};

/// DTO for starting an exam on one chapter.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateExamRequest {
    #[validate(length(min = 1, max = 100))]
    pub subject_id: String,
    #[validate(length(min = 1, max = 100))]
    pub chapter_id: String,
}

/// DTO for changing one answer.
#[derive(Debug, Deserialize, Validate)]
pub struct SetAnswerRequest {
    #[validate(length(max = 10000))]
    pub answer: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SetAnswerResponse {
    /// `false` when the question is not part of the exam or the exam is already submitted.
    pub accepted: bool,
}

/// DTO describing an exam attempt.
///
/// Correct answers only appear inside `result`, which is present once the
/// exam has been submitted.
#[derive(Debug, Serialize)]
pub struct ExamResponse {
    pub exam_id: Uuid,
    pub subject_id: String,
    pub subject_name: String,
    pub chapter_id: String,
    pub chapter_name: String,
    pub state: SessionState,
    pub question_count: usize,
    pub questions: Vec<PublicQuestion>,
    pub answers: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ExamResult>,
}

#[derive(Debug, Serialize)]
pub struct ExamResult {
    pub correct: usize,
    pub scorable: usize,
    pub summary: String,
    pub review: Vec<QuestionReview>,
}

/// One graded question. `is_correct` is null for free-text kinds.
#[derive(Debug, Serialize)]
pub struct QuestionReview {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub answer: String,
    pub correct_answer: String,
    pub is_correct: Option<bool>,
}

impl ExamResponse {
    pub fn from_stored(exam_id: Uuid, stored: &StoredExam) -> Self {
        let session = &stored.session;

        Self {
            exam_id,
            subject_id: stored.subject_id.clone(),
            subject_name: stored.subject_name.clone(),
            chapter_id: stored.chapter_id.clone(),
            chapter_name: stored.chapter_name.clone(),
            state: session.state(),
            question_count: session.questions().len(),
            questions: session.questions().iter().map(PublicQuestion::from).collect(),
            answers: session.answers().clone(),
            result: ExamResult::from_session(session),
        }
    }
}

impl ExamResult {
    /// `None` until the session is submitted.
    pub fn from_session(session: &ExamSession) -> Option<Self> {
        if !session.is_submitted() {
            return None;
        }

        let score = session.score();
        let review = [
            QuestionKind::MultipleChoice,
            QuestionKind::ShortAnswer,
            QuestionKind::LongAnswer,
        ]
        .into_iter()
        .flat_map(move |kind| session.questions().iter().filter(move |q| q.kind == kind))
        .map(|q| review_question(session, q))
        .collect();

        Some(Self {
            correct: score.correct,
            scorable: score.scorable,
            summary: format!(
                "You scored {} out of {} on Multiple Choice Questions.",
                score.correct, score.scorable
            ),
            review,
        })
    }
}

fn review_question(session: &ExamSession, q: &Question) -> QuestionReview {
    QuestionReview {
        id: q.id.clone(),
        kind: q.kind,
        question: q.question.clone(),
        options: q.options.clone(),
        answer: session.answer(&q.id).unwrap_or_default().to_string(),
        correct_answer: q.correct_answer.clone(),
        is_correct: session.is_correct(q),
    }
}
