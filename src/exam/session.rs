// src/exam/session.rs

use std::collections::HashMap;

use serde::Serialize;

use crate::models::question::{Question, QuestionKind};

/// Lifecycle of one exam attempt. `Submitted` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Unsubmitted,
    Submitted,
}

/// Result of grading the multiple choice part of an exam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Score {
    pub correct: usize,
    pub scorable: usize,
}

/// Answer state for one built exam.
///
/// All mutation goes through `set_answer` and `submit`, which refuse to touch
/// the answers once the exam has been submitted.
#[derive(Debug, Clone)]
pub struct ExamSession {
    questions: Vec<Question>,
    answers: HashMap<String, String>,
    state: SessionState,
}

impl ExamSession {
    pub fn new(questions: Vec<Question>) -> Self {
        let answers = questions
            .iter()
            .map(|q| (q.id.clone(), String::new()))
            .collect();

        Self {
            questions,
            answers,
            state: SessionState::Unsubmitted,
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &HashMap<String, String> {
        &self.answers
    }

    pub fn answer(&self, question_id: &str) -> Option<&str> {
        self.answers.get(question_id).map(String::as_str)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_submitted(&self) -> bool {
        self.state == SessionState::Submitted
    }

    /// Overwrites the answer for one question of this exam.
    ///
    /// Unknown ids and writes after submission are ignored. Returns whether
    /// the answer was stored.
    pub fn set_answer(&mut self, question_id: &str, value: impl Into<String>) -> bool {
        if self.is_submitted() {
            return false;
        }

        match self.answers.get_mut(question_id) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Moves the session to `Submitted`. Returns `false` if it already was.
    pub fn submit(&mut self) -> bool {
        if self.is_submitted() {
            return false;
        }
        self.state = SessionState::Submitted;
        true
    }

    /// Grades the multiple choice questions.
    ///
    /// Free-text kinds count neither as correct nor as scorable. Before
    /// submission nothing is graded, so `correct` is always 0.
    pub fn score(&self) -> Score {
        let scorable = self
            .questions
            .iter()
            .filter(|q| q.kind.is_scorable())
            .count();

        if !self.is_submitted() {
            return Score {
                correct: 0,
                scorable,
            };
        }

        let correct = self
            .questions
            .iter()
            .filter(|q| self.is_correct(q) == Some(true))
            .count();

        Score { correct, scorable }
    }

    /// Per-question verdict for display after submission.
    ///
    /// `None` for free-text questions (self-assessed against the model
    /// answer) and for any question before submission.
    pub fn is_correct(&self, question: &Question) -> Option<bool> {
        if !self.is_submitted() || question.kind != QuestionKind::MultipleChoice {
            return None;
        }

        let given = self.answer(&question.id).unwrap_or_default();
        Some(answers_match(given, &question.correct_answer))
    }
}

/// Case-insensitive exact match. No trimming or punctuation folding.
fn answers_match(given: &str, expected: &str) -> bool {
    given.to_lowercase() == expected.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: &str, kind: QuestionKind, answer: &str) -> Question {
        Question {
            id: id.to_string(),
            kind,
            question: format!("Question {}", id),
            options: match kind {
                QuestionKind::MultipleChoice => Some(vec![answer.to_string(), "Other".to_string()]),
                _ => None,
            },
            correct_answer: answer.to_string(),
        }
    }

    fn mcq_exam() -> ExamSession {
        ExamSession::new(vec![
            question("q1", QuestionKind::MultipleChoice, "Paris"),
            question("q2", QuestionKind::MultipleChoice, "Mars"),
            question("q3", QuestionKind::MultipleChoice, "42"),
        ])
    }

    #[test]
    fn test_new_session_has_empty_answers() {
        let session = mcq_exam();

        assert_eq!(session.state(), SessionState::Unsubmitted);
        assert_eq!(session.answers().len(), 3);
        assert!(session.answers().values().all(|a| a.is_empty()));
    }

    #[test]
    fn test_set_answer_overwrites_single_entry() {
        let mut session = mcq_exam();

        assert!(session.set_answer("q2", "Venus"));
        assert!(session.set_answer("q2", "Mars"));

        assert_eq!(session.answer("q2"), Some("Mars"));
        assert_eq!(session.answer("q1"), Some(""));
        assert_eq!(session.answer("q3"), Some(""));
    }

    #[test]
    fn test_unknown_id_is_ignored() {
        let mut session = mcq_exam();
        let before = session.answers().clone();

        assert!(!session.set_answer("q99", "anything"));
        assert_eq!(session.answers(), &before);
        assert!(session.answer("q99").is_none());
    }

    #[test]
    fn test_answers_frozen_after_submit() {
        let mut session = mcq_exam();
        session.set_answer("q1", "Paris");

        assert!(session.submit());
        let before = session.answers().clone();

        assert!(!session.set_answer("q1", "Rome"));
        assert!(!session.set_answer("q2", "Mars"));
        assert_eq!(session.answers(), &before);
    }

    #[test]
    fn test_submit_twice_is_noop() {
        let mut session = mcq_exam();
        assert!(session.submit());
        assert!(!session.submit());
        assert_eq!(session.state(), SessionState::Submitted);
    }

    #[test]
    fn test_score_is_case_insensitive() {
        let mut session = mcq_exam();
        session.set_answer("q1", "paris");
        session.set_answer("q2", "Jupiter");
        session.set_answer("q3", "42");
        session.submit();

        assert_eq!(
            session.score(),
            Score {
                correct: 2,
                scorable: 3
            }
        );
    }

    #[test]
    fn test_score_before_submit_is_zero() {
        let mut session = mcq_exam();
        session.set_answer("q1", "Paris");

        assert_eq!(
            session.score(),
            Score {
                correct: 0,
                scorable: 3
            }
        );
        assert_eq!(session.is_correct(&session.questions()[0].clone()), None);
    }

    #[test]
    fn test_free_text_never_scored() {
        let mut session = ExamSession::new(vec![
            question("m", QuestionKind::MultipleChoice, "B"),
            question("s", QuestionKind::ShortAnswer, "Photosynthesis"),
        ]);
        session.set_answer("s", "Photosynthesis");
        session.submit();

        let score = session.score();
        assert_eq!(score.scorable, 1);
        assert_eq!(score.correct, 0);

        let short = session.questions()[1].clone();
        assert_eq!(session.is_correct(&short), None);
    }

    #[test]
    fn test_unanswered_is_wrong() {
        let mut session = mcq_exam();
        session.submit();

        assert_eq!(session.score().correct, 0);
        let first = session.questions()[0].clone();
        assert_eq!(session.is_correct(&first), Some(false));
    }

    #[test]
    fn test_whitespace_is_not_normalized() {
        let mut session = mcq_exam();
        session.set_answer("q1", " Paris ");
        session.submit();

        assert_eq!(session.score().correct, 0);
    }

    #[test]
    fn test_empty_exam_submits_to_zero() {
        let mut session = ExamSession::new(Vec::new());
        assert!(session.submit());
        assert_eq!(
            session.score(),
            Score {
                correct: 0,
                scorable: 0
            }
        );
    }
}
