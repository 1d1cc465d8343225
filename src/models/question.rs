// src/models/question.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// The closed set of question kinds found in a chapter's question bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionKind {
    #[serde(rename = "mcq")]
    MultipleChoice,
    #[serde(rename = "short-answer")]
    ShortAnswer,
    #[serde(rename = "long-answer")]
    LongAnswer,
}

impl QuestionKind {
    /// Only multiple choice questions are graded automatically.
    pub fn is_scorable(self) -> bool {
        matches!(self, QuestionKind::MultipleChoice)
    }
}

/// A single entry of a chapter's question bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[validate(length(min = 1, max = 100))]
    pub id: String,

    /// Mapped from the JSON key 'type' since `type` is a reserved keyword in Rust.
    #[serde(rename = "type")]
    pub kind: QuestionKind,

    /// The prompt shown to the student.
    #[validate(length(min = 1))]
    pub question: String,

    /// Answer options, only meaningful for multiple choice questions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,

    /// For multiple choice this is the text of the right option.
    /// For the free-text kinds it is a model answer shown after submission.
    pub correct_answer: String,
}

impl Question {
    /// Checks the kind-dependent rules that the derive cannot express.
    pub fn validate_options(&self) -> Result<(), validator::ValidationError> {
        if self.kind != QuestionKind::MultipleChoice {
            return Ok(());
        }

        let options = match &self.options {
            Some(options) if !options.is_empty() => options,
            _ => return Err(validator::ValidationError::new("options_cannot_be_empty")),
        };

        let expected = self.correct_answer.to_lowercase();
        if !options.iter().any(|opt| opt.to_lowercase() == expected) {
            return Err(validator::ValidationError::new(
                "correct_answer_not_in_options",
            ));
        }

        Ok(())
    }
}

/// DTO for sending a question to the client (excludes the correct answer).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicQuestion {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl From<&Question> for PublicQuestion {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id.clone(),
            kind: q.kind,
            question: q.question.clone(),
            options: q.options.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mcq(answer: &str, options: Option<Vec<&str>>) -> Question {
        Question {
            id: "q1".to_string(),
            kind: QuestionKind::MultipleChoice,
            question: "Capital of France?".to_string(),
            options: options.map(|o| o.into_iter().map(String::from).collect()),
            correct_answer: answer.to_string(),
        }
    }

    #[test]
    fn test_deserialize_catalogue_shape() {
        let json = serde_json::json!({
            "id": "phy-1",
            "type": "short-answer",
            "question": "State Newton's first law.",
            "correctAnswer": "A body stays at rest or in uniform motion unless acted on."
        });

        let q: Question = serde_json::from_value(json).unwrap();
        assert_eq!(q.kind, QuestionKind::ShortAnswer);
        assert!(q.options.is_none());
        assert!(!q.kind.is_scorable());
    }

    #[test]
    fn test_mcq_answer_must_be_an_option() {
        assert!(mcq("Paris", Some(vec!["paris", "Rome"])).validate_options().is_ok());
        assert!(mcq("Berlin", Some(vec!["Paris", "Rome"])).validate_options().is_err());
        assert!(mcq("Paris", Some(vec![])).validate_options().is_err());
        assert!(mcq("Paris", None).validate_options().is_err());
    }

    #[test]
    fn test_public_question_hides_answer() {
        let q = mcq("Paris", Some(vec!["Paris", "Rome"]));
        let value = serde_json::to_value(PublicQuestion::from(&q)).unwrap();
        assert_eq!(value["type"], "mcq");
        assert!(value.get("correctAnswer").is_none());
        assert!(value.get("correct_answer").is_none());
    }
}
