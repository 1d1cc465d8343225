// src/models/ask.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// DTO for asking the AI tutor a free-form question.
#[derive(Debug, Deserialize, Validate)]
pub struct AskRequest {
    #[validate(
        length(max = 2000, message = "Question must be at most 2000 characters."),
        custom(function = validate_not_blank)
    )]
    pub query: String,
}

/// A web source backing the tutor's answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub uri: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AskResponse {
    /// Markdown answer text.
    pub answer: String,
    pub citations: Vec<Citation>,
}

fn validate_not_blank(query: &str) -> Result<(), validator::ValidationError> {
    if query.trim().is_empty() {
        let mut err = validator::ValidationError::new("blank_query");
        err.message = Some("Please enter a question.".into());
        return Err(err);
    }
    Ok(())
}
