// src/models/subject.rs

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;
use validator::Validate;

use crate::models::question::Question;

static SLUG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("slug pattern is valid"));

/// One line of `subjects.json`: where to find a subject's full data file.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubjectListItem {
    #[validate(custom(function = validate_slug))]
    pub id: String,
    pub name: String,
    pub icon: String,
    #[validate(length(min = 1))]
    pub data_url: String,
}

/// A subject with its chapters, as stored in the per-subject data file.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Subject {
    #[validate(custom(function = validate_slug))]
    pub id: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Icon name used by the frontend.
    pub icon: String,
    #[validate(nested)]
    pub chapters: Vec<Chapter>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    #[validate(custom(function = validate_slug))]
    pub id: String,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(nested)]
    #[serde(default)]
    pub study_links: StudyLinks,
    #[validate(nested)]
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// External study resources for a chapter. An empty string means "no link".
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct StudyLinks {
    #[validate(custom(function = validate_optional_url))]
    pub scert_ebook: String,
    #[validate(custom(function = validate_optional_url))]
    pub ncert_ebook: String,
    #[validate(custom(function = validate_optional_url))]
    pub video_lessons: String,
    #[validate(custom(function = validate_optional_url))]
    pub notes: String,
    #[validate(custom(function = validate_optional_url))]
    pub practice_questions: String,
    #[validate(custom(function = validate_optional_url))]
    pub previous_year_questions: String,
    #[validate(custom(function = validate_optional_url))]
    pub solved_examples: String,
}

/// A study link ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudyLink {
    pub kind: &'static str,
    pub label: &'static str,
    pub url: String,
}

impl StudyLinks {
    /// Returns the present links in display order with their labels.
    pub fn labelled(&self) -> Vec<StudyLink> {
        [
            ("scertEbook", "Kerala SCERT e-book", &self.scert_ebook),
            ("ncertEbook", "NCERT e-book", &self.ncert_ebook),
            ("videoLessons", "Video Lessons", &self.video_lessons),
            ("notes", "Free Notes", &self.notes),
            ("practiceQuestions", "Practice Questions", &self.practice_questions),
            ("previousYearQuestions", "Previous Year Questions", &self.previous_year_questions),
            ("solvedExamples", "Solved Examples", &self.solved_examples),
        ]
        .into_iter()
        .filter(|(_, _, url)| !url.trim().is_empty())
        .map(|(kind, label, url)| StudyLink {
            kind,
            label,
            url: url.clone(),
        })
        .collect()
    }
}

/// DTO for the subject list.
#[derive(Debug, Serialize, Deserialize)]
pub struct SubjectSummary {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub chapter_count: usize,
}

/// DTO for a subject page (chapters without their question banks).
#[derive(Debug, Serialize)]
pub struct SubjectDetail {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub chapters: Vec<ChapterSummary>,
}

#[derive(Debug, Serialize)]
pub struct ChapterSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub study_links: Vec<StudyLink>,
    pub question_count: usize,
}

impl From<&Subject> for SubjectSummary {
    fn from(s: &Subject) -> Self {
        Self {
            id: s.id.clone(),
            name: s.name.clone(),
            icon: s.icon.clone(),
            chapter_count: s.chapters.len(),
        }
    }
}

impl From<&Subject> for SubjectDetail {
    fn from(s: &Subject) -> Self {
        Self {
            id: s.id.clone(),
            name: s.name.clone(),
            icon: s.icon.clone(),
            chapters: s
                .chapters
                .iter()
                .map(|c| ChapterSummary {
                    id: c.id.clone(),
                    name: c.name.clone(),
                    description: c.description.clone(),
                    study_links: c.study_links.labelled(),
                    question_count: c.questions.len(),
                })
                .collect(),
        }
    }
}

/// Ids end up in URL paths, so they are restricted to a simple slug.
fn validate_slug(id: &str) -> Result<(), validator::ValidationError> {
    if !SLUG_PATTERN.is_match(id) {
        return Err(validator::ValidationError::new("invalid_slug"));
    }
    Ok(())
}

/// Validates that a non-empty string is a correctly formatted URL.
fn validate_optional_url(url: &str) -> Result<(), validator::ValidationError> {
    if url.trim().is_empty() {
        return Ok(());
    }
    if url.len() > 500 {
        return Err(validator::ValidationError::new("url_too_long"));
    }
    if Url::parse(url).is_err() {
        return Err(validator::ValidationError::new("invalid_url"));
    }
    Ok(())
}
