// src/models/analysis.rs

use serde::{Deserialize, Serialize};

/// Pre-computed exam analysis, displayed as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamAnalysis {
    pub important_chapters: Vec<ImportantChapter>,
    pub question_types: Vec<QuestionTypeNote>,
    pub weightage: Vec<Weightage>,
    pub model_papers: Vec<ModelPaper>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportantChapter {
    pub chapter: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionTypeNote {
    #[serde(rename = "type")]
    pub question_type: String,
    pub description: String,
}

/// Share of the exam marks carried by a chapter, in percent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weightage {
    pub chapter: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelPaper {
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub format: PaperFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperFormat {
    Pdf,
    Text,
}
