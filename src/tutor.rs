// src/tutor.rs

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{config::GeminiConfig, error::AppError, models::ask::Citation};

const SYSTEM_INSTRUCTION: &str = "You are an expert AI tutor named 'My Guidens AI', specializing in the Kerala State Class 11 syllabus (including NCERT curriculum). Your goal is to provide clear, concise, and accurate answers to student questions. When a student asks a question:
1. Directly answer the question, explaining the concept as if you are talking to an 11th-grade student.
2. Explicitly mention the subject and chapter(s) the question relates to.
3. Provide 2-3 credible and relevant web links as 'Supporting Links' for further study.
4. Format your entire response in clear, easy-to-read Markdown. Use lists, bold text, and paragraphs.";

/// What the tutor returns for one question.
#[derive(Debug, Clone, PartialEq)]
pub struct TutorAnswer {
    pub text: String,
    pub citations: Vec<Citation>,
}

/// The external service answering free-form student questions.
#[async_trait]
pub trait Tutor: Send + Sync {
    async fn ask(&self, query: &str) -> Result<TutorAnswer, AppError>;
}

/// Used when no API key is configured.
pub struct DisabledTutor;

#[async_trait]
impl Tutor for DisabledTutor {
    async fn ask(&self, _query: &str) -> Result<TutorAnswer, AppError> {
        Err(AppError::Upstream(
            "GEMINI_API_KEY is not configured".to_string(),
        ))
    }
}

/// Tutor backed by the Gemini `generateContent` API with Google Search grounding.
pub struct GeminiTutor {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl GeminiTutor {
    pub fn new(config: &GeminiConfig, api_key: String) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::InternalServerError(e.to_string()))?;

        let endpoint = format!(
            "{}/v1beta/models/{}:generateContent",
            config.base_url.trim_end_matches('/'),
            config.model
        );

        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }
}

#[async_trait]
impl Tutor for GeminiTutor {
    async fn ask(&self, query: &str) -> Result<TutorAnswer, AppError> {
        let body = GenerateRequest {
            system_instruction: Content::text(SYSTEM_INSTRUCTION),
            contents: vec![Content::text(query)],
            tools: vec![Tool {
                google_search: EmptyObject {},
            }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json::<GenerateResponse>()
            .await?;

        let answer = answer_from_response(response)?;
        tracing::debug!(
            "Tutor answered with {} chars and {} citations",
            answer.text.len(),
            answer.citations.len()
        );
        Ok(answer)
    }
}

// --- Gemini wire types ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    tools: Vec<Tool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    google_search: EmptyObject,
}

#[derive(Debug, Serialize)]
struct EmptyObject {}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn text(text: &str) -> Self {
        Self {
            parts: vec![Part {
                text: Some(text.to_string()),
            }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Content,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    web: Option<WebSource>,
}

#[derive(Debug, Deserialize)]
struct WebSource {
    uri: Option<String>,
    title: Option<String>,
}

fn answer_from_response(response: GenerateResponse) -> Result<TutorAnswer, AppError> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Upstream("response has no candidates".to_string()))?;

    let text: String = candidate
        .content
        .parts
        .into_iter()
        .filter_map(|p| p.text)
        .collect();

    if text.trim().is_empty() {
        return Err(AppError::Upstream("response has no text".to_string()));
    }

    let chunks = candidate
        .grounding_metadata
        .map(|m| m.grounding_chunks)
        .unwrap_or_default();

    Ok(TutorAnswer {
        text,
        citations: citations_from_chunks(chunks),
    })
}

/// Keeps only sources with a usable uri. A missing title falls back to the uri.
fn citations_from_chunks(chunks: Vec<GroundingChunk>) -> Vec<Citation> {
    chunks
        .into_iter()
        .filter_map(|chunk| chunk.web)
        .filter_map(|web| {
            let uri = web.uri.filter(|u| !u.trim().is_empty())?;
            let title = web
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| uri.clone());
            Some(Citation { uri, title })
        })
        .collect()
}
