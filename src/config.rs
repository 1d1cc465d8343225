// src/config.rs

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use dotenvy::dotenv;

use crate::exam::builder::DEFAULT_EXAM_QUESTION_LIMIT;

pub const DEFAULT_SESSION_TTL_SECS: i64 = 2 * 60 * 60;
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding `subjects.json`, the subject files and `examAnalysis.json`.
    pub data_dir: PathBuf,
    /// Built frontend to serve for non-API paths, if any.
    pub static_dir: Option<PathBuf>,
    pub bind_addr: String,
    pub rust_log: String,
    pub log_dir: PathBuf,
    pub exam_question_limit: usize,
    pub session_ttl_secs: i64,
    pub allowed_origins: Vec<String>,
    pub gemini: GeminiConfig,
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Without a key the tutor is disabled.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));

        let static_dir = env::var("STATIC_DIR")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let log_dir = env::var("LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("logs"));

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .map(|v| split_list(&v))
            .unwrap_or_else(|_| {
                vec![
                    "http://localhost:5173".to_string(),
                    "http://127.0.0.1:5173".to_string(),
                    "http://localhost:3000".to_string(),
                ]
            });

        let gemini = GeminiConfig {
            api_key: env::var("GEMINI_API_KEY")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            model: env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string()),
            timeout_secs: parse_or("GEMINI_TIMEOUT_SECS", 30),
        };

        Self {
            data_dir,
            static_dir,
            bind_addr,
            rust_log,
            log_dir,
            exam_question_limit: parse_or("EXAM_QUESTION_LIMIT", DEFAULT_EXAM_QUESTION_LIMIT),
            session_ttl_secs: parse_or("EXAM_SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS),
            allowed_origins,
            gemini,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            static_dir: None,
            bind_addr: "0.0.0.0:3000".to_string(),
            rust_log: "info".to_string(),
            log_dir: PathBuf::from("logs"),
            exam_question_limit: DEFAULT_EXAM_QUESTION_LIMIT,
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            allowed_origins: Vec::new(),
            gemini: GeminiConfig {
                api_key: None,
                model: DEFAULT_GEMINI_MODEL.to_string(),
                base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
                timeout_secs: 30,
            },
        }
    }
}

/// Reads a numeric variable, keeping the default when it is unset or malformed.
fn parse_or<T: FromStr + Copy>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring malformed {}={:?}", key, raw);
            default
        }),
        Err(_) => default,
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
