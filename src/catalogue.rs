// src/catalogue.rs

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use validator::Validate;

use crate::models::{
    analysis::ExamAnalysis,
    subject::{Chapter, Subject, SubjectListItem},
};

const SUBJECT_INDEX_FILE: &str = "subjects.json";
const ANALYSIS_FILE: &str = "examAnalysis.json";

/// Why the catalogue could not be loaded. Raised at startup only.
#[derive(Debug)]
pub enum CatalogueError {
    // A data file is missing or unreadable
    Io { path: PathBuf, source: std::io::Error },

    // A data file is not valid JSON for its shape
    Parse { path: PathBuf, source: serde_json::Error },

    // Well-formed data breaking a catalogue rule
    Invalid(String),

    // Two subjects, or two questions of one chapter, share an id
    Duplicate(String),
}

impl fmt::Display for CatalogueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogueError::Io { path, source } => {
                write!(f, "Failed to read {}: {}", path.display(), source)
            }
            CatalogueError::Parse { path, source } => {
                write!(f, "Failed to parse {}: {}", path.display(), source)
            }
            CatalogueError::Invalid(msg) | CatalogueError::Duplicate(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for CatalogueError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogueError::Io { source, .. } => Some(source),
            CatalogueError::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// The read-only syllabus: subjects, chapters, question banks and the exam analysis.
///
/// Loaded once at startup and shared immutably afterwards.
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    subjects: Vec<Subject>,
    analysis: Option<ExamAnalysis>,
}

impl Catalogue {
    /// Builds a catalogue from already parsed data, validating it the same
    /// way as `load`.
    pub fn from_parts(
        subjects: Vec<Subject>,
        analysis: Option<ExamAnalysis>,
    ) -> Result<Self, CatalogueError> {
        for subject in &subjects {
            validate_subject(subject)?;
        }

        let mut seen = HashSet::new();
        for subject in &subjects {
            if !seen.insert(subject.id.as_str()) {
                return Err(CatalogueError::Duplicate(format!(
                    "Duplicate subject id '{}'",
                    subject.id
                )));
            }
        }

        Ok(Self { subjects, analysis })
    }

    /// Loads `subjects.json`, every subject file it points to, and the
    /// optional `examAnalysis.json` from `data_dir`.
    pub async fn load(data_dir: &Path) -> Result<Self, CatalogueError> {
        let index: Vec<SubjectListItem> = read_json(&data_dir.join(SUBJECT_INDEX_FILE)).await?;

        let mut subjects = Vec::with_capacity(index.len());
        for item in &index {
            item.validate().map_err(|e| {
                CatalogueError::Invalid(format!("Invalid subject index entry '{}': {}", item.id, e))
            })?;

            let path = resolve_data_url(data_dir, &item.data_url);
            let mut subject: Subject = read_json(&path).await?;

            if subject.id != item.id {
                tracing::warn!(
                    "Subject file {} declares id '{}', index says '{}'; using the index id",
                    path.display(),
                    subject.id,
                    item.id
                );
                subject.id = item.id.clone();
            }
            if subject.icon.is_empty() {
                subject.icon = item.icon.clone();
            }

            tracing::info!(
                "Loaded subject '{}' with {} chapters",
                subject.id,
                subject.chapters.len()
            );
            subjects.push(subject);
        }

        let analysis_path = data_dir.join(ANALYSIS_FILE);
        let analysis_exists = tokio::fs::try_exists(&analysis_path)
            .await
            .map_err(|source| CatalogueError::Io {
                path: analysis_path.clone(),
                source,
            })?;
        let analysis = if analysis_exists {
            Some(read_json(&analysis_path).await?)
        } else {
            tracing::info!("No {} found, exam analysis disabled", ANALYSIS_FILE);
            None
        };

        Self::from_parts(subjects, analysis)
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn subject(&self, subject_id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == subject_id)
    }

    pub fn chapter(&self, subject_id: &str, chapter_id: &str) -> Option<(&Subject, &Chapter)> {
        let subject = self.subject(subject_id)?;
        let chapter = subject.chapters.iter().find(|c| c.id == chapter_id)?;
        Some((subject, chapter))
    }

    pub fn analysis(&self) -> Option<&ExamAnalysis> {
        self.analysis.as_ref()
    }
}

/// Subject files were served under `/data/...`; map that onto `data_dir`.
fn resolve_data_url(data_dir: &Path, data_url: &str) -> PathBuf {
    let relative = data_url.trim_start_matches('/');
    let relative = relative.strip_prefix("data/").unwrap_or(relative);
    data_dir.join(relative)
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CatalogueError> {
    let raw = tokio::fs::read(path)
        .await
        .map_err(|source| CatalogueError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    serde_json::from_slice(&raw).map_err(|source| CatalogueError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn validate_subject(subject: &Subject) -> Result<(), CatalogueError> {
    subject
        .validate()
        .map_err(|e| CatalogueError::Invalid(format!("Invalid subject '{}': {}", subject.id, e)))?;

    for chapter in &subject.chapters {
        let mut ids = HashSet::new();
        for question in &chapter.questions {
            if !ids.insert(question.id.as_str()) {
                return Err(CatalogueError::Duplicate(format!(
                    "Duplicate question id '{}' in {}/{}",
                    question.id, subject.id, chapter.id
                )));
            }

            question.validate_options().map_err(|e| {
                CatalogueError::Invalid(format!(
                    "Invalid question '{}' in {}/{}: {}",
                    question.id, subject.id, chapter.id, e.code
                ))
            })?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        question::{Question, QuestionKind},
        subject::StudyLinks,
    };

    fn question(id: &str) -> Question {
        Question {
            id: id.to_string(),
            kind: QuestionKind::MultipleChoice,
            question: "Pick A".to_string(),
            options: Some(vec!["A".to_string(), "B".to_string()]),
            correct_answer: "A".to_string(),
        }
    }

    fn subject(questions: Vec<Question>) -> Subject {
        Subject {
            id: "physics".to_string(),
            name: "Physics".to_string(),
            icon: "BeakerIcon".to_string(),
            chapters: vec![Chapter {
                id: "motion".to_string(),
                name: "Laws of Motion".to_string(),
                description: String::new(),
                study_links: StudyLinks::default(),
                questions,
            }],
        }
    }

    #[test]
    fn test_lookup() {
        let catalogue = Catalogue::from_parts(vec![subject(vec![question("q1")])], None).unwrap();

        assert!(catalogue.subject("physics").is_some());
        assert!(catalogue.subject("chemistry").is_none());
        let (s, c) = catalogue.chapter("physics", "motion").unwrap();
        assert_eq!(s.name, "Physics");
        assert_eq!(c.questions.len(), 1);
        assert!(catalogue.chapter("physics", "optics").is_none());
        assert!(catalogue.analysis().is_none());
    }

    #[test]
    fn test_duplicate_question_ids_rejected() {
        let result = Catalogue::from_parts(vec![subject(vec![question("q1"), question("q1")])], None);
        assert!(matches!(result, Err(CatalogueError::Duplicate(_))));
    }

    #[test]
    fn test_bad_mcq_rejected() {
        let mut bad = question("q1");
        bad.correct_answer = "C".to_string();
        let result = Catalogue::from_parts(vec![subject(vec![bad])], None);
        assert!(matches!(result, Err(CatalogueError::Invalid(_))));
    }

    #[test]
    fn test_resolve_data_url() {
        let dir = Path::new("/srv/data");
        assert_eq!(
            resolve_data_url(dir, "/data/physics.json"),
            PathBuf::from("/srv/data/physics.json")
        );
        assert_eq!(
            resolve_data_url(dir, "chemistry.json"),
            PathBuf::from("/srv/data/chemistry.json")
        );
    }

    #[tokio::test]
    async fn test_load_from_disk() {
        let dir = std::env::temp_dir().join(format!("catalogue-{}", uuid::Uuid::new_v4()));
        tokio::fs::create_dir_all(&dir).await.unwrap();

        let index = serde_json::json!([
            { "id": "physics", "name": "Physics", "icon": "BeakerIcon", "dataUrl": "/data/physics.json" }
        ]);
        let physics = serde_json::json!({
            "id": "physics",
            "name": "Physics",
            "icon": "",
            "chapters": [{
                "id": "motion",
                "name": "Laws of Motion",
                "description": "Forces and inertia",
                "studyLinks": { "ncertEbook": "https://ncert.nic.in/textbook.php", "notes": "" },
                "questions": [
                    { "id": "q1", "type": "mcq", "question": "Unit of force?", "options": ["Newton", "Joule"], "correctAnswer": "Newton" },
                    { "id": "q2", "type": "long-answer", "question": "Explain inertia.", "correctAnswer": "Resistance to change in motion." }
                ]
            }]
        });

        tokio::fs::write(dir.join("subjects.json"), index.to_string()).await.unwrap();
        tokio::fs::write(dir.join("physics.json"), physics.to_string()).await.unwrap();

        let catalogue = Catalogue::load(&dir).await.unwrap();
        let (subject, chapter) = catalogue.chapter("physics", "motion").unwrap();
        assert_eq!(subject.icon, "BeakerIcon");
        assert_eq!(chapter.questions.len(), 2);
        assert_eq!(chapter.study_links.labelled().len(), 1);
        assert!(catalogue.analysis().is_none());

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_load_missing_index_fails() {
        let dir = std::env::temp_dir().join(format!("catalogue-{}", uuid::Uuid::new_v4()));
        let err = Catalogue::load(&dir).await.unwrap_err();
        assert!(matches!(err, CatalogueError::Io { .. }));
        assert!(err.to_string().contains("subjects.json"));
    }

    #[tokio::test]
    async fn test_load_malformed_json_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("catalogue-{}", uuid::Uuid::new_v4()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        tokio::fs::write(dir.join("subjects.json"), "{ not json").await.unwrap();

        let err = Catalogue::load(&dir).await.unwrap_err();
        assert!(matches!(err, CatalogueError::Parse { .. }));

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
