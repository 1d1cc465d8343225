// src/exam/store.rs

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{config::DEFAULT_SESSION_TTL_SECS, exam::session::ExamSession};

/// A live exam attempt plus where it came from.
#[derive(Debug, Clone)]
pub struct StoredExam {
    pub subject_id: String,
    pub subject_name: String,
    pub chapter_id: String,
    pub chapter_name: String,
    pub session: ExamSession,
    pub created_at: DateTime<Utc>,
}

/// In-memory home of open exam sessions. Nothing is persisted.
///
/// Sessions are only mutated under the write lock, so a single attempt never
/// sees two writers at once.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, StoredExam>>>,
    ttl: Duration,
}

impl SessionStore {
    /// Non-positive or out-of-range TTLs fall back to the default.
    pub fn new(ttl_secs: i64) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl: session_ttl(ttl_secs),
        }
    }

    /// Stores a new exam and drops any that have expired.
    pub async fn insert(&self, exam: StoredExam) -> Uuid {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, stored| !self.is_expired(stored, now));
        let pruned = before - sessions.len();
        if pruned > 0 {
            tracing::debug!("Pruned {} expired exam sessions", pruned);
        }

        sessions.insert(id, exam);
        id
    }

    /// Runs `f` against a live exam. Expired exams count as missing.
    pub async fn with_exam<T>(&self, id: Uuid, f: impl FnOnce(&StoredExam) -> T) -> Option<T> {
        let sessions = self.sessions.read().await;
        sessions
            .get(&id)
            .filter(|stored| !self.is_expired(stored, Utc::now()))
            .map(f)
    }

    /// Runs `f` against a live exam with exclusive access.
    pub async fn with_exam_mut<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut StoredExam) -> T,
    ) -> Option<T> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        sessions
            .get_mut(&id)
            .filter(|stored| !self.is_expired(stored, now))
            .map(f)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    fn is_expired(&self, stored: &StoredExam, now: DateTime<Utc>) -> bool {
        now - stored.created_at > self.ttl
    }
}

fn session_ttl(ttl_secs: i64) -> Duration {
    match Duration::try_seconds(ttl_secs) {
        Some(ttl) if ttl > Duration::zero() => ttl,
        _ => {
            tracing::warn!(
                "Invalid exam session TTL {}s, using {}s",
                ttl_secs,
                DEFAULT_SESSION_TTL_SECS
            );
            Duration::seconds(DEFAULT_SESSION_TTL_SECS)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(created_at: DateTime<Utc>) -> StoredExam {
        StoredExam {
            subject_id: "physics".to_string(),
            subject_name: "Physics".to_string(),
            chapter_id: "motion".to_string(),
            chapter_name: "Laws of Motion".to_string(),
            session: ExamSession::new(Vec::new()),
            created_at,
        }
    }

    #[tokio::test]
    async fn test_insert_and_lookup() {
        let store = SessionStore::new(60);
        let id = store.insert(stored(Utc::now())).await;

        let name = store.with_exam(id, |e| e.chapter_name.clone()).await;
        assert_eq!(name.as_deref(), Some("Laws of Motion"));
        assert!(store.with_exam(Uuid::new_v4(), |_| ()).await.is_none());
    }

    #[tokio::test]
    async fn test_mutation_is_visible() {
        let store = SessionStore::new(60);
        let id = store.insert(stored(Utc::now())).await;

        let submitted = store.with_exam_mut(id, |e| e.session.submit()).await;
        assert_eq!(submitted, Some(true));

        let state = store.with_exam(id, |e| e.session.is_submitted()).await;
        assert_eq!(state, Some(true));
    }

    #[tokio::test]
    async fn test_expired_sessions_are_hidden_and_pruned() {
        let store = SessionStore::new(60);
        let old = store
            .insert(stored(Utc::now() - Duration::seconds(120)))
            .await;

        assert!(store.with_exam(old, |_| ()).await.is_none());
        assert!(store.with_exam_mut(old, |_| ()).await.is_none());

        store.insert(stored(Utc::now())).await;
        assert_eq!(store.len().await, 1);
    }

    #[test]
    fn test_invalid_ttl_uses_default() {
        let default = Duration::seconds(DEFAULT_SESSION_TTL_SECS);

        assert_eq!(session_ttl(9_999_999_999_999_999), default);
        assert_eq!(session_ttl(i64::MAX), default);
        assert_eq!(session_ttl(-5), default);
        assert_eq!(session_ttl(0), default);
        assert_eq!(session_ttl(90), Duration::seconds(90));
    }

    #[tokio::test]
    async fn test_negative_ttl_keeps_sessions_alive() {
        let store = SessionStore::new(-1);
        let id = store.insert(stored(Utc::now())).await;

        assert!(store.with_exam(id, |_| ()).await.is_some());
    }
}
