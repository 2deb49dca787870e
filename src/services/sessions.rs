use crate::core::{PreferenceCollector, Questionnaire};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use uuid::Uuid;

/// One user's quiz in progress
pub struct QuizSession {
    pub id: Uuid,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub collector: PreferenceCollector,
}

pub type SharedSession = Arc<Mutex<QuizSession>>;

/// In-memory quiz sessions, evicted after sitting idle
///
/// Each session sits behind its own lock so requests for one session
/// serialize while different sessions proceed independently.
pub struct SessionStore {
    questionnaire: Arc<Questionnaire>,
    sessions: moka::future::Cache<Uuid, SharedSession>,
}

impl SessionStore {
    pub fn new(questionnaire: Arc<Questionnaire>, max_sessions: u64, idle_secs: u64) -> Self {
        let sessions = moka::future::CacheBuilder::new(max_sessions)
            .time_to_idle(Duration::from_secs(idle_secs))
            .build();

        Self {
            questionnaire,
            sessions,
        }
    }

    /// Start a fresh session at the first criterion
    pub async fn create(&self) -> SharedSession {
        let id = Uuid::new_v4();
        let session = Arc::new(Mutex::new(QuizSession {
            id,
            started_at: chrono::Utc::now(),
            collector: PreferenceCollector::new(Arc::clone(&self.questionnaire)),
        }));

        self.sessions.insert(id, Arc::clone(&session)).await;
        tracing::debug!("Started quiz session {}", id);
        session
    }

    pub async fn get(&self, id: &Uuid) -> Option<SharedSession> {
        self.sessions.get(id).await
    }

    pub async fn remove(&self, id: &Uuid) {
        self.sessions.invalidate(id).await;
    }

    pub fn active_sessions(&self) -> u64 {
        self.sessions.entry_count()
    }
}
