use async_trait::async_trait;
use portal_core::model::{
    Container, ContainerKind, ContainerStatus, ContainerSummary, Question, Submission,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by backend adapters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    /// Network-style failure. The caller may retry.
    #[error("transient failure: {0}")]
    Transient(String),

    #[error("connection error: {0}")]
    Connection(String),
}

impl StorageError {
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_))
    }
}

/// Source of the ordered question sequence for a container.
#[async_trait]
pub trait QuestionProvider: Send + Sync {
    /// Fetch the fixed, ordered questions of an assignment or practice set.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` for an unknown container.
    async fn fetch_questions(&self, container: Container) -> Result<Vec<Question>, StorageError>;
}

/// Sink for completed sessions.
#[async_trait]
pub trait AnswerSubmitter: Send + Sync {
    /// Persist a submitted session.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Transient` when the backend could not be reached.
    async fn submit_answers(&self, submission: &Submission) -> Result<(), StorageError>;
}

/// List views of assignments and practice sets.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the listing cannot be produced.
    async fn list_containers(
        &self,
        kind: ContainerKind,
    ) -> Result<Vec<ContainerSummary>, StorageError>;
}

#[derive(Default)]
struct MockState {
    questions: HashMap<Container, Vec<Question>>,
    summaries: Vec<ContainerSummary>,
    submissions: Vec<Submission>,
    failing_submits: u32,
}

/// In-memory backend with simulated network latency.
///
/// Each instance owns its own data; clones share it. Nothing is kept across
/// process restarts.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<Mutex<MockState>>,
    latency: Duration,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    #[must_use]
    pub fn latency(&self) -> Duration {
        self.latency
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, MockState>, StorageError> {
        self.state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    /// Replace the question sequence of a container.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the store is poisoned.
    pub fn insert_questions(
        &self,
        container: Container,
        questions: Vec<Question>,
    ) -> Result<(), StorageError> {
        self.lock()?.questions.insert(container, questions);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the store is poisoned.
    pub fn insert_summary(&self, summary: ContainerSummary) -> Result<(), StorageError> {
        let mut state = self.lock()?;
        state.summaries.retain(|s| s.container != summary.container);
        state.summaries.push(summary);
        Ok(())
    }

    /// Make the next `count` submissions fail with `StorageError::Transient`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the store is poisoned.
    pub fn fail_next_submits(&self, count: u32) -> Result<(), StorageError> {
        self.lock()?.failing_submits = count;
        Ok(())
    }

    /// Every submission accepted so far, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the store is poisoned.
    pub fn submissions(&self) -> Result<Vec<Submission>, StorageError> {
        Ok(self.lock()?.submissions.clone())
    }

    /// Number of accepted submissions for `container`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the store is poisoned.
    pub fn attempts(&self, container: Container) -> Result<usize, StorageError> {
        Ok(self
            .lock()?
            .submissions
            .iter()
            .filter(|s| s.container == container)
            .count())
    }
}

#[async_trait]
impl QuestionProvider for InMemoryRepository {
    async fn fetch_questions(&self, container: Container) -> Result<Vec<Question>, StorageError> {
        self.simulate_latency().await;
        let state = self.lock()?;
        state
            .questions
            .get(&container)
            .cloned()
            .ok_or(StorageError::NotFound)
    }
}

#[async_trait]
impl AnswerSubmitter for InMemoryRepository {
    async fn submit_answers(&self, submission: &Submission) -> Result<(), StorageError> {
        self.simulate_latency().await;
        let mut state = self.lock()?;
        if !state.questions.contains_key(&submission.container) {
            return Err(StorageError::NotFound);
        }
        if state.failing_submits > 0 {
            state.failing_submits -= 1;
            tracing::warn!(container = %submission.container, "simulated submit failure");
            return Err(StorageError::Transient("network unavailable".into()));
        }

        match submission.container.kind {
            // An assignment is handed in once; its list row leaves the pending state.
            ContainerKind::Assignment => {
                if let Some(summary) = state
                    .summaries
                    .iter_mut()
                    .find(|s| s.container == submission.container)
                {
                    summary.status = ContainerStatus::Submitted;
                }
            }
            // Practice sets stay open for another attempt.
            ContainerKind::Practice => {}
        }

        state.submissions.push(submission.clone());
        tracing::info!(
            container = %submission.container,
            answers = submission.answers.len(),
            "submission stored"
        );
        Ok(())
    }
}

#[async_trait]
impl CatalogRepository for InMemoryRepository {
    async fn list_containers(
        &self,
        kind: ContainerKind,
    ) -> Result<Vec<ContainerSummary>, StorageError> {
        self.simulate_latency().await;
        let state = self.lock()?;
        Ok(state
            .summaries
            .iter()
            .filter(|s| s.container.kind == kind)
            .cloned()
            .collect())
    }
}

/// Aggregates backend contracts behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub questions: Arc<dyn QuestionProvider>,
    pub submissions: Arc<dyn AnswerSubmitter>,
    pub catalog: Arc<dyn CatalogRepository>,
}

impl Storage {
    #[must_use]
    pub fn from_repository(repo: &InMemoryRepository) -> Self {
        let questions: Arc<dyn QuestionProvider> = Arc::new(repo.clone());
        let submissions: Arc<dyn AnswerSubmitter> = Arc::new(repo.clone());
        let catalog: Arc<dyn CatalogRepository> = Arc::new(repo.clone());
        Self {
            questions,
            submissions,
            catalog,
        }
    }

    #[must_use]
    pub fn in_memory(latency: Duration) -> Self {
        Self::from_repository(&InMemoryRepository::new().with_latency(latency))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::model::{ContainerId, QuestionId};
    use portal_core::time::fixed_now;

    fn container() -> Container {
        Container::assignment(ContainerId::new(1))
    }

    fn seeded() -> InMemoryRepository {
        let repo = InMemoryRepository::new();
        let questions = vec![Question::short_text(QuestionId::new(1), "Name a prime").unwrap()];
        repo.insert_questions(container(), questions).unwrap();
        repo
    }

    fn submission() -> Submission {
        Submission {
            container: container(),
            answers: Vec::new(),
            submitted_at: fixed_now(),
        }
    }

    #[tokio::test]
    async fn unknown_container_is_not_found() {
        let repo = seeded();
        let err = repo
            .fetch_questions(Container::practice(ContainerId::new(1)))
            .await
            .unwrap_err();
        assert_eq!(err, StorageError::NotFound);
    }

    #[tokio::test]
    async fn injected_failures_are_consumed_in_order() {
        let repo = seeded();
        repo.fail_next_submits(1).unwrap();

        let err = repo.submit_answers(&submission()).await.unwrap_err();
        assert!(err.is_transient());
        assert!(repo.submissions().unwrap().is_empty());

        repo.submit_answers(&submission()).await.unwrap();
        assert_eq!(repo.submissions().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn latency_delays_fetches() {
        let repo = seeded().with_latency(Duration::from_millis(250));
        let started = tokio::time::Instant::now();
        repo.fetch_questions(container()).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(250));
    }

    #[tokio::test]
    async fn clones_share_state() {
        let repo = seeded();
        let clone = repo.clone();
        clone.submit_answers(&submission()).await.unwrap();
        assert_eq!(repo.submissions().unwrap().len(), 1);
    }

    fn pending_summary(container: Container) -> ContainerSummary {
        ContainerSummary {
            container,
            title: "T".into(),
            subject: "S".into(),
            due_at: None,
            status: ContainerStatus::Pending,
        }
    }

    #[tokio::test]
    async fn submit_side_effect_depends_on_container_kind() {
        let repo = seeded();
        let practice = Container::practice(ContainerId::new(1));
        let questions = vec![Question::short_text(QuestionId::new(1), "Spell cat").unwrap()];
        repo.insert_questions(practice, questions).unwrap();
        repo.insert_summary(pending_summary(container())).unwrap();
        repo.insert_summary(pending_summary(practice)).unwrap();

        repo.submit_answers(&submission()).await.unwrap();
        let practice_submission = Submission {
            container: practice,
            ..submission()
        };
        repo.submit_answers(&practice_submission).await.unwrap();
        repo.submit_answers(&practice_submission).await.unwrap();

        let assignments = repo.list_containers(ContainerKind::Assignment).await.unwrap();
        assert_eq!(assignments[0].status, ContainerStatus::Submitted);
        let sets = repo.list_containers(ContainerKind::Practice).await.unwrap();
        assert_eq!(sets[0].status, ContainerStatus::Pending);
        assert_eq!(repo.attempts(practice).unwrap(), 2);
        assert_eq!(repo.attempts(container()).unwrap(), 1);
    }
}
