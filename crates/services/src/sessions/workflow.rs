use std::sync::Arc;

use portal_core::Clock;
use portal_core::model::Container;
use storage::{AnswerSubmitter, QuestionProvider, StorageError};

use super::session::Session;
use super::solving::{SolvingSession, SubmitOutcome};
use crate::config::SessionConfig;
use crate::error::SessionError;

/// Orchestrates session start and submission against the backend contracts.
#[derive(Clone)]
pub struct SessionLoopService {
    clock: Clock,
    questions: Arc<dyn QuestionProvider>,
    submissions: Arc<dyn AnswerSubmitter>,
    config: SessionConfig,
}

impl SessionLoopService {
    #[must_use]
    pub fn new(
        clock: Clock,
        questions: Arc<dyn QuestionProvider>,
        submissions: Arc<dyn AnswerSubmitter>,
    ) -> Self {
        Self {
            clock,
            questions,
            submissions,
            config: SessionConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn config(&self) -> SessionConfig {
        self.config
    }

    /// Load the questions of `container` and open a fresh session on them.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotFound` for an unknown container,
    /// `SessionError::InvalidState` for an empty question set, or
    /// `SessionError::Storage` for other backend failures.
    pub async fn start_session(
        &self,
        container: Container,
    ) -> Result<SolvingSession, SessionError> {
        let questions = self
            .questions
            .fetch_questions(container)
            .await
            .map_err(|err| match err {
                StorageError::NotFound => SessionError::NotFound { container },
                other => SessionError::Storage(other),
            })?;

        let session = Session::new(container, questions).inspect_err(|err| {
            tracing::warn!(%container, error = %err, "cannot open session");
        })?;
        tracing::info!(
            %container,
            questions = session.len(),
            policy = ?self.config.answer_policy,
            "session started"
        );
        Ok(SolvingSession::new(session, self.config.answer_policy))
    }

    /// Submit a session whose confirmation prompt is open.
    ///
    /// The submit operation runs at most once per call; a failure leaves the
    /// answers in place for a manual retry.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotAwaitingConfirmation` if the prompt is closed,
    /// `SessionError::TransientSubmitFailure` on a network-style failure, or
    /// another `SessionError` for backend failures.
    pub async fn confirm_submit(
        &self,
        solving: &mut SolvingSession,
    ) -> Result<SubmitOutcome, SessionError> {
        let submission = solving.begin_submit(self.clock.now())?;
        tracing::info!(
            container = %submission.container,
            answered = solving.session().answered_count(),
            total = solving.session().len(),
            "submitting answers"
        );
        let result = self.submissions.submit_answers(&submission).await;
        solving.complete_submit(result)
    }
}
