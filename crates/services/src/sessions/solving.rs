use chrono::{DateTime, Utc};
use std::fmt;

use portal_core::model::{Container, Route, Submission};
use storage::StorageError;

use super::guard::{DiscardPrompt, LeaveOutcome, UnsavedChangeGuard};
use super::policy::AnswerPolicy;
use super::progress::SessionProgress;
use super::session::Session;
use super::submission::{SubmissionWorkflow, SubmitPrompt};
use crate::error::SessionError;

/// Where the host view goes after a successful submit.
///
/// Failed submits never redirect; the learner stays on the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    pub route: Route,
}

impl Redirect {
    /// Route path carrying the success marker the detail view reads.
    #[must_use]
    pub fn location(&self) -> String {
        format!("{}?submitted=success", self.route.path())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub redirect: Redirect,
    pub answered: usize,
    pub total: usize,
}

/// Everything the solving view holds for one attempt: the session, its
/// submission flags, and the unsaved-change guard.
///
/// All mutation goes through `&mut self`, so actions are applied one at a time
/// in the order the view dispatches them.
#[derive(Clone)]
pub struct SolvingSession {
    session: Session,
    policy: AnswerPolicy,
    submission: SubmissionWorkflow,
    guard: UnsavedChangeGuard,
}

impl SolvingSession {
    #[must_use]
    pub fn new(session: Session, policy: AnswerPolicy) -> Self {
        Self {
            session,
            policy,
            submission: SubmissionWorkflow::default(),
            guard: UnsavedChangeGuard::default(),
        }
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn container(&self) -> Container {
        self.session.container()
    }

    #[must_use]
    pub fn policy(&self) -> AnswerPolicy {
        self.policy
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        self.session.progress()
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.guard.is_dirty()
    }

    #[must_use]
    pub fn is_awaiting_confirmation(&self) -> bool {
        self.submission.is_awaiting_confirmation()
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submission.is_submitting()
    }

    /// Capture `value` for the current question and mark the session dirty.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::SubmitInFlight` while a submit is pending and
    /// `SessionError::InvalidChoice` when the answer policy rejects the value.
    pub fn record_answer(&mut self, value: impl Into<String>) -> Result<(), SessionError> {
        if self.submission.is_submitting() {
            return Err(SessionError::SubmitInFlight);
        }
        let value = value.into();
        self.policy.check(self.session.current_question(), &value)?;

        tracing::debug!(
            container = %self.session.container(),
            question = %self.session.current_question().id(),
            "answer recorded"
        );
        self.session.record_answer(value);
        self.guard.mark_dirty();
        Ok(())
    }

    pub fn move_next(&mut self) -> bool {
        self.session.move_next()
    }

    pub fn move_previous(&mut self) -> bool {
        self.session.move_previous()
    }

    /// # Errors
    ///
    /// Returns `SessionError::IndexOutOfRange` for an invalid index.
    pub fn jump_to(&mut self, index: usize) -> Result<(), SessionError> {
        self.session.jump_to(index)
    }

    /// Open the confirmation prompt.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::SubmitInFlight` while a submit is pending.
    pub fn request_submit(&mut self) -> Result<SubmitPrompt, SessionError> {
        self.submission.request(&self.session)
    }

    pub fn cancel_submit(&mut self) {
        self.submission.cancel();
    }

    /// Confirm the prompt and take a snapshot to hand to the submit operation.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotAwaitingConfirmation` or `SessionError::SubmitInFlight`.
    pub fn begin_submit(&mut self, at: DateTime<Utc>) -> Result<Submission, SessionError> {
        self.submission.begin()?;
        Ok(self.session.to_submission(at))
    }

    /// Apply the result of the submit operation started by `begin_submit`.
    ///
    /// On success the session is clean and the view is redirected to the
    /// detail page. On failure the prompt closes, answers stay intact and the
    /// learner may submit again.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoSubmitInFlight` if no submit was started, or the
    /// mapped storage failure (`TransientSubmitFailure`, `NotFound`, `Storage`).
    pub fn complete_submit(
        &mut self,
        result: Result<(), StorageError>,
    ) -> Result<SubmitOutcome, SessionError> {
        self.submission.finish()?;
        let container = self.session.container();

        match result {
            Ok(()) => {
                self.guard.clear();
                tracing::info!(%container, "submission accepted");
                Ok(SubmitOutcome {
                    redirect: Redirect {
                        route: Route::detail_for(container),
                    },
                    answered: self.session.answered_count(),
                    total: self.session.len(),
                })
            }
            Err(err) => {
                tracing::warn!(%container, error = %err, "submission failed");
                Err(match err {
                    StorageError::Transient(msg) => SessionError::TransientSubmitFailure(msg),
                    StorageError::NotFound => SessionError::NotFound { container },
                    other => SessionError::Storage(other),
                })
            }
        }
    }

    /// Ask to navigate away. See [`UnsavedChangeGuard::attempt_leave`].
    pub fn attempt_leave<F>(&mut self, target: Route, confirm: F) -> LeaveOutcome
    where
        F: FnOnce(&DiscardPrompt) -> bool,
    {
        self.guard.attempt_leave(target, confirm)
    }

    /// Explicit "discard and leave": drops unsaved edits without prompting.
    pub fn discard(&mut self) {
        self.guard.clear();
    }
}

impl fmt::Debug for SolvingSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolvingSession")
            .field("container", &self.session.container())
            .field("len", &self.session.len())
            .field("cursor", &self.session.cursor())
            .field("policy", &self.policy)
            .field("submission", &self.submission)
            .field("dirty", &self.guard.is_dirty())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::super::session::tests::build_questions;
    use super::*;
    use portal_core::model::{ContainerId, Question, QuestionId};
    use portal_core::time::fixed_now;

    fn solving(n: u64) -> SolvingSession {
        let session =
            Session::new(Container::assignment(ContainerId::new(5)), build_questions(n)).unwrap();
        SolvingSession::new(session, AnswerPolicy::Lenient)
    }

    #[test]
    fn recording_an_answer_marks_dirty() {
        let mut solving = solving(2);
        assert!(!solving.is_dirty());
        solving.record_answer("42").unwrap();
        assert!(solving.is_dirty());
    }

    #[test]
    fn successful_submit_clears_dirty_and_redirects() {
        let mut solving = solving(2);
        solving.record_answer("a").unwrap();
        solving.request_submit().unwrap();
        let submission = solving.begin_submit(fixed_now()).unwrap();
        assert_eq!(submission.answers.len(), 2);
        assert!(solving.is_submitting());

        let outcome = solving.complete_submit(Ok(())).unwrap();
        assert!(!solving.is_dirty());
        assert!(!solving.is_submitting());
        assert_eq!(
            outcome.redirect.location(),
            "/assignments/5?submitted=success"
        );
    }

    #[test]
    fn transient_failure_keeps_answers_and_dirty() {
        let mut solving = solving(3);
        solving.record_answer("kept").unwrap();
        solving.move_next();
        let before = solving.session().clone();

        solving.request_submit().unwrap();
        solving.begin_submit(fixed_now()).unwrap();
        let err = solving
            .complete_submit(Err(StorageError::Transient("offline".into())))
            .unwrap_err();

        assert_eq!(err, SessionError::TransientSubmitFailure("offline".into()));
        assert!(solving.is_dirty());
        assert!(!solving.is_submitting());
        assert!(!solving.is_awaiting_confirmation());
        assert_eq!(solving.session(), &before);
    }

    #[test]
    fn answers_are_locked_while_submitting() {
        let mut solving = solving(1);
        solving.request_submit().unwrap();
        solving.begin_submit(fixed_now()).unwrap();
        assert_eq!(
            solving.record_answer("late"),
            Err(SessionError::SubmitInFlight)
        );
    }

    #[test]
    fn strict_policy_rejects_unlisted_choice_without_dirtying() {
        let question =
            Question::single_choice(QuestionId::new(1), "Colour of the sky?", ["blue", "green"])
                .unwrap();
        let session =
            Session::new(Container::practice(ContainerId::new(3)), vec![question]).unwrap();
        let mut solving = SolvingSession::new(session, AnswerPolicy::Strict);

        assert!(matches!(
            solving.record_answer("red"),
            Err(SessionError::InvalidChoice { .. })
        ));
        assert!(!solving.is_dirty());
        assert_eq!(solving.session().current_answer(), None);

        solving.record_answer("blue").unwrap();
        assert_eq!(solving.session().current_answer(), Some("blue"));
    }

    #[test]
    fn rejected_leave_changes_nothing() {
        let mut solving = solving(3);
        solving.jump_to(2).unwrap();
        solving.record_answer("draft").unwrap();
        let before = solving.session().clone();

        let outcome = solving.attempt_leave(Route::Assignments, |_| false);
        assert_eq!(outcome, LeaveOutcome::Cancelled);
        assert_eq!(solving.session(), &before);
        assert!(solving.is_dirty());
    }

    #[test]
    fn discard_clears_dirty_without_prompt() {
        let mut solving = solving(1);
        solving.record_answer("x").unwrap();
        solving.discard();
        let outcome = solving.attempt_leave(Route::Home, |_| panic!("no prompt expected"));
        assert_eq!(outcome, LeaveOutcome::Navigate(Route::Home));
    }
}
