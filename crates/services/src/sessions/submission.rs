use super::session::Session;
use crate::error::SessionError;

/// What the confirmation prompt shows before a submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitPrompt {
    pub answered: usize,
    pub total: usize,
}

impl SubmitPrompt {
    #[must_use]
    pub fn unanswered(&self) -> usize {
        self.total - self.answered
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.answered == self.total
    }

    #[must_use]
    pub fn message(&self) -> String {
        if self.is_complete() {
            format!("All {} questions answered. Submit now?", self.total)
        } else {
            format!(
                "{} of {} answered, {} unanswered. Submit anyway?",
                self.answered,
                self.total,
                self.unanswered()
            )
        }
    }
}

/// UI flags gating final submission behind an explicit confirmation.
///
/// `awaiting_confirmation` is the open prompt; `submitting` marks a request in
/// flight and blocks a second one. Neither is part of the session itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmissionWorkflow {
    awaiting_confirmation: bool,
    submitting: bool,
}

impl SubmissionWorkflow {
    #[must_use]
    pub fn is_awaiting_confirmation(&self) -> bool {
        self.awaiting_confirmation
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Open the confirmation prompt.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::SubmitInFlight` while a previous submit is pending.
    pub fn request(&mut self, session: &Session) -> Result<SubmitPrompt, SessionError> {
        if self.submitting {
            return Err(SessionError::SubmitInFlight);
        }
        self.awaiting_confirmation = true;
        Ok(SubmitPrompt {
            answered: session.answered_count(),
            total: session.len(),
        })
    }

    pub fn cancel(&mut self) {
        self.awaiting_confirmation = false;
    }

    /// Mark a confirmed submit as in flight.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::SubmitInFlight` if one is already pending and
    /// `SessionError::NotAwaitingConfirmation` if the prompt is not open.
    pub fn begin(&mut self) -> Result<(), SessionError> {
        if self.submitting {
            return Err(SessionError::SubmitInFlight);
        }
        if !self.awaiting_confirmation {
            return Err(SessionError::NotAwaitingConfirmation);
        }
        self.submitting = true;
        Ok(())
    }

    /// Close the prompt after the submit resolved, either way.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoSubmitInFlight` if `begin` was not called.
    pub fn finish(&mut self) -> Result<(), SessionError> {
        if !self.submitting {
            return Err(SessionError::NoSubmitInFlight);
        }
        self.submitting = false;
        self.awaiting_confirmation = false;
        Ok(())
    }
}
