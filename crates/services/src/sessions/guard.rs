use portal_core::model::Route;

/// Shown when the learner tries to leave with unsaved answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscardPrompt {
    pub target: Route,
}

impl DiscardPrompt {
    #[must_use]
    pub fn message(&self) -> &'static str {
        "You have unsaved answers. Leave and discard them?"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveOutcome {
    /// Navigation proceeds; the host drops the session.
    Navigate(Route),
    /// The learner chose to stay. Nothing changed.
    Cancelled,
}

/// Tracks edits made since the last successful submit or discard, and
/// intercepts navigation away while any exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnsavedChangeGuard {
    dirty: bool,
}

impl UnsavedChangeGuard {
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn clear(&mut self) {
        self.dirty = false;
    }

    /// Ask to leave for `target`. `confirm` is only called when there are
    /// unsaved edits; returning `true` discards them.
    pub fn attempt_leave<F>(&mut self, target: Route, confirm: F) -> LeaveOutcome
    where
        F: FnOnce(&DiscardPrompt) -> bool,
    {
        if !self.dirty {
            return LeaveOutcome::Navigate(target);
        }

        if confirm(&DiscardPrompt { target }) {
            self.dirty = false;
            tracing::info!(%target, "unsaved answers discarded");
            LeaveOutcome::Navigate(target)
        } else {
            tracing::debug!(%target, "leave cancelled");
            LeaveOutcome::Cancelled
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_guard_never_prompts() {
        let mut guard = UnsavedChangeGuard::default();
        let outcome = guard.attempt_leave(Route::Practice, |_| panic!("should not prompt"));
        assert_eq!(outcome, LeaveOutcome::Navigate(Route::Practice));
    }

    #[test]
    fn rejecting_the_prompt_keeps_dirty() {
        let mut guard = UnsavedChangeGuard::default();
        guard.mark_dirty();
        let mut prompted = None;
        let outcome = guard.attempt_leave(Route::Assignments, |prompt| {
            prompted = Some(prompt.target);
            false
        });
        assert_eq!(outcome, LeaveOutcome::Cancelled);
        assert_eq!(prompted, Some(Route::Assignments));
        assert!(guard.is_dirty());
    }

    #[test]
    fn confirming_the_prompt_clears_dirty() {
        let mut guard = UnsavedChangeGuard::default();
        guard.mark_dirty();
        let outcome = guard.attempt_leave(Route::Home, |_| true);
        assert_eq!(outcome, LeaveOutcome::Navigate(Route::Home));
        assert!(!guard.is_dirty());
    }
}
