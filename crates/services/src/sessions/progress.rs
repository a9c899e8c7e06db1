/// Derived progress values for a session, useful for UI.
///
/// `fraction` tracks the cursor position and drives the progress bar.
/// `answered`/`unanswered` drive the submission warning. They are unrelated:
/// a learner on the last question may still have nothing answered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub unanswered: usize,
    /// One-based position of the cursor.
    pub position: usize,
    pub fraction: f64,
}

/// One cell of the answer-status indicator strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionStatus {
    pub index: usize,
    pub answered: bool,
    pub current: bool,
}
