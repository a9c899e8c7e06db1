mod guard;
mod navigation;
mod policy;
mod progress;
mod session;
mod solving;
mod submission;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use guard::{DiscardPrompt, LeaveOutcome, UnsavedChangeGuard};
pub use policy::AnswerPolicy;
pub use progress::{QuestionStatus, SessionProgress};
pub use session::Session;
pub use solving::{Redirect, SolvingSession, SubmitOutcome};
pub use submission::{SubmissionWorkflow, SubmitPrompt};
pub use workflow::SessionLoopService;
