mod access;
mod answer;
mod container;
mod ids;
mod question;
mod submission;

pub use access::{Access, Role, Route, UnknownRole, UnknownRoute, route_access};
pub use answer::AnswerSlot;
pub use container::{Container, ContainerKind, ContainerStatus, ContainerSummary};
pub use ids::{ContainerId, ParseIdError, QuestionId};
pub use question::{Question, QuestionError, QuestionKind};
pub use submission::{Submission, SubmittedAnswer};
