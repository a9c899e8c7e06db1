use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::ids::ContainerId;

/// Whether a question sequence belongs to an assignment or a practice set.
///
/// Only submission side-effects depend on this; navigation does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    Assignment,
    Practice,
}

impl ContainerKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Assignment => "assignment",
            Self::Practice => "practice",
        }
    }
}

/// An assignment or practice-set reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Container {
    pub kind: ContainerKind,
    pub id: ContainerId,
}

impl Container {
    #[must_use]
    pub fn assignment(id: ContainerId) -> Self {
        Self {
            kind: ContainerKind::Assignment,
            id,
        }
    }

    #[must_use]
    pub fn practice(id: ContainerId) -> Self {
        Self {
            kind: ContainerKind::Practice,
            id,
        }
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.kind.as_str(), self.id)
    }
}

/// Learner-facing lifecycle of a container, as shown in list views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerStatus {
    Pending,
    Submitted,
    Graded,
}

/// List-view row for an assignment or practice set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSummary {
    pub container: Container,
    pub title: String,
    pub subject: String,
    pub due_at: Option<DateTime<Utc>>,
    pub status: ContainerStatus,
}
