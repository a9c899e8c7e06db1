use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::container::Container;
use crate::model::ids::QuestionId;

/// One captured answer as handed to the submit operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedAnswer {
    pub question_id: QuestionId,
    pub value: Option<String>,
}

/// Full contents of a session at the moment the learner confirmed submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub container: Container,
    pub answers: Vec<SubmittedAnswer>,
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    #[must_use]
    pub fn answer_for(&self, question_id: QuestionId) -> Option<&str> {
        self.answers
            .iter()
            .find(|a| a.question_id == question_id)
            .and_then(|a| a.value.as_deref())
    }
}
