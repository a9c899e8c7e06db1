use serde::{Deserialize, Serialize};

use crate::model::ids::QuestionId;

/// Answer storage for one question within a session.
///
/// A slot is never removed, only overwritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSlot {
    question_id: QuestionId,
    value: Option<String>,
}

impl AnswerSlot {
    #[must_use]
    pub fn unanswered(question_id: QuestionId) -> Self {
        Self {
            question_id,
            value: None,
        }
    }

    #[must_use]
    pub fn question_id(&self) -> QuestionId {
        self.question_id
    }

    /// Raw captured value, if any. May be blank; see [`AnswerSlot::is_answered`].
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// A slot counts as answered only when its value is non-empty after trimming.
    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.value.as_deref().is_some_and(|v| !v.trim().is_empty())
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.value = Some(value.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_value_is_not_answered() {
        let mut slot = AnswerSlot::unanswered(QuestionId::new(1));
        assert!(!slot.is_answered());

        slot.set("   ");
        assert_eq!(slot.value(), Some("   "));
        assert!(!slot.is_answered());

        slot.set("Paris");
        assert!(slot.is_answered());
    }
}
