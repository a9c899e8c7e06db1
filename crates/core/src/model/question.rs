use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::QuestionId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("single-choice question {id} needs at least one choice")]
    MissingChoices { id: QuestionId },

    #[error("text question {id} cannot carry choices")]
    UnexpectedChoices { id: QuestionId },

    #[error("single-choice question {id} has an empty choice")]
    EmptyChoice { id: QuestionId },
}

//
// ─── KIND ──────────────────────────────────────────────────────────────────────
//

/// Input shape a question expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    SingleChoice,
    ShortText,
    LongText,
}

impl QuestionKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SingleChoice => "single_choice",
            Self::ShortText => "short_text",
            Self::LongText => "long_text",
        }
    }

    #[must_use]
    pub fn has_choices(self) -> bool {
        matches!(self, Self::SingleChoice)
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// Static description of a question. Immutable once loaded.
///
/// `choices` is non-empty exactly when `kind` is [`QuestionKind::SingleChoice`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,
    kind: QuestionKind,
    prompt: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    choices: Vec<String>,
}

impl Question {
    /// Build a question, checking that choices agree with the kind.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyPrompt` for a blank prompt,
    /// `MissingChoices`/`EmptyChoice` for a malformed single-choice question and
    /// `UnexpectedChoices` when a text question carries choices.
    pub fn new(
        id: QuestionId,
        kind: QuestionKind,
        prompt: impl Into<String>,
        choices: Vec<String>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }

        if kind.has_choices() {
            if choices.is_empty() {
                return Err(QuestionError::MissingChoices { id });
            }
            if choices.iter().any(|c| c.trim().is_empty()) {
                return Err(QuestionError::EmptyChoice { id });
            }
        } else if !choices.is_empty() {
            return Err(QuestionError::UnexpectedChoices { id });
        }

        Ok(Self {
            id,
            kind,
            prompt,
            choices,
        })
    }

    /// # Errors
    ///
    /// See [`Question::new`].
    pub fn single_choice<I, S>(
        id: QuestionId,
        prompt: impl Into<String>,
        choices: I,
    ) -> Result<Self, QuestionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let choices = choices.into_iter().map(Into::into).collect();
        Self::new(id, QuestionKind::SingleChoice, prompt, choices)
    }

    /// # Errors
    ///
    /// Returns `QuestionError::EmptyPrompt` for a blank prompt.
    pub fn short_text(id: QuestionId, prompt: impl Into<String>) -> Result<Self, QuestionError> {
        Self::new(id, QuestionKind::ShortText, prompt, Vec::new())
    }

    /// # Errors
    ///
    /// Returns `QuestionError::EmptyPrompt` for a blank prompt.
    pub fn long_text(id: QuestionId, prompt: impl Into<String>) -> Result<Self, QuestionError> {
        Self::new(id, QuestionKind::LongText, prompt, Vec::new())
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    /// True if `value` is one of the listed choices. Always false for text questions.
    #[must_use]
    pub fn has_choice(&self, value: &str) -> bool {
        self.choices.iter().any(|c| c == value)
    }
}
