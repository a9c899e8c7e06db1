use serde::{Deserialize, Serialize};
use std::str::FromStr;

use portal_core::model::{Question, QuestionKind};

use crate::error::{ConfigError, SessionError};

/// How strictly captured answers are checked against their question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerPolicy {
    /// Store any value as typed.
    #[default]
    Lenient,
    /// Single-choice answers must be one of the listed choices.
    Strict,
}

impl AnswerPolicy {
    /// # Errors
    ///
    /// Returns `SessionError::InvalidChoice` when a strict policy rejects `value`.
    pub fn check(self, question: &Question, value: &str) -> Result<(), SessionError> {
        match (self, question.kind()) {
            (Self::Strict, QuestionKind::SingleChoice) if !question.has_choice(value) => {
                Err(SessionError::InvalidChoice {
                    question_id: question.id(),
                    value: value.to_owned(),
                })
            }
            _ => Ok(()),
        }
    }
}

impl FromStr for AnswerPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            _ => Err(ConfigError::InvalidValue {
                key: "answer policy",
                raw: s.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::model::QuestionId;

    fn choice_question() -> Question {
        Question::single_choice(QuestionId::new(1), "Largest planet?", ["Mars", "Jupiter"]).unwrap()
    }

    #[test]
    fn lenient_accepts_anything() {
        assert!(AnswerPolicy::Lenient.check(&choice_question(), "Pluto").is_ok());
    }

    #[test]
    fn strict_rejects_unlisted_choice() {
        let err = AnswerPolicy::Strict.check(&choice_question(), "Pluto").unwrap_err();
        assert!(matches!(err, SessionError::InvalidChoice { .. }));
        assert!(AnswerPolicy::Strict.check(&choice_question(), "Jupiter").is_ok());
    }

    #[test]
    fn strict_ignores_text_questions() {
        let q = Question::short_text(QuestionId::new(2), "Any word").unwrap();
        assert!(AnswerPolicy::Strict.check(&q, "whatever").is_ok());
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(" STRICT ".parse::<AnswerPolicy>(), Ok(AnswerPolicy::Strict));
        assert!("loose".parse::<AnswerPolicy>().is_err());
    }
}
