use std::env;

use crate::error::ConfigError;
use crate::sessions::AnswerPolicy;

pub const ANSWER_POLICY_VAR: &str = "PORTAL_ANSWER_POLICY";

/// Knobs for solving sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionConfig {
    pub answer_policy: AnswerPolicy,
}

impl SessionConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a variable is set to an unknown value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`SessionConfig::from_env`] with an explicit variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a variable is set to an unknown value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let answer_policy = match lookup(ANSWER_POLICY_VAR) {
            Some(raw) if !raw.trim().is_empty() => {
                raw.parse().map_err(|_| ConfigError::InvalidValue {
                    key: ANSWER_POLICY_VAR,
                    raw,
                })?
            }
            _ => AnswerPolicy::default(),
        };
        Ok(Self { answer_policy })
    }

    #[must_use]
    pub fn with_answer_policy(mut self, policy: AnswerPolicy) -> Self {
        self.answer_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_variable_defaults_to_lenient() {
        let config = SessionConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.answer_policy, AnswerPolicy::Lenient);
    }

    #[test]
    fn reads_strict_policy() {
        let config = SessionConfig::from_lookup(|key| {
            (key == ANSWER_POLICY_VAR).then(|| "strict".to_string())
        })
        .unwrap();
        assert_eq!(config.answer_policy, AnswerPolicy::Strict);
    }

    #[test]
    fn unknown_policy_is_an_error() {
        let err = SessionConfig::from_lookup(|_| Some("sloppy".into())).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: ANSWER_POLICY_VAR,
                raw: "sloppy".into()
            }
        );
    }
}
