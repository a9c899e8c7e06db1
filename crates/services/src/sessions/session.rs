use chrono::{DateTime, Utc};
use std::collections::HashSet;

use portal_core::model::{AnswerSlot, Container, Question, Submission, SubmittedAnswer};

use super::progress::{QuestionStatus, SessionProgress};
use crate::error::SessionError;

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory state of one question-answering attempt.
///
/// Holds a fixed, non-empty question sequence, one answer slot per question
/// and a cursor that always points at a valid question. Created fresh when the
/// solving view opens and dropped when it closes; nothing is persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    container: Container,
    questions: Vec<Question>,
    slots: Vec<AnswerSlot>,
    pub(super) cursor: usize,
}

impl Session {
    /// Start a session on the first question with every slot unanswered.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` if `questions` is empty and
    /// `SessionError::DuplicateQuestion` if two questions share an id.
    pub fn new(container: Container, questions: Vec<Question>) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::InvalidState);
        }

        let mut seen = HashSet::with_capacity(questions.len());
        for question in &questions {
            if !seen.insert(question.id()) {
                return Err(SessionError::DuplicateQuestion { id: question.id() });
            }
        }

        let slots = questions
            .iter()
            .map(|q| AnswerSlot::unanswered(q.id()))
            .collect();

        Ok(Self {
            container,
            questions,
            slots,
            cursor: 0,
        })
    }

    #[must_use]
    pub fn container(&self) -> Container {
        self.container
    }

    /// Number of questions. Never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false once constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn slots(&self) -> &[AnswerSlot] {
        &self.slots
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.cursor]
    }

    #[must_use]
    pub fn current_answer(&self) -> Option<&str> {
        self.slots[self.cursor].value()
    }

    /// True when the cursor sits on the final question, where the view offers
    /// submission instead of "next".
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.cursor + 1 == self.questions.len()
    }

    /// Overwrite the slot under the cursor. Performs no validation.
    pub fn record_answer(&mut self, value: impl Into<String>) {
        self.slots[self.cursor].set(value);
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_answered()).count()
    }

    #[must_use]
    pub fn unanswered_count(&self) -> usize {
        self.len() - self.answered_count()
    }

    /// `(cursor + 1) / len`, independent of how many questions are answered.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress_fraction(&self) -> f64 {
        (self.cursor + 1) as f64 / self.len() as f64
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let answered = self.answered_count();
        SessionProgress {
            total: self.len(),
            answered,
            unanswered: self.len() - answered,
            position: self.cursor + 1,
            fraction: self.progress_fraction(),
        }
    }

    /// Answered/current flags for every question, in order.
    #[must_use]
    pub fn status_strip(&self) -> Vec<QuestionStatus> {
        self.slots
            .iter()
            .enumerate()
            .map(|(index, slot)| QuestionStatus {
                index,
                answered: slot.is_answered(),
                current: index == self.cursor,
            })
            .collect()
    }

    /// Snapshot of every slot, answered or not, for the submit operation.
    #[must_use]
    pub fn to_submission(&self, submitted_at: DateTime<Utc>) -> Submission {
        Submission {
            container: self.container,
            answers: self
                .slots
                .iter()
                .map(|slot| SubmittedAnswer {
                    question_id: slot.question_id(),
                    value: slot.value().map(str::to_owned),
                })
                .collect(),
            submitted_at,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
