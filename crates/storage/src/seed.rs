//! Demo content for the mock backend.

use chrono::{DateTime, Duration, Utc};
use portal_core::model::{
    Container, ContainerId, ContainerStatus, ContainerSummary, Question, QuestionError, QuestionId,
};
use thiserror::Error;

use crate::repository::{InMemoryRepository, StorageError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SeedError {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub const FRACTIONS_ASSIGNMENT: ContainerId = ContainerId::new(1);
pub const ESSAY_ASSIGNMENT: ContainerId = ContainerId::new(2);
pub const CAPITALS_PRACTICE: ContainerId = ContainerId::new(10);

/// Populate `repo` with two assignments and one practice set, due dates relative to `now`.
///
/// # Errors
///
/// Returns `SeedError` if a demo question is malformed or the store is poisoned.
pub fn seed_demo(repo: &InMemoryRepository, now: DateTime<Utc>) -> Result<(), SeedError> {
    let fractions = Container::assignment(FRACTIONS_ASSIGNMENT);
    repo.insert_questions(
        fractions,
        vec![
            Question::single_choice(
                QuestionId::new(1),
                "What is 1/2 + 1/4?",
                ["1/6", "3/4", "2/6"],
            )?,
            Question::short_text(QuestionId::new(2), "Write 0.25 as a fraction in lowest terms.")?,
            Question::long_text(
                QuestionId::new(3),
                "Explain why 2/4 and 1/2 name the same number.",
            )?,
        ],
    )?;
    repo.insert_summary(ContainerSummary {
        container: fractions,
        title: "Adding fractions".into(),
        subject: "Mathematics".into(),
        due_at: Some(now + Duration::days(2)),
        status: ContainerStatus::Pending,
    })?;

    let essay = Container::assignment(ESSAY_ASSIGNMENT);
    repo.insert_questions(
        essay,
        vec![Question::long_text(
            QuestionId::new(1),
            "Describe a place you would like to visit and why.",
        )?],
    )?;
    repo.insert_summary(ContainerSummary {
        container: essay,
        title: "Descriptive writing".into(),
        subject: "English".into(),
        due_at: Some(now + Duration::days(7)),
        status: ContainerStatus::Pending,
    })?;

    let capitals = Container::practice(CAPITALS_PRACTICE);
    repo.insert_questions(
        capitals,
        vec![
            Question::single_choice(
                QuestionId::new(1),
                "Capital of France?",
                ["Lyon", "Paris", "Nice"],
            )?,
            Question::single_choice(QuestionId::new(2), "Capital of Japan?", ["Tokyo", "Osaka"])?,
            Question::short_text(QuestionId::new(3), "Capital of Italy?")?,
        ],
    )?;
    repo.insert_summary(ContainerSummary {
        container: capitals,
        title: "European and Asian capitals".into(),
        subject: "Geography".into(),
        due_at: None,
        status: ContainerStatus::Pending,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{CatalogRepository, QuestionProvider};
    use portal_core::model::ContainerKind;
    use portal_core::time::fixed_now;

    #[tokio::test]
    async fn demo_seed_covers_both_container_kinds() {
        let repo = InMemoryRepository::new();
        seed_demo(&repo, fixed_now()).unwrap();

        let assignments = repo.list_containers(ContainerKind::Assignment).await.unwrap();
        let practice = repo.list_containers(ContainerKind::Practice).await.unwrap();
        assert_eq!(assignments.len(), 2);
        assert_eq!(practice.len(), 1);

        let questions = repo
            .fetch_questions(Container::assignment(FRACTIONS_ASSIGNMENT))
            .await
            .unwrap();
        assert_eq!(questions.len(), 3);
    }
}
