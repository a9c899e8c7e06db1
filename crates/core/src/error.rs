use thiserror::Error;

use crate::model::{ParseIdError, QuestionError, UnknownRole, UnknownRoute};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    ParseId(#[from] ParseIdError),
    #[error(transparent)]
    Role(#[from] UnknownRole),
    #[error(transparent)]
    Route(#[from] UnknownRoute),
}
