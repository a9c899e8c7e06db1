#![forbid(unsafe_code)]

pub mod repository;
pub mod seed;

pub use seed::{SeedError, seed_demo};

pub use repository::{
    AnswerSubmitter, CatalogRepository, InMemoryRepository, QuestionProvider, Storage,
    StorageError,
};
