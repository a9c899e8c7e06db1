#![forbid(unsafe_code)]

pub mod app_services;
pub mod catalog_service;
pub mod config;
pub mod error;
pub mod sessions;

pub use portal_core::Clock;

pub use app_services::AppServices;
pub use catalog_service::{CatalogQuery, CatalogService, CatalogSort};
pub use config::SessionConfig;
pub use error::{CatalogError, ConfigError, SessionError};

pub use sessions::{
    AnswerPolicy, DiscardPrompt, LeaveOutcome, Redirect, Session, SessionLoopService,
    SessionProgress, SolvingSession, SubmitOutcome, SubmitPrompt,
};
