//! Domain errors

use thiserror::Error;

/// Errors raised when a mutation would break a domain rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PetCareError {
    #[error("Please enter a name")]
    EmptyName,

    #[error("Please enter a task name")]
    EmptyTaskName,

    #[error("Please enter a description")]
    EmptyDescription,

    #[error("Frequency must be at least 1 day (got {0})")]
    InvalidFrequency(i64),

    #[error("Please enter a valid frequency (got '{0}')")]
    UnparsableFrequency(String),

    #[error("Please enter a valid age (got '{0}')")]
    InvalidAge(String),

    #[error("A pet named '{0}' already exists")]
    DuplicatePet(String),

    #[error("No pet named '{0}'")]
    PetNotFound(String),

    #[error("{pet} has no task named '{task}'")]
    TaskNotFound { pet: String, task: String },

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Unknown pet kind '{0}', expected dog, cat or bird")]
    UnknownKind(String),
}

pub type Result<T> = std::result::Result<T, PetCareError>;
