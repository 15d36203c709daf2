use thiserror::Error;

use crate::ids::UserId;

/// Errors produced by model constructors and validation routines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("experience must be a whole number of years, got '{value}'")]
    InvalidExperience { value: String },

    #[error("{field} is not a valid web address: '{value}'")]
    InvalidUrl { field: &'static str, value: String },

    #[error("duplicate user id in listing: {id}")]
    DuplicateUserId { id: UserId },
}

impl ModelError {
    pub fn missing(field: &'static str) -> Self {
        Self::MissingField { field }
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;
