use std::{io, path::PathBuf, result};
use thiserror::Error;

/// Which field of a card a validation failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    CardName,
    WelcomePoints,
    OpenedDate,
}

impl Field {
    /// Key used for this field in the data file.
    pub fn key(&self) -> &'static str {
        match self {
            Field::CardName => "card_name",
            Field::WelcomePoints => "welcome_points",
            Field::OpenedDate => "opened_date",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("card name cannot be empty")]
    EmptyName,
    #[error("welcome points must be a positive integer")]
    NotPositiveInteger,
    #[error("date must be in YYYY-MM-DD format (e.g., 2025-11-28)")]
    BadDateFormat,
}

impl ValidationError {
    pub fn field(&self) -> Field {
        match self {
            ValidationError::EmptyName => Field::CardName,
            ValidationError::NotPositiveInteger => Field::WelcomePoints,
            ValidationError::BadDateFormat => Field::OpenedDate,
        }
    }
}

#[derive(Debug, Error)]
pub enum BonusError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("no card at position {index} (collection holds {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("cannot create data directory {0:?}: {1}")]
    CreateDataDirError(PathBuf, io::Error),
    #[error("cannot write cards to {0:?}: {1}")]
    WriteCardsError(PathBuf, io::Error),
    #[error("cannot serialize cards: {0}")]
    SerializeCardsError(serde_json::Error),
}

pub type Result<T> = result::Result<T, BonusError>;
