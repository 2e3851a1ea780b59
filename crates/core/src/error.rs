//! Error types

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    #[error("Unknown emotion: {0}")]
    UnknownEmotion(String),
}

pub type Result<T> = std::result::Result<T, Error>;
