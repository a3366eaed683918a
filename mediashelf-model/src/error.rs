use std::fmt::{self, Display};

/// Errors produced by model constructors and validation routines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A media category outside of movie/series/book.
    InvalidMediaKind(String),
    InvalidUniqueId(String),
    InvalidStatus(String),
    /// Ratings are whole stars between 1 and 5.
    InvalidRating(i64),
    MissingField(&'static str),
    Validation(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::InvalidMediaKind(raw) => write!(
                f,
                "invalid media type '{raw}'; use one of: movie, series, book"
            ),
            ModelError::InvalidUniqueId(raw) => {
                write!(f, "invalid unique id '{raw}'")
            }
            ModelError::InvalidStatus(raw) => write!(
                f,
                "invalid status '{raw}'; use one of: watched, watching, want_to_watch"
            ),
            ModelError::InvalidRating(value) => {
                write!(f, "rating must be between 1 and 5, got {value}")
            }
            ModelError::MissingField(field) => {
                write!(f, "field '{field}' is required")
            }
            ModelError::Validation(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
