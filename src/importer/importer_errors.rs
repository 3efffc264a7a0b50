use thiserror::Error;

pub type Result<T> = std::result::Result<T, ImportError>;

/// Fatal import failures. Row-level problems never surface here; they are
/// collected into the `ImportReport` instead.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Unreadable input: {0}")]
    Unreadable(String),
    #[error("Missing header row")]
    MissingHeader,
    #[error("Required column '{0}' not found in header")]
    MissingColumn(String),
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::Unreadable(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::Unreadable(err.to_string())
    }
}
