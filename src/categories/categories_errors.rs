use diesel::result::Error as DieselError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CategoryError>;

/// Custom error type for category-related operations
#[derive(Debug, Error)]
pub enum CategoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<DieselError> for CategoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => CategoryError::NotFound("Record not found".to_string()),
            _ => CategoryError::DatabaseError(err.to_string()),
        }
    }
}
