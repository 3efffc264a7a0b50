use diesel::result::Error as DieselError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExpenseError>;

/// Custom error type for expense-related operations
#[derive(Debug, Error)]
pub enum ExpenseError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<DieselError> for ExpenseError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => ExpenseError::NotFound("Record not found".to_string()),
            _ => ExpenseError::DatabaseError(err.to_string()),
        }
    }
}
