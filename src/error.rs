use thiserror::Error;

/// Errors surfaced by the expense tracker.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad user input, caught at the boundary before it reaches storage
    /// or the reconciliation functions.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The requested period holds no usable data. Informational for the
    /// caller, not fatal.
    #[error("No data available for the requested period")]
    EmptyDataset,

    #[error("{0} not found")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("Export error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
