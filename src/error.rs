use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MotifError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid file format at line {line}: {message}")]
    InvalidFileFormat { line: usize, message: String },

    #[error("Invalid motif pattern: {0}")]
    InvalidPattern(String),

    #[error("Worker pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Data error: {0}")]
    DataError(String),
}

/// Type alias for Result with MotifError
pub type Result<T> = std::result::Result<T, MotifError>;

impl MotifError {
    /// Create a new InvalidFileFormat error
    pub fn invalid_file_format(line: usize, message: impl Into<String>) -> Self {
        MotifError::InvalidFileFormat {
            line,
            message: message.into(),
        }
    }

    /// Create a new InvalidPattern error
    pub fn invalid_pattern(message: impl Into<String>) -> Self {
        MotifError::InvalidPattern(message.into())
    }
}
