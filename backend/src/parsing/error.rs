use thiserror::Error;

/// Failure to turn a file into a [`Dataset`](crate::models::Dataset).
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file does not exist.
    #[error("Dataset file not found: {path}")]
    NotFound { path: String },

    /// The file exists but could not be read.
    #[error("Failed to read dataset {path}: {message}")]
    Io { path: String, message: String },

    /// The content is not tabular data.
    #[error("Failed to parse tabular data: {0}")]
    Parse(String),
}

impl LoadError {
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        LoadError::Parse(err.to_string())
    }
}
