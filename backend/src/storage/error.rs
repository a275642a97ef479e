//! Error types for dataset storage operations.

use std::fmt;

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Structured context for storage errors.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The operation being performed (e.g., "read", "write")
    pub operation: Option<String>,
    /// The file name involved
    pub name: Option<String>,
    /// Additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: Some(operation.into()),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(ref op) = self.operation {
            parts.push(format!("operation={}", op));
        }
        if let Some(ref name) = self.name {
            parts.push(format!("name={}", name));
        }
        if let Some(ref details) = self.details {
            parts.push(format!("details={}", details));
        }
        write!(f, "[{}]", parts.join(", "))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Requested file does not exist.
    #[error("Not found: {message} {context}")]
    NotFound {
        message: String,
        context: ErrorContext,
    },

    /// Name is not a plain file name inside the store.
    #[error("Invalid name: {message} {context}")]
    InvalidName {
        message: String,
        context: ErrorContext,
    },

    /// Underlying I/O failure.
    #[error("I/O error: {message} {context}")]
    Io {
        message: String,
        context: ErrorContext,
    },
}

impl StoreError {
    pub fn not_found(name: &str, operation: &str) -> Self {
        Self::NotFound {
            message: format!("no file named '{}'", name),
            context: ErrorContext::new(operation).with_name(name),
        }
    }

    pub fn invalid_name(name: &str, operation: &str) -> Self {
        Self::InvalidName {
            message: format!("'{}' is not a plain file name", name),
            context: ErrorContext::new(operation).with_name(name),
        }
    }

    pub fn io(err: &std::io::Error, name: &str, operation: &str) -> Self {
        Self::Io {
            message: err.to_string(),
            context: ErrorContext::new(operation)
                .with_name(name)
                .with_details(format!("kind={:?}", err.kind())),
        }
    }

    /// Map an I/O error, turning `NotFound` into [`StoreError::NotFound`].
    pub fn from_io(err: std::io::Error, name: &str, operation: &str) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::not_found(name, operation)
        } else {
            Self::io(&err, name, operation)
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::NotFound { context, .. } => context,
            Self::InvalidName { context, .. } => context,
            Self::Io { context, .. } => context,
        }
    }
}
