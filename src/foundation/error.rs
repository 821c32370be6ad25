/// Convenience result type used across codecast.
pub type CodecastResult<T> = Result<T, CodecastError>;

/// Top-level error taxonomy used by resolver APIs.
#[derive(thiserror::Error, Debug)]
pub enum CodecastError {
    /// Caller broke an input contract (durations, frame indices, frame rates).
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while resolving a frame or a frame range.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors when serializing or deserializing scripts and options.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CodecastError {
    /// Build a [`CodecastError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CodecastError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`CodecastError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
