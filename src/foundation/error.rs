/// Convenience result type used across stackform.
pub type StackResult<T> = Result<T, StackError>;

/// Top-level error taxonomy used by the public mutation and persistence APIs.
///
/// Constraint generation itself is total and never fails; errors only surface when a caller
/// hands the container malformed input.
#[derive(thiserror::Error, Debug)]
pub enum StackError {
    /// Invalid caller-provided configuration or arrangement request.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing persisted configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StackError {
    /// Build a [`StackError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StackError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for StackError {
    fn from(value: serde_json::Error) -> Self {
        Self::serde(value.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
