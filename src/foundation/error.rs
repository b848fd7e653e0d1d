pub type MultiviewResult<T> = Result<T, MultiviewError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Per-frame degradation (stale scenes, empty tiles, silent channels) never surfaces here;
/// only configuration-time precondition failures and collaborator failures do.
#[derive(thiserror::Error, Debug)]
pub enum MultiviewError {
    /// Degenerate geometry or otherwise invalid input to the layout engine.
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid or unreadable configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Failures reported by the audio subsystem (subscribe/unsubscribe).
    #[error("audio error: {0}")]
    Audio(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MultiviewError {
    /// Build a [`MultiviewError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MultiviewError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`MultiviewError::Audio`] value.
    pub fn audio(msg: impl Into<String>) -> Self {
        Self::Audio(msg.into())
    }

    /// Build a [`MultiviewError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
