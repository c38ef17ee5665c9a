/// Result alias used by every fallible construction path in the crate.
pub type TinselResult<T> = Result<T, TinselError>;

/// Errors surfaced while building curves, patterns, layouts or engine configuration.
///
/// The per-frame render path never produces these; it only consumes values
/// that were validated on the way in.
#[derive(thiserror::Error, Debug)]
pub enum TinselError {
    /// A curve, param, pattern or strategy definition is malformed.
    #[error("validation error: {0}")]
    Validation(String),

    /// The LED layout is empty or carries non-finite coordinates.
    #[error("layout error: {0}")]
    Layout(String),

    /// Engine configuration is out of range.
    #[error("config error: {0}")]
    Config(String),

    /// A JSON document failed to parse.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, with its source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TinselError {
    /// Build a [`TinselError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TinselError::Layout`].
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    /// Build a [`TinselError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`TinselError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for TinselError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
