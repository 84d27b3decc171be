/// Convenience result alias used across the crate.
pub type GapminderResult<T> = Result<T, GapminderError>;

/// Error type for loading, configuring, rendering and encoding a chart.
#[derive(thiserror::Error, Debug)]
pub enum GapminderError {
    /// The dataset could not be read or is not shaped like a year array.
    #[error("load error: {0}")]
    Load(String),

    /// A configuration value or argument violates an invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Building or rasterizing a frame failed.
    #[error("render error: {0}")]
    Render(String),

    /// A frame sink rejected a frame or its encoder failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// JSON (de)serialization failure outside of dataset loading.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GapminderError {
    /// Build a [`GapminderError::Load`].
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Build a [`GapminderError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GapminderError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`GapminderError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`GapminderError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
