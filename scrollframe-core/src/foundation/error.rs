/// Crate-wide result alias.
pub type ScrollframeResult<T> = Result<T, ScrollframeError>;

#[derive(thiserror::Error, Debug)]
/// Top-level error type used across scrollframe public APIs.
pub enum ScrollframeError {
    /// Invalid user input or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Failure to resolve a frame resource location.
    #[error("asset error: {0}")]
    Asset(String),

    /// Failure to fetch frame bytes from disk or network.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Failure to decode fetched bytes into pixels.
    #[error("decode error: {0}")]
    Decode(String),

    /// Failure while drawing onto a surface.
    #[error("render error: {0}")]
    Render(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrollframeError {
    /// Build a [`ScrollframeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ScrollframeError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`ScrollframeError::Fetch`] value.
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    /// Build a [`ScrollframeError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`ScrollframeError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ScrollframeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for ScrollframeError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
