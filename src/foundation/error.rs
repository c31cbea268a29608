/// Result alias used across the crate.
pub type PlayerResult<T> = Result<T, PlayerError>;

#[derive(thiserror::Error, Debug)]
/// Error type shared by the preview engine and its collaborators.
pub enum PlayerError {
    /// Input data (scene, options) violates an invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Marker fetch or marker payload failure.
    #[error("marker error: {0}")]
    Markers(String),

    /// Narration playback failure (autoplay rejection, decode error, ...).
    #[error("audio error: {0}")]
    Audio(String),

    /// Navigation could not find a playable scene.
    #[error("navigation error: {0}")]
    Navigation(String),

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error bubbled up from a host collaborator.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PlayerError {
    /// Build a [`PlayerError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PlayerError::Markers`].
    pub fn markers(msg: impl Into<String>) -> Self {
        Self::Markers(msg.into())
    }

    /// Build a [`PlayerError::Audio`].
    pub fn audio(msg: impl Into<String>) -> Self {
        Self::Audio(msg.into())
    }

    /// Build a [`PlayerError::Navigation`].
    pub fn navigation(msg: impl Into<String>) -> Self {
        Self::Navigation(msg.into())
    }

    /// Build a [`PlayerError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for PlayerError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
