//! Error types for playback control

use thiserror::Error;
use url::Url;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The playlist has no tracks to resolve
    #[error("Playlist is empty")]
    EmptyPlaylist,

    /// The engine refused to bind a track to a new handle
    #[error("Engine could not bind {location}: {source}")]
    EngineBind {
        /// Location of the track that failed to bind
        location: Url,
        /// Error reported by the handle factory
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A live handle reported a failure
    #[error("Engine error: {0}")]
    Engine(String),

    /// A path could not be expressed as a track location
    #[error("Invalid track location: {0}")]
    InvalidLocation(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PlaybackError {
    /// Build an engine error from anything displayable
    pub fn engine(message: impl std::fmt::Display) -> Self {
        Self::Engine(message.to_string())
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
