//! Core types for playback control

use crate::error::{PlaybackError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// A single entry of a playlist
///
/// Immutable once built. Two descriptors with equal fields are
/// interchangeable, so the controller passes clones around freely.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackDescriptor {
    name: String,
    location: Url,
    duration: Duration,
}

impl TrackDescriptor {
    /// Create a descriptor from its parts
    pub fn new(name: impl Into<String>, location: Url, duration: Duration) -> Self {
        Self {
            name: name.into(),
            location,
            duration,
        }
    }

    /// Create a descriptor for a file on disk
    ///
    /// Relative paths are resolved against the current directory. The display
    /// name is the file stem.
    pub fn from_path(path: impl AsRef<Path>, duration: Duration) -> Result<Self> {
        let path = path.as_ref();
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };

        let location = Url::from_file_path(&absolute)
            .map_err(|()| PlaybackError::InvalidLocation(absolute.display().to_string()))?;

        let name = absolute
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| location.to_string());

        Ok(Self::new(name, location, duration))
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source location handed to the engine
    pub fn location(&self) -> &Url {
        &self.location
    }

    /// Track length
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

/// Observable controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No handle exists
    Stopped,

    /// A handle exists and is playing
    Playing,

    /// A handle exists and is paused mid-track
    Paused,
}

/// Initial settings for a playback controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Initial volume (0-100, default: 80)
    pub volume: u8,

    /// Start muted (default: false)
    pub muted: bool,

    /// Initial shuffle mode (default: off)
    pub shuffle: bool,

    /// Initial repeat mode (default: off)
    pub repeat: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: 80,
            muted: false,
            shuffle: false,
            repeat: false,
        }
    }
}
