//! Building a playlist from files on the command line

use crate::error::{CliError, Result};
use cadence_playback::{Playlist, TrackDescriptor};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Turn `files` into a playlist, in the order given
///
/// `measure` reports each file's length; the engine's decoder in production,
/// a stub in tests.
pub fn build_playlist<P>(files: &[PathBuf], measure: P) -> Result<Playlist>
where
    P: Fn(&Path) -> Duration,
{
    let mut playlist = Playlist::new();

    for file in files {
        if !file.is_file() {
            return Err(CliError::MissingFile(file.clone()));
        }

        let track = TrackDescriptor::from_path(file, measure(file))?;
        debug!(name = track.name(), location = %track.location(), "Queued track");
        playlist.extend([track]);
    }

    Ok(playlist)
}
