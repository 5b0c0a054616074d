//! Playback controller - core orchestration
//!
//! Sits between a playlist and a single-track engine. For every transport
//! command it decides whether the live handle is reused, resumed, or torn
//! down and replaced, and keeps the registered listener attached to exactly
//! that handle.
//!
//! ```text
//!             play / next / previous
//!   Stopped ─────────────────────────▶ Playing ◀──┐ play (replace)
//!      ▲                               │  ▲  ─────┘ next / previous
//!      │ stop                    pause │  │ play, pause
//!      │                               ▼  │
//!      └────────────────────────────── Paused
//! ```
//!
//! Replacing a handle always runs `stop` → `remove_listener` on the old one,
//! then `create_handle` → `add_listener` → `play` on the new one.

use crate::{
    engine::{HandleFactory, PlaybackHandle},
    error::{PlaybackError, Result},
    events::PlaybackListener,
    playlist::Navigation,
    types::{PlaybackConfig, PlaybackState, TrackDescriptor},
    volume::Volume,
};
use std::sync::Arc;
use tracing::{debug, info};

/// The live handle together with the track it was bound to
struct ActiveTrack<H> {
    handle: H,
    track: TrackDescriptor,
}

/// Central playback control
///
/// Owns the playlist, the handle factory and at most one live handle.
/// Commands take `&mut self`; callers sharing a controller across threads
/// wrap it in a mutex.
pub struct PlaybackController<P, F>
where
    P: Navigation,
    F: HandleFactory,
{
    playlist: P,
    factory: F,
    active: Option<ActiveTrack<F::Handle>>,
    listener: Option<Arc<dyn PlaybackListener>>,
    volume: Volume,
}

impl<P, F> PlaybackController<P, F>
where
    P: Navigation,
    F: HandleFactory,
{
    /// Create an idle controller with default settings
    pub fn new(playlist: P, factory: F) -> Self {
        Self {
            playlist,
            factory,
            active: None,
            listener: None,
            volume: Volume::default(),
        }
    }

    /// Create an idle controller and apply `config` to it and its playlist
    pub fn with_config(mut playlist: P, factory: F, config: &PlaybackConfig) -> Self {
        if playlist.is_shuffle() != config.shuffle {
            playlist.toggle_shuffle();
        }
        if playlist.is_repeat() != config.repeat {
            playlist.toggle_repeat();
        }

        let mut volume = Volume::new(config.volume);
        if config.muted {
            volume.mute();
        }

        Self {
            playlist,
            factory,
            active: None,
            listener: None,
            volume,
        }
    }

    // ===== Listener =====

    /// Register the listener that receives engine events
    ///
    /// Replaces any previous listener. While a handle is live the old
    /// listener is detached from it before the new one is attached.
    pub fn set_listener(&mut self, listener: Arc<dyn PlaybackListener>) {
        if let Some(active) = self.active.as_mut() {
            if let Some(old) = self.listener.as_ref() {
                active.handle.remove_listener(old);
            }
            active.handle.add_listener(Arc::clone(&listener));
        }
        self.listener = Some(listener);
    }

    /// Unregister the listener, detaching it from the live handle
    pub fn clear_listener(&mut self) -> Option<Arc<dyn PlaybackListener>> {
        let listener = self.listener.take()?;
        if let Some(active) = self.active.as_mut() {
            active.handle.remove_listener(&listener);
        }
        Some(listener)
    }

    // ===== Transport =====

    /// Start playback of the current playlist track
    ///
    /// A paused handle is resumed in place. Otherwise any live handle is
    /// replaced by a new one for `playlist.current()`, which restarts the
    /// track when it was already playing.
    pub fn play(&mut self) -> Result<()> {
        if let Some(active) = self.active.as_mut() {
            if active.handle.is_paused() {
                debug!(track = active.track.name(), "Resuming paused track");
                return active.handle.play();
            }
        }

        self.replace_handle()
    }

    /// Pause playback, or resume it when already paused
    pub fn pause(&mut self) -> Result<()> {
        let Some(active) = self.active.as_mut() else {
            debug!("Pause ignored, nothing is playing");
            return Ok(());
        };

        if active.handle.is_paused() {
            debug!(track = active.track.name(), "Resuming paused track");
            active.handle.play()
        } else {
            debug!(track = active.track.name(), "Pausing track");
            active.handle.pause()
        }
    }

    /// Stop playback and release the live handle
    ///
    /// The playlist position is left where it is.
    pub fn stop(&mut self) -> Result<()> {
        self.release_active()
    }

    /// Skip to the next track
    ///
    /// The playlist always advances. Playback only restarts when a handle was
    /// live before the call.
    ///
    /// On [`PlaybackError::EngineBind`] the old handle is already released and
    /// the cursor has already moved to the track that failed to bind. The
    /// controller is left stopped there; `play` retries it.
    pub fn next(&mut self) -> Result<()> {
        let was_active = self.active.is_some();
        self.playlist.advance();

        if was_active {
            self.replace_handle()
        } else {
            Ok(())
        }
    }

    /// Go back to the previous track, mirroring [`Self::next`]
    ///
    /// A failed bind leaves the cursor on the new track, as with `next`.
    pub fn previous(&mut self) -> Result<()> {
        let was_active = self.active.is_some();
        self.playlist.retreat();

        if was_active {
            self.replace_handle()
        } else {
            Ok(())
        }
    }

    // ===== Shuffle & Repeat =====

    pub fn toggle_shuffle(&mut self) {
        self.playlist.toggle_shuffle();
    }

    /// Flip repeat mode; handles created from now on pick up the new loop flag
    pub fn toggle_repeat(&mut self) {
        self.playlist.toggle_repeat();
    }

    pub fn is_shuffle(&self) -> bool {
        self.playlist.is_shuffle()
    }

    pub fn is_repeat(&self) -> bool {
        self.playlist.is_repeat()
    }

    // ===== Playlist =====

    /// Append a track to the playlist without touching playback
    pub fn add(&mut self, track: TrackDescriptor) {
        self.playlist.add(track);
    }

    pub fn playlist(&self) -> &P {
        &self.playlist
    }

    // ===== Volume =====

    /// Set volume (0-100)
    pub fn set_volume(&mut self, level: u8) {
        self.volume.set_level(level);
        self.push_gain();
    }

    /// Current volume level (0-100)
    pub fn volume(&self) -> u8 {
        self.volume.level()
    }

    pub fn mute(&mut self) {
        self.volume.mute();
        self.push_gain();
    }

    pub fn unmute(&mut self) {
        self.volume.unmute();
        self.push_gain();
    }

    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.push_gain();
    }

    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    // ===== State Queries =====

    pub fn state(&self) -> PlaybackState {
        match &self.active {
            None => PlaybackState::Stopped,
            Some(active) if active.handle.is_paused() => PlaybackState::Paused,
            Some(_) => PlaybackState::Playing,
        }
    }

    /// Whether a handle is live (playing or paused)
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Track the live handle is bound to
    pub fn now_playing(&self) -> Option<&TrackDescriptor> {
        self.active.as_ref().map(|active| &active.track)
    }

    /// Track under the playlist cursor, playing or not
    pub fn current_track(&self) -> Option<TrackDescriptor> {
        self.playlist.current().ok()
    }

    // ===== Internal =====

    /// Replace whatever is live with a new handle for `playlist.current()`
    ///
    /// The track is resolved before anything is torn down, so an empty
    /// playlist leaves the controller untouched.
    fn replace_handle(&mut self) -> Result<()> {
        let track = self.playlist.current()?;
        self.release_active()?;

        let handle = self.start_handle(&track)?;
        self.active = Some(ActiveTrack { handle, track });
        Ok(())
    }

    /// Bind `track`, attach the listener and start playing
    fn start_handle(&mut self, track: &TrackDescriptor) -> Result<F::Handle> {
        let looping = self.playlist.is_repeat() && self.playlist.len() == 1;

        let mut handle = self
            .factory
            .create_handle(track.location(), self.volume.gain(), looping)
            .map_err(|source| PlaybackError::EngineBind {
                location: track.location().clone(),
                source: Box::new(source),
            })?;

        if let Some(listener) = self.listener.as_ref() {
            handle.add_listener(Arc::clone(listener));
        }

        if let Err(err) = handle.play() {
            if let Some(listener) = self.listener.as_ref() {
                handle.remove_listener(listener);
            }
            return Err(err);
        }

        info!(
            track = track.name(),
            location = %track.location(),
            looping,
            "Started track"
        );
        Ok(handle)
    }

    /// Stop the live handle, detach the listener and drop it
    ///
    /// The listener is detached even if the engine fails to stop; that
    /// failure is returned afterwards.
    fn release_active(&mut self) -> Result<()> {
        let Some(mut active) = self.active.take() else {
            return Ok(());
        };

        let stopped = active.handle.stop();
        if let Some(listener) = self.listener.as_ref() {
            active.handle.remove_listener(listener);
        }

        debug!(track = active.track.name(), "Released playback handle");
        stopped
    }

    fn push_gain(&mut self) {
        let gain = self.volume.gain();
        if let Some(active) = self.active.as_mut() {
            active.handle.set_gain(gain);
        }
    }
}
