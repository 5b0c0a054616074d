//! Platform-agnostic playback engine contract
//!
//! The controller never decodes or outputs audio. It drives a single-track
//! engine through these two traits: a factory that binds a track to a new
//! handle, and the handle itself. Desktop builds back them with a real audio
//! device; tests back them with mocks or recording fakes.

use crate::error::Result;
use crate::events::PlaybackListener;
use std::sync::Arc;
use url::Url;

/// One running engine instance, bound to one track for its whole lifetime
///
/// State-changing calls return once the engine accepted them; the engine may
/// keep playing on its own thread afterwards. Failures reported here are
/// passed through the controller unchanged.
#[cfg_attr(test, mockall::automock)]
pub trait PlaybackHandle {
    /// Start, or resume after a pause
    fn play(&mut self) -> Result<()>;

    fn pause(&mut self) -> Result<()>;

    /// Stop playback; the handle is released right after
    fn stop(&mut self) -> Result<()>;

    fn is_paused(&self) -> bool;

    /// Attach a listener. Events produced after this call reach it.
    fn add_listener(&mut self, listener: Arc<dyn PlaybackListener>);

    /// Detach a listener previously attached, matched by `Arc` identity
    fn remove_listener(&mut self, listener: &Arc<dyn PlaybackListener>);

    /// Apply a new linear gain while playing
    fn set_gain(&mut self, gain: f32);
}

/// Builds handles for the controller
///
/// This is the only place engine instances come from, which is what lets the
/// controller run against a fake engine.
#[cfg_attr(
    test,
    mockall::automock(type Handle = MockPlaybackHandle; type Error = std::io::Error;)
)]
pub trait HandleFactory {
    type Handle: PlaybackHandle;

    /// Factory-specific bind failure, wrapped into `PlaybackError::EngineBind`
    type Error: std::error::Error + Send + Sync + 'static;

    /// Bind `location` to a new, not yet playing handle
    ///
    /// # Arguments
    /// * `location` - Track to bind
    /// * `gain` - Initial linear gain (0.0 = silent, 1.0 = unity)
    /// * `looping` - Whether the engine should loop the track forever
    fn create_handle(
        &mut self,
        location: &Url,
        gain: f32,
        looping: bool,
    ) -> std::result::Result<Self::Handle, Self::Error>;
}
