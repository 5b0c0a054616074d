//! Cadence - Playlist Playback Control
//!
//! Platform-agnostic playback control for Cadence.
//!
//! This crate provides:
//! - A playlist with a position cursor, shuffle and repeat
//! - The engine contract (handle factory + single-track handle)
//! - The playback controller: reuse, resume or replace the live handle per
//!   command, with exactly one listener attached to it
//! - Controller-level volume (0-100%, mute/unmute)
//!
//! # Architecture
//!
//! `cadence-playback` never touches an audio device:
//! - No decoder, no output stream
//! - No threads of its own
//! - No logging backend (only `tracing` events)
//!
//! Engines are plugged in through [`HandleFactory`] and [`PlaybackHandle`].
//!
//! # Example: Driving a Controller
//!
//! ```rust
//! use cadence_playback::{
//!     HandleFactory, PlaybackController, PlaybackHandle, PlaybackListener, PlaybackState,
//!     Playlist, Result, TrackDescriptor,
//! };
//! use std::sync::Arc;
//! use std::time::Duration;
//! use url::Url;
//!
//! // A do-nothing engine
//! #[derive(Default)]
//! struct SilentHandle {
//!     paused: bool,
//! }
//!
//! impl PlaybackHandle for SilentHandle {
//!     fn play(&mut self) -> Result<()> {
//!         self.paused = false;
//!         Ok(())
//!     }
//!     fn pause(&mut self) -> Result<()> {
//!         self.paused = true;
//!         Ok(())
//!     }
//!     fn stop(&mut self) -> Result<()> {
//!         Ok(())
//!     }
//!     fn is_paused(&self) -> bool {
//!         self.paused
//!     }
//!     fn add_listener(&mut self, _listener: Arc<dyn PlaybackListener>) {}
//!     fn remove_listener(&mut self, _listener: &Arc<dyn PlaybackListener>) {}
//!     fn set_gain(&mut self, _gain: f32) {}
//! }
//!
//! struct SilentEngine;
//!
//! impl HandleFactory for SilentEngine {
//!     type Handle = SilentHandle;
//!     type Error = std::io::Error;
//!
//!     fn create_handle(
//!         &mut self,
//!         _location: &Url,
//!         _gain: f32,
//!         _looping: bool,
//!     ) -> std::result::Result<SilentHandle, std::io::Error> {
//!         Ok(SilentHandle::default())
//!     }
//! }
//!
//! let playlist: Playlist = ["one", "two", "three"]
//!     .into_iter()
//!     .map(|name| {
//!         let location = Url::parse(&format!("file:///music/{name}.mp3")).unwrap();
//!         TrackDescriptor::new(name, location, Duration::from_secs(180))
//!     })
//!     .collect();
//!
//! let mut controller = PlaybackController::new(playlist, SilentEngine);
//!
//! controller.play().unwrap();
//! controller.next().unwrap();
//! assert_eq!(controller.now_playing().unwrap().name(), "two");
//!
//! controller.pause().unwrap();
//! assert_eq!(controller.state(), PlaybackState::Paused);
//!
//! controller.stop().unwrap();
//! assert_eq!(controller.state(), PlaybackState::Stopped);
//! ```

mod controller;
mod engine;
mod error;
mod events;
mod playlist;
mod shuffle;
pub mod types;
mod volume;

// Public exports
pub use controller::PlaybackController;
pub use engine::{HandleFactory, PlaybackHandle};
pub use error::{PlaybackError, Result};
pub use events::{same_listener, PlaybackEvent, PlaybackListener};
pub use playlist::{Navigation, Playlist};
pub use types::{PlaybackConfig, PlaybackState, TrackDescriptor};
pub use volume::Volume;
