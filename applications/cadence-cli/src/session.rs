//! Interactive playback session
//!
//! Owns the controller and applies user commands and engine events to it,
//! one at a time, from a single thread.

use crate::commands::{Command, HELP};
use crate::error::Result;
use cadence_playback::{
    HandleFactory, PlaybackConfig, PlaybackController, PlaybackEvent, PlaybackListener,
    PlaybackState, Playlist, TrackDescriptor,
};
use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Everything the main loop reacts to
#[derive(Debug)]
pub enum Input {
    /// A line typed by the user
    Line(String),
    /// An event forwarded from the engine
    Event(PlaybackEvent),
    /// Stdin reached end of file
    Closed,
}

/// What the main loop should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Quit,
}

pub struct Session<F: HandleFactory> {
    controller: PlaybackController<Playlist, F>,
}

impl<F: HandleFactory> Session<F> {
    pub fn new(
        playlist: Playlist,
        factory: F,
        config: &PlaybackConfig,
        listener: Arc<dyn PlaybackListener>,
    ) -> Self {
        let mut controller = PlaybackController::with_config(playlist, factory, config);
        controller.set_listener(listener);
        Self { controller }
    }

    pub fn controller(&self) -> &PlaybackController<Playlist, F> {
        &self.controller
    }

    /// Apply one user command
    pub fn execute(&mut self, command: Command) -> Result<Reply> {
        debug!(?command, "Executing command");

        match command {
            Command::Play => self.controller.play()?,
            Command::Pause => self.controller.pause()?,
            Command::Stop => self.controller.stop()?,
            Command::Next => self.controller.next()?,
            Command::Previous => self.controller.previous()?,
            Command::Shuffle => {
                self.controller.toggle_shuffle();
                return Ok(Reply::Text(format!(
                    "shuffle {}",
                    on_off(self.controller.is_shuffle())
                )));
            }
            Command::Repeat => {
                self.controller.toggle_repeat();
                return Ok(Reply::Text(format!(
                    "repeat {}",
                    on_off(self.controller.is_repeat())
                )));
            }
            Command::Volume(level) => {
                self.controller.set_volume(level);
                return Ok(Reply::Text(format!("volume {}%", self.controller.volume())));
            }
            Command::Mute => {
                self.controller.toggle_mute();
                return Ok(Reply::Text(if self.controller.is_muted() {
                    "muted".to_string()
                } else {
                    "unmuted".to_string()
                }));
            }
            Command::Status => return Ok(Reply::Text(self.status())),
            Command::List => return Ok(Reply::Text(self.listing())),
            Command::Help => return Ok(Reply::Text(HELP.to_string())),
            Command::Quit => {
                self.shutdown()?;
                return Ok(Reply::Quit);
            }
        }

        Ok(Reply::Text(self.status()))
    }

    /// React to an engine event
    ///
    /// A finished track moves on to the next one while the playlist has one,
    /// otherwise playback stops. Only a `Finished` for the track that is
    /// live right now counts; one queued by a handle that was released since
    /// is dropped.
    pub fn on_event(&mut self, event: &PlaybackEvent) -> Result<()> {
        if !matches!(event, PlaybackEvent::Finished { .. }) {
            return Ok(());
        }

        let live = self.controller.now_playing().map(TrackDescriptor::location);
        if live.is_none() || live != event.location() {
            debug!(?event, "Ignoring finish from a released handle");
            return Ok(());
        }

        if self.controller.playlist().has_next() {
            info!("Track finished, advancing");
            self.controller.next()?;
        } else {
            info!("End of playlist");
            self.controller.stop()?;
        }
        Ok(())
    }

    /// Stop playback so the listener sees the handle go away
    pub fn shutdown(&mut self) -> Result<()> {
        self.controller.stop()?;
        Ok(())
    }

    /// One-line summary of the controller
    pub fn status(&self) -> String {
        let state = match self.controller.state() {
            PlaybackState::Playing => "playing",
            PlaybackState::Paused => "paused",
            PlaybackState::Stopped => "stopped",
        };

        let playlist = self.controller.playlist();
        let track = match (self.controller.current_track(), playlist.position()) {
            (Some(track), Some(position)) => format!(
                "{} ({}/{})",
                track.name(),
                position + 1,
                playlist.tracks().len()
            ),
            _ => "empty playlist".to_string(),
        };

        let volume = if self.controller.is_muted() {
            "muted".to_string()
        } else {
            format!("{}%", self.controller.volume())
        };

        format!(
            "[{}] {} | volume {} | shuffle {} | repeat {}",
            state,
            track,
            volume,
            on_off(self.controller.is_shuffle()),
            on_off(self.controller.is_repeat())
        )
    }

    /// Playlist in insertion order, current track marked
    pub fn listing(&self) -> String {
        render_playlist(self.controller.playlist())
    }
}

/// Numbered track list with the cursor marked by `>`
pub fn render_playlist(playlist: &Playlist) -> String {
    if playlist.tracks().is_empty() {
        return "(empty playlist)".to_string();
    }

    let mut out = String::new();
    for (index, track) in playlist.tracks().iter().enumerate() {
        let marker = if playlist.position() == Some(index) {
            '>'
        } else {
            ' '
        };
        let _ = writeln!(
            out,
            "{} {:>3}. {} [{}]",
            marker,
            index + 1,
            track.name(),
            format_duration(track.duration())
        );
    }
    out.truncate(out.trim_end().len());
    out
}

/// `m:ss`, or `--:--` when the engine could not tell
pub fn format_duration(duration: Duration) -> String {
    if duration.is_zero() {
        return "--:--".to_string();
    }
    let secs = duration.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}
