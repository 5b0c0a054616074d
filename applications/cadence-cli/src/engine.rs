//! Audio engine backed by rodio
//!
//! One `OutputStream` lives in the factory for the whole session; each
//! handle gets its own `Sink` holding exactly one decoded track. A watcher
//! thread per handle reports `Finished` once the sink runs dry.

use crate::error::EngineError;
use cadence_playback::{
    same_listener, HandleFactory, PlaybackError, PlaybackEvent, PlaybackHandle, PlaybackListener,
    Result,
};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// How often the watcher checks whether the sink drained
const WATCH_INTERVAL: Duration = Duration::from_millis(100);

/// Opens the default output device and binds tracks to sinks on it
pub struct RodioFactory {
    // Dropping the stream silences every sink created from it
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
}

impl RodioFactory {
    /// Open the default audio output device
    pub fn try_default() -> std::result::Result<Self, EngineError> {
        let (stream, stream_handle) = OutputStream::try_default()?;
        debug!("Opened default audio output");

        Ok(Self {
            _stream: stream,
            stream_handle,
        })
    }
}

impl HandleFactory for RodioFactory {
    type Handle = RodioHandle;
    type Error = EngineError;

    fn create_handle(
        &mut self,
        location: &Url,
        gain: f32,
        looping: bool,
    ) -> std::result::Result<RodioHandle, EngineError> {
        let path = location
            .to_file_path()
            .map_err(|()| EngineError::NotAFile(location.clone()))?;
        let decoder = Decoder::new(BufReader::new(File::open(&path)?))?;

        let sink = Sink::try_new(&self.stream_handle)?;
        // Nothing may be heard before the controller attached its listener
        sink.pause();
        sink.set_volume(gain);

        if looping {
            sink.append(decoder.repeat_infinite());
        } else {
            sink.append(decoder);
        }

        debug!(%location, gain, looping, "Bound track to sink");

        Ok(RodioHandle {
            location: location.clone(),
            sink: Arc::new(sink),
            attachments: Arc::default(),
            watcher: None,
        })
    }
}

/// Listeners of one handle plus its stopped flag, behind one lock
///
/// Once `mark_stopped` returned, `deliver_unless_stopped` never reaches a
/// listener again: the watcher thread checks the flag and delivers while
/// holding the same lock `stop` takes to set it.
#[derive(Default)]
pub struct Attachments {
    inner: Mutex<AttachmentState>,
}

#[derive(Default)]
struct AttachmentState {
    listeners: Vec<Arc<dyn PlaybackListener>>,
    stopped: bool,
}

impl Attachments {
    fn lock(&self) -> MutexGuard<'_, AttachmentState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn attach(&self, listener: Arc<dyn PlaybackListener>) {
        self.lock().listeners.push(listener);
    }

    pub fn detach(&self, listener: &Arc<dyn PlaybackListener>) {
        self.lock()
            .listeners
            .retain(|attached| !same_listener(attached, listener));
    }

    pub fn mark_stopped(&self) {
        self.lock().stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.lock().stopped
    }

    /// Deliver `event` to every attached listener
    pub fn deliver(&self, event: &PlaybackEvent) {
        let state = self.lock();
        for listener in &state.listeners {
            listener.on_event(event);
        }
    }

    /// Deliver `event` unless the handle was stopped; reports whether it was
    pub fn deliver_unless_stopped(&self, event: &PlaybackEvent) -> bool {
        let state = self.lock();
        if state.stopped {
            return false;
        }
        for listener in &state.listeners {
            listener.on_event(event);
        }
        true
    }
}

/// One sink playing one track
pub struct RodioHandle {
    location: Url,
    sink: Arc<Sink>,
    attachments: Arc<Attachments>,
    watcher: Option<JoinHandle<()>>,
}

impl RodioHandle {
    fn spawn_watcher(&mut self) {
        let sink = Arc::clone(&self.sink);
        let attachments = Arc::clone(&self.attachments);
        let finished = PlaybackEvent::Finished {
            location: self.location.clone(),
        };

        self.watcher = Some(thread::spawn(move || loop {
            if sink.empty() {
                if !attachments.deliver_unless_stopped(&finished) {
                    debug!("Sink drained by stop, no finish reported");
                }
                return;
            }
            if attachments.is_stopped() {
                return;
            }
            thread::sleep(WATCH_INTERVAL);
        }));
    }
}

impl PlaybackHandle for RodioHandle {
    fn play(&mut self) -> Result<()> {
        if self.attachments.is_stopped() {
            return Err(PlaybackError::engine("handle already stopped"));
        }

        self.sink.play();
        if self.watcher.is_none() {
            self.spawn_watcher();
            self.attachments.deliver(&PlaybackEvent::Started {
                location: self.location.clone(),
            });
        } else {
            self.attachments.deliver(&PlaybackEvent::Resumed);
        }
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.sink.pause();
        self.attachments.deliver(&PlaybackEvent::Paused);
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        // Flag first: emptying the sink below must not read as a natural end
        self.attachments.mark_stopped();
        self.sink.stop();
        self.attachments.deliver(&PlaybackEvent::Stopped);

        if let Some(watcher) = self.watcher.take() {
            if watcher.join().is_err() {
                warn!(location = %self.location, "Sink watcher panicked");
            }
        }
        Ok(())
    }

    fn is_paused(&self) -> bool {
        self.sink.is_paused()
    }

    fn add_listener(&mut self, listener: Arc<dyn PlaybackListener>) {
        self.attachments.attach(listener);
    }

    fn remove_listener(&mut self, listener: &Arc<dyn PlaybackListener>) {
        self.attachments.detach(listener);
    }

    fn set_gain(&mut self, gain: f32) {
        self.sink.set_volume(gain);
    }
}

impl Drop for RodioHandle {
    fn drop(&mut self) {
        self.attachments.mark_stopped();
        self.sink.stop();
    }
}

/// Read a file's length from its decoder, `Duration::ZERO` when unknown
///
/// Many MP3 streams carry no length header; those show as `--:--`.
pub fn track_length(path: &Path) -> Duration {
    let decoded = File::open(path)
        .map_err(EngineError::from)
        .and_then(|file| Decoder::new(BufReader::new(file)).map_err(EngineError::from));

    match decoded {
        Ok(decoder) => decoder.total_duration().unwrap_or_default(),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Could not read track length");
            Duration::ZERO
        }
    }
}
