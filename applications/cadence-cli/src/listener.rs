//! Listener that logs engine events and hands them to the command loop

use crate::session::Input;
use cadence_playback::{PlaybackEvent, PlaybackListener};
use std::sync::mpsc::Sender;
use tracing::{debug, info};

/// Forwards every event to the main loop over a channel
///
/// Events arrive on the engine's watcher thread; the controller is only ever
/// touched from the thread that drains the channel.
pub struct ChannelListener {
    sender: Sender<Input>,
}

impl ChannelListener {
    pub fn new(sender: Sender<Input>) -> Self {
        Self { sender }
    }
}

impl PlaybackListener for ChannelListener {
    fn on_event(&self, event: &PlaybackEvent) {
        match event {
            PlaybackEvent::Started { location } => info!(%location, "Playback started"),
            PlaybackEvent::Finished { location } => info!(%location, "Track finished"),
            other => debug!(event = ?other, "Playback event"),
        }

        if self.sender.send(Input::Event(event.clone())).is_err() {
            debug!("Command loop has exited, dropping event");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn forwards_events_in_order() {
        let (tx, rx) = mpsc::channel();
        let listener = ChannelListener::new(tx);

        listener.on_event(&PlaybackEvent::Paused);
        listener.on_event(&PlaybackEvent::Resumed);

        assert!(matches!(rx.recv().unwrap(), Input::Event(PlaybackEvent::Paused)));
        assert!(matches!(rx.recv().unwrap(), Input::Event(PlaybackEvent::Resumed)));
    }

    #[test]
    fn closed_channel_is_not_fatal() {
        let (tx, rx) = mpsc::channel();
        drop(rx);

        ChannelListener::new(tx).on_event(&PlaybackEvent::Stopped);
    }
}
