//! Playback Events
//!
//! Engines report what a handle is doing by sending these to the listener
//! attached to it. The controller never emits events itself; it only decides
//! which handle the listener is attached to.

use serde::{Deserialize, Serialize};
use url::Url;

/// Events emitted by a playback engine handle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Playback of a freshly bound track began
    Started {
        /// Location the handle is bound to
        location: Url,
    },

    /// Playback paused mid-track
    Paused,

    /// Playback resumed after a pause
    Resumed,

    /// Handle was told to stop
    Stopped,

    /// Track reached its end naturally
    Finished {
        /// Location the finished handle was bound to
        location: Url,
    },
}

impl PlaybackEvent {
    /// Location of the handle that sent this, for events that carry one
    ///
    /// Events travel through queues; a consumer uses this to tell a late
    /// event from a released handle apart from one sent by the live handle.
    pub fn location(&self) -> Option<&Url> {
        match self {
            Self::Started { location } | Self::Finished { location } => Some(location),
            Self::Paused | Self::Resumed | Self::Stopped => None,
        }
    }
}

/// Receiver of engine-originated events
///
/// Listener identity is the `Arc` allocation it lives in: a handle that is
/// asked to remove a listener compares pointers, not values.
pub trait PlaybackListener: Send + Sync {
    /// Called by the engine, possibly from its own thread
    fn on_event(&self, event: &PlaybackEvent);
}

/// Pointer identity for shared listeners
pub fn same_listener(
    a: &std::sync::Arc<dyn PlaybackListener>,
    b: &std::sync::Arc<dyn PlaybackListener>,
) -> bool {
    std::ptr::eq(
        std::sync::Arc::as_ptr(a).cast::<()>(),
        std::sync::Arc::as_ptr(b).cast::<()>(),
    )
}
