//! Playlist with a position cursor
//!
//! Tracks keep their insertion order. Shuffle and repeat only change how the
//! cursor moves:
//!
//! ```text
//! repeat off:  [T1] T2  T3   retreat → stays on T1
//!               T1  T2 [T3]  advance → stays on T3
//! repeat on:   [T1] T2  T3   retreat → T3
//!               T1  T2 [T3]  advance → T1
//! shuffle on:  cursor walks a permutation that starts at the track that
//!              was current when shuffle was switched on
//! ```

use crate::error::{PlaybackError, Result};
use crate::shuffle::{insertion_slot, shuffled_order};
use crate::types::TrackDescriptor;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// What the controller needs from a playlist
///
/// `Playlist` is the implementation shipped here; the controller is generic
/// over this trait so navigation can be observed in tests.
#[cfg_attr(test, mockall::automock)]
pub trait Navigation {
    /// Track under the cursor
    fn current(&self) -> Result<TrackDescriptor>;

    /// Move one logical step forward
    fn advance(&mut self);

    /// Move one logical step backward
    fn retreat(&mut self);

    fn toggle_shuffle(&mut self);

    fn toggle_repeat(&mut self);

    /// Append a track; an empty playlist puts its cursor on it
    fn add(&mut self, track: TrackDescriptor);

    fn is_shuffle(&self) -> bool;

    fn is_repeat(&self) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Ordered tracks plus a cursor
#[derive(Debug, Clone)]
pub struct Playlist {
    items: Vec<TrackDescriptor>,

    /// Index into `items`; valid whenever `items` is non-empty
    position: usize,

    shuffle: bool,
    repeat: bool,

    /// Traversal permutation, populated only while shuffled
    order: Vec<usize>,

    rng: StdRng,
}

impl Playlist {
    /// Create an empty playlist
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create an empty playlist with a reproducible shuffle order
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            items: Vec::new(),
            position: 0,
            shuffle: false,
            repeat: false,
            order: Vec::new(),
            rng,
        }
    }

    /// Create a playlist pre-populated with `tracks`
    pub fn from_tracks(tracks: impl IntoIterator<Item = TrackDescriptor>) -> Self {
        let mut playlist = Self::new();
        playlist.extend(tracks);
        playlist
    }

    /// Track under the cursor, if any
    pub fn current_track(&self) -> Option<&TrackDescriptor> {
        self.items.get(self.position)
    }

    /// Cursor position, `None` when empty
    pub fn position(&self) -> Option<usize> {
        (!self.items.is_empty()).then_some(self.position)
    }

    /// All tracks in insertion order
    pub fn tracks(&self) -> &[TrackDescriptor] {
        &self.items
    }

    /// Whether `advance` would move the cursor
    pub fn has_next(&self) -> bool {
        self.neighbour(true).is_some()
    }

    /// Whether `retreat` would move the cursor
    pub fn has_previous(&self) -> bool {
        self.neighbour(false).is_some()
    }

    /// Slot of the cursor within the shuffle order
    fn current_slot(&self) -> usize {
        self.order
            .iter()
            .position(|&index| index == self.position)
            .unwrap_or(0)
    }

    /// Index the cursor would move to, `None` at a clamped boundary
    fn neighbour(&self, forward: bool) -> Option<usize> {
        let len = self.items.len();
        if len == 0 {
            return None;
        }

        if self.shuffle {
            step(self.current_slot(), len, forward, self.repeat).map(|slot| self.order[slot])
        } else {
            step(self.position, len, forward, self.repeat)
        }
    }
}

/// One step within `0..len`, wrapping or clamping at the ends
fn step(index: usize, len: usize, forward: bool, wrap: bool) -> Option<usize> {
    if forward {
        if index + 1 < len {
            Some(index + 1)
        } else if wrap {
            Some(0)
        } else {
            None
        }
    } else if index > 0 {
        Some(index - 1)
    } else if wrap {
        Some(len - 1)
    } else {
        None
    }
}

impl Navigation for Playlist {
    fn current(&self) -> Result<TrackDescriptor> {
        self.current_track()
            .cloned()
            .ok_or(PlaybackError::EmptyPlaylist)
    }

    fn advance(&mut self) {
        if let Some(next) = self.neighbour(true) {
            self.position = next;
        }
    }

    fn retreat(&mut self) {
        if let Some(previous) = self.neighbour(false) {
            self.position = previous;
        }
    }

    fn toggle_shuffle(&mut self) {
        self.shuffle = !self.shuffle;
        self.order = if self.shuffle {
            shuffled_order(self.items.len(), self.position, &mut self.rng)
        } else {
            Vec::new()
        };
    }

    fn toggle_repeat(&mut self) {
        self.repeat = !self.repeat;
    }

    fn add(&mut self, track: TrackDescriptor) {
        let index = self.items.len();
        self.items.push(track);

        if index == 0 {
            self.position = 0;
        }

        if self.shuffle {
            if self.order.is_empty() {
                self.order.push(index);
            } else {
                let slot = insertion_slot(self.order.len(), self.current_slot(), &mut self.rng);
                self.order.insert(slot, index);
            }
        }
    }

    fn is_shuffle(&self) -> bool {
        self.shuffle
    }

    fn is_repeat(&self) -> bool {
        self.repeat
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

impl Default for Playlist {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<TrackDescriptor> for Playlist {
    fn extend<I: IntoIterator<Item = TrackDescriptor>>(&mut self, iter: I) {
        for track in iter {
            self.add(track);
        }
    }
}

impl FromIterator<TrackDescriptor> for Playlist {
    fn from_iter<I: IntoIterator<Item = TrackDescriptor>>(iter: I) -> Self {
        Self::from_tracks(iter)
    }
}
