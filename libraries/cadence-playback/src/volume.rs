//! Controller-level volume
//!
//! Level is 0-100%, mapped onto -60 dB..0 dB and handed to the engine as a
//! linear gain. The engine does the actual sample scaling.

/// Volume level with a mute flag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume {
    level: u8,
    muted: bool,
}

/// Lowest audible level maps to this attenuation
const FLOOR_DB: f32 = -60.0;

impl Volume {
    /// Create a new volume, clamping `level` to 100
    pub fn new(level: u8) -> Self {
        Self {
            level: level.min(100),
            muted: false,
        }
    }

    /// Set volume level (0-100)
    pub fn set_level(&mut self, level: u8) {
        self.level = level.min(100);
    }

    /// Current level (0-100), unaffected by mute
    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn mute(&mut self) {
        self.muted = true;
    }

    pub fn unmute(&mut self) {
        self.muted = false;
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Linear gain multiplier for the engine
    ///
    /// - 0% or muted → 0.0
    /// - 50%  → -30 dB → 0.0316
    /// - 80%  → -12 dB → 0.251
    /// - 100% →   0 dB → 1.0
    pub fn gain(&self) -> f32 {
        if self.muted || self.level == 0 {
            return 0.0;
        }

        let db = (100.0 - f32::from(self.level)) / 100.0 * FLOOR_DB;
        10.0_f32.powf(db / 20.0)
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(80)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_is_clamped() {
        let mut vol = Volume::new(150);
        assert_eq!(vol.level(), 100);

        vol.set_level(42);
        assert_eq!(vol.level(), 42);

        vol.set_level(u8::MAX);
        assert_eq!(vol.level(), 100);
    }

    #[test]
    fn mute_preserves_level() {
        let mut vol = Volume::new(80);
        vol.mute();
        assert!(vol.is_muted());
        assert_eq!(vol.level(), 80);
        assert_eq!(vol.gain(), 0.0);

        vol.toggle_mute();
        assert!(!vol.is_muted());
        assert!(vol.gain() > 0.0);
    }

    #[test]
    fn gain_follows_db_scale() {
        assert_eq!(Volume::new(0).gain(), 0.0);
        assert!((Volume::new(100).gain() - 1.0).abs() < 0.001);
        assert!((Volume::new(50).gain() - 0.0316).abs() < 0.001);
        assert!((Volume::new(80).gain() - 0.251).abs() < 0.01);
    }

    #[test]
    fn gain_is_monotonic() {
        let gains: Vec<f32> = (0..=100).map(|l| Volume::new(l).gain()).collect();
        assert!(gains.windows(2).all(|w| w[0] < w[1]));
    }
}
