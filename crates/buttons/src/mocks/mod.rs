//! Mock implementations of the external capabilities.
//!
//! These back the unit and integration tests; they are `no_std`-clean so the
//! crate builds identically with and without them exercised.

use core::sync::atomic::{AtomicI16, AtomicU16, AtomicUsize, Ordering};

use embassy_time::Instant;

use crate::button::{ButtonId, ButtonSet, BUTTON_COUNT};
use crate::click::{SettingsStore, ToneGenerator};
use crate::listener::ButtonListener;
use crate::sampler::{RawFrame, RawSampler};

/// Build the raw frame corresponding to a debounced state.
pub fn raw_frame(state: ButtonSet) -> RawFrame {
    let mut frame: RawFrame = [0; BUTTON_COUNT];
    for (i, slot) in frame.iter_mut().enumerate() {
        if state.bits() & (1 << i) != 0 {
            *slot = 1;
        }
    }
    frame
}

/// Raw sampler driven by a wall-clock script.
///
/// Each step names an offset (milliseconds since the sampler was created)
/// and the raw frame the hardware reports from that point on. Sampling picks
/// the latest step whose offset has elapsed, so a script is deterministic
/// without any coordinating task.
pub struct ScriptedSampler {
    start: Instant,
    steps: heapless::Vec<(u64, RawFrame), 32>,
}

impl ScriptedSampler {
    /// Create a sampler reporting `initial` from time zero.
    pub fn new(initial: ButtonSet) -> Self {
        let mut steps = heapless::Vec::new();
        let _ = steps.push((0, raw_frame(initial)));
        Self {
            start: Instant::now(),
            steps,
        }
    }

    /// Add a script step: from `at_ms` on, report `state`. Steps must be
    /// appended in ascending time order.
    #[must_use]
    pub fn at_ms(mut self, at_ms: u64, state: ButtonSet) -> Self {
        let _ = self.steps.push((at_ms, raw_frame(state)));
        self
    }
}

impl RawSampler for ScriptedSampler {
    fn sample_raw(&self) -> RawFrame {
        let elapsed = self.start.elapsed().as_millis();
        let mut current = [0; BUTTON_COUNT];
        for (at_ms, frame) in &self.steps {
            if *at_ms <= elapsed {
                current = *frame;
            }
        }
        current
    }
}

/// Tone generator that records its invocations.
pub struct RecordingTone {
    plays: AtomicUsize,
    last_frequency: AtomicU16,
    last_duration: AtomicU16,
    last_volume: AtomicI16,
}

impl RecordingTone {
    /// Create a tone generator with no plays recorded.
    pub const fn new() -> Self {
        Self {
            plays: AtomicUsize::new(0),
            last_frequency: AtomicU16::new(0),
            last_duration: AtomicU16::new(0),
            last_volume: AtomicI16::new(0),
        }
    }

    /// Number of tones played so far.
    pub fn plays(&self) -> usize {
        self.plays.load(Ordering::Relaxed)
    }

    /// Frequency of the most recent tone.
    pub fn last_frequency(&self) -> u16 {
        self.last_frequency.load(Ordering::Relaxed)
    }

    /// Duration of the most recent tone.
    pub fn last_duration(&self) -> u16 {
        self.last_duration.load(Ordering::Relaxed)
    }

    /// Volume of the most recent tone (negative = key-click class).
    pub fn last_volume(&self) -> i16 {
        self.last_volume.load(Ordering::Relaxed)
    }
}

impl Default for RecordingTone {
    fn default() -> Self {
        Self::new()
    }
}

impl ToneGenerator for RecordingTone {
    fn play_tone(&self, frequency_hz: u16, duration_ms: u16, volume: i16) {
        self.plays.fetch_add(1, Ordering::Relaxed);
        self.last_frequency.store(frequency_hz, Ordering::Relaxed);
        self.last_duration.store(duration_ms, Ordering::Relaxed);
        self.last_volume.store(volume, Ordering::Relaxed);
    }
}

/// Tone generator that discards everything.
pub struct NullTone;

impl ToneGenerator for NullTone {
    fn play_tone(&self, _frequency_hz: u16, _duration_ms: u16, _volume: i16) {}
}

/// Settings store over a static key/value slice.
pub struct MemorySettings {
    entries: &'static [(&'static str, i32)],
}

impl MemorySettings {
    /// A store with the given entries.
    pub const fn new(entries: &'static [(&'static str, i32)]) -> Self {
        Self { entries }
    }

    /// A store with no entries; every lookup yields its default.
    pub const fn empty() -> Self {
        Self { entries: &[] }
    }
}

impl SettingsStore for MemorySettings {
    fn get_int(&self, key: &str, default: i32) -> i32 {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map_or(default, |(_, v)| *v)
    }
}

/// Listener that counts its notifications.
pub struct CountingListener {
    presses: AtomicUsize,
    releases: AtomicUsize,
}

impl CountingListener {
    /// Create a listener with zeroed counters.
    pub const fn new() -> Self {
        Self {
            presses: AtomicUsize::new(0),
            releases: AtomicUsize::new(0),
        }
    }

    /// Press notifications received.
    pub fn presses(&self) -> usize {
        self.presses.load(Ordering::Relaxed)
    }

    /// Release notifications received.
    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::Relaxed)
    }
}

impl Default for CountingListener {
    fn default() -> Self {
        Self::new()
    }
}

impl ButtonListener for CountingListener {
    fn button_pressed(&self, _id: ButtonId) {
        self.presses.fetch_add(1, Ordering::Relaxed);
    }

    fn button_released(&self, _id: ButtonId) {
        self.releases.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_frame_round_trips_through_decode() {
        let state = ButtonSet::ENTER | ButtonSet::LEFT;
        assert_eq!(crate::sampler::decode(&raw_frame(state)), state);
    }

    #[test]
    fn memory_settings_falls_back_to_default() {
        let settings = MemorySettings::new(&[("keyclick/volume", 3)]);
        assert_eq!(settings.get_int("keyclick/volume", 20), 3);
        assert_eq!(settings.get_int("keyclick/length", 50), 50);
    }
}
