//! Key-click feedback configuration and external capabilities.

/// Persisted setting name for the key-click volume.
pub const VOL_SETTING: &str = "keyclick/volume";
/// Persisted setting name for the key-click length.
pub const LEN_SETTING: &str = "keyclick/length";
/// Persisted setting name for the key-click frequency.
pub const FREQ_SETTING: &str = "keyclick/frequency";

/// Default key-click volume.
pub const DEFAULT_VOLUME: u8 = 20;
/// Default key-click length in milliseconds.
pub const DEFAULT_LENGTH_MS: u16 = 50;
/// Default key-click frequency in hertz.
pub const DEFAULT_FREQUENCY_HZ: u16 = 1000;

/// Tone generator capability.
///
/// Fire-and-forget: failures are not reported back and must not be
/// propagated into the button paths.
pub trait ToneGenerator: Sync {
    /// Play a tone. A negative `volume` selects the generator's key-click
    /// tone class; the click path always passes the volume negated.
    fn play_tone(&self, frequency_hz: u16, duration_ms: u16, volume: i16);
}

impl<T: ToneGenerator + ?Sized> ToneGenerator for &T {
    fn play_tone(&self, frequency_hz: u16, duration_ms: u16, volume: i16) {
        (**self).play_tone(frequency_hz, duration_ms, volume);
    }
}

/// Persisted settings capability, read at startup and on demand.
pub trait SettingsStore {
    /// Look up an integer setting, falling back to `default` when the key is
    /// absent or unparsable.
    fn get_int(&self, key: &str, default: i32) -> i32;
}

/// Key-click parameters.
///
/// Lives inside the query-path lock of the monitor together with the query
/// cursor, so click triggering is serialized with state queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClickConfig {
    /// Click volume; 0 disables the click.
    pub volume: u8,
    /// Click duration in milliseconds.
    pub length_ms: u16,
    /// Click frequency in hertz; 0 disables the click.
    pub frequency_hz: u16,
}

impl ClickConfig {
    /// Read the three key-click settings, applying defaults for missing keys.
    pub fn load(settings: &dyn SettingsStore) -> Self {
        Self {
            volume: clamp_u8(settings.get_int(VOL_SETTING, i32::from(DEFAULT_VOLUME))),
            length_ms: clamp_u16(settings.get_int(LEN_SETTING, i32::from(DEFAULT_LENGTH_MS))),
            frequency_hz: clamp_u16(settings.get_int(
                FREQ_SETTING,
                i32::from(DEFAULT_FREQUENCY_HZ),
            )),
        }
    }

    /// Fire the key click, if enabled.
    ///
    /// Volume 0 disables the click; frequency 0 likewise suppresses it
    /// (explicit policy, matching the persisted-settings convention where a
    /// zero frequency mutes a key).
    pub(crate) fn trigger<T: ToneGenerator + ?Sized>(&self, tone: &T) {
        if self.volume == 0 || self.frequency_hz == 0 {
            return;
        }
        tone.play_tone(self.frequency_hz, self.length_ms, -i16::from(self.volume));
    }
}

impl Default for ClickConfig {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
            length_ms: DEFAULT_LENGTH_MS,
            frequency_hz: DEFAULT_FREQUENCY_HZ,
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_u8(value: i32) -> u8 {
    value.clamp(0, i32::from(u8::MAX)) as u8
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_u16(value: i32) -> u16 {
    value.clamp(0, i32::from(u16::MAX)) as u16
}
