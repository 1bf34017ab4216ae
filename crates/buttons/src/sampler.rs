//! Raw sample source abstraction.

use crate::button::{ButtonSet, BUTTON_COUNT};

/// Instantaneous raw per-button electrical state, one byte per button slot.
///
/// The only format contract is "nonzero byte ⇒ button down"; the monitor
/// never interprets the byte value itself.
pub type RawFrame = [u8; BUTTON_COUNT];

/// Raw sample source capability.
///
/// Implementations read the instantaneous (possibly bouncing) state of all
/// buttons, typically from a memory-mapped device region. Reads must be safe
/// to perform concurrently from several tasks; they carry no side effects.
///
/// A sampler that cannot reach its device should fail when *constructed* by
/// the embedder — the monitor treats an installed sampler as always readable
/// and never retries per-read.
pub trait RawSampler: Sync {
    /// Read the current raw frame.
    fn sample_raw(&self) -> RawFrame;
}

impl<S: RawSampler + ?Sized> RawSampler for &S {
    fn sample_raw(&self) -> RawFrame {
        (**self).sample_raw()
    }
}

/// Fold a raw frame into a bit set: slot *i* nonzero ⇒ bit *i* set.
pub(crate) fn decode(frame: &RawFrame) -> ButtonSet {
    let mut bits = 0u8;
    for (i, slot) in frame.iter().enumerate() {
        if *slot != 0 {
            bits |= 1 << i;
        }
    }
    ButtonSet::from_bits_truncate(bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::button::ButtonId;

    #[test]
    fn decode_maps_slots_to_bits() {
        let mut frame: RawFrame = [0; BUTTON_COUNT];
        frame[ButtonId::Enter.index()] = 1;
        frame[ButtonId::Escape.index()] = 0xff; // any nonzero value counts
        assert_eq!(decode(&frame), ButtonSet::ENTER | ButtonSet::ESCAPE);
    }

    #[test]
    fn decode_empty_frame_is_empty_set() {
        assert_eq!(decode(&[0; BUTTON_COUNT]), ButtonSet::empty());
    }
}
