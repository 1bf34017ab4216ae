//! Button identities and mask types.

use bitflags::bitflags;

/// Number of physical buttons on the front panel.
pub const BUTTON_COUNT: usize = 6;

/// Bit offset of the released half within an [`EventMask`].
pub(crate) const RELEASE_SHIFT: u16 = 8;

/// Physical front-panel buttons (directly maps to hardware).
///
/// Each button owns exactly one bit of a [`ButtonSet`]; combined sets with
/// several bits represent chord presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonId {
    /// The Up button.
    Up,
    /// The Enter button.
    Enter,
    /// The Down button.
    Down,
    /// The Right button.
    Right,
    /// The Left button.
    Left,
    /// The Escape button.
    Escape,
}

impl ButtonId {
    /// All buttons, in raw-frame slot order.
    pub const ALL: [ButtonId; BUTTON_COUNT] = [
        ButtonId::Up,
        ButtonId::Enter,
        ButtonId::Down,
        ButtonId::Right,
        ButtonId::Left,
        ButtonId::Escape,
    ];

    /// The single-bit mask owned by this button.
    pub const fn mask(self) -> ButtonSet {
        match self {
            ButtonId::Up => ButtonSet::UP,
            ButtonId::Enter => ButtonSet::ENTER,
            ButtonId::Down => ButtonSet::DOWN,
            ButtonId::Right => ButtonSet::RIGHT,
            ButtonId::Left => ButtonSet::LEFT,
            ButtonId::Escape => ButtonSet::ESCAPE,
        }
    }

    /// Raw-frame slot index (also the bit position in a [`ButtonSet`]).
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

bitflags! {
    /// Debounced button state: bit set ⇔ button currently down.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ButtonSet: u8 {
        /// The Up button.
        const UP = 0x01;
        /// The Enter button.
        const ENTER = 0x02;
        /// The Down button.
        const DOWN = 0x04;
        /// The Right button.
        const RIGHT = 0x08;
        /// The Left button.
        const LEFT = 0x10;
        /// The Escape button.
        const ESCAPE = 0x20;
        /// Every button; equals the bitwise OR of all single-button masks.
        const ALL = 0x3f;
    }
}

impl ButtonSet {
    /// Check whether a specific button is down in this set.
    pub const fn is_down(self, id: ButtonId) -> bool {
        self.bits() & id.mask().bits() != 0
    }
}

/// A set of press and release edges observed between two stable samples.
///
/// The lower eight bits indicate which buttons have been pressed; bits 8 to
/// 15 indicate which buttons have been released. [`EventMask::EMPTY`] is the
/// timeout / cancellation sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EventMask(u16);

impl EventMask {
    /// No edges; returned on timeout or cancellation.
    pub const EMPTY: EventMask = EventMask(0);

    /// Edges observed going from `old` to `new` stable state.
    pub const fn between(old: ButtonSet, new: ButtonSet) -> EventMask {
        let pressed = new.bits() & !old.bits();
        let released = old.bits() & !new.bits();
        EventMask(((released as u16) << RELEASE_SHIFT) | pressed as u16)
    }

    /// An event mask carrying only press edges for `set`.
    pub const fn presses(set: ButtonSet) -> EventMask {
        EventMask(set.bits() as u16)
    }

    /// An event mask carrying only release edges for `set`.
    pub const fn releases(set: ButtonSet) -> EventMask {
        EventMask((set.bits() as u16) << RELEASE_SHIFT)
    }

    /// Buttons that transitioned up → down.
    pub const fn pressed(self) -> ButtonSet {
        ButtonSet::from_bits_truncate(self.0 as u8)
    }

    /// Buttons that transitioned down → up.
    pub const fn released(self) -> ButtonSet {
        ButtonSet::from_bits_truncate((self.0 >> RELEASE_SHIFT) as u8)
    }

    /// `true` if no edge is recorded (the timeout/cancel sentinel).
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Raw wire representation: released half shifted above the pressed half.
    pub const fn bits(self) -> u16 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_bits_are_mutually_exclusive() {
        for a in ButtonId::ALL {
            for b in ButtonId::ALL {
                if a != b {
                    assert!(
                        (a.mask() & b.mask()).is_empty(),
                        "{a:?} and {b:?} share a bit"
                    );
                }
            }
        }
    }

    #[test]
    fn all_mask_is_union_of_button_bits() {
        let mut union = ButtonSet::empty();
        for id in ButtonId::ALL {
            union |= id.mask();
        }
        assert_eq!(union, ButtonSet::ALL);
    }

    #[test]
    fn between_splits_edges_into_halves() {
        // ENTER held in both; ESCAPE released; UP pressed.
        let old = ButtonSet::ENTER | ButtonSet::ESCAPE;
        let new = ButtonSet::ENTER | ButtonSet::UP;
        let ev = EventMask::between(old, new);
        assert_eq!(ev.pressed(), ButtonSet::UP);
        assert_eq!(ev.released(), ButtonSet::ESCAPE);
        assert!(!ev.is_empty());
    }

    #[test]
    fn between_identical_states_is_the_sentinel() {
        let state = ButtonSet::LEFT | ButtonSet::RIGHT;
        assert_eq!(EventMask::between(state, state), EventMask::EMPTY);
    }

    #[test]
    fn release_half_sits_above_press_half() {
        let ev = EventMask::releases(ButtonSet::ENTER);
        assert_eq!(ev.bits(), (ButtonSet::ENTER.bits() as u16) << 8);
        assert_eq!(EventMask::presses(ButtonSet::ENTER).bits(), 0x02);
    }
}
