//! Property tests for the edge-mask arithmetic.

use buttons::{ButtonSet, EventMask};
use proptest::prelude::*;

proptest! {
    /// `between` recovers exactly the set and cleared bits, in disjoint
    /// halves, and is the zero sentinel iff nothing changed.
    #[test]
    fn between_recovers_edges(old_bits in 0u8..0x40, new_bits in 0u8..0x40) {
        let old = ButtonSet::from_bits_truncate(old_bits);
        let new = ButtonSet::from_bits_truncate(new_bits);
        let ev = EventMask::between(old, new);

        prop_assert_eq!(ev.pressed().bits(), new_bits & !old_bits);
        prop_assert_eq!(ev.released().bits(), old_bits & !new_bits);
        prop_assert!((ev.pressed() & ev.released()).is_empty());
        prop_assert_eq!(ev.is_empty(), old == new);
    }

    /// Press-only and release-only masks occupy disjoint halves of the wire
    /// word and round-trip through their accessors.
    #[test]
    fn press_and_release_halves_are_disjoint(bits in 0u8..0x40) {
        let set = ButtonSet::from_bits_truncate(bits);

        prop_assert_eq!(EventMask::presses(set).pressed(), set);
        prop_assert_eq!(EventMask::presses(set).released(), ButtonSet::empty());
        prop_assert_eq!(EventMask::releases(set).released(), set);
        prop_assert_eq!(EventMask::releases(set).pressed(), ButtonSet::empty());
    }

    /// The wire layout keeps releases exactly eight bits above presses.
    #[test]
    fn wire_layout_is_stable(bits in 0u8..0x40) {
        let set = ButtonSet::from_bits_truncate(bits);

        prop_assert_eq!(EventMask::presses(set).bits(), u16::from(bits));
        prop_assert_eq!(EventMask::releases(set).bits(), u16::from(bits) << 8);
    }
}
