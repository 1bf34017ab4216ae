//! Button event listeners.

use heapless::Vec;

use crate::button::{ButtonId, BUTTON_COUNT};

/// Maximum number of listeners per button.
pub const MAX_LISTENERS: usize = 4;

/// Observer of press / release events for a single button.
///
/// Listeners are invoked from
/// [`ButtonMonitor::call_listeners`](crate::monitor::ButtonMonitor::call_listeners)
/// in registration order, on whichever task drives the dispatch tick.
pub trait ButtonListener: Sync {
    /// The button transitioned up → down.
    fn button_pressed(&self, id: ButtonId);
    /// The button transitioned down → up.
    fn button_released(&self, id: ButtonId);
}

/// Listener registration errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ListenerError {
    /// The button already has [`MAX_LISTENERS`] listeners registered.
    CapacityExceeded,
}

#[cfg(feature = "std")]
impl std::error::Error for ListenerError {}

impl core::fmt::Display for ListenerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::CapacityExceeded => write!(f, "listener capacity exceeded"),
        }
    }
}

pub(crate) type ListenerSlots = Vec<&'static dyn ButtonListener, MAX_LISTENERS>;

/// Per-button listener registrations. Append-only; listeners are never
/// removed.
pub(crate) struct ListenerTable {
    slots: [ListenerSlots; BUTTON_COUNT],
}

impl ListenerTable {
    pub(crate) const fn new() -> Self {
        Self {
            slots: [
                Vec::new(),
                Vec::new(),
                Vec::new(),
                Vec::new(),
                Vec::new(),
                Vec::new(),
            ],
        }
    }

    /// Append a listener, rejecting the registration once the bounded slot
    /// count is exhausted (rather than corrupting adjacent state).
    pub(crate) fn add(
        &mut self,
        id: ButtonId,
        listener: &'static dyn ButtonListener,
    ) -> Result<(), ListenerError> {
        self.slots[id.index()]
            .push(listener)
            .map_err(|_| ListenerError::CapacityExceeded)
    }

    /// Copy of the registration list, so listeners can be invoked outside
    /// the registry lock.
    pub(crate) fn snapshot(&self, id: ButtonId) -> ListenerSlots {
        self.slots[id.index()].clone()
    }
}
