//! The button monitor: query path, event path, listener dispatch.
//!
//! # Consumption paths
//!
//! The monitor keeps two independent last-observed cursors:
//!
//! | Path  | Cursor            | Protection        | Side effects        |
//! |-------|-------------------|-------------------|---------------------|
//! | query | `QueryState`      | async mutex       | key click on press  |
//! | event | `AtomicU8`        | none (by design)  | none                |
//!
//! The query cursor shares its mutex with the click configuration, so state
//! queries, configuration changes and click triggering are serialized. The
//! event cursor is deliberately unguarded: exactly one task may be inside any
//! `wait_for_*` operation at a time (see the crate docs). Concurrent waiters
//! race on the cursor and may both observe or both miss a transition — that
//! is the documented contract, not a bug.

use core::cell::RefCell;
use core::sync::atomic::{AtomicU8, Ordering};

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex as BlockingMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::{Duration, Instant, Timer};

use crate::button::{ButtonId, ButtonSet, EventMask};
use crate::cancel::CancelToken;
use crate::click::{ClickConfig, SettingsStore, ToneGenerator};
use crate::debounce::stable_sample;
use crate::listener::{ButtonListener, ListenerError, ListenerTable};
use crate::sampler::RawSampler;

/// Delay between successive debounced reads while blocked in a wait
/// operation. Bounds wait responsiveness to one poll interval.
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Query-path state, all behind one lock: the last state observed by the
/// query path and the key-click parameters it fires with.
struct QueryState {
    cursor: ButtonSet,
    click: ClickConfig,
}

/// Debounced monitor for the front-panel buttons.
///
/// Generic over the raw mutex flavor `M` (`CriticalSectionRawMutex` on
/// hardware, with the `critical-section/std` implementation in host tests),
/// the raw sample source `S` and the tone generator `T`.
pub struct ButtonMonitor<M: RawMutex, S, T> {
    sampler: S,
    tone: T,
    query: Mutex<M, QueryState>,
    /// Event-path cursor. Not lock-protected; single-waiter contract.
    event_cursor: AtomicU8,
    listeners: BlockingMutex<M, RefCell<ListenerTable>>,
}

impl<M, S, T> ButtonMonitor<M, S, T>
where
    M: RawMutex,
    S: RawSampler,
    T: ToneGenerator,
{
    /// Build a monitor around an already-working sampler and tone generator,
    /// loading the key-click settings from `settings`.
    ///
    /// Both cursors are initialized from the current debounced hardware
    /// state, so buttons already held at startup do not produce a spurious
    /// press event.
    pub async fn new(sampler: S, tone: T, settings: &dyn SettingsStore) -> Self {
        let click = ClickConfig::load(settings);
        let initial = stable_sample(&sampler).await;
        Self {
            sampler,
            tone,
            query: Mutex::new(QueryState {
                cursor: initial,
                click,
            }),
            event_cursor: AtomicU8::new(initial.bits()),
            listeners: BlockingMutex::new(RefCell::new(ListenerTable::new())),
        }
    }

    // ── Query path ──────────────────────────────────────────────────────────

    /// Read the current debounced button state.
    ///
    /// Press edges seen by this path fire the key click. Safe to call from
    /// any number of tasks; calls are serialized by the query lock.
    pub async fn query_state(&self) -> ButtonSet {
        let mut query = self.query.lock().await;
        let new = stable_sample(&self.sampler).await;
        let pressed = new.difference(query.cursor);
        query.cursor = new;
        if !pressed.is_empty() {
            #[cfg(feature = "defmt")]
            defmt::trace!("press edge {=u8}, key click", pressed.bits());
            query.click.trigger(&self.tone);
        }
        new
    }

    /// Check if the current state of the button is down.
    pub async fn is_down(&self, id: ButtonId) -> bool {
        self.query_state().await.is_down(id)
    }

    /// Check if the current state of the button is up.
    pub async fn is_up(&self, id: ButtonId) -> bool {
        !self.query_state().await.is_down(id)
    }

    // ── Event path ──────────────────────────────────────────────────────────

    /// Discard any pending transitions on the event path.
    ///
    /// Resets the event cursor to the current debounced state without side
    /// effects — in contrast to [`Self::query_state`], this never clicks.
    /// Call before a wait to flush stale transitions.
    pub async fn discard_events(&self) {
        let new = stable_sample(&self.sampler).await;
        self.event_cursor.store(new.bits(), Ordering::Relaxed);
    }

    /// Wait for any button to be pressed or released.
    ///
    /// Returns the observed edges, or [`EventMask::EMPTY`] once `timeout`
    /// elapses (`None` waits unboundedly) or `cancel` fires.
    ///
    /// Single-waiter contract: see the crate docs.
    pub async fn wait_for_any_event(
        &self,
        timeout: Option<Duration>,
        cancel: &CancelToken,
    ) -> EventMask {
        let deadline = timeout.map(|t| Instant::now() + t);
        let old = self.event_state();
        loop {
            if deadline.is_some_and(|d| Instant::now() >= d) {
                return EventMask::EMPTY;
            }
            Timer::after(POLL_INTERVAL).await;
            if cancel.is_cancelled() {
                return EventMask::EMPTY;
            }
            let new = stable_sample(&self.sampler).await;
            self.event_cursor.store(new.bits(), Ordering::Relaxed);
            if new != old {
                return EventMask::between(old, new);
            }
        }
    }

    /// Wait for any button to be pressed.
    ///
    /// Returns the newly-pressed buttons, or the empty set on timeout or
    /// cancellation. A button already down must be released and pressed
    /// again; a pure release is not a stopping condition — it only advances
    /// the baseline.
    pub async fn wait_for_any_press(
        &self,
        timeout: Option<Duration>,
        cancel: &CancelToken,
    ) -> ButtonSet {
        let deadline = timeout.map(|t| Instant::now() + t);
        let mut old = self.event_state();
        loop {
            if deadline.is_some_and(|d| Instant::now() >= d) {
                return ButtonSet::empty();
            }
            Timer::after(POLL_INTERVAL).await;
            if cancel.is_cancelled() {
                return ButtonSet::empty();
            }
            let new = stable_sample(&self.sampler).await;
            self.event_cursor.store(new.bits(), Ordering::Relaxed);
            let pressed = new.difference(old);
            if !pressed.is_empty() {
                return pressed;
            }
            old = new;
        }
    }

    /// Wait until `id` is pressed (or the wait is cancelled).
    pub async fn wait_for_press(&self, id: ButtonId, cancel: &CancelToken) {
        loop {
            let pressed = self.wait_for_any_press(None, cancel).await;
            if pressed.is_down(id) || cancel.is_cancelled() {
                return;
            }
        }
    }

    /// Wait until `id` is pressed and then released again (or the wait is
    /// cancelled).
    pub async fn wait_for_press_and_release(&self, id: ButtonId, cancel: &CancelToken) {
        self.wait_for_press(id, cancel).await;
        loop {
            if cancel.is_cancelled() {
                return;
            }
            let events = self.wait_for_any_event(None, cancel).await;
            if events.released().is_down(id) {
                return;
            }
        }
    }

    // ── Listener dispatch ───────────────────────────────────────────────────

    /// Register a listener for `id`. Each button serves at most
    /// [`crate::MAX_LISTENERS`] listeners; registration is append-only.
    pub fn add_listener(
        &self,
        id: ButtonId,
        listener: &'static dyn ButtonListener,
    ) -> Result<(), ListenerError> {
        self.listeners
            .lock(|table| table.borrow_mut().add(id, listener))
    }

    /// Dispatch tick: notify the listeners of `id` about its current
    /// direction.
    ///
    /// Invoked by an external scheduler once it determines the button is
    /// relevant; the monitor never spawns a notification task of its own.
    /// Computes the direction through the query path, then invokes the press
    /// or release notification on every registered listener in registration
    /// order. Returns the filter for the next event of interest: a release
    /// mask if the button is currently down, a press mask otherwise.
    pub async fn call_listeners(&self, id: ButtonId) -> EventMask {
        let pressed = self.query_state().await.is_down(id);
        // Snapshot under the lock, invoke outside it, so listeners may
        // themselves register further listeners.
        let snapshot = self.listeners.lock(|table| table.borrow().snapshot(id));
        #[cfg(feature = "defmt")]
        defmt::debug!(
            "dispatch {=u8}: pressed={=bool}, {=usize} listeners",
            id.mask().bits(),
            pressed,
            snapshot.len()
        );
        for listener in &snapshot {
            if pressed {
                listener.button_pressed(id);
            } else {
                listener.button_released(id);
            }
        }
        if pressed {
            EventMask::releases(id.mask())
        } else {
            EventMask::presses(id.mask())
        }
    }

    // ── Click configuration ─────────────────────────────────────────────────

    /// Re-read the key-click settings from the persisted store.
    pub async fn reload_settings(&self, settings: &dyn SettingsStore) {
        self.query.lock().await.click = ClickConfig::load(settings);
    }

    /// Current key-click volume.
    pub async fn click_volume(&self) -> u8 {
        self.query.lock().await.click.volume
    }

    /// Set the key-click volume. 0 disables the click.
    pub async fn set_click_volume(&self, volume: u8) {
        self.query.lock().await.click.volume = volume;
    }

    /// Current key-click length in milliseconds.
    pub async fn click_length(&self) -> u16 {
        self.query.lock().await.click.length_ms
    }

    /// Set the key-click length in milliseconds.
    pub async fn set_click_length(&self, length_ms: u16) {
        self.query.lock().await.click.length_ms = length_ms;
    }

    /// Current key-click frequency in hertz.
    pub async fn click_frequency(&self) -> u16 {
        self.query.lock().await.click.frequency_hz
    }

    /// Set the key-click frequency. 0 disables the click.
    pub async fn set_click_frequency(&self, frequency_hz: u16) {
        self.query.lock().await.click.frequency_hz = frequency_hz;
    }

    fn event_state(&self) -> ButtonSet {
        ButtonSet::from_bits_truncate(self.event_cursor.load(Ordering::Relaxed))
    }
}
