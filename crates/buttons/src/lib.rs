//! Debounced front-panel button monitor.
//!
//! This crate watches a small fixed set of physical buttons through an opaque
//! raw sample source, debounces the readings, and exposes two independent
//! consumption paths on top of the stable state.
//!
//! # Notions
//!
//! The API is designed around two notions: states (up / down) and events
//! (press / release). A button is *pressed* (press event) when its state
//! changes from up to down, and *released* (release event) when its state
//! changes from down to up.
//!
//! # Architecture
//!
//! ```text
//! RawSampler (capability trait)
//!         ↓ debounce (two identical reads, 10 ms apart)
//! ButtonMonitor
//!         ├─ query path   — state queries + audio click feedback
//!         ├─ event path   — edge waits with timeout and cancellation
//!         └─ dispatch tick — listener notification, externally driven
//! ```
//!
//! # Task safety
//!
//! All state-query methods ([`ButtonMonitor::query_state`],
//! [`ButtonMonitor::is_down`], [`ButtonMonitor::is_up`]) can be used from any
//! number of tasks concurrently, even while a `wait_for_*` call is active.
//! However, it is not safe to run `wait_for_*` operations in parallel from
//! different tasks — this includes waits on *different* buttons. A caller
//! that needs multi-consumer event fan-in should run one dedicated dispatch
//! task that waits for events and forwards them to anyone interested.
//!
//! # Features
//!
//! - `std`: Enable standard library support (host-side consumers)
//! - `defmt`: Enable defmt logging and `Format` derives (hardware builds)
//!
//! # Example
//!
//! ```no_run
//! use buttons::{ButtonId, ButtonMonitor, CancelToken, RawSampler, ToneGenerator};
//! use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
//!
//! async fn example<S: RawSampler, T: ToneGenerator>(
//!     monitor: &ButtonMonitor<CriticalSectionRawMutex, S, T>,
//! ) {
//!     let cancel = CancelToken::new();
//!     monitor.wait_for_press_and_release(ButtonId::Enter, &cancel).await;
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_op_in_unsafe_fn)]
#![allow(clippy::module_name_repetitions)]

pub mod button;
pub mod cancel;
pub mod click;
pub mod debounce;
pub mod listener;
pub mod mocks;
pub mod monitor;
pub mod sampler;

// Re-export the main surface so callers only need `buttons::...`.
pub use button::{ButtonId, ButtonSet, EventMask, BUTTON_COUNT};
pub use cancel::CancelToken;
pub use click::{ClickConfig, SettingsStore, ToneGenerator};
pub use listener::{ButtonListener, ListenerError, MAX_LISTENERS};
pub use monitor::{ButtonMonitor, POLL_INTERVAL};
pub use sampler::{RawFrame, RawSampler};
