//! Debounced sampling.
//!
//! A hardware transition is trusted only once two consecutive raw reads,
//! separated by [`DEBOUNCE_INTERVAL`], agree.

use embassy_time::{Duration, Timer};

use crate::button::ButtonSet;
use crate::sampler::{decode, RawSampler};

/// Settle interval between the two raw reads of a debounced sample.
pub const DEBOUNCE_INTERVAL: Duration = Duration::from_millis(10);

/// Read the raw source until two consecutive reads agree, then return the
/// agreed state.
///
/// This may block arbitrarily long on mechanically noisy input — callers
/// needing bounded latency must treat it as the blocking primitive it is.
/// It is not a cancellation point; cancellation applies at the poll-sleep
/// boundaries of the wait operations only.
pub async fn stable_sample<S: RawSampler + ?Sized>(sampler: &S) -> ButtonSet {
    let mut s1 = decode(&sampler.sample_raw());
    loop {
        Timer::after(DEBOUNCE_INTERVAL).await;
        let s2 = decode(&sampler.sample_raw());
        if s1 == s2 {
            return s1;
        }
        s1 = s2;
    }
}
