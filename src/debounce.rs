// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-device command debouncing.
//!
//! Rapid repeated intents for the same device collapse into a single
//! executed action: trailing-edge debounce with one execution per quiet
//! period, per device key. Intents for different devices are independent
//! and never block each other.
//!
//! The debouncer also owns the in-flight bookkeeping: a device counts as
//! in flight from the moment its first intent is registered until the
//! eventually-invoked action settles, so a burst of taps shows one
//! continuous busy period rather than several.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::types::DeviceId;

/// A scheduled, not-yet-invoked action.
#[derive(Debug)]
struct Timer {
    /// Identifies which dispatch this timer belongs to. A timer only
    /// fires if its generation is still the current registry entry;
    /// a superseded timer that wakes anyway exits without running.
    generation: u64,
    handle: JoinHandle<()>,
}

#[derive(Debug, Default)]
struct DebounceState {
    /// Scheduled-call handle per device key (deterministic replacement).
    timers: HashMap<DeviceId, Timer>,
    /// Outstanding intents per device. Exposed as a boolean: a device is
    /// in flight while its count is non-zero. A counter rather than a
    /// flag, so an intent arriving while a previous action is still
    /// executing keeps the busy state continuous across both.
    outstanding: HashMap<DeviceId, usize>,
    next_generation: u64,
}

/// Trailing-edge, per-key debouncer.
///
/// [`dispatch`](Self::dispatch) schedules an action to run after the
/// quiet window elapses. Another dispatch for the same key within the
/// window discards the scheduled action (it is never started) and
/// restarts the window with the latest action.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use homelink_lib::debounce::Debouncer;
/// use homelink_lib::types::DeviceId;
///
/// # async fn example() {
/// let debouncer = Debouncer::new();
/// let id = DeviceId::new(1);
///
/// // Only the last of these runs, once the window has been quiet.
/// debouncer.dispatch(id, || async { /* toggle */ });
/// debouncer.dispatch(id, || async { /* toggle */ });
///
/// assert!(debouncer.in_flight(id));
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    state: Arc<Mutex<DebounceState>>,
}

impl Debouncer {
    /// The default quiet window.
    pub const DEFAULT_WINDOW: Duration = Duration::from_millis(1000);

    /// Creates a debouncer with the default window.
    #[must_use]
    pub fn new() -> Self {
        Self::with_window(Self::DEFAULT_WINDOW)
    }

    /// Creates a debouncer with a custom quiet window.
    #[must_use]
    pub fn with_window(window: Duration) -> Self {
        Self {
            window,
            state: Arc::new(Mutex::new(DebounceState::default())),
        }
    }

    /// Returns the quiet window.
    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Returns `true` while the key has an intent pending or executing.
    ///
    /// Goes true the moment an intent is first registered, before the
    /// window elapses, and back to false only when the corresponding
    /// action settles.
    #[must_use]
    pub fn in_flight(&self, id: DeviceId) -> bool {
        self.state
            .lock()
            .outstanding
            .get(&id)
            .is_some_and(|count| *count > 0)
    }

    /// Registers an intent for `id`, scheduling `action` to run after
    /// the quiet window.
    ///
    /// If an action for the same key is already scheduled (still within
    /// its window), it is discarded and the window restarts; only the
    /// most recently dispatched action is eventually invoked. Must be
    /// called from within a tokio runtime.
    pub fn dispatch<F, Fut>(&self, id: DeviceId, action: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let window = self.window;
        let state = Arc::clone(&self.state);

        let mut guard = self.state.lock();
        let generation = guard.next_generation;
        guard.next_generation += 1;

        if let Some(previous) = guard.timers.remove(&id) {
            // Supersede the scheduled call: it never runs, and the intent
            // it carried stays accounted for by the existing count.
            previous.handle.abort();
            tracing::debug!(%id, "Debounce window restarted");
        } else {
            *guard.outstanding.entry(id).or_insert(0) += 1;
            tracing::debug!(%id, "Intent registered");
        }

        let handle = tokio::spawn(async move {
            tokio::time::sleep(window).await;

            // Claim the registry slot before running. If a later dispatch
            // has replaced this timer, the generation check fails and this
            // task exits without invoking anything; the replacement owns
            // the outstanding count.
            {
                let mut guard = state.lock();
                let current = guard.timers.get(&id).map(|timer| timer.generation);
                if current == Some(generation) {
                    guard.timers.remove(&id);
                } else {
                    return;
                }
            }

            action().await;

            let mut guard = state.lock();
            if let Some(count) = guard.outstanding.get_mut(&id) {
                *count -= 1;
                if *count == 0 {
                    guard.outstanding.remove(&id);
                }
            }
            tracing::debug!(%id, "Debounced action settled");
        });

        guard.timers.insert(id, Timer { generation, handle });
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}
