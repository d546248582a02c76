//! Single-task event loop around a [`RenderState`]
//!
//! All mutations — host-pushed events and the periodic tick — run on one
//! spawned task, which is the crate's answer to the cooperative
//! single-queue execution model the state requires on a multi-threaded
//! runtime. The tick task is cancellable and stops with the service; it is
//! never left running after shutdown.

use crate::{
    bridge::{BridgeEvent, HostBridge},
    render::RenderState,
    runtime::{self, AsyncHandle},
    Result,
};
use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::{Duration, Instant},
};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

/// Housekeeping cadence: event-marker TTL sweeps.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(250);

/// Owns a [`RenderState`] on a single task and feeds it bridge events plus
/// a periodic tick. Dropping the service (or calling
/// [`MapService::shutdown`]) stops the loop and its timer.
pub struct MapService {
    state: Arc<Mutex<RenderState>>,
    handle: Box<dyn AsyncHandle>,
}

impl MapService {
    /// Initializes a [`RenderState`] from the bridge and starts the event
    /// loop with the default tick interval.
    pub async fn start<B: HostBridge>(mut bridge: B) -> Result<Self> {
        let events = bridge.subscribe()?;
        let state = RenderState::initialize(&mut bridge).await?;
        Ok(Self::spawn(state, events, DEFAULT_TICK_INTERVAL))
    }

    /// Starts the event loop around an existing state.
    pub fn spawn(
        state: RenderState,
        mut events: mpsc::Receiver<BridgeEvent>,
        tick_interval: Duration,
    ) -> Self {
        let state = Arc::new(Mutex::new(state));
        let loop_state = Arc::clone(&state);

        let handle = runtime::spawn(async move {
            let mut ticker = tokio::time::interval(tick_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    maybe_event = events.recv() => match maybe_event {
                        Some(event) => {
                            lock_state(&loop_state).apply(event);
                        }
                        None => {
                            log::debug!("bridge closed, stopping map loop");
                            break;
                        }
                    },
                    _ = ticker.tick() => {
                        let swept = lock_state(&loop_state).tick(Instant::now());
                        if swept > 0 {
                            log::debug!("swept {} expired event markers", swept);
                        }
                    }
                }
            }
        });

        Self { state, handle }
    }

    /// Reads the current state. Mutation stays on the loop task; this is
    /// observation only.
    pub fn with_state<R>(&self, f: impl FnOnce(&RenderState) -> R) -> R {
        f(&lock_state(&self.state))
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Stops the event loop and its tick timer.
    pub fn shutdown(&self) {
        self.handle.cancel();
    }
}

impl Drop for MapService {
    fn drop(&mut self) {
        self.handle.cancel();
    }
}

fn lock_state(state: &Arc<Mutex<RenderState>>) -> MutexGuard<'_, RenderState> {
    // The loop task never panics while holding the lock; recover the guard
    // rather than propagate poisoning.
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
