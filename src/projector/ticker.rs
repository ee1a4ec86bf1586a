use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::debug;

use crate::error::BridgeError;
use crate::models::{PositionSnapshot, Timeline};
use crate::player::Player;
use crate::surface::SharedSurface;

/// Periodic timeline updater, alive exactly while the player is playing.
///
/// One ticker exists for the lifetime of its projector; starting spawns a
/// worker thread, stopping disconnects its channel and joins it. Stop is
/// idempotent and safe when the worker was never started.
pub struct PositionTicker {
    interval: Duration,
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl PositionTicker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            stop_tx: None,
            handle: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.stop_tx.is_some()
    }

    /// Spawns the worker if it is not already running. The worker pushes the
    /// timeline immediately, then once per interval.
    pub fn start(&mut self, player: Arc<dyn Player>, surface: SharedSurface) {
        if self.is_running() {
            return;
        }

        let (tx, rx) = mpsc::channel::<()>();
        let interval = self.interval;
        self.stop_tx = Some(tx);
        self.handle = Some(thread::spawn(move || {
            loop {
                if let Err(e) = push_position(player.as_ref(), &surface) {
                    debug!("position update failed: {e}");
                }
                match rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => continue,
                    // Sender dropped: the ticker was stopped.
                    _ => break,
                }
            }
        }));
    }

    pub fn stop(&mut self) {
        self.stop_tx = None;
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for PositionTicker {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for PositionTicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PositionTicker")
            .field("interval", &self.interval)
            .field("running", &self.is_running())
            .finish()
    }
}

/// Reads the player's position and duration and pushes the timeline tuple.
/// A zero duration (between tracks) produces an all-zero seek range.
pub(super) fn push_position(player: &dyn Player, surface: &SharedSurface) -> Result<(), BridgeError> {
    let snapshot = PositionSnapshot {
        position_ms: player.position_ms(),
        duration_ms: player.duration_ms(),
    };
    surface
        .lock()
        .unwrap()
        .set_timeline(&Timeline::from(snapshot))
}
