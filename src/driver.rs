//! Background driver: advances a [`Rainbow`] on a wall-clock timer.
//!
//! One dedicated thread per driver owns the state machine and is its only
//! writer; the latest color is published through a shared cell that any
//! number of readers can snapshot between ticks. The thread parks on the
//! shutdown channel with a timeout, so each loop iteration either observes
//! the shutdown signal and terminates, or times out and steps exactly once.
//!
//! ## Rust concepts
//! - `std::thread::spawn` for the timer thread
//! - `mpsc::Receiver::recv_timeout` as a wait-with-timeout select
//! - `Arc<Mutex<T>>` for the shared color snapshot
//! - `Option<JoinHandle>` + `take()` for idempotent shutdown

use crate::Color;
use crate::rainbow::{Phase, Rainbow};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// A rainbow that advances itself once per tick interval.
///
/// The driver always runs its internal [`Rainbow`] at speed tier 1, the
/// finest-grained step; the visual rate is controlled entirely by the
/// tick interval. Multiple drivers coexist independently — each owns its
/// thread and its shutdown channel, and nothing is global.
pub struct RainbowDriver {
    color: Arc<Mutex<Color>>,
    quit_tx: mpsc::Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl RainbowDriver {
    /// Start a new driver ticking every `interval`, beginning on the pure
    /// primary named by `start`. The background thread is running before
    /// this returns.
    pub fn new(interval: Duration, start: Phase) -> Self {
        let mut rainbow = Rainbow::new(1, start);
        let color = Arc::new(Mutex::new(rainbow.color()));
        let (quit_tx, quit_rx) = mpsc::channel();

        let shared = color.clone();
        let handle = thread::spawn(move || {
            tracing::debug!(?interval, "rainbow driver started");
            loop {
                match quit_rx.recv_timeout(interval) {
                    // Shutdown requested (or the sender is gone):
                    // terminate without stepping again.
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                        tracing::debug!("rainbow driver stopped");
                        break;
                    }
                    // Tick: step once and publish. The lock is held only
                    // for the store, never across the wait.
                    Err(RecvTimeoutError::Timeout) => {
                        let next = rainbow.step();
                        *shared.lock().unwrap() = next;
                    }
                }
            }
        });

        Self {
            color,
            quit_tx,
            handle: Some(handle),
        }
    }

    /// The most recently computed color.
    ///
    /// Safe to call from any thread while the driver ticks; the mutex
    /// guarantees a whole-color snapshot, never a torn read. After
    /// [`shutdown`](Self::shutdown) this keeps returning the last value.
    pub fn color(&self) -> Color {
        *self.color.lock().unwrap()
    }

    /// Signal the background thread to stop and wait for it to finish.
    ///
    /// Idempotent: the join handle is taken on the first call, so calling
    /// this again (or dropping the driver afterwards) is a no-op. Once it
    /// returns, no further steps occur.
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.handle.take() {
            // Ignore the send result: if the thread already exited, the
            // receiver is gone and there is nothing left to stop.
            let _ = self.quit_tx.send(());
            let _ = handle.join();
        }
    }
}

impl Drop for RainbowDriver {
    fn drop(&mut self) {
        self.shutdown();
    }
}

// ── Tests ────────────────────────────────────────────────────────────
