use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{RecvTimeoutError, Sender, bounded};
use tracing::{debug, warn};

use crate::simulation::Simulation;

/// Background thread that ticks a shared simulation at a fixed cadence
/// while it is running.
///
/// Every tick holds the mutex for its full duration, so callers using the
/// same handle never observe a half-applied tick. `stop()` on the
/// simulation pauses ticking; dropping or shutting down the driver ends
/// the thread after any in-flight tick completes.
pub struct Driver {
    shutdown: Option<Sender<()>>,
    handle: Option<JoinHandle<u64>>,
}

impl Driver {
    pub fn spawn(sim: Arc<Mutex<Simulation>>, interval: Duration) -> Self {
        let (shutdown, signal) = bounded::<()>(1);
        let handle = thread::spawn(move || {
            let mut ticks = 0u64;
            loop {
                match signal.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {}
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
                let mut guard = match sim.lock() {
                    Ok(guard) => guard,
                    Err(_) => {
                        warn!("simulation mutex poisoned; driver exiting");
                        break;
                    }
                };
                if guard.is_running() {
                    guard.tick();
                    ticks += 1;
                }
            }
            debug!(ticks, "driver stopped");
            ticks
        });
        Self {
            shutdown: Some(shutdown),
            handle: Some(handle),
        }
    }

    /// Stop the thread and wait for it. Returns how many ticks it ran.
    pub fn shutdown(mut self) -> u64 {
        self.finish()
    }

    fn finish(&mut self) -> u64 {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        self.handle
            .take()
            .and_then(|handle| handle.join().ok())
            .unwrap_or(0)
    }
}

impl Drop for Driver {
    fn drop(&mut self) {
        self.finish();
    }
}
