// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The timer that drives the sampling loop.

use chrono::Utc;
use rand::Rng;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::fault::FaultNotifier;
use crate::monitor::Monitor;
use crate::style::StyledEdge;

/// Drives a shared [`Monitor`] on a background thread, publishing each new
/// styled-edge list to the rendering layer.
///
/// The monitor only advances while it [is live][Monitor::is_live]; pausing
/// or leaving the realtime range skips ticks without stopping the thread.
/// [`stop`][MonitorRunner::stop] cancels the timer unconditionally and is
/// idempotent, and dropping the runner stops it, so a timer can never
/// outlive its owner.
pub struct MonitorRunner {
    stop_tx: Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl MonitorRunner {
    /// Spawns the sampling timer.
    ///
    /// Every `interval`, the monitor is locked, advanced by one tick if it
    /// is live, and the resulting styled edges are handed to `publish`.
    pub fn spawn<R, N, F>(
        monitor: Arc<Mutex<Monitor<R, N>>>,
        interval: Duration,
        mut publish: F,
    ) -> Self
    where
        R: Rng + Send + 'static,
        N: FaultNotifier + Send + 'static,
        F: FnMut(Vec<StyledEdge>) + Send + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel();

        let handle = std::thread::spawn(move || {
            tracing::debug!("Sampling timer started.");
            loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {}
                    // Stop signal, or the runner was leaked away.
                    _ => break,
                }

                let styled = {
                    let mut monitor = match monitor.lock() {
                        Ok(guard) => guard,
                        Err(poisoned) => poisoned.into_inner(),
                    };
                    if !monitor.is_live() {
                        continue;
                    }
                    monitor.tick(Utc::now())
                };
                publish(styled);
            }
            tracing::debug!("Sampling timer stopped.");
        });

        Self {
            stop_tx,
            handle: Some(handle),
        }
    }

    /// Stops the timer and waits for the thread to exit.  Safe to call any
    /// number of times.
    pub fn stop(&mut self) {
        let _ = self.stop_tx.send(());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MonitorRunner {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FlowGraph, MonitorConfig};
    use rand::{rngs::StdRng, SeedableRng};
    use std::sync::mpsc::channel;

    fn shared_monitor() -> Arc<Mutex<Monitor<StdRng>>> {
        Arc::new(Mutex::new(Monitor::new(
            FlowGraph::site_overview(1),
            MonitorConfig::default(),
            StdRng::seed_from_u64(42),
        )))
    }

    #[test]
    fn test_publishes_styled_edges_periodically() {
        let monitor = shared_monitor();
        let (tx, rx) = channel();

        let mut runner = MonitorRunner::spawn(
            Arc::clone(&monitor),
            Duration::from_millis(10),
            move |styled| {
                let _ = tx.send(styled);
            },
        );

        let styled = rx
            .recv_timeout(Duration::from_secs(5))
            .expect("no styled edges published");
        runner.stop();

        let edge_count = monitor.lock().unwrap().graph().edges().count();
        assert_eq!(styled.len(), edge_count);
    }

    #[test]
    fn test_paused_monitor_publishes_nothing() {
        let monitor = shared_monitor();
        monitor.lock().unwrap().pause();
        let (tx, rx) = channel();

        let mut runner = MonitorRunner::spawn(
            Arc::clone(&monitor),
            Duration::from_millis(10),
            move |styled| {
                let _ = tx.send(styled);
            },
        );

        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
        runner.stop();

        // No samples were recorded either.
        let monitor = monitor.lock().unwrap();
        assert!(monitor.state().history("source-1-to-storage").is_none());
    }

    #[test]
    fn test_stop_is_idempotent() {
        let monitor = shared_monitor();
        let mut runner =
            MonitorRunner::spawn(monitor, Duration::from_millis(10), |_| {});

        runner.stop();
        runner.stop();
    }

    #[test]
    fn test_drop_stops_the_timer() {
        let monitor = shared_monitor();
        let runner = MonitorRunner::spawn(
            Arc::clone(&monitor),
            Duration::from_millis(10),
            |_| {},
        );

        drop(runner);

        // The timer thread is gone: the monitor is immediately lockable and
        // stays untouched afterwards.
        monitor.lock().unwrap().pause();
    }
}
