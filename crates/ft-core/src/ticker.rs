//! Periodic tick source
//!
//! A [`Ticker`] owns a background thread that reports elapsed whole seconds
//! at a fixed interval. It never touches session state itself: the sink
//! usually forwards the value over a channel to the loop that owns the
//! [`SessionController`](crate::session::SessionController).
//!
//! Stopping is immediate: the thread waits on a stop channel with a timeout
//! rather than sleeping, so [`Ticker::stop`] and drop return without waiting
//! out the interval.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Handle to a running tick thread; stops it on drop
pub struct Ticker {
    stop_tx: Option<Sender<()>>,
    thread: Option<JoinHandle<()>>,
    running: Arc<AtomicBool>,
}

impl Ticker {
    /// Spawn a ticker calling `on_tick` with the elapsed whole seconds since
    /// start, once per `interval`. Returning `false` from `on_tick` ends it.
    pub fn start<F>(interval: Duration, mut on_tick: F) -> Self
    where
        F: FnMut(u64) -> bool + Send + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let running = Arc::new(AtomicBool::new(true));
        let thread_running = Arc::clone(&running);

        let thread = thread::spawn(move || {
            let started = Instant::now();
            let mut next = started + interval;

            loop {
                let wait = next.saturating_duration_since(Instant::now());
                match stop_rx.recv_timeout(wait) {
                    Err(RecvTimeoutError::Timeout) => {}
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }

                if !on_tick(started.elapsed().as_secs()) {
                    break;
                }
                // scheduled from start so ticks don't accumulate drift
                next += interval;
            }

            thread_running.store(false, Ordering::SeqCst);
            tracing::trace!("ticker stopped");
        });

        tracing::debug!(interval_ms = interval.as_millis() as u64, "ticker started");

        Self {
            stop_tx: Some(stop_tx),
            thread: Some(thread),
            running,
        }
    }

    /// Whether the tick thread is still alive
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Cancel the ticker and wait for its thread to exit
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::warn!("ticker thread panicked");
            }
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::TryRecvError;

    #[test]
    fn test_ticks_are_delivered() {
        let (tx, rx) = mpsc::channel();
        let ticker = Ticker::start(Duration::from_millis(10), move |secs| {
            tx.send(secs).is_ok()
        });

        for _ in 0..3 {
            let secs = rx.recv_timeout(Duration::from_secs(2)).unwrap();
            assert_eq!(secs, 0);
        }
        assert!(ticker.is_running());
        ticker.stop();
    }

    #[test]
    fn test_no_ticks_after_stop() {
        let (tx, rx) = mpsc::channel();
        let ticker = Ticker::start(Duration::from_millis(5), move |secs| {
            tx.send(secs).is_ok()
        });
        rx.recv_timeout(Duration::from_secs(2)).unwrap();
        ticker.stop();

        // drain what was sent before the stop landed
        while rx.try_recv().is_ok() {}
        thread::sleep(Duration::from_millis(30));
        assert_eq!(rx.try_recv(), Err(TryRecvError::Disconnected));
    }

    #[test]
    fn test_drop_cancels() {
        let (tx, rx) = mpsc::channel();
        {
            let _ticker = Ticker::start(Duration::from_millis(5), move |secs| {
                tx.send(secs).is_ok()
            });
            rx.recv_timeout(Duration::from_secs(2)).unwrap();
        }
        while rx.try_recv().is_ok() {}
        assert_eq!(rx.try_recv(), Err(TryRecvError::Disconnected));
    }

    #[test]
    fn test_sink_can_end_ticker() {
        let ticker = Ticker::start(Duration::from_millis(5), |_| false);
        let deadline = Instant::now() + Duration::from_secs(2);
        while ticker.is_running() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        assert!(!ticker.is_running());
    }

    #[test]
    fn test_stop_does_not_wait_for_interval() {
        let ticker = Ticker::start(Duration::from_secs(60), |_| true);
        let before = Instant::now();
        ticker.stop();
        assert!(before.elapsed() < Duration::from_secs(5));
    }
}
