//! Update-trigger coalescing.
//!
//! Heterogeneous trigger sources (refresh timer, power events, display and
//! settings changes) all funnel into [`UpdateDebouncer::request_update`]. A
//! quiet period must elapse after the last trigger before one evaluation
//! runs, and every evaluation runs on the same tokio task, so a burst of
//! triggers collapses into a single evaluation and distinct bursts settle
//! in FIFO order.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Quiet period after the last trigger before an evaluation runs.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(500);

pub struct UpdateDebouncer {
    tx: mpsc::UnboundedSender<()>,
    handle: JoinHandle<()>,
}

impl UpdateDebouncer {
    /// Spawn the coalescing task.
    ///
    /// `on_settle` runs once per settled burst, always on the spawned task,
    /// so at most one evaluation is ever in flight.
    pub fn spawn<F>(window: Duration, mut on_settle: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<()>();
        let handle = tokio::spawn(async move {
            while rx.recv().await.is_some() {
                // A further trigger re-arms the window instead of stacking
                // a second evaluation behind it.
                loop {
                    tokio::select! {
                        _ = tokio::time::sleep(window) => break,
                        more = rx.recv() => {
                            if more.is_none() {
                                return;
                            }
                        }
                    }
                }
                on_settle();
            }
        });
        Self { tx, handle }
    }

    /// Ingress for every trigger source. Cheap and non-blocking; a closed
    /// channel during shutdown is ignored.
    pub fn request_update(&self) {
        let _ = self.tx.send(());
    }

    /// Stop accepting triggers and wait for the coalescing task to exit.
    pub async fn shutdown(self) {
        drop(self.tx);
        let _ = self.handle.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tokio::time::Instant;

    fn counting() -> (Arc<AtomicUsize>, impl FnMut() + Send + 'static) {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        (hits, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[tokio::test(start_paused = true)]
    async fn burst_coalesces_to_single_evaluation() {
        let (hits, on_settle) = counting();
        let debouncer = UpdateDebouncer::spawn(DEBOUNCE_WINDOW, on_settle);

        for _ in 0..10 {
            debouncer.request_update();
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        // Still inside the quiet window.
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        debouncer.shutdown().await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn trigger_inside_window_reschedules() {
        let settled_at = Arc::new(Mutex::new(None::<Instant>));
        let recorder = settled_at.clone();
        let debouncer = UpdateDebouncer::spawn(DEBOUNCE_WINDOW, move || {
            *recorder.lock().unwrap() = Some(Instant::now());
        });

        let start = Instant::now();
        debouncer.request_update();
        tokio::time::sleep(Duration::from_millis(300)).await;
        debouncer.request_update();
        tokio::time::sleep(Duration::from_millis(1000)).await;

        let at = settled_at.lock().unwrap().expect("burst never settled");
        // Settled 500ms after the second trigger, not the first.
        assert!(at - start >= Duration::from_millis(800));

        debouncer.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn distinct_bursts_each_evaluate() {
        let (hits, on_settle) = counting();
        let debouncer = UpdateDebouncer::spawn(DEBOUNCE_WINDOW, on_settle);

        debouncer.request_update();
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        debouncer.request_update();
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 2);

        debouncer.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn no_trigger_no_evaluation() {
        let (hits, on_settle) = counting();
        let debouncer = UpdateDebouncer::spawn(DEBOUNCE_WINDOW, on_settle);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        debouncer.shutdown().await;
    }
}
