use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Cancellable timer. Each call resets the window, so only the last call made
/// within `delay` runs.
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    pub fn call<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        // Held across spawn and replace so concurrent calls keep lock order
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = pending.take() {
            previous.abort();
        }
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Detached, so a later reset never cancels work that already started
            tokio::spawn(task);
        }));
    }

    pub fn cancel(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = pending.take() {
            previous.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test(start_paused = true)]
    async fn rapid_calls_collapse_into_the_last_one() {
        let debouncer = Debouncer::new(Duration::from_millis(500));
        let fired = Arc::new(Mutex::new(Vec::new()));

        for i in 0..3 {
            let fired = fired.clone();
            debouncer.call(async move { fired.lock().unwrap().push(i) });
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        tokio::time::sleep(Duration::from_millis(600)).await;

        assert_eq!(*fired.lock().unwrap(), vec![2]);
    }

    #[tokio::test(start_paused = true)]
    async fn calls_outside_the_window_each_fire() {
        let debouncer = Debouncer::new(Duration::from_millis(500));
        let count = Arc::new(AtomicUsize::new(0));

        for _ in 0..2 {
            let count = count.clone();
            debouncer.call(async move {
                count.fetch_add(1, Ordering::SeqCst);
            });
            tokio::time::sleep(Duration::from_millis(700)).await;
        }

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_calls_fire_exactly_once() {
        let debouncer = Arc::new(Debouncer::new(Duration::from_millis(200)));
        let count = Arc::new(AtomicUsize::new(0));

        let callers: Vec<_> = (0..16)
            .map(|_| {
                let debouncer = debouncer.clone();
                let count = count.clone();
                tokio::spawn(async move {
                    debouncer.call(async move {
                        count.fetch_add(1, Ordering::SeqCst);
                    });
                })
            })
            .collect();
        for caller in callers {
            caller.await.unwrap();
        }
        tokio::time::sleep(Duration::from_millis(600)).await;

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_drops_the_pending_call() {
        let debouncer = Debouncer::new(Duration::from_millis(500));
        let count = Arc::new(AtomicUsize::new(0));

        let counter = count.clone();
        debouncer.call(async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        debouncer.cancel();
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
