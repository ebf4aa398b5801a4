// Periodic refresh - at most one reload in flight
use std::future::Future;
use tokio::task::JoinHandle;

/// Runs background reloads one at a time. A tick that arrives while the
/// previous reload is still waiting on the backend is skipped.
#[derive(Debug, Default)]
pub struct SingleFlight {
    running: Option<JoinHandle<()>>,
}

impl SingleFlight {
    pub fn is_running(&self) -> bool {
        self.running.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Returns whether `task` was started.
    pub fn spawn<F>(&mut self, task: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if self.is_running() {
            tracing::warn!("Previous refresh still running, skipping this tick");
            return false;
        }
        self.running = Some(tokio::spawn(task));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hung_refresh_blocks_new_ones() {
        let mut flight = SingleFlight::default();
        assert!(flight.spawn(std::future::pending()));
        for _ in 0..5 {
            tokio::task::yield_now().await;
            assert!(!flight.spawn(async {}));
        }
        assert!(flight.is_running());
    }

    #[tokio::test]
    async fn test_finished_refresh_allows_next() {
        let mut flight = SingleFlight::default();
        assert!(!flight.is_running());
        assert!(flight.spawn(async {}));

        while flight.is_running() {
            tokio::task::yield_now().await;
        }
        assert!(flight.spawn(async {}));
    }
}
