//! Periodic list refresh.

use std::sync::Arc;
use std::time::Duration;

use betsy_core::Sale;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::backend::SalesBackend;

/// Outcome of one refresh.
#[derive(Debug, Clone, PartialEq)]
pub enum PollEvent {
    /// The full current list.
    Snapshot(Vec<Sale>),
    /// The refresh failed; the next tick retries.
    Error(String),
}

/// Fetches the list immediately, then once per interval, and sends each
/// outcome on a channel. Stops when the receiver is dropped.
pub struct SalesPoller {
    handle: JoinHandle<()>,
}

impl SalesPoller {
    /// Default channel capacity.
    pub const CHANNEL_CAPACITY: usize = 8;

    /// Spawn the polling task on the current tokio runtime.
    pub fn spawn<B>(backend: Arc<B>, interval: Duration) -> (Self, mpsc::Receiver<PollEvent>)
    where
        B: SalesBackend + 'static,
    {
        let (tx, rx) = mpsc::channel(Self::CHANNEL_CAPACITY);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                let event = match backend.fetch_sales().await {
                    Ok(sales) => {
                        debug!("Poll returned {} sales", sales.len());
                        PollEvent::Snapshot(sales)
                    }
                    Err(e) => {
                        warn!("Poll failed: {}", e);
                        PollEvent::Error(e.to_string())
                    }
                };

                if tx.send(event).await.is_err() {
                    debug!("Poll receiver dropped, stopping");
                    break;
                }
            }
        });

        (Self { handle }, rx)
    }

    /// Stop polling without waiting for the receiver to go away.
    pub fn abort(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the task to end.
    pub async fn join(self) {
        if let Err(e) = self.handle.await {
            if !e.is_cancelled() {
                warn!("Poll task failed: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InMemoryBackend, RemoteError, Result};
    use betsy_core::{SaleSubmission, SubmitReceipt};
    use serde_json::{Map, Value};

    struct FailingBackend;

    impl SalesBackend for FailingBackend {
        async fn fetch_sales(&self) -> Result<Vec<Sale>> {
            Err(RemoteError::Busy)
        }

        async fn submit_sale(&self, _submission: &SaleSubmission) -> Result<SubmitReceipt> {
            Err(RemoteError::Busy)
        }

        async fn update_status(&self, _order_id: &str, _status: &str) -> Result<()> {
            Err(RemoteError::Busy)
        }

        async fn update_order(&self, _order_id: &str, _fields: Map<String, Value>) -> Result<()> {
            Err(RemoteError::Busy)
        }
    }

    fn sale(id: &str) -> Sale {
        Sale {
            order_id: id.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_snapshots_follow_backend() {
        let backend = Arc::new(InMemoryBackend::with_sales(vec![sale("A1")]));
        let (poller, mut rx) = SalesPoller::spawn(backend.clone(), Duration::from_secs(30));

        let Some(PollEvent::Snapshot(first)) = rx.recv().await else {
            panic!("expected a snapshot");
        };
        assert_eq!(first.len(), 1);

        backend.update_status("A1", "Impreso").await.unwrap();

        let Some(PollEvent::Snapshot(second)) = rx.recv().await else {
            panic!("expected a snapshot");
        };
        assert_eq!(second[0].status, "Impreso");

        drop(rx);
        poller.join().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_errors_are_events() {
        let (poller, mut rx) = SalesPoller::spawn(Arc::new(FailingBackend), Duration::from_secs(30));

        assert_eq!(
            rx.recv().await,
            Some(PollEvent::Error("server is busy, please try again".to_string()))
        );
        assert!(matches!(rx.recv().await, Some(PollEvent::Error(_))));

        poller.abort();
        poller.join().await;
    }
}
