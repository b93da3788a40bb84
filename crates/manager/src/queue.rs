//! The sequential task queue: the concurrency backbone of the manager.
//!
//! All registry mutations and resolution passes run as queued jobs on a
//! single worker, strictly in submission order and never overlapping. A job
//! may await provider I/O; the worker does not dequeue the next job until the
//! current one completes. Submission itself never waits on execution order.

use crate::error::ManagerError;
use std::future::Future;
use std::pin::Pin;
use tokio::sync::{mpsc, oneshot};
use tracing::trace;

type Job = Box<dyn FnOnce() -> Pin<Box<dyn Future<Output = ()> + Send>> + Send>;

/// Single-consumer ordered queue of async jobs.
#[derive(Debug)]
pub(crate) struct SequentialQueue {
    tx: mpsc::Sender<Job>,
}

impl SequentialQueue {
    /// Spawns the worker draining the queue. Must be called from within a
    /// tokio runtime.
    pub(crate) fn new(capacity: usize) -> Self {
        let (tx, mut rx) = mpsc::channel::<Job>(capacity);

        tokio::spawn(async move {
            while let Some(job) = rx.recv().await {
                // Jobs run to completion before the next one is dequeued.
                job().await;
            }
            trace!("Sequential queue worker stopped");
        });

        Self { tx }
    }

    /// Submits a job and resolves once it has run to completion, returning
    /// its output.
    pub(crate) async fn run<F, Fut, T>(&self, job: F) -> Result<T, ManagerError>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let (ack_tx, ack_rx) = oneshot::channel();

        let boxed: Job = Box::new(move || {
            Box::pin(async move {
                let value = job().await;
                // The submitter may have gone away; that only means nobody
                // is waiting for the result.
                let _ = ack_tx.send(value);
            })
        });

        self.tx.send(boxed).await.map_err(|_| ManagerError::QueueClosed {
            message: "worker no longer accepting jobs".into(),
        })?;

        ack_rx.await.map_err(|_| ManagerError::QueueClosed {
            message: "worker dropped the job before completion".into(),
        })
    }
}
