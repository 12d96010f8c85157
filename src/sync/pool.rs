//! Bounded worker pool for blocking work such as uploads.
//!
//! `submit` blocks while the queue is full. Each task yields a
//! [`TaskHandle`] that can be waited on or polled.

use crate::error::TaskError;
use crossbeam::channel::{self, Receiver, Sender, TryRecvError};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::thread::JoinHandle;
use tracing::{error, warn};

type Job = Box<dyn FnOnce() + Send + 'static>;

pub struct WorkerPool {
    sender: Option<Sender<Job>>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Starts `workers` threads (at least one) sharing a queue of
    /// `queue_capacity` pending jobs.
    #[must_use]
    pub fn new(workers: usize, queue_capacity: usize) -> Self {
        let (sender, receiver) = channel::bounded::<Job>(queue_capacity);
        let workers = (0..workers.max(1))
            .filter_map(|i| {
                let receiver = receiver.clone();
                std::thread::Builder::new()
                    .name(format!("wear-worker-{i}"))
                    .spawn(move || worker_loop(&receiver))
                    .map_err(|e| error!(error = %e, "failed to spawn worker"))
                    .ok()
            })
            .collect();

        Self {
            sender: Some(sender),
            workers,
        }
    }

    pub fn submit<F, T>(&self, task: F) -> TaskHandle<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (result_tx, result_rx) = channel::bounded(1);
        let job: Job = Box::new(move || {
            // The handle may already be gone; nothing to report then.
            let _ = result_tx.send(task());
        });

        match &self.sender {
            Some(sender) if !self.workers.is_empty() => {
                if sender.send(job).is_err() {
                    warn!("worker pool closed, task dropped");
                }
            }
            _ => warn!("worker pool has no workers, task dropped"),
        }

        TaskHandle { receiver: result_rx }
    }

    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        // Closing the queue lets workers drain it and exit.
        self.sender.take();
        for worker in self.workers.drain(..) {
            if worker.join().is_err() {
                error!("worker thread panicked");
            }
        }
    }
}

fn worker_loop(receiver: &Receiver<Job>) {
    for job in receiver.iter() {
        if catch_unwind(AssertUnwindSafe(job)).is_err() {
            error!("pooled task panicked");
        }
    }
}

/// Result slot of a submitted task.
pub struct TaskHandle<T> {
    receiver: Receiver<T>,
}

impl<T> TaskHandle<T> {
    /// Blocks until the task finishes.
    pub fn wait(self) -> Result<T, TaskError> {
        self.receiver.recv().map_err(|_| TaskError::Lost)
    }

    /// Non-blocking check. `None` while the task is still pending; the
    /// value is handed out once.
    pub fn try_result(&self) -> Option<Result<T, TaskError>> {
        match self.receiver.try_recv() {
            Ok(value) => Some(Ok(value)),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(TaskError::Lost)),
        }
    }
}
