//! Fixed-size worker pool with completion tracking.
//!
//! Tasks are closures with no return value. They are appended to a shared
//! FIFO queue and picked up by whichever worker is free, so execution order
//! across workers is not guaranteed.
//!
//! # Worker states
//!
//! ```text
//! WAITING --(task enqueued)--> RUNNING --(task done, pending-1)--> WAITING
//! WAITING --(shutdown)--> TERMINATED
//! ```
//!
//! A worker running a task always finishes it before it looks at the
//! shutdown flag again. `finish()` is a reusable barrier; `shutdown()` only
//! stops task pickup; `join()` is `finish()` + `shutdown()` + thread join.

use parking_lot::{Condvar, Mutex};
use std::any::Any;
use std::collections::VecDeque;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use thiserror::Error;
use tracing::{debug, error, trace, warn};

use crate::pending::PendingCounter;

type Task = Box<dyn FnOnce() + Send + 'static>;

/// Errors returned by [`WorkQueue`].
#[derive(Debug, Error)]
pub enum WorkQueueError {
    /// The queue no longer accepts work.
    #[error("work queue has been shut down")]
    ShutDown,
    /// A pool needs at least one worker.
    #[error("worker count must be at least 1")]
    InvalidWorkerCount,
    /// The OS refused to start a worker thread.
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] io::Error),
}

impl From<WorkQueueError> for lexindex_core::Error {
    fn from(e: WorkQueueError) -> Self {
        match e {
            WorkQueueError::InvalidWorkerCount => {
                lexindex_core::Error::invalid_input(e.to_string())
            }
            other => lexindex_core::Error::WorkQueue(other.to_string()),
        }
    }
}

struct QueueInner {
    tasks: Mutex<VecDeque<Task>>,
    work_ready: Condvar,
    shutdown: AtomicBool,
    pending: PendingCounter,
}

/// A fixed pool of worker threads consuming a shared FIFO task list.
///
/// Callers submit with [`execute`](Self::execute) and wait for everything
/// submitted so far with [`finish`](Self::finish), without tracking
/// individual tasks.
///
/// A task that panics is caught at the worker boundary and logged; the
/// worker survives and the task still counts as completed.
pub struct WorkQueue {
    inner: Arc<QueueInner>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    num_threads: usize,
}

impl WorkQueue {
    /// Start a pool with `num_threads` workers, each waiting for work.
    ///
    /// Workers are named `lexindex-worker-0`, `lexindex-worker-1`, etc.
    ///
    /// # Errors
    ///
    /// Returns [`WorkQueueError::InvalidWorkerCount`] for zero workers and
    /// [`WorkQueueError::Spawn`] if a thread cannot be started.
    pub fn new(num_threads: usize) -> Result<Self, WorkQueueError> {
        if num_threads == 0 {
            return Err(WorkQueueError::InvalidWorkerCount);
        }

        let inner = Arc::new(QueueInner {
            tasks: Mutex::new(VecDeque::new()),
            work_ready: Condvar::new(),
            shutdown: AtomicBool::new(false),
            pending: PendingCounter::new(),
        });

        let queue = WorkQueue {
            inner,
            workers: Mutex::new(Vec::with_capacity(num_threads)),
            num_threads,
        };

        for i in 0..num_threads {
            let inner = Arc::clone(&queue.inner);
            let spawned = thread::Builder::new()
                .name(format!("lexindex-worker-{}", i))
                .spawn(move || worker_loop(&inner));
            match spawned {
                Ok(handle) => queue.workers.lock().push(handle),
                // Dropping `queue` stops and joins the workers started so far
                Err(e) => return Err(WorkQueueError::Spawn(e)),
            }
        }

        debug!(
            target: "lexindex::work_queue",
            workers = num_threads,
            "Work queue initialized"
        );
        Ok(queue)
    }

    /// Append a task to the queue and wake one waiting worker.
    ///
    /// # Errors
    ///
    /// Returns [`WorkQueueError::ShutDown`] once [`shutdown`](Self::shutdown)
    /// has been requested; the task is dropped without running.
    pub fn execute(&self, task: impl FnOnce() + Send + 'static) -> Result<(), WorkQueueError> {
        {
            // Flag check and push happen under the queue lock so a concurrent
            // shutdown cannot strand a task that was counted as pending.
            let mut tasks = self.inner.tasks.lock();
            if self.inner.shutdown.load(Ordering::Acquire) {
                return Err(WorkQueueError::ShutDown);
            }
            self.inner.pending.increment();
            tasks.push_back(Box::new(task));
        }
        self.inner.work_ready.notify_one();
        Ok(())
    }

    /// Block until every task submitted so far has completed.
    ///
    /// Workers keep running afterwards, so the queue can be reused.
    /// Must not be called from inside a task running on this queue.
    pub fn finish(&self) {
        debug!(target: "lexindex::work_queue", "Waiting for pending work");
        self.inner.pending.wait();
        debug!(target: "lexindex::work_queue", "Pending work finished");
    }

    /// Ask the workers to stop.
    ///
    /// Idle workers exit immediately; a worker that is running a task
    /// finishes it first. Tasks still queued are discarded without running,
    /// so call [`finish`](Self::finish) first if all queued work must run.
    /// Calling this more than once is harmless.
    pub fn shutdown(&self) {
        let discarded = {
            let mut tasks = self.inner.tasks.lock();
            self.inner.shutdown.store(true, Ordering::Release);
            let discarded = std::mem::take(&mut *tasks);
            self.inner.work_ready.notify_all();
            discarded
        };

        if !discarded.is_empty() {
            warn!(
                target: "lexindex::work_queue",
                discarded = discarded.len(),
                "Shutdown discarded queued tasks"
            );
            let n = discarded.len();
            drop(discarded);
            self.inner.pending.release(n);
        }
        debug!(target: "lexindex::work_queue", "Work queue shutdown requested");
    }

    /// Wait for all work, shut down, and wait for every worker to exit.
    ///
    /// The queue cannot run new tasks afterwards.
    pub fn join(&self) {
        self.finish();
        self.shutdown();
        self.join_workers();
        debug!(target: "lexindex::work_queue", "All worker threads terminated");
    }

    /// Number of worker threads in the pool.
    pub fn size(&self) -> usize {
        self.num_threads
    }

    /// Number of submitted tasks that have not completed yet.
    pub fn pending(&self) -> usize {
        self.inner.pending.get()
    }

    /// Whether shutdown has been requested.
    pub fn is_shutdown(&self) -> bool {
        self.inner.shutdown.load(Ordering::Acquire)
    }

    fn join_workers(&self) {
        let current = thread::current().id();
        let handles: Vec<JoinHandle<()>> = self.workers.lock().drain(..).collect();
        for handle in handles {
            // A task that drops the last handle to the queue runs on a worker;
            // that worker cannot join itself.
            if handle.thread().id() == current {
                continue;
            }
            if handle.join().is_err() {
                error!(target: "lexindex::work_queue", "Worker thread exited abnormally");
            }
        }
    }
}

impl Drop for WorkQueue {
    fn drop(&mut self) {
        self.shutdown();
        self.join_workers();
    }
}

impl std::fmt::Debug for WorkQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkQueue")
            .field("workers", &self.num_threads)
            .field("pending", &self.pending())
            .field("shutdown", &self.is_shutdown())
            .finish()
    }
}

/// Marks the current task complete on drop, panic or not.
struct CompletionGuard<'a> {
    pending: &'a PendingCounter,
}

impl Drop for CompletionGuard<'_> {
    fn drop(&mut self) {
        self.pending.decrement();
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("(non-string panic)")
}

fn worker_loop(inner: &QueueInner) {
    loop {
        let task = {
            let mut tasks = inner.tasks.lock();
            loop {
                if inner.shutdown.load(Ordering::Acquire) {
                    debug!(target: "lexindex::work_queue", "Worker detected shutdown");
                    return;
                }
                if let Some(task) = tasks.pop_front() {
                    break task;
                }
                trace!(target: "lexindex::work_queue", "Worker waiting");
                inner.work_ready.wait(&mut tasks);
            }
        };

        trace!(target: "lexindex::work_queue", "Worker found work");
        let _guard = CompletionGuard {
            pending: &inner.pending,
        };

        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(task)) {
            error!(
                target: "lexindex::work_queue",
                worker = thread::current().name().unwrap_or("unnamed"),
                "Task panicked: {}",
                panic_message(payload.as_ref())
            );
        }
    }
}
