//! Wait-group style completion barrier.

use parking_lot::{Condvar, Mutex};

/// Counts outstanding units of work and lets callers block until none remain.
///
/// The barrier is reusable: once the count drops to zero, waiters are
/// released and the counter can be incremented again.
#[derive(Debug, Default)]
pub struct PendingCounter {
    count: Mutex<usize>,
    idle: Condvar,
}

impl PendingCounter {
    /// Create a counter with nothing outstanding.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one more outstanding unit.
    pub fn increment(&self) {
        *self.count.lock() += 1;
    }

    /// Mark one unit complete.
    ///
    /// # Panics
    ///
    /// Panics if nothing is outstanding. A negative count means a task was
    /// completed twice, which is a bug in the caller.
    pub fn decrement(&self) {
        self.release(1);
    }

    /// Mark `n` units complete at once.
    ///
    /// # Panics
    ///
    /// Panics if fewer than `n` units are outstanding.
    pub fn release(&self, n: usize) {
        if n == 0 {
            return;
        }
        let mut count = self.count.lock();
        assert!(
            *count >= n,
            "pending count underflow: releasing {} with {} outstanding",
            n,
            *count
        );
        *count -= n;
        if *count == 0 {
            self.idle.notify_all();
        }
    }

    /// Block until the count reaches zero.
    pub fn wait(&self) {
        let mut count = self.count.lock();
        while *count > 0 {
            self.idle.wait(&mut count);
        }
    }

    /// Current number of outstanding units.
    pub fn get(&self) -> usize {
        *self.count.lock()
    }
}
