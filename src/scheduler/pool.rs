// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The shared worker pool: bounded-parallel execution of tasklets. Injected
//! as a capability -- the core never owns its lifecycle -- but unlike a
//! level-by-level executor that creates a fresh
//! `Semaphore` per `execute_with_strategy` call, this pool is constructed
//! once and handed to every tick so that concurrency is bounded across the
//! scheduler's whole lifetime, not just within one tick.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

/// A bounded-parallel worker pool built on a counting semaphore, the same
/// mechanism used inside a level executor's `execute_level` to cap concurrent
/// processor executions within a level.
#[derive(Clone)]
pub struct WorkerPool {
    semaphore: Arc<Semaphore>,
}

impl WorkerPool {
    /// `capacity` is clamped to at least 1 -- a pool of zero permits would
    /// deadlock every tasklet.
    pub fn new(capacity: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(capacity.max(1))),
        }
    }

    /// Submit `future` to the pool. The task waits for a permit before
    /// running, bounding how many tasklets execute concurrently. If the
    /// semaphore has been closed (pool shut down), the join result carries
    /// the rejection as a panic, surfaced to the caller as a `JoinError` --
    /// the Tick Executor logs that rather than letting it crash the tick.
    pub fn spawn<F>(&self, future: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        let semaphore = self.semaphore.clone();
        tokio::spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .expect("worker pool semaphore closed while a tasklet was queued");
            future.await
        })
    }

    /// Shut the pool down: closing the semaphore causes every pending and
    /// future `acquire` to fail. Shutdown is cooperative -- the caller stops
    /// invoking `run()` and shuts the worker pool down externally.
    pub fn shutdown(&self) {
        self.semaphore.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn bounds_concurrency_to_capacity() {
        let pool = WorkerPool::new(2);
        let concurrent = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..6 {
            let concurrent = concurrent.clone();
            let max_seen = max_seen.clone();
            handles.push(pool.spawn(async move {
                let now = concurrent.fetch_add(1, Ordering::SeqCst) + 1;
                max_seen.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(20)).await;
                concurrent.fetch_sub(1, Ordering::SeqCst);
            }));
        }
        for h in handles {
            h.await.unwrap();
        }

        assert!(max_seen.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn shutdown_fails_pending_submissions() {
        let pool = WorkerPool::new(1);
        pool.shutdown();
        let handle = pool.spawn(async { 1 });
        assert!(handle.await.is_err());
    }
}
