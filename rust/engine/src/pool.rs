//! Process-global worker pool.
//!
//! Backed by a tokio multi-thread runtime whose blocking threads run the
//! submitted closures. The worker count can be chosen once, before first
//! use, through [`init_global`].

use std::sync::OnceLock;

use tokio::runtime::{Builder, Handle, Runtime};
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::errors::PoolError;

static GLOBAL: OnceLock<Result<ThreadPool, String>> = OnceLock::new();

pub struct ThreadPool {
    runtime: Runtime,
    workers: usize,
}

impl std::fmt::Debug for ThreadPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreadPool")
            .field("workers", &self.workers)
            .finish()
    }
}

/// Handle to one submitted task.
pub struct TaskHandle<T> {
    handle: Handle,
    join: JoinHandle<T>,
}

impl ThreadPool {
    pub fn new(workers: usize) -> Result<Self, PoolError> {
        let workers = workers.max(1);
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .max_blocking_threads(workers)
            .thread_name("handscope-pool")
            .build()
            .map_err(|e| PoolError {
                reason: e.to_string(),
            })?;
        debug!(workers, "thread pool started");
        Ok(Self { runtime, workers })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Queues `task` on a worker thread.
    pub fn submit<T, F>(&self, task: F) -> TaskHandle<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        TaskHandle {
            handle: self.runtime.handle().clone(),
            join: self.runtime.spawn_blocking(task),
        }
    }
}

impl<T: Send> TaskHandle<T> {
    /// Non-blocking completion check.
    pub fn is_ready(&self) -> bool {
        self.join.is_finished()
    }

    /// Blocks until the task finishes. A task that panicked yields `None`.
    /// Callable from inside an async runtime too: there the wait moves to a
    /// scoped plain thread, since `Handle::block_on` refuses runtime threads.
    pub fn wait(self) -> Option<T> {
        let TaskHandle { handle, join } = self;
        let joined = if Handle::try_current().is_ok() {
            match std::thread::scope(|s| s.spawn(move || handle.block_on(join)).join()) {
                Ok(joined) => joined,
                Err(_) => {
                    error!("pool waiter thread panicked");
                    return None;
                }
            }
        } else {
            handle.block_on(join)
        };
        match joined {
            Ok(value) => Some(value),
            Err(e) => {
                error!(error = %e, "pool task failed");
                None
            }
        }
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism().map_or(4, |n| n.get())
}

/// Sets the global worker count. Returns `false` when the pool already
/// exists, in which case the earlier size is kept.
pub fn init_global(workers: usize) -> bool {
    let mut created = false;
    GLOBAL.get_or_init(|| {
        created = true;
        ThreadPool::new(workers).map_err(|e| e.reason)
    });
    created
}

/// The process-global pool, created with one worker per CPU on first use.
pub fn global() -> Result<&'static ThreadPool, PoolError> {
    GLOBAL
        .get_or_init(|| ThreadPool::new(default_workers()).map_err(|e| e.reason))
        .as_ref()
        .map_err(|reason| PoolError {
            reason: reason.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn submit_and_wait() {
        let pool = ThreadPool::new(2).unwrap();
        let handles: Vec<_> = (0..8).map(|i| pool.submit(move || i * 2)).collect();
        let results: Vec<i32> = handles.into_iter().filter_map(TaskHandle::wait).collect();
        assert_eq!(results, vec![0, 2, 4, 6, 8, 10, 12, 14]);
    }

    #[test]
    fn is_ready_after_completion() {
        let pool = ThreadPool::new(1).unwrap();
        let handle = pool.submit(|| std::thread::sleep(Duration::from_millis(20)));
        while !handle.is_ready() {
            std::thread::sleep(Duration::from_millis(1));
        }
        assert!(handle.wait().is_some());
    }

    #[test]
    fn panicking_task_yields_none() {
        let pool = ThreadPool::new(1).unwrap();
        let handle = pool.submit(|| -> u32 { panic!("boom") });
        assert!(handle.wait().is_none());
    }

    #[test]
    fn wait_inside_async_context() {
        let pool = ThreadPool::new(1).unwrap();
        let handle = pool.submit(|| 7);
        let caller = Builder::new_current_thread().build().unwrap();
        assert_eq!(caller.block_on(async move { handle.wait() }), Some(7));
    }

    #[test]
    fn zero_workers_is_clamped() {
        assert_eq!(ThreadPool::new(0).unwrap().workers(), 1);
    }

    #[test]
    fn global_pool_is_shared() {
        let a = global().unwrap() as *const ThreadPool;
        let b = global().unwrap() as *const ThreadPool;
        assert_eq!(a, b);
        assert!(!init_global(3));
    }
}
