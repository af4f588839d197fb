//! Fixed-size worker-thread pool over a blocking FIFO task queue.
//!
//! One mutex/condvar pair guards the queue, its `ready`/`running` counters,
//! and the terminal `work_done` flag. Workers block in `next_task` until a
//! task arrives or shutdown is signalled; the owner blocks in [`ThreadPool::shutdown`]
//! until the queue drains naturally.

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use crate::task::Task;

// ── Queue state ──────────────────────────────────────────────────────

#[derive(Debug)]
struct QueueState {
    tasks: VecDeque<Task>,
    /// Tasks queued but not yet picked up by a worker. Mirrors `tasks.len()`.
    ready: usize,
    /// Tasks currently executing on a worker.
    running: usize,
    /// Terminal flag: once set, idle workers exit instead of blocking.
    /// Never reset.
    work_done: bool,
}

struct Shared {
    state: Mutex<QueueState>,
    cond: Condvar,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().expect("pool lock poisoned")
    }

    /// Blocking dequeue. Returns `None` once the queue is empty and shutdown
    /// has been signalled; a worker receiving `None` exits its loop.
    fn next_task(&self) -> Option<Task> {
        let mut state = self
            .cond
            .wait_while(self.lock(), |s| s.ready == 0 && !s.work_done)
            .expect("pool lock poisoned");

        if state.ready == 0 && state.work_done {
            return None;
        }

        let task = state.tasks.pop_front().expect("ready count out of sync");
        state.ready -= 1;
        state.running += 1;
        Some(task)
    }
}

fn worker_loop(shared: &Shared) {
    while let Some(task) = shared.next_task() {
        task.run();

        let mut state = shared.lock();
        state.running -= 1;
        if state.running == 0 && state.ready == 0 {
            // Liveness nudge for a drain waiter blocked in `shutdown`.
            shared.cond.notify_all();
        }
    }
}

// ── TaskSender ───────────────────────────────────────────────────────

/// Cloneable producer handle for a [`ThreadPool`].
///
/// Tasks running on the pool capture a sender so they can feed the very
/// pool that is executing them.
#[derive(Clone)]
pub struct TaskSender {
    shared: Arc<Shared>,
}

impl TaskSender {
    /// Append a task to the tail of the queue and wake one blocked worker.
    /// Never blocks.
    pub fn send(&self, task: Task) {
        let mut state = self.shared.lock();
        state.tasks.push_back(task);
        state.ready += 1;
        self.shared.cond.notify_one();
    }
}

// ── ThreadPool ───────────────────────────────────────────────────────

/// A fixed set of worker threads sharing one blocking task queue.
pub struct ThreadPool {
    shared: Arc<Shared>,
    workers: Vec<JoinHandle<()>>,
}

impl ThreadPool {
    /// Spawn a pool with a fixed number of worker threads.
    ///
    /// # Panics
    /// If `num_threads` is zero, or if the OS refuses to spawn a thread.
    pub fn new(num_threads: usize) -> Self {
        assert!(num_threads > 0, "thread pool requires at least one worker");

        let shared = Arc::new(Shared {
            state: Mutex::new(QueueState {
                tasks: VecDeque::new(),
                ready: 0,
                running: 0,
                work_done: false,
            }),
            cond: Condvar::new(),
        });

        let workers = (0..num_threads)
            .map(|i| {
                let shared = shared.clone();
                thread::Builder::new()
                    .name(format!("graphsum-worker-{i}"))
                    .spawn(move || worker_loop(&shared))
                    .expect("failed to spawn worker thread")
            })
            .collect();

        debug!(workers = num_threads, "thread pool started");
        Self { shared, workers }
    }

    /// Producer handle for this pool.
    pub fn sender(&self) -> TaskSender {
        TaskSender {
            shared: self.shared.clone(),
        }
    }

    /// Wait for the queue to drain naturally (`running == 0 && ready == 0`),
    /// then signal shutdown and join every worker.
    ///
    /// Callers must ensure no further [`TaskSender::send`] happens once the
    /// drain wait begins; the traversal layer guarantees this by waiting for
    /// quiescence first.
    pub fn shutdown(mut self) {
        {
            let mut state = self
                .shared
                .cond
                .wait_while(self.shared.lock(), |s| s.running > 0 || s.ready > 0)
                .expect("pool lock poisoned");
            state.work_done = true;
            self.shared.cond.notify_all();
        }
        self.join_workers();
        debug!("thread pool shut down");
    }

    fn join_workers(&mut self) {
        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                warn!("worker thread panicked");
            }
        }
    }
}

impl Drop for ThreadPool {
    /// Defensive teardown for a pool dropped without [`ThreadPool::shutdown`]:
    /// signal shutdown without waiting for a drain, then join. Workers run
    /// down whatever is already queued before exiting; the queue drops any
    /// remainder.
    fn drop(&mut self) {
        if self.workers.is_empty() {
            return;
        }
        {
            let mut state = self.shared.lock();
            state.work_done = true;
            self.shared.cond.notify_all();
        }
        self.join_workers();
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use super::*;

    #[test]
    fn executes_every_task() {
        let pool = ThreadPool::new(4);
        let sender = pool.sender();
        let counter = Arc::new(AtomicUsize::new(0));

        for _ in 0..100 {
            let c = counter.clone();
            sender.send(Task::new(move || {
                c.fetch_add(1, Ordering::SeqCst);
            }));
        }
        pool.shutdown();

        assert_eq!(counter.load(Ordering::SeqCst), 100);
    }

    /// Mirrors the traversal pattern: tasks send further tasks while still
    /// running, so the drain wait in `shutdown` must not fire early.
    #[test]
    fn tasks_can_send_further_tasks() {
        fn fan_out(sender: &TaskSender, counter: &Arc<AtomicUsize>, depth: u32) {
            counter.fetch_add(1, Ordering::SeqCst);
            if depth == 0 {
                return;
            }
            for _ in 0..3 {
                let s = sender.clone();
                let c = counter.clone();
                sender.send(Task::new(move || fan_out(&s, &c, depth - 1)));
            }
        }

        let pool = ThreadPool::new(2);
        let sender = pool.sender();
        let counter = Arc::new(AtomicUsize::new(0));

        {
            let s = sender.clone();
            let c = counter.clone();
            sender.send(Task::new(move || fan_out(&s, &c, 2)));
        }
        pool.shutdown();

        // 1 root + 3 children + 9 grandchildren.
        assert_eq!(counter.load(Ordering::SeqCst), 13);
    }

    #[test]
    fn shutdown_on_idle_pool_returns() {
        ThreadPool::new(4).shutdown();
    }

    #[test]
    fn drop_without_shutdown_joins_workers() {
        let pool = ThreadPool::new(2);
        let sender = pool.sender();
        let counter = Arc::new(AtomicUsize::new(0));
        let c = counter.clone();
        sender.send(Task::new(move || {
            c.fetch_add(1, Ordering::SeqCst);
        }));
        drop(pool);
        // Dropping joins the workers, which run down the queue first.
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn single_worker_preserves_fifo_order() {
        let pool = ThreadPool::new(1);
        let sender = pool.sender();
        let order = Arc::new(Mutex::new(Vec::new()));

        for i in 0..10 {
            let o = order.clone();
            sender.send(Task::new(move || o.lock().unwrap().push(i)));
        }
        pool.shutdown();

        assert_eq!(*order.lock().unwrap(), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn workers_block_until_work_arrives() {
        let pool = ThreadPool::new(2);
        let sender = pool.sender();
        let counter = Arc::new(AtomicUsize::new(0));

        // Let the workers reach their blocking wait before any task exists.
        std::thread::sleep(Duration::from_millis(50));
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        let c = counter.clone();
        sender.send(Task::new(move || {
            c.fetch_add(1, Ordering::SeqCst);
        }));
        pool.shutdown();

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    struct DropFlag(Arc<AtomicUsize>);

    impl Drop for DropFlag {
        fn drop(&mut self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn unrun_task_releases_captures_on_drop() {
        let drops = Arc::new(AtomicUsize::new(0));
        let flag = DropFlag(drops.clone());
        let task = Task::new(move || drop(flag));

        drop(task);
        assert_eq!(drops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn executed_task_releases_captures_exactly_once() {
        let drops = Arc::new(AtomicUsize::new(0));
        let pool = ThreadPool::new(1);
        let sender = pool.sender();

        let flag = DropFlag(drops.clone());
        sender.send(Task::new(move || drop(flag)));
        pool.shutdown();

        assert_eq!(drops.load(Ordering::SeqCst), 1);
    }

    #[test]
    #[should_panic(expected = "at least one worker")]
    fn zero_threads_is_a_bug() {
        let _ = ThreadPool::new(0);
    }
}
