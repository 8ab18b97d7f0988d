//! Background write queue
//!
//! Mutations update in-memory state synchronously; persistence happens on a
//! dedicated writer thread so callers never block on storage I/O. The queue
//! keeps at most one pending write per key: a newer snapshot for a key
//! supersedes a queued-but-not-yet-started older one, and only one write is
//! ever in flight, so the last logical state always wins regardless of how
//! slow the backing store is.
//!
//! Write failures are logged and swallowed; the in-memory collections
//! remain the source of truth for the running session.

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use tracing::warn;

use super::KeyValueStore;

struct Job {
    key: String,
    value: String,
}

#[derive(Default)]
struct State {
    queue: VecDeque<Job>,
    in_flight: bool,
    shutdown: bool,
}

struct Shared {
    state: Mutex<State>,
    signal: Condvar,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Serialized, coalescing write queue over a [`KeyValueStore`]
pub struct WriteQueue {
    shared: Arc<Shared>,
    worker: Option<JoinHandle<()>>,
}

impl WriteQueue {
    /// Start the writer thread for `store`
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let shared = Arc::new(Shared {
            state: Mutex::new(State::default()),
            signal: Condvar::new(),
        });

        let worker_shared = Arc::clone(&shared);
        let worker = thread::spawn(move || worker_loop(worker_shared, store));

        Self {
            shared,
            worker: Some(worker),
        }
    }

    /// Queue a write of `value` under `key`
    ///
    /// If a write for the same key is queued but not yet started, the newer
    /// value replaces it in place.
    pub fn submit(&self, key: &str, value: String) {
        let mut state = self.shared.lock();
        if state.shutdown {
            return;
        }
        if let Some(job) = state.queue.iter_mut().find(|job| job.key == key) {
            job.value = value;
        } else {
            state.queue.push_back(Job {
                key: key.to_string(),
                value,
            });
        }
        self.shared.signal.notify_all();
    }

    /// Block until every queued write has completed
    pub fn flush(&self) {
        let mut state = self.shared.lock();
        while !state.queue.is_empty() || state.in_flight {
            state = self
                .shared
                .signal
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }
}

impl Drop for WriteQueue {
    fn drop(&mut self) {
        {
            let mut state = self.shared.lock();
            state.shutdown = true;
            self.shared.signal.notify_all();
        }
        // The worker drains the queue before exiting
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn worker_loop(shared: Arc<Shared>, store: Arc<dyn KeyValueStore>) {
    loop {
        let job = {
            let mut state = shared.lock();
            loop {
                if let Some(job) = state.queue.pop_front() {
                    state.in_flight = true;
                    break job;
                }
                if state.shutdown {
                    shared.signal.notify_all();
                    return;
                }
                state = shared
                    .signal
                    .wait(state)
                    .unwrap_or_else(PoisonError::into_inner);
            }
        };

        if let Err(e) = store.set(&job.key, &job.value) {
            warn!(key = %job.key, error = %e, "persistence write failed");
        }

        let mut state = shared.lock();
        state.in_flight = false;
        shared.signal.notify_all();
    }
}
