use std::sync::{Arc, Mutex};
use std::task::{Wake, Waker};

use super::ReadyQueue;

/// A waker which queues its own index before waking the parent task.
#[derive(Debug, Clone)]
pub(crate) struct IndexWaker {
    pub(crate) index: usize,
    pub(crate) ready: Arc<Mutex<ReadyQueue>>,
}

impl IndexWaker {
    /// Create a new instance of `IndexWaker`.
    pub(crate) fn new(index: usize, ready: Arc<Mutex<ReadyQueue>>) -> Self {
        Self { index, ready }
    }
}

impl Wake for IndexWaker {
    fn wake(self: Arc<Self>) {
        self.wake_by_ref()
    }

    fn wake_by_ref(self: &Arc<Self>) {
        let mut ready = self.ready.lock().unwrap();
        // Only the first wake of a queued index needs to reach the parent.
        if ready.push(self.index) {
            if let Some(parent) = ready.parent_waker() {
                parent.wake_by_ref();
            }
        }
    }
}

/// A collection of wakers which report to a shared `ReadyQueue`.
pub(crate) struct WakerQueue {
    wakers: Vec<Waker>,
    ready: Arc<Mutex<ReadyQueue>>,
}

impl WakerQueue {
    /// Create a new instance of `WakerQueue`.
    pub(crate) fn new(len: usize) -> Self {
        let ready = Arc::new(Mutex::new(ReadyQueue::new(len)));
        let wakers = (0..len)
            .map(|i| Arc::new(IndexWaker::new(i, ready.clone())).into())
            .collect();
        Self { wakers, ready }
    }

    pub(crate) fn get(&self, index: usize) -> Option<&Waker> {
        self.wakers.get(index)
    }

    /// Access the `ReadyQueue`.
    pub(crate) fn ready(&self) -> &Mutex<ReadyQueue> {
        self.ready.as_ref()
    }

    pub(crate) fn len(&self) -> usize {
        self.wakers.len()
    }
}
