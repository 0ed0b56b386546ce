//! A stream fed by an imperative producer.
//!
//! A [`Queue`] pairs every produced event with one request for the next
//! item, in FIFO order on both sides. Events pushed before anyone asked for
//! them are buffered; requests made before anything was pushed wait.
//!
//! # Examples
//!
//! ```
//! use futures_arrival::stream::from_queue;
//! use futures_lite::future::block_on;
//!
//! block_on(async {
//!     let queue = from_queue::<u8, std::io::Error>();
//!     queue.push(1).unwrap();
//!     queue.push(2).unwrap();
//!     queue.end();
//!
//!     assert_eq!(queue.next().await.unwrap().unwrap(), 1);
//!     assert_eq!(queue.next().await.unwrap().unwrap(), 2);
//!     assert!(queue.next().await.is_none());
//! })
//! ```

mod error;

pub use error::PushError;

use core::fmt;
use futures_core::Stream;
use slab::Slab;
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll, Waker};
use tracing::{debug, trace};

/// Create a new, empty queue.
///
/// This is the same as [`Queue::new`].
pub fn from_queue<T, E>() -> Queue<T, E> {
    Queue::new()
}

/// The state of a single request for the next item.
enum Slot<T, E> {
    /// Nothing has been produced for this request yet.
    Waiting(Option<Waker>),
    /// The request was answered, but its owner hasn't observed it yet.
    /// `None` means the queue ended.
    Settled(Option<Result<T, E>>),
}

struct Shared<T, E> {
    /// Values and errors nobody has asked for yet.
    buffer: VecDeque<Result<T, E>>,
    /// Keys into `slots` of all requests still waiting, oldest first.
    ///
    /// Either `buffer` or `waiters` is empty at all times.
    waiters: VecDeque<usize>,
    slots: Slab<Slot<T, E>>,
    ended: bool,
    /// Some request has resolved to `None`. From then on every request
    /// resolves to `None` as well.
    completed: bool,
}

impl<T, E> Shared<T, E> {
    /// Hand an event to the oldest waiter, or buffer it.
    fn deliver(&mut self, item: Result<T, E>) -> Option<Waker> {
        debug_assert!(self.buffer.is_empty() || self.waiters.is_empty());
        match self.waiters.pop_front() {
            Some(key) => self.settle(key, Some(item)),
            None => {
                self.buffer.push_back(item);
                None
            }
        }
    }

    /// Answer a waiting request. Returns the waker to call once the lock has
    /// been released.
    fn settle(&mut self, key: usize, outcome: Option<Result<T, E>>) -> Option<Waker> {
        let slot = self.slots.get_mut(key)?;
        debug_assert!(matches!(slot, Slot::Waiting(_)), "only waiting requests are queued");
        if let Slot::Waiting(waker) = slot {
            let waker = waker.take();
            *slot = Slot::Settled(outcome);
            waker
        } else {
            None
        }
    }

    fn poll_request(
        &mut self,
        key: &mut Option<usize>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<T, E>>> {
        if let Some(k) = *key {
            if let Some(Slot::Waiting(waker)) = self.slots.get_mut(k) {
                if !waker.as_ref().is_some_and(|w| w.will_wake(cx.waker())) {
                    *waker = Some(cx.waker().clone());
                }
                return Poll::Pending;
            }

            *key = None;
            return match self.slots.try_remove(k) {
                Some(Slot::Settled(Some(item))) => Poll::Ready(Some(item)),
                _ => {
                    self.completed = true;
                    Poll::Ready(None)
                }
            };
        }

        if self.completed {
            return Poll::Ready(None);
        }
        if let Some(item) = self.buffer.pop_front() {
            return Poll::Ready(Some(item));
        }
        if self.ended {
            self.completed = true;
            return Poll::Ready(None);
        }

        let k = self.slots.insert(Slot::Waiting(Some(cx.waker().clone())));
        self.waiters.push_back(k);
        *key = Some(k);
        Poll::Pending
    }

    /// Withdraw a request. An event which was already handed to it moves on
    /// to the next waiter, or back to the front of the buffer. Once the queue
    /// has completed nobody can receive it anymore, and it is dropped.
    fn cancel(&mut self, key: usize) -> Option<Waker> {
        match self.slots.try_remove(key)? {
            Slot::Waiting(_) => {
                self.waiters.retain(|&k| k != key);
                None
            }
            Slot::Settled(Some(item)) => match self.waiters.pop_front() {
                Some(next) => self.settle(next, Some(item)),
                None if self.completed => {
                    debug!("discarded an event withdrawn after the queue completed");
                    None
                }
                None => {
                    self.buffer.push_front(item);
                    None
                }
            },
            Slot::Settled(None) => None,
        }
    }
}

/// An asynchronous queue which can be consumed as a [`Stream`].
///
/// The producer side calls [`push`], [`push_error`] and [`end`]; the consumer
/// side calls [`next`] or polls the queue as a stream. Each pushed value or
/// error answers exactly one request, in the order they were pushed. An error
/// does not end the queue: values pushed after it are still delivered.
///
/// Cloning a `Queue` creates another handle to the same queue, so the
/// producer and the consumer can live in different tasks.
///
/// Once [`end`] has been called and all buffered events were consumed, every
/// request resolves to `None`. Pushing after [`end`] is rejected with a
/// [`PushError`].
///
/// [`push`]: Queue::push
/// [`push_error`]: Queue::push_error
/// [`end`]: Queue::end
/// [`next`]: Queue::next
#[must_use = "a queue does nothing unless consumed"]
pub struct Queue<T, E> {
    shared: Arc<Mutex<Shared<T, E>>>,
    /// The request made by polling this handle as a `Stream`.
    pending: Option<usize>,
}

impl<T, E> Queue<T, E> {
    /// Create a new, empty queue.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a new, empty queue which can buffer `capacity` events without
    /// reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        let shared = Shared {
            buffer: VecDeque::with_capacity(capacity),
            waiters: VecDeque::new(),
            slots: Slab::new(),
            ended: false,
            completed: false,
        };
        Self {
            shared: Arc::new(Mutex::new(shared)),
            pending: None,
        }
    }

    // Queue state is consistent between calls, so a poisoned lock is still
    // safe to use. `Drop` impls take this lock too.
    fn lock(&self) -> MutexGuard<'_, Shared<T, E>> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn send<I>(&self, item: I, event: fn(I) -> Result<T, E>) -> Result<(), PushError<I>> {
        let waker = {
            let mut shared = self.lock();
            if shared.ended {
                debug!("rejected push onto an ended queue");
                return Err(PushError(item));
            }
            shared.deliver(event(item))
        };
        if let Some(waker) = waker {
            waker.wake();
        }
        Ok(())
    }

    /// Push a value onto the queue.
    ///
    /// The oldest waiting request receives the value right away. If nobody is
    /// waiting, the value is buffered.
    ///
    /// # Errors
    ///
    /// Returns the value back inside a [`PushError`] if the queue has ended.
    pub fn push(&self, value: T) -> Result<(), PushError<T>> {
        self.send(value, Ok)
    }

    /// Push an error onto the queue.
    ///
    /// The error fails exactly one request: the oldest waiting one, or the
    /// first one made after all events buffered ahead of it. The queue stays
    /// open afterwards.
    ///
    /// # Errors
    ///
    /// Returns the error back inside a [`PushError`] if the queue has ended.
    pub fn push_error(&self, error: E) -> Result<(), PushError<E>> {
        self.send(error, Err)
    }

    /// Mark the queue as ended.
    ///
    /// Requests which are waiting resolve to `None`. If events are still
    /// buffered they are delivered first, and requests made after that
    /// resolve to `None`. Calling `end` more than once has no effect.
    pub fn end(&self) {
        let wakers: Vec<Waker> = {
            let mut shared = self.lock();
            if shared.ended {
                return;
            }
            shared.ended = true;
            trace!(waiters = shared.waiters.len(), buffered = shared.buffer.len(), "queue ended");

            // Waiters only exist while nothing is buffered, so they all
            // complete now.
            shared.completed |= !shared.waiters.is_empty();
            let mut wakers = Vec::with_capacity(shared.waiters.len());
            while let Some(key) = shared.waiters.pop_front() {
                wakers.extend(shared.settle(key, None));
            }
            wakers
        };
        wakers.into_iter().for_each(Waker::wake);
    }

    /// Request the next item from the queue.
    ///
    /// Resolves to `Some(Ok(value))` for a pushed value, `Some(Err(error))`
    /// for a pushed error, and `None` once the queue has ended and is drained.
    /// Multiple requests may be outstanding at once; they are answered in the
    /// order they were first polled.
    pub fn next(&self) -> Next<'_, T, E> {
        Next {
            queue: self,
            key: None,
        }
    }

    /// Returns the number of buffered events nobody has asked for yet.
    pub fn len(&self) -> usize {
        self.lock().buffer.len()
    }

    /// Returns `true` if no events are buffered.
    pub fn is_empty(&self) -> bool {
        self.lock().buffer.is_empty()
    }

    /// Returns `true` if [`end`](Queue::end) has been called.
    pub fn is_ended(&self) -> bool {
        self.lock().ended
    }

    fn cancel(&self, key: usize) {
        let waker = self.lock().cancel(key);
        if let Some(waker) = waker {
            waker.wake();
        }
    }
}

impl<T, E> Default for Queue<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> Clone for Queue<T, E> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
            pending: None,
        }
    }
}

impl<T, E> Drop for Queue<T, E> {
    fn drop(&mut self) {
        if let Some(key) = self.pending.take() {
            self.cancel(key);
        }
    }
}

impl<T, E> fmt::Debug for Queue<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (buffered, waiters, ended) = {
            let shared = self.lock();
            (shared.buffer.len(), shared.waiters.len(), shared.ended)
        };
        f.debug_struct("Queue")
            .field("buffered", &buffered)
            .field("waiters", &waiters)
            .field("ended", &ended)
            .finish()
    }
}

impl<T, E> Stream for Queue<T, E> {
    type Item = Result<T, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        let mut shared = this.shared.lock().unwrap_or_else(PoisonError::into_inner);
        shared.poll_request(&mut this.pending, cx)
    }
}

/// A request for the next item of a [`Queue`].
///
/// This `struct` is created by the [`next`] method on [`Queue`]. See its
/// documentation for more.
///
/// [`next`]: Queue::next
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct Next<'a, T, E> {
    queue: &'a Queue<T, E>,
    key: Option<usize>,
}

impl<T, E> Future for Next<'_, T, E> {
    type Output = Option<Result<T, E>>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        let mut shared = this.queue.lock();
        shared.poll_request(&mut this.key, cx)
    }
}

impl<T, E> Drop for Next<'_, T, E> {
    fn drop(&mut self) {
        if let Some(key) = self.key.take() {
            self.queue.cancel(key);
        }
    }
}

impl<T, E> fmt::Debug for Next<'_, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next")
            .field("waiting", &self.key.is_some())
            .finish()
    }
}
