use crate::utils::WakerQueue;

use fixedbitset::FixedBitSet;
use std::task::{Context, Poll};
use tracing::trace;

/// The polling state shared by all merge implementations.
///
/// Sources are polled in the order their wakers fired. A source which just
/// yielded an item is queued again right away, so it is asked for its next
/// item on the following call without waiting for a wakeup.
pub(crate) struct MergeState {
    wakers: WakerQueue,
    completed: FixedBitSet,
    live: usize,
}

impl MergeState {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            wakers: WakerQueue::new(len),
            completed: FixedBitSet::with_capacity(len),
            live: len,
        }
    }

    /// Poll the next ready source through `poll_source`.
    ///
    /// `poll_source` receives the index of the source to poll together with
    /// a context carrying that source's own waker.
    pub(crate) fn poll_next<T, F>(&mut self, cx: &mut Context<'_>, mut poll_source: F) -> Poll<Option<T>>
    where
        F: FnMut(usize, &mut Context<'_>) -> Poll<Option<T>>,
    {
        if self.live == 0 {
            return Poll::Ready(None);
        }

        self.wakers.ready().lock().unwrap().set_waker(cx.waker());

        loop {
            let Some(index) = self.wakers.ready().lock().unwrap().pop() else {
                return Poll::Pending;
            };

            // Wakers may still fire after their source completed.
            if self.completed[index] {
                continue;
            }

            let Some(waker) = self.wakers.get(index) else {
                continue;
            };
            let mut cx = Context::from_waker(waker);

            match poll_source(index, &mut cx) {
                Poll::Ready(Some(item)) => {
                    self.wakers.ready().lock().unwrap().push(index);
                    return Poll::Ready(Some(item));
                }
                Poll::Ready(None) => {
                    self.completed.insert(index);
                    self.live -= 1;
                    trace!(index, live = self.live, "merge source completed");
                    if self.live == 0 {
                        return Poll::Ready(None);
                    }
                }
                Poll::Pending => {}
            }
        }
    }
}

impl std::fmt::Debug for MergeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MergeState")
            .field("sources", &self.wakers.len())
            .field("live", &self.live)
            .finish()
    }
}
