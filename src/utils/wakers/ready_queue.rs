use fixedbitset::FixedBitSet;
use std::collections::VecDeque;
use std::task::Waker;

/// Tracks which indexes have been woken, in the order they were woken.
///
/// Every index is queued at most once. Popping an index hands it back to the
/// caller, which is then responsible for polling it.
#[derive(Debug)]
pub(crate) struct ReadyQueue {
    queued: FixedBitSet,
    order: VecDeque<usize>,
    parent_waker: Option<Waker>,
}

impl ReadyQueue {
    /// Create a new queue with all indexes `0..len` marked as ready, in order.
    pub(crate) fn new(len: usize) -> Self {
        let mut queued = FixedBitSet::with_capacity(len);
        queued.insert_range(..);
        Self {
            queued,
            order: (0..len).collect(),
            parent_waker: None,
        }
    }

    /// Queue an index at the back.
    ///
    /// Returns `true` if the index was not already queued.
    pub(crate) fn push(&mut self, index: usize) -> bool {
        if self.queued.put(index) {
            false
        } else {
            self.order.push_back(index);
            true
        }
    }

    /// Take the index which was woken the longest time ago.
    pub(crate) fn pop(&mut self) -> Option<usize> {
        let index = self.order.pop_front()?;
        self.queued.set(index, false);
        Some(index)
    }

    /// Returns `true` if no index is waiting to be polled.
    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Access the parent waker.
    #[inline]
    pub(crate) fn parent_waker(&self) -> Option<&Waker> {
        self.parent_waker.as_ref()
    }

    /// Set the parent `Waker`. This needs to be called at the start of every
    /// `poll` function.
    pub(crate) fn set_waker(&mut self, parent_waker: &Waker) {
        match &mut self.parent_waker {
            Some(prev) => prev.clone_from(parent_waker),
            None => self.parent_waker = Some(parent_waker.clone()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn starts_in_index_order() {
        let mut queue = ReadyQueue::new(3);
        assert_eq!(queue.pop(), Some(0));
        assert_eq!(queue.pop(), Some(1));
        assert_eq!(queue.pop(), Some(2));
        assert_eq!(queue.pop(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn pops_in_wake_order() {
        let mut queue = ReadyQueue::new(4);
        while queue.pop().is_some() {}

        assert!(queue.push(3));
        assert!(queue.push(1));
        assert!(queue.push(2));
        assert_eq!(queue.pop(), Some(3));
        assert_eq!(queue.pop(), Some(1));
        assert_eq!(queue.pop(), Some(2));
    }

    #[test]
    fn deduplicates_wakes() {
        let mut queue = ReadyQueue::new(2);
        while queue.pop().is_some() {}

        assert!(queue.push(1));
        assert!(!queue.push(1));
        assert!(queue.push(0));
        assert_eq!(queue.pop(), Some(1));
        assert_eq!(queue.pop(), Some(0));
        assert_eq!(queue.pop(), None);

        // Once popped an index may be queued again.
        assert!(queue.push(1));
    }
}
