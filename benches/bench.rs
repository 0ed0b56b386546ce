use criterion::{black_box, criterion_group, criterion_main, Criterion};
use futures_arrival::prelude::*;
use futures_arrival::stream::from_queue;
use futures_core::Stream;
use futures_lite::future::block_on;
use futures_lite::prelude::*;

use std::cell::{Cell, RefCell};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("merge 10", |b| b.iter(|| merge_test(black_box(10))));
    c.bench_function("merge 100", |b| b.iter(|| merge_test(black_box(100))));
    c.bench_function("merge 1000", |b| b.iter(|| merge_test(black_box(1000))));
    c.bench_function("queue 1000", |b| b.iter(|| queue_test(black_box(1000))));
    c.bench_function("merge queues 10x100", |b| {
        b.iter(|| merge_queues_test(black_box(10), black_box(100)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

fn merge_test(max: usize) {
    block_on(async {
        let wakers = Rc::new(RefCell::new(BinaryHeap::new()));
        let completed = Rc::new(Cell::new(0));
        let streams: Vec<_> = (0..max)
            .map(|n| Countdown::new(n, max, wakers.clone(), completed.clone()))
            .collect();
        let mut s = streams.merge();

        let mut counter = 0;
        while s.next().await.is_some() {
            counter += 1;
        }
        assert_eq!(counter, max);
    })
}

fn queue_test(max: usize) {
    block_on(async {
        let queue = from_queue::<usize, ()>();
        for i in 0..max {
            queue.push(i).unwrap();
        }
        queue.end();

        let mut counter = 0;
        while queue.next().await.is_some() {
            counter += 1;
        }
        assert_eq!(counter, max);
    })
}

fn merge_queues_test(sources: usize, items: usize) {
    block_on(async {
        let queues: Vec<_> = (0..sources).map(|_| from_queue::<usize, ()>()).collect();
        let mut s = queues.clone().merge();

        for i in 0..items {
            for queue in &queues {
                queue.push(i).unwrap();
            }
        }
        for queue in &queues {
            queue.end();
        }

        let mut counter = 0;
        while s.next().await.is_some() {
            counter += 1;
        }
        assert_eq!(counter, sources * items);
    })
}

/// A waker tagged with the index of its stream. The lowest index is popped
/// off the `BinaryHeap` first.
struct PrioritizedWaker(usize, Waker);

impl PartialEq for PrioritizedWaker {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for PrioritizedWaker {}

impl PartialOrd for PrioritizedWaker {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PrioritizedWaker {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0).reverse()
    }
}

#[derive(Clone, Copy)]
enum State {
    Init,
    Polled,
    Done,
}

/// A stream which will _eventually_ be ready, but needs to be polled N times before it is.
///
/// Stream `n` only yields once streams `0..n` have yielded.
struct Countdown {
    state: State,
    wakers: Rc<RefCell<BinaryHeap<PrioritizedWaker>>>,
    index: usize,
    max_count: usize,
    completed_count: Rc<Cell<usize>>,
}

impl Countdown {
    fn new(
        index: usize,
        max_count: usize,
        wakers: Rc<RefCell<BinaryHeap<PrioritizedWaker>>>,
        completed_count: Rc<Cell<usize>>,
    ) -> Self {
        Self {
            state: State::Init,
            wakers,
            max_count,
            index,
            completed_count,
        }
    }
}

impl Stream for Countdown {
    type Item = ();

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        // The last stream to be polled skips straight to the `Polled` state.
        if matches!(this.state, State::Init) && this.wakers.borrow().len() + 1 == this.max_count {
            this.state = State::Polled;
        }

        match this.state {
            State::Init => {
                this.wakers
                    .borrow_mut()
                    .push(PrioritizedWaker(this.index, cx.waker().clone()));
                this.state = State::Polled;
                Poll::Pending
            }
            State::Polled => {
                // Wake up the next one
                let _ = this
                    .wakers
                    .borrow_mut()
                    .pop()
                    .map(|PrioritizedWaker(_, waker)| waker.wake());

                if this.completed_count.get() == this.index {
                    this.state = State::Done;
                    this.completed_count.set(this.index + 1);
                    Poll::Ready(Some(()))
                } else {
                    this.wakers
                        .borrow_mut()
                        .push(PrioritizedWaker(this.index, cx.waker().clone()));
                    Poll::Pending
                }
            }
            State::Done => Poll::Ready(None),
        }
    }
}
