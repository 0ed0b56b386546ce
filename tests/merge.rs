use async_stream::stream;
use futures_arrival::prelude::*;
use futures_arrival::stream::{from_queue, merge, try_merge, Queue};
use futures_lite::StreamExt;
use std::io;
use std::pin::pin;
use tokio::time::{sleep, Duration};

#[tokio::test(start_paused = true)]
async fn merging_streams_in_arrival_order() {
    let numbers = stream! {
        sleep(Duration::from_millis(100)).await;
        yield 1;
        yield 2;
        sleep(Duration::from_millis(100)).await;
        yield 3;
    };

    let other_numbers = stream! {
        yield 42;
        sleep(Duration::from_millis(150)).await;
        yield 43;
        yield 44;
    };

    let mut s = pin!((numbers, other_numbers).merge());

    assert_eq!(s.next().await, Some(42));
    assert_eq!(s.next().await, Some(1));
    assert_eq!(s.next().await, Some(2));
    assert_eq!(s.next().await, Some(43));
    assert_eq!(s.next().await, Some(44));
    assert_eq!(s.next().await, Some(3));
    assert_eq!(s.next().await, None);
    assert_eq!(s.next().await, None);
}

#[tokio::test(start_paused = true)]
async fn propagating_errors() {
    let numbers = stream! {
        sleep(Duration::from_millis(100)).await;
        yield Ok::<_, io::Error>(1);
    };

    let error = stream! {
        yield Err::<i32, _>(io::Error::other("Something Wrong"));
    };

    let mut s = pin!((numbers, error).try_merge());

    let err = s.next().await.unwrap().unwrap_err();
    assert_eq!(err.to_string(), "Something Wrong");

    // A failed merge stays ended, even though `numbers` would still yield.
    assert!(s.next().await.is_none());
    assert!(s.next().await.is_none());
}

#[tokio::test(start_paused = true)]
async fn yields_every_value_once() {
    let sources: Vec<_> = (1..=5u64)
        .map(|n| {
            Box::pin(stream! {
                for i in 0..n {
                    sleep(Duration::from_millis(10 * (6 - n))).await;
                    yield n * 100 + i;
                }
            })
        })
        .collect();

    let mut values: Vec<u64> = merge(sources).collect().await;
    values.sort_unstable();

    let mut expected: Vec<u64> = (1..=5u64)
        .flat_map(|n| (0..n).map(move |i| n * 100 + i))
        .collect();
    expected.sort_unstable();
    assert_eq!(values, expected);
}

#[tokio::test]
async fn merging_nothing() {
    let mut s = merge(Vec::<Queue<u8, ()>>::new());
    assert_eq!(s.next().await, None);
    assert_eq!(s.next().await, None);

    let mut s = try_merge(Vec::<Queue<u8, ()>>::new());
    assert_eq!(s.next().await, None);
}

#[tokio::test(start_paused = true)]
async fn stalled_source_does_not_block_others() {
    let stalled = futures_lite::stream::pending::<u8>();
    let ticking = stream! {
        for i in 0..3u8 {
            sleep(Duration::from_millis(50)).await;
            yield i;
        }
    };

    let mut s = pin!(stalled.merge(ticking));
    assert_eq!(s.next().await, Some(0));
    assert_eq!(s.next().await, Some(1));
    assert_eq!(s.next().await, Some(2));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn merging_queues_fed_from_other_tasks() {
    let queues: Vec<Queue<u32, ()>> = (0..4).map(|_| from_queue()).collect();

    let producers: Vec<_> = queues
        .iter()
        .cloned()
        .enumerate()
        .map(|(n, queue)| {
            tokio::spawn(async move {
                for i in 0..25 {
                    queue.push(n as u32 * 1000 + i).unwrap();
                    tokio::task::yield_now().await;
                }
                queue.end();
            })
        })
        .collect();

    let mut values: Vec<u32> = queues
        .merge()
        .map(Result::unwrap)
        .collect()
        .await;

    for producer in producers {
        producer.await.unwrap();
    }

    assert_eq!(values.len(), 100);
    values.sort_unstable();
    values.dedup();
    assert_eq!(values.len(), 100);
}
