//! A stream of timestamps at a fixed interval.

use async_io::Timer;
use futures_core::Stream;
use futures_lite::ready;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Create a stream which ticks at every multiple of `interval` since the
/// Unix epoch.
///
/// Each item is the wall-clock time of the boundary that was reached. Ticks
/// which were missed because the stream wasn't polled in time are skipped.
///
/// # Panics
///
/// Panics if `interval` is zero.
///
/// # Examples
///
/// ```
/// use futures_arrival::stream::clock;
/// use futures_lite::future::block_on;
/// use futures_lite::StreamExt;
/// use std::time::{Duration, UNIX_EPOCH};
///
/// block_on(async {
///     let mut ticks = clock(Duration::from_millis(10));
///     let tick = ticks.next().await.unwrap();
///     let since_epoch = tick.duration_since(UNIX_EPOCH).unwrap();
///     assert_eq!(since_epoch.as_millis() % 10, 0);
/// })
/// ```
pub fn clock(interval: Duration) -> Clock {
    assert!(!interval.is_zero(), "`clock` interval must be non-zero");
    let (boundary, deadline) = next_boundary(interval);
    Clock {
        interval,
        boundary,
        timer: Timer::at(deadline),
    }
}

/// A stream of timestamps aligned to an interval.
///
/// This `struct` is created by the [`clock`] function. See its documentation
/// for more.
#[derive(Debug)]
#[must_use = "streams do nothing unless polled"]
pub struct Clock {
    interval: Duration,
    boundary: SystemTime,
    timer: Timer,
}

impl Stream for Clock {
    type Item = SystemTime;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        ready!(Pin::new(&mut this.timer).poll(cx));

        let tick = this.boundary;
        let (boundary, deadline) = next_boundary(this.interval);
        let (boundary, deadline) = not_before(tick + this.interval, boundary, deadline);
        this.boundary = boundary;
        this.timer.set_at(deadline);
        Poll::Ready(Some(tick))
    }
}

/// The next multiple of `interval` after now, both as wall-clock time and as
/// a monotonic deadline.
fn next_boundary(interval: Duration) -> (SystemTime, Instant) {
    boundary_after(interval, SystemTime::now(), Instant::now())
}

fn boundary_after(interval: Duration, now: SystemTime, instant: Instant) -> (SystemTime, Instant) {
    let since_epoch = now.duration_since(UNIX_EPOCH).unwrap_or_default();
    let interval_nanos = interval.as_nanos();
    let wait = from_nanos(interval_nanos - since_epoch.as_nanos() % interval_nanos);
    (now + wait, instant + wait)
}

/// Push a boundary forward to `earliest` if the wall clock lags behind the
/// timer, so the same tick is never yielded twice.
fn not_before(earliest: SystemTime, boundary: SystemTime, deadline: Instant) -> (SystemTime, Instant) {
    match earliest.duration_since(boundary) {
        Ok(lag) => (earliest, deadline + lag),
        Err(_) => (boundary, deadline),
    }
}

fn from_nanos(nanos: u128) -> Duration {
    const NANOS_PER_SEC: u128 = 1_000_000_000;
    Duration::new((nanos / NANOS_PER_SEC) as u64, (nanos % NANOS_PER_SEC) as u32)
}
