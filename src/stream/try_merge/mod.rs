use crate::stream::{IntoStream, Merge};

use futures_core::Stream;
use futures_lite::ready;
use pin_project::pin_project;
use std::pin::Pin;
use std::task::{Context, Poll};
use tracing::debug;

use super::merge::vec;

/// Combines multiple fallible streams into a single stream, stopping at the
/// first error.
///
/// Values are yielded in arrival order, exactly like [`Merge`]. The first
/// `Err` produced by any source is yielded right away, after which the merged
/// stream is exhausted: it returns `None` on every later call and never polls
/// its sources again.
///
/// # Examples
///
/// ```
/// use futures_arrival::prelude::*;
/// use futures_lite::future::block_on;
/// use futures_lite::stream::{self, StreamExt};
///
/// block_on(async {
///     let a = stream::pending::<Result<u8, &str>>();
///     let b = stream::once(Err("Something Wrong"));
///     let mut s = (a, b).try_merge();
///
///     assert_eq!(s.next().await, Some(Err("Something Wrong")));
///     assert_eq!(s.next().await, None);
/// })
/// ```
pub trait TryMerge {
    /// The type of the values yielded by the sources.
    type Ok;

    /// The type of the errors yielded by the sources.
    type Error;

    /// The stream type.
    type Stream: Stream<Item = Result<Self::Ok, Self::Error>>;

    /// Combine multiple fallible streams into a single stream.
    fn try_merge(self) -> Self::Stream;
}

impl<M, T, E> TryMerge for M
where
    M: Merge<Item = Result<T, E>>,
{
    type Ok = T;
    type Error = E;
    type Stream = TryMergeStream<M::Stream>;

    fn try_merge(self) -> Self::Stream {
        TryMergeStream::new(self.merge())
    }
}

/// Merge any number of fallible streams of the same type, stopping at the
/// first error.
pub fn try_merge<I, T, E>(streams: I) -> TryMergeStream<vec::Merge<<I::Item as IntoStream>::IntoStream>>
where
    I: IntoIterator,
    I::Item: IntoStream<Item = Result<T, E>>,
{
    TryMergeStream::new(super::merge(streams))
}

/// A merged stream which ends after yielding its first error.
///
/// This `struct` is created by the [`try_merge`] method on the [`TryMerge`]
/// trait. See its documentation for more.
///
/// [`try_merge`]: TryMerge::try_merge
#[pin_project]
#[derive(Debug)]
#[must_use = "streams do nothing unless polled"]
pub struct TryMergeStream<S> {
    #[pin]
    stream: S,
    done: bool,
}

impl<S> TryMergeStream<S> {
    pub(crate) fn new(stream: S) -> Self {
        Self {
            stream,
            done: false,
        }
    }
}

impl<S, T, E> Stream for TryMergeStream<S>
where
    S: Stream<Item = Result<T, E>>,
{
    type Item = Result<T, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        if *this.done {
            return Poll::Ready(None);
        }

        match ready!(this.stream.poll_next(cx)) {
            Some(Ok(item)) => Poll::Ready(Some(Ok(item))),
            Some(Err(err)) => {
                debug!("merge source failed, ending merged stream");
                *this.done = true;
                Poll::Ready(Some(Err(err)))
            }
            None => {
                *this.done = true;
                Poll::Ready(None)
            }
        }
    }
}
