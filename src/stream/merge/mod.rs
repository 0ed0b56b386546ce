use futures_core::Stream;

use crate::stream::IntoStream;

pub(crate) mod array;
pub(crate) mod state;
pub(crate) mod tuple;
pub(crate) mod vec;

/// Combines multiple streams into a single stream of all their outputs.
///
/// Items are yielded in the order they arrive: whichever source was woken
/// first is polled first, and the merged stream keeps yielding until every
/// source has been exhausted. Items from a single source keep their
/// original order. Once exhausted, the merged stream keeps returning `None`.
///
/// # Examples
///
/// ```
/// use futures_arrival::prelude::*;
/// use futures_lite::stream::{self, StreamExt};
/// use futures_lite::future::block_on;
///
/// block_on(async {
///     let a = stream::once(1);
///     let b = stream::once(2);
///     let c = stream::once(3);
///     let mut s = [a, b, c].merge();
///
///     let mut buf = vec![];
///     s.for_each(|n| buf.push(n)).await;
///     buf.sort_unstable();
///     assert_eq!(&buf, &[1, 2, 3]);
/// })
/// ```
pub trait Merge {
    /// The resulting output type.
    type Item;

    /// The stream type.
    type Stream: Stream<Item = Self::Item>;

    /// Combine multiple streams into a single stream.
    fn merge(self) -> Self::Stream;
}

/// Merge any number of streams of the same type into one stream.
///
/// Merging zero streams yields a stream which is immediately exhausted.
///
/// # Examples
///
/// ```
/// use futures_arrival::stream;
/// use futures_lite::future::block_on;
/// use futures_lite::StreamExt;
///
/// block_on(async {
///     let sources = (0..4).map(|n| futures_lite::stream::once(n));
///     let total: i32 = stream::merge(sources).fold(0, |a, b| a + b).await;
///     assert_eq!(total, 6);
/// })
/// ```
pub fn merge<I>(streams: I) -> vec::Merge<<I::Item as IntoStream>::IntoStream>
where
    I: IntoIterator,
    I::Item: IntoStream,
{
    vec::Merge::new(streams.into_iter().map(|s| s.into_stream()).collect())
}
