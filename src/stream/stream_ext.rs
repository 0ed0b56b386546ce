use crate::stream::{IntoStream, Merge, TryMerge, TryMergeStream};
use futures_core::Stream;

use super::merge::tuple::Merge2;

/// An extension trait for the `Stream` trait.
pub trait StreamExt: Stream {
    /// Combines two streams into a single stream of all their outputs, in
    /// arrival order.
    ///
    /// # Examples
    ///
    /// ```
    /// use futures_arrival::prelude::*;
    /// use futures_lite::future::block_on;
    /// use futures_lite::{stream, StreamExt as _};
    ///
    /// block_on(async {
    ///     let a = stream::once(1u8);
    ///     let b = stream::once(2u8);
    ///
    ///     let mut buf: Vec<u8> = a.merge(b).collect().await;
    ///     buf.sort_unstable();
    ///     assert_eq!(&buf, &[1u8, 2u8]);
    /// })
    /// ```
    fn merge<S2>(self, other: S2) -> Merge2<Self, S2::IntoStream>
    where
        Self: Sized,
        S2: IntoStream<Item = Self::Item>;

    /// Combines two fallible streams into a single stream, ending after the
    /// first error either of them yields.
    fn try_merge<T, E, S2>(self, other: S2) -> TryMergeStream<Merge2<Self, S2::IntoStream>>
    where
        Self: Stream<Item = Result<T, E>> + Sized,
        S2: IntoStream<Item = Result<T, E>>;
}

impl<S1> StreamExt for S1
where
    S1: Stream,
{
    fn merge<S2>(self, other: S2) -> Merge2<S1, S2::IntoStream>
    where
        S2: IntoStream<Item = S1::Item>,
    {
        Merge::merge((self, other))
    }

    fn try_merge<T, E, S2>(self, other: S2) -> TryMergeStream<Merge2<S1, S2::IntoStream>>
    where
        S1: Stream<Item = Result<T, E>>,
        S2: IntoStream<Item = Result<T, E>>,
    {
        TryMerge::try_merge((self, other))
    }
}
