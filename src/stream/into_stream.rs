use futures_core::Stream;

/// Conversion into a [`Stream`].
///
/// Every merge operation accepts its sources through this trait, so any type
/// which knows how to become a stream can be merged directly. All streams
/// convert into themselves.
pub trait IntoStream {
    /// The type of the items the stream yields.
    type Item;

    /// The stream this value turns into.
    type IntoStream: Stream<Item = Self::Item>;

    /// Creates a stream from a value.
    fn into_stream(self) -> Self::IntoStream;
}

impl<S: Stream> IntoStream for S {
    type Item = S::Item;
    type IntoStream = S;

    #[inline]
    fn into_stream(self) -> S {
        self
    }
}
