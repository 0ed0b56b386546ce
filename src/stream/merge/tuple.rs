use super::state::MergeState;
use super::Merge as MergeTrait;
use crate::stream::IntoStream;

use core::fmt;
use futures_core::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Count the number of token trees passed in.
macro_rules! count {
    () => (0);
    ($head:tt $($tail:tt)*) => (1 + count!($($tail)*));
}

macro_rules! impl_merge_tuple {
    ($StructName:ident $($F:ident $idx:tt)+) => {
        /// A stream that merges the streams of a tuple into a single stream.
        ///
        /// This `struct` is created by the [`merge`] method on the [`Merge`] trait. See its
        /// documentation for more.
        ///
        /// [`merge`]: crate::stream::Merge::merge
        /// [`Merge`]: crate::stream::Merge
        #[pin_project::pin_project]
        #[must_use = "streams do nothing unless polled"]
        pub struct $StructName<$($F),+> {
            #[pin]
            streams: ($($F,)+),
            state: MergeState,
        }

        impl<$($F),+> fmt::Debug for $StructName<$($F),+>
        where
            $($F: fmt::Debug,)+
        {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($StructName))
                    $(.field(&self.streams.$idx))+
                    .finish()
            }
        }

        impl<T, $($F),+> Stream for $StructName<$($F),+>
        where
            $($F: Stream<Item = T>,)+
        {
            type Item = T;

            fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
                let this = self.project();
                // SAFETY: we're manually projecting the tuple fields here, and
                // none of them is ever moved out of the tuple.
                let streams = unsafe { this.streams.get_unchecked_mut() };

                this.state.poll_next(cx, |index, cx| match index {
                    $($idx => unsafe { Pin::new_unchecked(&mut streams.$idx) }.poll_next(cx),)+
                    _ => Poll::Ready(None),
                })
            }
        }

        impl<T, $($F),+> MergeTrait for ($($F,)+)
        where
            $($F: IntoStream<Item = T>,)+
        {
            type Item = T;
            type Stream = $StructName<$($F::IntoStream),+>;

            fn merge(self) -> Self::Stream {
                $StructName {
                    streams: ($(self.$idx.into_stream(),)+),
                    state: MergeState::new(count!($($idx)+)),
                }
            }
        }
    };
}

impl_merge_tuple!(Merge1 A 0);
impl_merge_tuple!(Merge2 A 0 B 1);
impl_merge_tuple!(Merge3 A 0 B 1 C 2);
impl_merge_tuple!(Merge4 A 0 B 1 C 2 D 3);
impl_merge_tuple!(Merge5 A 0 B 1 C 2 D 3 E 4);
impl_merge_tuple!(Merge6 A 0 B 1 C 2 D 3 E 4 F 5);
impl_merge_tuple!(Merge7 A 0 B 1 C 2 D 3 E 4 F 5 G 6);
impl_merge_tuple!(Merge8 A 0 B 1 C 2 D 3 E 4 F 5 G 6 H 7);
impl_merge_tuple!(Merge9 A 0 B 1 C 2 D 3 E 4 F 5 G 6 H 7 I 8);
impl_merge_tuple!(Merge10 A 0 B 1 C 2 D 3 E 4 F 5 G 6 H 7 I 8 J 9);
impl_merge_tuple!(Merge11 A 0 B 1 C 2 D 3 E 4 F 5 G 6 H 7 I 8 J 9 K 10);
impl_merge_tuple!(Merge12 A 0 B 1 C 2 D 3 E 4 F 5 G 6 H 7 I 8 J 9 K 10 L 11);
