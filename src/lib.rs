//! Arrival-order merging and queue-backed streams for async Rust.
//!
//! This library provides two independent building blocks for working with
//! [`Stream`][futures_core::Stream]s (also known as async iterators):
//!
//! - [`stream::Merge`]: combine many streams into one, yielding every item
//!   in the order it arrived, across all sources.
//! - [`stream::Queue`]: turn imperative `push`/`push_error`/`end` calls into
//!   a stream, decoupling producer and consumer timing.
//!
//! They compose: a `Queue` is just another stream, so several queues can be
//! merged. See the [`stream`] submodule for more.
//!
//! # Operations
//!
//! This library provides the following operations on arrays, vecs, and tuples:
//!
//! - [`stream::Merge`]: Combines multiple streams into a single stream of all their outputs.
//! - [`stream::TryMerge`]: Combines multiple fallible streams, ending at the first error.
//!
//! And the following sources:
//!
//! - [`stream::from_queue`]: A stream fed by a producer.
//! - `stream::clock`: A stream of timestamps aligned to an interval (requires
//!   the `clock` feature, enabled by default).
//!
//! # Examples
//!
//! Merge a queue with a regular stream:
//! ```rust
//! use futures_arrival::prelude::*;
//! use futures_arrival::stream::from_queue;
//! use futures_lite::future::block_on;
//! use futures_lite::{stream, StreamExt};
//!
//! block_on(async {
//!     let queue = from_queue::<u8, ()>();
//!     queue.push(2).unwrap();
//!     queue.end();
//!
//!     let other = stream::once(Ok(1));
//!     let total = (queue, other).try_merge().fold(0, |acc, n| acc + n.unwrap()).await;
//!     assert_eq!(total, 3);
//! })
//! ```
//!
//! # Limitations
//!
//! The merged streams apply no back-pressure to their sources beyond the
//! pull model itself, and there is no explicit cancellation: dropping a
//! stream or a [`stream::Next`] future is how a request is withdrawn.

#![deny(missing_debug_implementations, nonstandard_style)]
#![warn(missing_docs, unreachable_pub)]

mod utils;

/// The futures-arrival prelude.
pub mod prelude {
    pub use super::stream::StreamExt as _;

    pub use super::stream::IntoStream as _;
    pub use super::stream::Merge as _;
    pub use super::stream::TryMerge as _;
}

pub mod stream;

/// Helper functions and types for tuples.
pub mod tuple {
    pub use crate::stream::merge::tuple::{
        Merge1, Merge10, Merge11, Merge12, Merge2, Merge3, Merge4, Merge5, Merge6, Merge7, Merge8,
        Merge9,
    };
}

/// Helper functions and types for fixed-length arrays.
pub mod array {
    pub use crate::stream::merge::array::Merge;
}

/// Helper functions and types for contiguous growable array type with heap-allocated contents,
/// written `Vec<T>`.
pub mod vec {
    pub use crate::stream::merge::vec::Merge;
}
