//! Composable asynchronous iteration.
//!
//! # Examples
//!
//! Merge multiple streams to handle values as soon as they arrive, without
//! ever dropping a single value:
//!
//! ```
//! use futures_arrival::prelude::*;
//! use futures_lite::future::block_on;
//! use futures_lite::{stream, StreamExt};
//!
//! fn main() {
//!     block_on(async {
//!         let a = stream::once(1);
//!         let b = stream::once(2);
//!         let c = stream::once(3);
//!         let s = (a, b, c).merge();
//!
//!         let mut counter = 0;
//!         s.for_each(|n| counter += n).await;
//!         assert_eq!(counter, 6);
//!     })
//! }
//! ```
//!
//! Feed a stream from imperative code with a [`Queue`], and merge it like any
//! other stream:
//!
//! ```
//! use futures_arrival::prelude::*;
//! use futures_arrival::stream::from_queue;
//! use futures_lite::future::block_on;
//! use futures_lite::StreamExt;
//!
//! block_on(async {
//!     let clicks = from_queue::<&str, ()>();
//!     let keys = from_queue::<&str, ()>();
//!     let mut events = [clicks.clone(), keys.clone()].merge();
//!
//!     keys.push("a").unwrap();
//!     clicks.push("left").unwrap();
//!     clicks.end();
//!     keys.end();
//!
//!     let mut all = vec![];
//!     while let Some(event) = events.next().await {
//!         all.push(event.unwrap());
//!     }
//!     all.sort_unstable();
//!     assert_eq!(all, ["a", "left"]);
//! })
//! ```
//!
//! # Concurrency
//!
//! | Name        | Return signature     | When does it return? |
//! | ---         | ---                  | ---                  |
//! | `Merge`     | `T`                  | Each value as soon as it arrives.
//! | `TryMerge`  | `Result<T, E>`       | Each value as soon as it arrives, ending at the first error.
//! | `Queue`     | `Result<T, E>`       | Each pushed value or error, in push order.

pub use into_stream::IntoStream;
pub use merge::{merge, Merge};
pub use queue::{from_queue, Next, PushError, Queue};
pub use stream_ext::StreamExt;
pub use try_merge::{try_merge, TryMerge, TryMergeStream};

#[cfg(feature = "clock")]
pub use clock::{clock, Clock};

#[cfg(feature = "clock")]
mod clock;
mod into_stream;
pub(crate) mod merge;
mod queue;
mod stream_ext;
mod try_merge;
