//! Utilities to implement the different streams of this crate.

mod pin;
mod wakers;

pub(crate) use pin::{get_pin_mut, get_pin_mut_from_vec};
pub(crate) use wakers::WakerQueue;
