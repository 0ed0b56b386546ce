mod ready_queue;
mod waker_queue;

pub(crate) use ready_queue::ReadyQueue;
pub(crate) use waker_queue::WakerQueue;
