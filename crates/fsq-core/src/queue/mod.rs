//! Queue module: ring buffer, task pool, configuration and the dispatcher.

mod config;
mod fixed;
mod pool;
mod ring;

pub use config::QueueConfig;
pub use fixed::FixedSizeQueue;
pub use ring::{RingBuffer, RingBufferFull};
