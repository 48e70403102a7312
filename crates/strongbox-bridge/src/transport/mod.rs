//! Native-messaging transport implementations

mod framing;
mod native;

pub use framing::{read_frame, write_frame, MAX_FROM_HOST, MAX_TO_HOST};
pub use native::NativeHostTransport;
