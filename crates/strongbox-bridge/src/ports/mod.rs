//! Port traits (interfaces) for dependency injection

pub mod transport;

pub use transport::NativeTransport;
