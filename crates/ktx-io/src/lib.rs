//! Random-access byte sources for the KTX decoder
//!
//! This crate provides the [`Channel`] abstraction over seekable byte
//! sources, a [`BoundedReader`] that confines reads to nested sub-ranges of a
//! channel, and a read-only [`SubrangeChannel`] projection used to hand
//! sub-image bytes to callers.

pub mod bounded;
pub mod channel;
pub mod subrange;

pub use bounded::BoundedReader;
pub use channel::{Channel, MemoryChannel};
pub use subrange::SubrangeChannel;
