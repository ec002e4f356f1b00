//! KTX parser implementation
//!
//! A [`KtxParser`] is built from a [`ParseRequest`] and executed exactly
//! once. On success it hands back a [`Ktx1File`] that owns the underlying
//! channel and describes where every sub-image lives.

pub mod file;
pub mod parser;
pub mod request;

pub use file::Ktx1File;
pub use parser::{KtxParser, ParserState};
pub use request::{ParseRequest, ParseRequestBuilder};
