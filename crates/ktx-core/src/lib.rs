//! Core types and utilities for the KTX container decoder
//!
//! This crate provides the values shared by every stage of the decoder: the
//! error taxonomy, the file identifiers and layout constants, byte order, and
//! the sub-image descriptors produced by the layout computation.

pub mod consts;
pub mod error;
pub mod types;

pub use error::{KtxError, KtxResult, Limit};
pub use types::*;

/// KTX 1.1 file identifier
///
/// Format: `«KTX 11»\r\n\x1A\n`
pub const KTX1_IDENTIFIER: [u8; 12] = [
    0xAB, 0x4B, 0x54, 0x58, // «KTX
    0x20, 0x31, 0x31, 0xBB, // ' 11»'
    0x0D, 0x0A, 0x1A, 0x0A, // CR LF SUB LF
];

/// KTX 2.0 file identifier
///
/// Format: `«KTX 20»\r\n\x1A\n`
pub const KTX2_IDENTIFIER: [u8; 12] = [
    0xAB, 0x4B, 0x54, 0x58, // «KTX
    0x20, 0x32, 0x30, 0xBB, // ' 20»'
    0x0D, 0x0A, 0x1A, 0x0A, // CR LF SUB LF
];
