//! Error types for KTX operations

use crate::consts::{ENDIAN_BIG, ENDIAN_LITTLE};
use crate::{KTX1_IDENTIFIER, KTX2_IDENTIFIER};
use std::fmt;
use thiserror::Error;

/// Result type for KTX operations
pub type KtxResult<T> = Result<T, KtxError>;

/// A configured size limit that declared lengths are checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    /// Bound on `bytesOfKeyValueData`
    KeyValueRegion,
    /// Bound on a single `keyAndValueByteSize`
    KeyValueDatum,
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::KeyValueRegion => f.write_str("key/value region size limit"),
            Limit::KeyValueDatum => f.write_str("key/value datum limit"),
        }
    }
}

/// Errors that can occur while parsing a KTX file
#[derive(Error, Debug)]
pub enum KtxError {
    #[error(
        "Unrecognized file identifier.\n  Received:\n    {}\n  Expected one of:\n    {} for KTX 1.0\n    {} for KTX 2.0",
        hex(.received),
        hex(&KTX1_IDENTIFIER),
        hex(&KTX2_IDENTIFIER)
    )]
    UnrecognizedFormat { received: [u8; 12] },

    #[error("Unsupported format: {0} files are recognized but cannot be parsed")]
    UnsupportedFormat(&'static str),

    #[error(
        "Unrecognized endianness value.\n  Received:\n    {}\n  Expected one of:\n    {} for big endian\n    {} for little endian",
        hex(.received),
        hex(&ENDIAN_BIG),
        hex(&ENDIAN_LITTLE)
    )]
    UnrecognizedEndianness { received: [u8; 4] },

    #[error(
        "Out of bounds.\n  Reader: {label}\n  Reading: {field}\n  At file offset 0x{offset:x} a request for {requested} bytes falls outside the reader bound [0x{bound_start:x}, 0x{bound_end:x})."
    )]
    OutOfBounds {
        label: String,
        field: String,
        offset: u64,
        requested: u64,
        bound_start: u64,
        bound_end: u64,
    },

    #[error(
        "Limit exceeded.\n  At file offset 0x{offset:x} we encountered data with a size specified as {size}.\n  The {limit} is configured as {configured}."
    )]
    LimitExceeded {
        limit: Limit,
        offset: u64,
        size: u64,
        configured: u64,
    },

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Channel is read-only")]
    NotWritable,

    #[error("Out of memory")]
    OutOfMemory,

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

fn hex(data: &[u8]) -> String {
    data.iter().map(|b| format!("{:02x}", b)).collect()
}
