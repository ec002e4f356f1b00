//! File identification
//!
//! Every KTX file starts with a 12-byte identifier naming the container
//! version:
//! 1. KTX 1.1: `«KTX 11»\r\n\x1A\n`, followed by the fixed header
//! 2. KTX 2.0: `«KTX 20»\r\n\x1A\n`, recognized but not parsed
//!
//! Anything else is not a KTX file.

use ktx_core::*;
use ktx_io::{BoundedReader, Channel};

/// Container version decoded from the file identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KtxFormat {
    Ktx1,
    Ktx2,
    Unrecognized([u8; 12]),
}

impl KtxFormat {
    pub fn identify(identifier: &[u8; 12]) -> Self {
        match *identifier {
            KTX1_IDENTIFIER => KtxFormat::Ktx1,
            KTX2_IDENTIFIER => KtxFormat::Ktx2,
            other => KtxFormat::Unrecognized(other),
        }
    }

    /// Read the identifier from the start of the reader's bound
    pub fn read<C: Channel>(reader: &mut BoundedReader<C>) -> KtxResult<Self> {
        let mut identifier = [0u8; 12];
        reader.seek_to(0)?;
        reader.read_bytes(&mut identifier)?;
        Ok(Self::identify(&identifier))
    }

    pub fn name(&self) -> &'static str {
        match self {
            KtxFormat::Ktx1 => "KTX 1.0",
            KtxFormat::Ktx2 => "KTX 2.0",
            KtxFormat::Unrecognized(_) => "unrecognized",
        }
    }
}
