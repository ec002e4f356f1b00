//! # KTX - streaming texture container parser
//!
//! This crate reads the structure of KTX texture files: the header, the
//! key/value metadata and the location of every sub-image. Pixel data is
//! left in the file and read on demand.
//!
//! ## Quick Start
//!
//! ```no_run
//! use ktx::{KtxParser, ParseRequest};
//! use std::fs::File;
//!
//! let file = File::open("texture.ktx").unwrap();
//! let request = ParseRequest::builder(file, "texture.ktx")
//!     .key_value_region_limit(1 << 20)
//!     .build();
//!
//! let parser = KtxParser::new(request).unwrap();
//! let mut texture = parser.execute().unwrap();
//! println!(
//!     "{}x{} with {} level(s)",
//!     texture.header().pixel_width,
//!     texture.header().pixel_height,
//!     texture.header().mipmap_level_count()
//! );
//!
//! let base = texture.sub_images()[0];
//! let pixels = texture.read_sub_image(&base).unwrap();
//! assert_eq!(pixels.len(), base.size as usize);
//! ```
//!
//! ## Features
//!
//! - KTX 1.1 in either byte order
//! - Configurable limits on the key/value region and on each record
//! - Mip levels, texture arrays and 3D textures
//! - KTX 2.0 files are recognized and rejected with
//!   [`KtxError::UnsupportedFormat`]
//!
//! ## Limitations
//!
//! Cube maps without an array dimension store each face separately; their
//! sub-image list is currently empty.

// Re-export core types
pub use ktx_core::{
    consts, Endianness, KeyValueData, KtxError, KtxResult, Limit, SubImage, KTX1_IDENTIFIER,
    KTX2_IDENTIFIER,
};

// Re-export channels
pub use ktx_io::{BoundedReader, Channel, MemoryChannel, SubrangeChannel};

// Re-export header types
pub use ktx_headers::{KeyValueLimits, Ktx1Header, KtxFormat};

// Re-export parser
pub use ktx_parser::{Ktx1File, KtxParser, ParseRequest, ParseRequestBuilder, ParserState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parse a request with a fresh parser
pub fn parse<C: Channel>(request: ParseRequest<C>) -> KtxResult<Ktx1File<C>> {
    KtxParser::new(request)?.execute()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_parse_rejects_empty_input() {
        let request = ParseRequest::new(MemoryChannel::new(Vec::new()), "empty");
        assert!(matches!(parse(request), Err(KtxError::OutOfBounds { .. })));
    }
}
