//! Core types for KTX

use crate::consts::{ENDIAN_BIG, ENDIAN_LITTLE};
use std::collections::HashMap;

/// Byte order of the multi-byte fields in a KTX 1 file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Endianness {
    Big,
    Little,
}

impl Endianness {
    /// Interpret the 4-byte endianness marker that follows the identifier
    pub fn from_marker(marker: &[u8; 4]) -> Option<Self> {
        match *marker {
            ENDIAN_BIG => Some(Endianness::Big),
            ENDIAN_LITTLE => Some(Endianness::Little),
            _ => None,
        }
    }

    /// The marker bytes an encoder with this byte order writes
    pub fn marker(&self) -> [u8; 4] {
        match self {
            Endianness::Big => ENDIAN_BIG,
            Endianness::Little => ENDIAN_LITTLE,
        }
    }

    pub fn is_big(&self) -> bool {
        matches!(self, Endianness::Big)
    }
}

/// Decoded key/value metadata
///
/// A later record with the same key replaces an earlier one.
pub type KeyValueData = HashMap<String, String>;

/// Location of one sub-image inside the file
///
/// All sub-images of a mip level share the level's `imageSize` and start at
/// the first byte after that level's size field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubImage {
    /// Absolute offset of the image data
    pub offset: u64,
    /// Declared `imageSize` of the mip level
    pub size: u32,
    pub mip_level: u32,
    pub array_element: u32,
    pub face: u32,
    pub depth_slice: u32,
}

impl SubImage {
    /// Absolute offset one past the last byte of the image data
    pub fn end(&self) -> u64 {
        self.offset + u64::from(self.size)
    }
}
