//! KTX 1 fixtures built in memory

#![allow(dead_code)]

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};
use ktx::{Endianness, KtxParser, MemoryChannel, ParseRequest, KTX1_IDENTIFIER};
use std::io::Write;

/// A KTX 1 file described field by field
#[derive(Debug, Clone)]
pub struct Fixture {
    pub endianness: Endianness,
    /// Replaces the endianness marker when set
    pub marker: Option<[u8; 4]>,
    pub gl_type: u32,
    pub gl_type_size: u32,
    pub gl_format: u32,
    pub gl_internal_format: u32,
    pub gl_base_internal_format: u32,
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub pixel_depth: u32,
    pub number_of_array_elements: u32,
    pub number_of_faces: u32,
    pub number_of_mipmap_levels: u32,
    /// Replaces the computed `bytesOfKeyValueData` when set
    pub bytes_of_key_value_data: Option<u32>,
    pub key_values: Vec<(String, String)>,
    /// Image data for each mip level
    pub levels: Vec<Vec<u8>>,
}

/// GL_UNSIGNED_BYTE
pub const GL_UNSIGNED_BYTE: u32 = 0x1401;
/// GL_RGB
pub const GL_RGB: u32 = 0x1907;
/// GL_RGBA
pub const GL_RGBA: u32 = 0x1908;
/// GL_SRGB8
pub const GL_SRGB8: u32 = 0x8c41;
/// GL_SRGB8_ALPHA8
pub const GL_SRGB8_ALPHA8: u32 = 0x8c43;
/// GL_COMPRESSED_RGBA_ASTC_8x8_KHR
pub const GL_COMPRESSED_RGBA_ASTC_8X8: u32 = 0x93b7;

/// Size in bytes of one uncompressed level with rows padded to 4 bytes
pub fn level_size(width: u32, height: u32, bytes_per_pixel: u32) -> usize {
    let row = (width * bytes_per_pixel).div_ceil(4) * 4;
    (row * height) as usize
}

impl Fixture {
    /// 128x128 sRGB8_ALPHA8, one level, no key/value data
    pub fn rgba_reference(endianness: Endianness) -> Self {
        Self {
            endianness,
            marker: None,
            gl_type: GL_UNSIGNED_BYTE,
            gl_type_size: 1,
            gl_format: GL_RGBA,
            gl_internal_format: GL_SRGB8_ALPHA8,
            gl_base_internal_format: GL_RGBA,
            pixel_width: 128,
            pixel_height: 128,
            pixel_depth: 0,
            number_of_array_elements: 0,
            number_of_faces: 1,
            number_of_mipmap_levels: 1,
            bytes_of_key_value_data: None,
            key_values: Vec::new(),
            levels: vec![vec![0x7f; level_size(128, 128, 4)]],
        }
    }

    /// 18x18 sRGB8_ALPHA8 with a single `KTXorientation` record
    pub fn orange() -> Self {
        Self {
            pixel_width: 18,
            pixel_height: 18,
            key_values: vec![("KTXorientation".to_string(), "S=r,T=d".to_string())],
            levels: vec![vec![0xf0; level_size(18, 18, 4)]],
            ..Self::rgba_reference(Endianness::Little)
        }
    }

    /// 64x64 sRGB8 with a full chain of 7 mip levels
    pub fn rgb_mipmaps() -> Self {
        let levels = (0..7)
            .map(|level| vec![level as u8; level_size(64 >> level, 64 >> level, 3)])
            .collect();
        Self {
            gl_format: GL_RGB,
            gl_internal_format: GL_SRGB8,
            gl_base_internal_format: GL_RGB,
            pixel_width: 64,
            pixel_height: 64,
            number_of_mipmap_levels: 7,
            levels,
            ..Self::rgba_reference(Endianness::Little)
        }
    }

    /// 256x256 ASTC 8x8 texture array with 7 layers
    pub fn texture_array_astc() -> Self {
        // 32x32 blocks of 16 bytes per layer
        let layer = 32 * 32 * 16;
        Self {
            gl_type: 0,
            gl_format: 0,
            gl_internal_format: GL_COMPRESSED_RGBA_ASTC_8X8,
            gl_base_internal_format: GL_RGBA,
            pixel_width: 256,
            pixel_height: 256,
            number_of_array_elements: 7,
            key_values: vec![("KTXorientation".to_string(), "S=r,T=d,R=i".to_string())],
            levels: vec![vec![0x11; layer * 7]],
            ..Self::rgba_reference(Endianness::Little)
        }
    }

    fn key_value_region(&self) -> Vec<u8> {
        let mut region = Vec::new();
        for (key, value) in &self.key_values {
            let size = (key.len() + value.len() + 2) as u32;
            self.write_u32(&mut region, size);
            region.extend_from_slice(key.as_bytes());
            region.push(0);
            region.extend_from_slice(value.as_bytes());
            region.push(0);
        }
        pad(&mut region);
        region
    }

    fn write_u32(&self, out: &mut Vec<u8>, value: u32) {
        match self.endianness {
            Endianness::Big => out.write_u32::<BigEndian>(value),
            Endianness::Little => out.write_u32::<LittleEndian>(value),
        }
        .unwrap();
    }

    /// Encode the fixture as a KTX 1 file
    pub fn to_bytes(&self) -> Vec<u8> {
        let region = self.key_value_region();
        let mut out = KTX1_IDENTIFIER.to_vec();
        out.write_all(&self.marker.unwrap_or(self.endianness.marker()))
            .unwrap();

        let fields = [
            self.gl_type,
            self.gl_type_size,
            self.gl_format,
            self.gl_internal_format,
            self.gl_base_internal_format,
            self.pixel_width,
            self.pixel_height,
            self.pixel_depth,
            self.number_of_array_elements,
            self.number_of_faces,
            self.number_of_mipmap_levels,
            self.bytes_of_key_value_data
                .unwrap_or(region.len() as u32),
        ];
        for field in fields {
            self.write_u32(&mut out, field);
        }

        out.extend_from_slice(&region);
        for level in &self.levels {
            self.write_u32(&mut out, level.len() as u32);
            out.extend_from_slice(level);
            pad(&mut out);
        }
        out
    }

    pub fn parser(&self) -> KtxParser<MemoryChannel> {
        parser_for(self.to_bytes())
    }
}

fn pad(out: &mut Vec<u8>) {
    while out.len() % 4 != 0 {
        out.push(0);
    }
}

pub fn parser_for(data: Vec<u8>) -> KtxParser<MemoryChannel> {
    KtxParser::new(ParseRequest::new(MemoryChannel::new(data), "memory:fixture"))
        .expect("parser")
}
