//! KTX header, key/value and layout decoding

pub mod identifier;
pub mod key_value;
pub mod layout;

use ktx_core::consts::{CUBE_MAP_FACES, KTX1_HEADER_SIZE};
use ktx_core::*;
use ktx_io::{BoundedReader, Channel};

pub use identifier::KtxFormat;
pub use key_value::{read_key_value_data, KeyValueLimits};
pub use layout::read_sub_images;

/// KTX 1 file header
///
/// Field values are stored exactly as decoded, apart from
/// `number_of_faces`, which is raised to 1 when an encoder wrote 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ktx1Header {
    pub endianness: Endianness,
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
    pub bytes_of_key_value_data: u32,
}

impl Ktx1Header {
    /// Decode the header that follows the file identifier
    ///
    /// The reader must be positioned just after the identifier. The header
    /// is read through a sub-reader of exactly 52 bytes, so a truncated file
    /// fails as [`KtxError::OutOfBounds`].
    pub fn decode<C: Channel>(reader: &mut BoundedReader<C>) -> KtxResult<Self> {
        reader.with_sub_reader("header", 0, KTX1_HEADER_SIZE, |reader| {
            let mut marker = [0u8; 4];
            reader.read_bytes(&mut marker)?;
            let endianness = Endianness::from_marker(&marker)
                .ok_or(KtxError::UnrecognizedEndianness { received: marker })?;

            let mut field = |name: &str| reader.read_u32(endianness, name);
            Ok(Self {
                endianness,
                gl_type: field("glType")?,
                gl_type_size: field("glTypeSize")?,
                gl_format: field("glFormat")?,
                gl_internal_format: field("glInternalFormat")?,
                gl_base_internal_format: field("glBaseInternalFormat")?,
                pixel_width: field("pixelWidth")?,
                pixel_height: field("pixelHeight")?,
                pixel_depth: field("pixelDepth")?,
                number_of_array_elements: field("numberOfArrayElements")?,
                number_of_faces: field("numberOfFaces")?.max(1),
                number_of_mipmap_levels: field("numberOfMipmapLevels")?,
                bytes_of_key_value_data: field("bytesOfKeyValueData")?,
            })
        })
    }

    pub fn is_big_endian(&self) -> bool {
        self.endianness.is_big()
    }

    /// Six faces and no array dimension
    pub fn is_cube_map(&self) -> bool {
        self.number_of_faces == CUBE_MAP_FACES && self.number_of_array_elements == 0
    }

    pub fn is_array(&self) -> bool {
        self.number_of_array_elements > 0
    }

    pub fn mipmap_level_count(&self) -> u32 {
        self.number_of_mipmap_levels.max(1)
    }

    pub fn array_element_count(&self) -> u32 {
        self.number_of_array_elements.max(1)
    }

    pub fn face_count(&self) -> u32 {
        self.number_of_faces.max(1)
    }

    pub fn depth_slice_count(&self) -> u32 {
        self.pixel_depth.max(1)
    }

    /// Number of sub-images stored in each mip level
    pub fn sub_images_per_level(&self) -> Option<u64> {
        u64::from(self.array_element_count())
            .checked_mul(u64::from(self.face_count()))?
            .checked_mul(u64::from(self.depth_slice_count()))
    }

    /// Width and height of a mip level
    ///
    /// No floor is applied: dimensions shrink to 0, and levels at or past
    /// the bit width of the field are 0.
    pub fn level_dimensions(&self, level: u32) -> (u32, u32) {
        (
            self.pixel_width.checked_shr(level).unwrap_or(0),
            self.pixel_height.checked_shr(level).unwrap_or(0),
        )
    }
}
