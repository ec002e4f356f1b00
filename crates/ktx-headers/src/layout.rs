//! Sub-image layout
//!
//! After the key/value region, each mip level is stored as:
//!
//! ```text
//! u32  imageSize
//! for each array element, face, depth slice:
//!     image data
//! u8   mipPadding[3 - ((imageSize + 3) % 4)]
//! ```
//!
//! `imageSize` covers every array element, face and depth slice of the
//! level, so all sub-images of a level are reported at the level's first
//! data byte with the level's size. Pixel data is never read.

use crate::Ktx1Header;
use ktx_core::consts::KTX1_ALIGNMENT;
use ktx_core::*;
use ktx_io::{BoundedReader, Channel};
use log::{trace, warn};

/// Walk the mip levels starting at the reader's cursor and describe every
/// sub-image, ordered by mip level, array element, face and depth slice
///
/// Non-array cube maps store `imageSize` per face with cube padding, which
/// this walk does not model; they yield an empty list.
pub fn read_sub_images<C: Channel>(
    reader: &mut BoundedReader<C>,
    header: &Ktx1Header,
) -> KtxResult<Vec<SubImage>> {
    if header.is_cube_map() {
        warn!(
            "{}: cube map without array elements; sub-image layout not computed",
            reader.label()
        );
        return Ok(Vec::new());
    }

    let per_level = header
        .sub_images_per_level()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or(KtxError::OutOfMemory)?;

    let mut sub_images = Vec::new();
    for mip_level in 0..header.mipmap_level_count() {
        let size = reader.read_u32(header.endianness, "imageSize")?;
        sub_images
            .try_reserve_exact(per_level)
            .map_err(|_| KtxError::OutOfMemory)?;
        let offset = reader.offset_current_absolute();
        let (width, height) = header.level_dimensions(mip_level);
        trace!(
            "mip level {} ({}x{}): {} bytes at 0x{:x}",
            mip_level,
            width,
            height,
            size,
            offset
        );

        for array_element in 0..header.array_element_count() {
            for face in 0..header.face_count() {
                for depth_slice in 0..header.depth_slice_count() {
                    sub_images.push(SubImage {
                        offset,
                        size,
                        mip_level,
                        array_element,
                        face,
                        depth_slice,
                    });
                }
            }
        }

        reader.skip(u64::from(size))?;
        reader.align(KTX1_ALIGNMENT)?;
    }

    Ok(sub_images)
}
