//! Parsed KTX 1 files

use ktx_core::*;
use ktx_headers::Ktx1Header;
use ktx_io::{BoundedReader, Channel, SubrangeChannel};
use log::{debug, warn};
use std::io::Read;

/// A successfully parsed KTX 1 file
///
/// Owns the channel it was parsed from; sub-image bytes are read on demand
/// through [`Ktx1File::sub_image_channel`] or [`Ktx1File::read_sub_image`].
/// The channel is closed by [`Ktx1File::close`] or when the file is dropped.
pub struct Ktx1File<C: Channel> {
    reader: BoundedReader<C>,
    source: String,
    header: Ktx1Header,
    key_value_data: KeyValueData,
    data_offset: u64,
    sub_images: Vec<SubImage>,
}

impl<C: Channel> Ktx1File<C> {
    pub(crate) fn new(
        reader: BoundedReader<C>,
        source: String,
        header: Ktx1Header,
        key_value_data: KeyValueData,
        data_offset: u64,
        sub_images: Vec<SubImage>,
    ) -> Self {
        Self {
            reader,
            source,
            header,
            key_value_data,
            data_offset,
            sub_images,
        }
    }

    pub fn header(&self) -> &Ktx1Header {
        &self.header
    }

    pub fn key_value_data(&self) -> &KeyValueData {
        &self.key_value_data
    }

    /// Absolute offset of the first mip level's `imageSize` field
    pub fn data_offset(&self) -> u64 {
        self.data_offset
    }

    /// Sub-images ordered by mip level, array element, face, depth slice
    pub fn sub_images(&self) -> &[SubImage] {
        &self.sub_images
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// A read-only view of one sub-image's bytes, positioned at its start
    pub fn sub_image_channel(
        &mut self,
        sub_image: &SubImage,
    ) -> KtxResult<SubrangeChannel<&mut C>> {
        let source_size = self.reader.source_size();
        if sub_image.end() > source_size {
            return Err(KtxError::OutOfBounds {
                label: self.source.clone(),
                field: format!("sub-image (mip level {})", sub_image.mip_level),
                offset: sub_image.offset,
                requested: u64::from(sub_image.size),
                bound_start: 0,
                bound_end: source_size,
            });
        }
        let channel = self.reader.channel_mut()?;
        let mut view = SubrangeChannel::new(channel, sub_image.offset, u64::from(sub_image.size));
        view.set_position(0)?;
        Ok(view)
    }

    /// Read one sub-image's bytes
    pub fn read_sub_image(&mut self, sub_image: &SubImage) -> KtxResult<Vec<u8>> {
        let mut view = self.sub_image_channel(sub_image)?;
        let mut data = Vec::new();
        data.try_reserve_exact(sub_image.size as usize)
            .map_err(|_| KtxError::OutOfMemory)?;
        view.read_to_end(&mut data)?;
        Ok(data)
    }

    pub fn is_open(&self) -> bool {
        self.reader.is_open()
    }

    /// Close the underlying channel. Closing twice is a no-op.
    pub fn close(&mut self) -> KtxResult<()> {
        if self.reader.is_open() {
            debug!("{}: closing", self.source);
        }
        self.reader.close()
    }
}

impl<C: Channel> Drop for Ktx1File<C> {
    fn drop(&mut self) {
        if let Err(e) = self.reader.close() {
            warn!("{}: failed to close channel: {}", self.source, e);
        }
    }
}
