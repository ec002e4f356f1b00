//! Bounded random-access reader
//!
//! A [`BoundedReader`] owns a [`Channel`] and a stack of byte ranges. The
//! root range covers the whole channel; every sub-reader pushed onto the
//! stack covers a range nested inside the remaining bytes of its parent.
//! Reads, seeks and skips act on the innermost range and fail with
//! [`KtxError::OutOfBounds`] rather than crossing it.
//!
//! Sub-readers are strictly LIFO: the parent cursor does not move while a
//! child is active, and a child must be closed before the parent is used
//! again. [`BoundedReader::with_sub_reader`] enforces this for a scope.

use crate::Channel;
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use ktx_core::{Endianness, KtxError, KtxResult};
use log::trace;
use std::io::SeekFrom;

/// One entry of the reader stack
#[derive(Debug, Clone)]
struct Bound {
    label: String,
    start: u64,
    size: u64,
    position: u64,
}

impl Bound {
    fn end(&self) -> u64 {
        self.start.saturating_add(self.size)
    }

    fn remaining(&self) -> u64 {
        self.end().saturating_sub(self.position)
    }

    /// Check that `[offset, offset + requested)` lies inside this bound
    fn check(&self, field: &str, offset: u64, requested: u64) -> KtxResult<()> {
        match offset.checked_add(requested) {
            Some(end) if offset >= self.start && end <= self.end() => Ok(()),
            _ => Err(KtxError::OutOfBounds {
                label: self.label.clone(),
                field: field.to_string(),
                offset,
                requested,
                bound_start: self.start,
                bound_end: self.end(),
            }),
        }
    }
}

/// A cursor over a channel restricted to nested byte ranges
pub struct BoundedReader<C: Channel> {
    channel: C,
    root: Bound,
    nested: Vec<Bound>,
    closed: bool,
}

impl<C: Channel> BoundedReader<C> {
    /// Create a reader whose root bound is the whole channel
    pub fn new(label: impl Into<String>, mut channel: C) -> KtxResult<Self> {
        let size = channel.size()?;
        Ok(Self {
            channel,
            root: Bound {
                label: label.into(),
                start: 0,
                size,
                position: 0,
            },
            nested: Vec::new(),
            closed: false,
        })
    }

    fn current(&self) -> &Bound {
        self.nested.last().unwrap_or(&self.root)
    }

    fn current_mut(&mut self) -> KtxResult<&mut Bound> {
        if self.closed {
            return Err(KtxError::InvalidState(format!(
                "Reader {} is closed.",
                self.root.label
            )));
        }
        Ok(self.nested.last_mut().unwrap_or(&mut self.root))
    }

    /// Label of the innermost bound
    pub fn label(&self) -> &str {
        &self.current().label
    }

    /// Number of open sub-readers
    pub fn depth(&self) -> usize {
        self.nested.len()
    }

    /// Total size of the underlying channel
    pub fn source_size(&self) -> u64 {
        self.root.size
    }

    /// Position of the cursor in the underlying channel
    pub fn offset_current_absolute(&self) -> u64 {
        self.current().position
    }

    /// Bytes left in the innermost bound, or `None` once it is exhausted
    pub fn bytes_remaining(&self) -> Option<u64> {
        let remaining = self.current().remaining();
        (remaining > 0).then_some(remaining)
    }

    /// Move the cursor to an absolute offset inside the innermost bound
    pub fn seek_to(&mut self, offset: u64) -> KtxResult<()> {
        let bound = self.current_mut()?;
        bound.check("seek", offset, 0)?;
        bound.position = offset;
        Ok(())
    }

    /// Check that `requested` bytes can be read from the cursor without
    /// moving it
    pub fn ensure_available(&self, field: &str, requested: u64) -> KtxResult<()> {
        let bound = self.current();
        bound.check(field, bound.position, requested)
    }

    /// Advance the cursor by `count` bytes
    pub fn skip(&mut self, count: u64) -> KtxResult<()> {
        let bound = self.current_mut()?;
        bound.check("skip", bound.position, count)?;
        bound.position += count;
        Ok(())
    }

    /// Advance the cursor to the next multiple of `alignment` relative to
    /// the start of the innermost bound
    pub fn align(&mut self, alignment: u64) -> KtxResult<()> {
        if alignment == 0 {
            return Err(KtxError::InvalidState(
                "Alignment must be non-zero.".to_string(),
            ));
        }
        let bound = self.current_mut()?;
        let relative = bound.position - bound.start;
        let padding = (alignment - relative % alignment) % alignment;
        bound.check("align", bound.position, padding)?;
        bound.position += padding;
        Ok(())
    }

    /// Fill `buf` from the cursor
    pub fn read_bytes(&mut self, buf: &mut [u8]) -> KtxResult<()> {
        self.read_field("bytes", buf)
    }

    fn read_field(&mut self, field: &str, buf: &mut [u8]) -> KtxResult<()> {
        let bound = self.current_mut()?;
        let position = bound.position;
        bound.check(field, position, buf.len() as u64)?;
        self.channel.seek(SeekFrom::Start(position))?;
        self.channel.read_exact(buf)?;
        self.current_mut()?.position = position + buf.len() as u64;
        Ok(())
    }

    /// Read a big-endian `u32`
    pub fn read_u32_be(&mut self, field: &str) -> KtxResult<u32> {
        let mut bytes = [0u8; 4];
        self.read_field(field, &mut bytes)?;
        Ok(BigEndian::read_u32(&bytes))
    }

    /// Read a little-endian `u32`
    pub fn read_u32_le(&mut self, field: &str) -> KtxResult<u32> {
        let mut bytes = [0u8; 4];
        self.read_field(field, &mut bytes)?;
        Ok(LittleEndian::read_u32(&bytes))
    }

    /// Read a `u32` in the given byte order
    pub fn read_u32(&mut self, endianness: Endianness, field: &str) -> KtxResult<u32> {
        match endianness {
            Endianness::Big => self.read_u32_be(field),
            Endianness::Little => self.read_u32_le(field),
        }
    }

    /// Push a sub-reader of `size` bytes starting `relative_start` bytes
    /// after the current cursor
    pub fn create_sub_reader_at_bounded(
        &mut self,
        label: impl Into<String>,
        relative_start: u64,
        size: u64,
    ) -> KtxResult<()> {
        let label = label.into();
        let parent = self.current_mut()?;
        let start = parent.position.saturating_add(relative_start);
        parent.check(&label, start, size)?;
        trace!(
            "{}: opening sub-reader {} at 0x{:x} ({} bytes)",
            self.root.label,
            label,
            start,
            size
        );
        self.nested.push(Bound {
            label,
            start,
            size,
            position: start,
        });
        Ok(())
    }

    /// Pop the innermost sub-reader
    pub fn close_sub_reader(&mut self) -> KtxResult<()> {
        match self.nested.pop() {
            Some(bound) => {
                trace!("{}: closed sub-reader {}", self.root.label, bound.label);
                Ok(())
            }
            None => Err(KtxError::InvalidState(
                "No sub-reader is open.".to_string(),
            )),
        }
    }

    /// Run `f` inside a sub-reader, closing it (and anything `f` left open)
    /// before returning, whether or not `f` succeeded
    pub fn with_sub_reader<T, F>(
        &mut self,
        label: impl Into<String>,
        relative_start: u64,
        size: u64,
        f: F,
    ) -> KtxResult<T>
    where
        F: FnOnce(&mut Self) -> KtxResult<T>,
    {
        self.create_sub_reader_at_bounded(label, relative_start, size)?;
        let depth = self.nested.len();
        let result = f(self);
        while self.nested.len() >= depth {
            self.close_sub_reader()?;
        }
        result
    }

    /// Mutable access to the channel for reads outside the bound discipline
    pub fn channel_mut(&mut self) -> KtxResult<&mut C> {
        self.current_mut()?;
        Ok(&mut self.channel)
    }

    /// Whether the reader and its channel are still usable
    pub fn is_open(&self) -> bool {
        !self.closed && self.channel.is_open()
    }

    /// Close every sub-reader and the channel. Closing twice is a no-op.
    pub fn close(&mut self) -> KtxResult<()> {
        if self.closed {
            return Ok(());
        }
        self.nested.clear();
        self.closed = true;
        self.channel.close()?;
        Ok(())
    }
}
