//! Read-only view of part of a channel

use crate::Channel;
use ktx_core::{KtxError, KtxResult};
use std::io::{self, Read, Seek, SeekFrom, Write};

/// Exposes `[base, base + length)` of a delegate channel as a standalone,
/// read-only channel with its own zero-based position
///
/// Closing the view does not close the delegate.
pub struct SubrangeChannel<C: Channel> {
    delegate: C,
    base: u64,
    length: u64,
}

impl<C: Channel> SubrangeChannel<C> {
    pub fn new(delegate: C, base: u64, length: u64) -> Self {
        Self {
            delegate,
            base,
            length,
        }
    }

    fn base_end(&self) -> u64 {
        self.base.saturating_add(self.length)
    }

    /// Position relative to the start of the subrange
    pub fn position(&mut self) -> io::Result<u64> {
        Ok(self.delegate.stream_position()?.saturating_sub(self.base))
    }

    /// Move to `position` bytes after the start of the subrange
    pub fn set_position(&mut self, position: u64) -> io::Result<()> {
        self.seek(SeekFrom::Start(position))?;
        Ok(())
    }

    /// Configured length, regardless of how many bytes the delegate holds
    pub fn len(&self) -> u64 {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Always fails: the subrange is a read-only projection
    pub fn truncate(&mut self, _size: u64) -> KtxResult<()> {
        Err(KtxError::NotWritable)
    }

    pub fn into_inner(self) -> C {
        self.delegate
    }
}

impl<C: Channel> Read for SubrangeChannel<C> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut here = self.delegate.stream_position()?;
        if here < self.base {
            here = self.delegate.seek(SeekFrom::Start(self.base))?;
        }
        let remaining = self.base_end().saturating_sub(here);
        let count = (buf.len() as u64).min(remaining) as usize;
        if count == 0 {
            return Ok(0);
        }
        self.delegate.read(&mut buf[..count])
    }
}

impl<C: Channel> Seek for SubrangeChannel<C> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(offset) => i128::from(offset),
            SeekFrom::End(delta) => i128::from(self.length) + i128::from(delta),
            SeekFrom::Current(delta) => i128::from(self.position()?) + i128::from(delta),
        };
        let target = u64::try_from(target).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "seek outside the addressable range of the subrange",
            )
        })?;
        self.delegate
            .seek(SeekFrom::Start(self.base.saturating_add(target)))?;
        Ok(target)
    }
}

impl<C: Channel> Write for SubrangeChannel<C> {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            KtxError::NotWritable,
        ))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<C: Channel> Channel for SubrangeChannel<C> {
    fn is_open(&self) -> bool {
        self.delegate.is_open()
    }

    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn size(&mut self) -> io::Result<u64> {
        Ok(self.length)
    }
}
