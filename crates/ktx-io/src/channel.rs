//! Seekable byte sources

use std::fs::File;
use std::io::{self, Cursor, Read, Seek, SeekFrom};

/// A random-access byte source with an explicit open/closed state
///
/// Dropping a channel releases it as usual; `close` exists so that owners
/// can release a source early and so that views over a shared source can
/// decline to release it.
pub trait Channel: Read + Seek {
    /// Whether the channel can still be read
    fn is_open(&self) -> bool {
        true
    }

    /// Release the channel
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Total number of bytes in the channel
    fn size(&mut self) -> io::Result<u64> {
        let here = self.stream_position()?;
        let end = self.seek(SeekFrom::End(0))?;
        self.seek(SeekFrom::Start(here))?;
        Ok(end)
    }
}

impl Channel for File {}

impl<T: AsRef<[u8]>> Channel for Cursor<T> {
    fn size(&mut self) -> io::Result<u64> {
        Ok(self.get_ref().as_ref().len() as u64)
    }
}

impl<C: Channel + ?Sized> Channel for &mut C {
    fn is_open(&self) -> bool {
        (**self).is_open()
    }

    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }

    fn size(&mut self) -> io::Result<u64> {
        (**self).size()
    }
}

impl<C: Channel + ?Sized> Channel for Box<C> {
    fn is_open(&self) -> bool {
        (**self).is_open()
    }

    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }

    fn size(&mut self) -> io::Result<u64> {
        (**self).size()
    }
}

/// An in-memory channel that tracks whether it has been closed
///
/// Reads and seeks on a closed channel fail with
/// [`io::ErrorKind::NotConnected`].
#[derive(Debug, Clone)]
pub struct MemoryChannel {
    cursor: Cursor<Vec<u8>>,
    open: bool,
}

impl MemoryChannel {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            cursor: Cursor::new(data.into()),
            open: true,
        }
    }

    pub fn get_ref(&self) -> &[u8] {
        self.cursor.get_ref()
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.cursor.into_inner()
    }

    fn ensure_open(&self) -> io::Result<()> {
        if self.open {
            Ok(())
        } else {
            Err(io::Error::new(
                io::ErrorKind::NotConnected,
                "channel is closed",
            ))
        }
    }
}

impl Read for MemoryChannel {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.ensure_open()?;
        self.cursor.read(buf)
    }
}

impl Seek for MemoryChannel {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.ensure_open()?;
        self.cursor.seek(pos)
    }
}

impl Channel for MemoryChannel {
    fn is_open(&self) -> bool {
        self.open
    }

    fn close(&mut self) -> io::Result<()> {
        self.open = false;
        Ok(())
    }

    fn size(&mut self) -> io::Result<u64> {
        self.ensure_open()?;
        Ok(self.cursor.get_ref().len() as u64)
    }
}
