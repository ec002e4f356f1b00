//! Single-shot KTX parser
//!
//! Parsing proceeds in a fixed order:
//! 1. Identify the container version from the 12-byte identifier
//! 2. Decode the fixed header (KTX 1 only)
//! 3. Check and decode the key/value region
//! 4. Walk the mip levels to locate every sub-image
//!
//! The first error ends the attempt; there is no partial result. A parser
//! can be executed once. After a successful parse the returned
//! [`Ktx1File`] owns the channel.

use crate::{Ktx1File, ParseRequest};
use ktx_core::consts::{IDENTIFIER_SIZE, KTX1_KEY_VALUE_OFFSET};
use ktx_core::*;
use ktx_headers::{read_key_value_data, read_sub_images, KeyValueLimits, Ktx1Header, KtxFormat};
use ktx_io::{BoundedReader, Channel};
use log::{debug, warn};
use std::sync::{Mutex, MutexGuard};

/// Lifecycle of a [`KtxParser`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// Not yet executed
    Fresh,
    /// `execute` is running
    Parsing,
    /// Parsed; the channel belongs to the returned file
    Done,
    /// Parsing failed; the channel is still held by the parser
    Failed,
    /// Closed explicitly
    Closed,
}

struct Inner<C: Channel> {
    state: ParserState,
    reader: Option<BoundedReader<C>>,
}

/// KTX parser
///
/// `execute` and `close` take `&self` and serialize on an internal lock, so
/// a parser shared between threads still executes at most once.
pub struct KtxParser<C: Channel> {
    source: String,
    limits: KeyValueLimits,
    inner: Mutex<Inner<C>>,
}

impl<C: Channel> KtxParser<C> {
    pub fn new(request: ParseRequest<C>) -> KtxResult<Self> {
        let (channel, source, limits) = request.into_parts();
        let reader = BoundedReader::new(source.clone(), channel)?;
        Ok(Self {
            source,
            limits,
            inner: Mutex::new(Inner {
                state: ParserState::Fresh,
                reader: Some(reader),
            }),
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn state(&self) -> ParserState {
        match self.inner.lock() {
            Ok(inner) => inner.state,
            Err(poisoned) => poisoned.into_inner().state,
        }
    }

    fn lock(&self) -> KtxResult<MutexGuard<'_, Inner<C>>> {
        self.inner
            .lock()
            .map_err(|_| KtxError::InvalidState("Parser lock is poisoned.".to_string()))
    }

    /// Parse the file
    ///
    /// Fails with [`KtxError::InvalidState`] unless this is the first call
    /// on a parser that has not been closed.
    pub fn execute(&self) -> KtxResult<Ktx1File<C>> {
        let mut inner = self.lock()?;
        if inner.state != ParserState::Fresh {
            return Err(KtxError::InvalidState(format!(
                "Parser is closed (state {:?}).",
                inner.state
            )));
        }
        let Some(mut reader) = inner.reader.take() else {
            return Err(KtxError::InvalidState(
                "Parser has no channel.".to_string(),
            ));
        };
        inner.state = ParserState::Parsing;

        match self.parse(&mut reader) {
            Ok(parsed) => {
                inner.state = ParserState::Done;
                let (header, key_value_data, data_offset, sub_images) = parsed;
                Ok(Ktx1File::new(
                    reader,
                    self.source.clone(),
                    header,
                    key_value_data,
                    data_offset,
                    sub_images,
                ))
            }
            Err(e) => {
                debug!("{}: parse failed: {}", self.source, e);
                inner.reader = Some(reader);
                inner.state = ParserState::Failed;
                Err(e)
            }
        }
    }

    fn parse(&self, reader: &mut BoundedReader<C>) -> KtxResult<Parsed> {
        match KtxFormat::read(reader)? {
            KtxFormat::Ktx1 => self.parse_ktx1(reader),
            KtxFormat::Ktx2 => self.parse_ktx2(),
            KtxFormat::Unrecognized(received) => {
                Err(KtxError::UnrecognizedFormat { received })
            }
        }
    }

    fn parse_ktx1(&self, reader: &mut BoundedReader<C>) -> KtxResult<Parsed> {
        debug!("{}: KTX 1 identifier", self.source);

        reader.seek_to(IDENTIFIER_SIZE)?;
        let header = Ktx1Header::decode(reader)?;
        debug!(
            "{}: {}x{}x{} {:?}, {} level(s), {} array element(s), {} face(s)",
            self.source,
            header.pixel_width,
            header.pixel_height,
            header.pixel_depth,
            header.endianness,
            header.number_of_mipmap_levels,
            header.number_of_array_elements,
            header.number_of_faces
        );

        reader.seek_to(KTX1_KEY_VALUE_OFFSET)?;
        let (key_value_data, data_offset) = read_key_value_data(reader, &header, &self.limits)?;
        debug!(
            "{}: {} key/value pair(s), image data at 0x{:x}",
            self.source,
            key_value_data.len(),
            data_offset
        );

        reader.seek_to(data_offset)?;
        let sub_images = read_sub_images(reader, &header)?;
        debug!("{}: {} sub-image(s)", self.source, sub_images.len());

        Ok((header, key_value_data, data_offset, sub_images))
    }

    fn parse_ktx2(&self) -> KtxResult<Parsed> {
        warn!("{}: KTX 2 files are not supported", self.source);
        Err(KtxError::UnsupportedFormat(KtxFormat::Ktx2.name()))
    }

    /// Release the channel if the parser still holds it
    ///
    /// After a successful parse the channel belongs to the returned file and
    /// this only marks the parser closed.
    pub fn close(&self) -> KtxResult<()> {
        let mut inner = self.lock()?;
        inner.state = ParserState::Closed;
        if let Some(mut reader) = inner.reader.take() {
            reader.close()?;
        }
        Ok(())
    }
}

impl<C: Channel> Drop for KtxParser<C> {
    fn drop(&mut self) {
        let inner = match self.inner.get_mut() {
            Ok(inner) => inner,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(mut reader) = inner.reader.take() {
            if let Err(e) = reader.close() {
                warn!("{}: failed to close channel: {}", self.source, e);
            }
        }
    }
}

type Parsed = (Ktx1Header, KeyValueData, u64, Vec<SubImage>);
