//! Key/value metadata region
//!
//! The region following the header holds `bytesOfKeyValueData` bytes of
//! records packed back to back, each laid out as:
//!
//! ```text
//! u32  keyAndValueByteSize
//! u8   keyAndValue[keyAndValueByteSize]   // key \0 value \0?
//! ```
//!
//! Records are not padded individually. Fewer than 4 trailing bytes end the
//! region and the cursor is then aligned to 4 bytes.
//!
//! Declared sizes come straight from the file, so both the region and each
//! record are checked against caller-supplied limits and against the
//! remaining region before anything is allocated.

use crate::Ktx1Header;
use ktx_core::consts::{
    DEFAULT_KEY_VALUE_DATUM_LIMIT, DEFAULT_KEY_VALUE_REGION_LIMIT, KTX1_ALIGNMENT,
};
use ktx_core::*;
use ktx_io::{BoundedReader, Channel};
use log::trace;

/// Size limits applied while decoding the key/value region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyValueLimits {
    /// Largest accepted `bytesOfKeyValueData`
    pub region: u64,
    /// Largest accepted `keyAndValueByteSize`
    pub datum: u64,
}

impl Default for KeyValueLimits {
    fn default() -> Self {
        Self {
            region: DEFAULT_KEY_VALUE_REGION_LIMIT,
            datum: DEFAULT_KEY_VALUE_DATUM_LIMIT,
        }
    }
}

/// Decode the key/value region at the reader's cursor
///
/// Returns the decoded pairs and the absolute offset of the first byte
/// after the region, rounded up to a 4-byte boundary. That is where the
/// image data begins.
pub fn read_key_value_data<C: Channel>(
    reader: &mut BoundedReader<C>,
    header: &Ktx1Header,
    limits: &KeyValueLimits,
) -> KtxResult<(KeyValueData, u64)> {
    let region_size = u64::from(header.bytes_of_key_value_data);
    if region_size > limits.region {
        return Err(KtxError::LimitExceeded {
            limit: Limit::KeyValueRegion,
            offset: reader.offset_current_absolute(),
            size: region_size,
            configured: limits.region,
        });
    }

    reader.with_sub_reader("keyValueData", 0, region_size, |reader| {
        let mut key_values = KeyValueData::new();

        while reader.bytes_remaining().unwrap_or(0) >= 4 {
            let offset = reader.offset_current_absolute();
            let size = u64::from(reader.read_u32(header.endianness, "keyAndValueByteSize")?);
            if size > limits.datum {
                return Err(KtxError::LimitExceeded {
                    limit: Limit::KeyValueDatum,
                    offset,
                    size,
                    configured: limits.datum,
                });
            }

            reader.ensure_available("keyAndValue", size)?;
            let mut payload = vec![0u8; size as usize];
            reader.read_bytes(&mut payload)?;
            let (key, value) = split_record(&payload);
            trace!("key/value record at 0x{:x}: {:?} = {:?}", offset, key, value);
            key_values.insert(key, value);
        }

        reader.align(KTX1_ALIGNMENT)?;
        Ok((key_values, reader.offset_current_absolute()))
    })
}

/// Split a record payload into its key and value
///
/// The key runs up to the first NUL. The value starts after it and runs up
/// to the next NUL, or to the end of the payload if there is none. Invalid
/// UTF-8 is replaced rather than rejected.
pub fn split_record(payload: &[u8]) -> (String, String) {
    let (key, rest) = match payload.iter().position(|&b| b == 0) {
        Some(nul) => (&payload[..nul], &payload[nul + 1..]),
        None => (payload, &payload[payload.len()..]),
    };
    let value = match rest.iter().position(|&b| b == 0) {
        Some(nul) => &rest[..nul],
        None => rest,
    };
    (
        String::from_utf8_lossy(key).into_owned(),
        String::from_utf8_lossy(value).into_owned(),
    )
}
