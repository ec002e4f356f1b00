//! Constants used throughout the KTX implementation

/// Length of the file identifier at the start of every KTX file
pub const IDENTIFIER_SIZE: u64 = 12;

/// Endianness marker as written by a big-endian encoder
pub const ENDIAN_BIG: [u8; 4] = [0x04, 0x03, 0x02, 0x01];

/// Endianness marker as written by a little-endian encoder
pub const ENDIAN_LITTLE: [u8; 4] = [0x01, 0x02, 0x03, 0x04];

/// Number of 32-bit fields following the endianness marker
pub const KTX1_HEADER_FIELDS: u64 = 12;

/// Endianness marker plus the twelve header fields
pub const KTX1_HEADER_SIZE: u64 = 4 + KTX1_HEADER_FIELDS * 4;

/// Absolute offset of the key/value region
pub const KTX1_KEY_VALUE_OFFSET: u64 = IDENTIFIER_SIZE + KTX1_HEADER_SIZE;

/// Every `imageSize` field and key/value record starts on this boundary
pub const KTX1_ALIGNMENT: u64 = 4;

/// Number of faces in a cube map
pub const CUBE_MAP_FACES: u32 = 6;

/// Default upper bound on `bytesOfKeyValueData`
pub const DEFAULT_KEY_VALUE_REGION_LIMIT: u64 = 10_000_000;

/// Default upper bound on a single key/value record
pub const DEFAULT_KEY_VALUE_DATUM_LIMIT: u64 = 1_000_000;
