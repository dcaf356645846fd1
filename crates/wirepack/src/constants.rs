//! MessagePack wire markers and format limits.

// Single-byte markers.
pub const NIL: u8 = 0xc0;
pub const FALSE: u8 = 0xc2;
pub const TRUE: u8 = 0xc3;

// Binary: length in 1/2/4 bytes.
pub const BIN8: u8 = 0xc4;
pub const BIN16: u8 = 0xc5;
pub const BIN32: u8 = 0xc6;

// Extension: length in 1/2/4 bytes, then a signed type code.
pub const EXT8: u8 = 0xc7;
pub const EXT16: u8 = 0xc8;
pub const EXT32: u8 = 0xc9;

// Floats (IEEE 754, big-endian).
pub const FLOAT32: u8 = 0xca;
pub const FLOAT64: u8 = 0xcb;

// Integers beyond the fixint ranges.
pub const UINT8: u8 = 0xcc;
pub const UINT16: u8 = 0xcd;
pub const UINT32: u8 = 0xce;
pub const UINT64: u8 = 0xcf;
pub const INT8: u8 = 0xd0;
pub const INT16: u8 = 0xd1;
pub const INT32: u8 = 0xd2;
pub const INT64: u8 = 0xd3;

// Fixed-length extensions: payload length implied by the marker.
pub const FIXEXT1: u8 = 0xd4;
pub const FIXEXT2: u8 = 0xd5;
pub const FIXEXT4: u8 = 0xd6;
pub const FIXEXT8: u8 = 0xd7;
pub const FIXEXT16: u8 = 0xd8;

// Strings: length in 1/2/4 bytes.
pub const STR8: u8 = 0xd9;
pub const STR16: u8 = 0xda;
pub const STR32: u8 = 0xdb;

// Arrays and maps: count in 2/4 bytes.
pub const ARRAY16: u8 = 0xdc;
pub const ARRAY32: u8 = 0xdd;
pub const MAP16: u8 = 0xde;
pub const MAP32: u8 = 0xdf;

// Short-form bases. Low bits of the marker carry the count/length:
// fixmap 0x80..=0x8f, fixarray 0x90..=0x9f, fixstr 0xa0..=0xbf,
// positive fixint 0x00..=0x7f, negative fixint 0xe0..=0xff.
pub const FIXMAP_BASE: u8 = 0x80;
pub const FIXARRAY_BASE: u8 = 0x90;
pub const FIXSTR_BASE: u8 = 0xa0;

/// Integer objects span the union of the i64 and u64 domains.
pub const MIN_INT_VALUE: i128 = i64::MIN as i128;
pub const MAX_INT_VALUE: i128 = u64::MAX as i128;

/// Maximum byte size of a String object.
pub const MAX_STR_BYTES: u64 = u32::MAX as u64;
/// Maximum length of a Binary object.
pub const MAX_BIN_LEN: u64 = u32::MAX as u64;
/// Maximum number of elements of an Array object.
pub const MAX_ARRAY_LEN: u64 = u32::MAX as u64;
/// Maximum number of key-value associations of a Map object.
pub const MAX_MAP_LEN: u64 = u32::MAX as u64;

/// Extension type codes are a signed byte.
pub const MIN_EXT_TYPE: i32 = -128;
pub const MAX_EXT_TYPE: i32 = 127;
/// Extension payloads are 1 to 2^32-1 bytes.
pub const MIN_EXT_DATA_LEN: u64 = 1;
pub const MAX_EXT_DATA_LEN: u64 = u32::MAX as u64;

/// Ceiling on array/map nesting accepted by the decoder.
pub const MAX_NESTING_DEPTH: usize = 1024;
