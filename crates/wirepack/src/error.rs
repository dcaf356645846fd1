//! Codec error taxonomy.
//!
//! Every variant is fatal to the encode or decode call that raised it;
//! nothing is recovered internally.

use thiserror::Error;
use wirepack_buffers::BufferError;

use crate::constants::{
    MAX_ARRAY_LEN, MAX_BIN_LEN, MAX_EXT_DATA_LEN, MAX_EXT_TYPE, MAX_INT_VALUE, MAX_MAP_LEN,
    MAX_NESTING_DEPTH, MAX_STR_BYTES, MIN_EXT_DATA_LEN, MIN_EXT_TYPE, MIN_INT_VALUE,
};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PackError {
    #[error("array length {0} bigger than {MAX_ARRAY_LEN}")]
    ArrayOutOfRange(usize),

    #[error("map key-value association number {0} bigger than {MAX_MAP_LEN}")]
    MapOutOfRange(usize),

    #[error("string size {0} bigger than {MAX_STR_BYTES}")]
    StrOutOfRange(usize),

    #[error("bin length {0} bigger than {MAX_BIN_LEN}")]
    BinOutOfRange(usize),

    #[error("integer {0} not in {MIN_INT_VALUE} ~ {MAX_INT_VALUE}")]
    IntOutOfRange(i128),

    #[error("extension type {0} not in {MIN_EXT_TYPE} ~ {MAX_EXT_TYPE}")]
    ExtTypeOutOfRange(i32),

    #[error("extension data length {0} not in {MIN_EXT_DATA_LEN} ~ {MAX_EXT_DATA_LEN}")]
    ExtDataOutOfRange(usize),

    /// The input ran out of bytes mid-value: truncated or corrupt payload.
    #[error(transparent)]
    OutOfRange(#[from] BufferError),

    /// A control byte matching no documented format family.
    #[error("unknown control byte 0x{0:02x}")]
    UnknownMarker(u8),

    #[error("string payload is not valid UTF-8")]
    InvalidUtf8,

    /// A type -1 extension payload whose length is not 4, 8, or 12.
    #[error("invalid timestamp payload length {0}")]
    TimestampPayload(usize),

    #[error("nesting deeper than {MAX_NESTING_DEPTH}")]
    DepthLimitExceeded,
}
