//! MessagePack value codec: a recursive encoder/decoder pair over a
//! universal [`Value`] tree, with an extension registry and the builtin
//! timestamp extension (type -1).
//!
//! The wire format follows the MessagePack layout exactly: header selection
//! is tightest-fit and deterministic, and all multi-byte fields are
//! big-endian, so payloads interoperate with any other MessagePack producer
//! or consumer.
//!
//! # Example
//!
//! ```
//! use wirepack::{decode, encode, Value};
//!
//! let value = Value::Map(vec![
//!     (Value::Str("a".into()), Value::Integer(1)),
//!     (Value::Str("b".into()), Value::Array(vec![Value::Bool(true), Value::Nil])),
//! ]);
//! let bytes = encode(&value).unwrap();
//! assert_eq!(bytes, [0x82, 0xa1, 0x61, 0x01, 0xa1, 0x62, 0x92, 0xc3, 0xc0]);
//! assert_eq!(decode(&bytes).unwrap(), Some(value));
//! ```

pub mod constants;
mod decoder;
mod encoder;
mod error;
mod ext;
mod registry;
mod timestamp;
mod value;

pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::PackError;
pub use ext::ExtensionValue;
pub use registry::{ExtDecodeFn, ExtRegistry};
pub use timestamp::{Timestamp, TIMESTAMP_TYPE};
pub use value::Value;
pub use wirepack_buffers::{BufferError, ByteCursor};

/// Encodes one value with a fresh [`Encoder`].
pub fn encode(value: &Value) -> Result<Vec<u8>, PackError> {
    Encoder::new().encode(value)
}

/// Decodes one value with a fresh default [`Decoder`].
///
/// Empty input yields `Ok(None)`.
pub fn decode(input: &[u8]) -> Result<Option<Value>, PackError> {
    Decoder::new().decode(input)
}
