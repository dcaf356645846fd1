//! Extension decoder registry.

use std::collections::BTreeMap;

use crate::error::PackError;
use crate::timestamp::{Timestamp, TIMESTAMP_TYPE};
use crate::value::Value;

/// Decoding function for one extension type: raw payload in, specialized
/// value out.
pub type ExtDecodeFn = fn(&[u8]) -> Result<Value, PackError>;

/// Mapping from extension type code to decoding function.
///
/// Owned by each [`Decoder`](crate::Decoder); populate it before decoding
/// starts. Payloads whose type has no registered function come back as
/// generic [`Value::Extension`] values.
#[derive(Debug, Clone)]
pub struct ExtRegistry {
    entries: BTreeMap<i8, ExtDecodeFn>,
}

impl ExtRegistry {
    /// An empty registry: every extension decodes generically.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Registers `decode_fn` for `ext_type`, replacing any previous entry.
    pub fn register(&mut self, ext_type: i8, decode_fn: ExtDecodeFn) {
        self.entries.insert(ext_type, decode_fn);
    }

    pub fn get(&self, ext_type: i8) -> Option<ExtDecodeFn> {
        self.entries.get(&ext_type).copied()
    }
}

/// The default registry carries the builtin timestamp decoder at type -1.
impl Default for ExtRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(TIMESTAMP_TYPE, decode_timestamp);
        registry
    }
}

fn decode_timestamp(data: &[u8]) -> Result<Value, PackError> {
    Timestamp::from_payload(data).map(Value::Timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_decodes_timestamps() {
        let registry = ExtRegistry::default();
        let decode_fn = registry.get(TIMESTAMP_TYPE).unwrap();
        let value = decode_fn(&[0x00, 0x01, 0x51, 0x80]).unwrap();
        assert_eq!(value, Value::Timestamp(Timestamp::from_parts(86_400, 0)));
    }

    #[test]
    fn register_replaces() {
        fn nil_decoder(_: &[u8]) -> Result<Value, PackError> {
            Ok(Value::Nil)
        }
        let mut registry = ExtRegistry::default();
        registry.register(TIMESTAMP_TYPE, nil_decoder);
        let decode_fn = registry.get(TIMESTAMP_TYPE).unwrap();
        assert_eq!(decode_fn(&[0; 4]).unwrap(), Value::Nil);
        assert!(registry.get(42).is_none());
    }
}
