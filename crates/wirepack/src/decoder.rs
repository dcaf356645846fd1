//! Recursive MessagePack decoder.

use tracing::trace;
use wirepack_buffers::ByteCursor;

use crate::constants::{
    ARRAY16, ARRAY32, BIN16, BIN32, BIN8, EXT16, EXT32, EXT8, FALSE, FIXEXT1, FIXEXT16, FIXEXT2,
    FIXEXT4, FIXEXT8, FLOAT32, FLOAT64, INT16, INT32, INT64, INT8, MAP16, MAP32,
    MAX_NESTING_DEPTH, NIL, STR16, STR32, STR8, TRUE, UINT16, UINT32, UINT64, UINT8,
};
use crate::error::PackError;
use crate::ext::ExtensionValue;
use crate::registry::ExtRegistry;
use crate::value::Value;

// Composite counts come off the wire; cap speculative pre-allocation.
const PREALLOC_CAP: usize = 1 << 16;

/// Decodes MessagePack bytes back into [`Value`] trees.
///
/// Owns the extension registry consulted for ext payloads. The cursor for a
/// decode call lives entirely inside that call.
pub struct Decoder {
    registry: ExtRegistry,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    /// A decoder whose registry carries the builtin timestamp extension.
    pub fn new() -> Self {
        Self {
            registry: ExtRegistry::default(),
        }
    }

    pub fn with_registry(registry: ExtRegistry) -> Self {
        Self { registry }
    }

    /// Registry access for installing application extension decoders before
    /// the first decode call.
    pub fn registry_mut(&mut self) -> &mut ExtRegistry {
        &mut self.registry
    }

    /// Decodes one value from `input`.
    ///
    /// Empty input yields `Ok(None)`: no value at all, distinct from a
    /// decoded nil.
    pub fn decode(&self, input: &[u8]) -> Result<Option<Value>, PackError> {
        trace!(len = input.len(), "decoding payload");
        let mut cursor = ByteCursor::new(input);
        if cursor.is_empty() {
            return Ok(None);
        }
        self.read_value(&mut cursor, 0).map(Some)
    }

    /// Reads exactly one value at the cursor, leaving it positioned on the
    /// next one.
    pub fn read_any(&self, cursor: &mut ByteCursor<'_>) -> Result<Value, PackError> {
        self.read_value(cursor, 0)
    }

    fn read_value(&self, cursor: &mut ByteCursor<'_>, depth: usize) -> Result<Value, PackError> {
        let byte = cursor.byte()?;

        // Fix-form families carry their count or value in the marker.
        if byte <= 0x7f {
            return Ok(Value::Integer(byte as i128));
        }
        if byte >= 0xe0 {
            return Ok(Value::Integer((byte as i8) as i128));
        }
        if (0x80..=0x8f).contains(&byte) {
            return self.read_map(cursor, (byte & 0x0f) as usize, depth);
        }
        if (0x90..=0x9f).contains(&byte) {
            return self.read_arr(cursor, (byte & 0x0f) as usize, depth);
        }
        if (0xa0..=0xbf).contains(&byte) {
            return self.read_str(cursor, (byte & 0x1f) as usize);
        }

        match byte {
            NIL => Ok(Value::Nil),
            FALSE => Ok(Value::Bool(false)),
            TRUE => Ok(Value::Bool(true)),
            BIN8 => {
                let n = cursor.u8()? as usize;
                self.read_bin(cursor, n)
            }
            BIN16 => {
                let n = cursor.u16()? as usize;
                self.read_bin(cursor, n)
            }
            BIN32 => {
                let n = cursor.u32()? as usize;
                self.read_bin(cursor, n)
            }
            EXT8 => {
                let n = cursor.u8()? as usize;
                self.read_ext(cursor, n)
            }
            EXT16 => {
                let n = cursor.u16()? as usize;
                self.read_ext(cursor, n)
            }
            EXT32 => {
                let n = cursor.u32()? as usize;
                self.read_ext(cursor, n)
            }
            FLOAT32 => Ok(Value::Float(cursor.f32()? as f64)),
            FLOAT64 => Ok(Value::Float(cursor.f64()?)),
            UINT8 => Ok(Value::Integer(cursor.u8()? as i128)),
            UINT16 => Ok(Value::Integer(cursor.u16()? as i128)),
            UINT32 => Ok(Value::Integer(cursor.u32()? as i128)),
            UINT64 => Ok(Value::Integer(cursor.u64()? as i128)),
            INT8 => Ok(Value::Integer(cursor.i8()? as i128)),
            INT16 => Ok(Value::Integer(cursor.i16()? as i128)),
            INT32 => Ok(Value::Integer(cursor.i32()? as i128)),
            INT64 => Ok(Value::Integer(cursor.i64()? as i128)),
            FIXEXT1 => self.read_ext(cursor, 1),
            FIXEXT2 => self.read_ext(cursor, 2),
            FIXEXT4 => self.read_ext(cursor, 4),
            FIXEXT8 => self.read_ext(cursor, 8),
            FIXEXT16 => self.read_ext(cursor, 16),
            STR8 => {
                let n = cursor.u8()? as usize;
                self.read_str(cursor, n)
            }
            STR16 => {
                let n = cursor.u16()? as usize;
                self.read_str(cursor, n)
            }
            STR32 => {
                let n = cursor.u32()? as usize;
                self.read_str(cursor, n)
            }
            ARRAY16 => {
                let n = cursor.u16()? as usize;
                self.read_arr(cursor, n, depth)
            }
            ARRAY32 => {
                let n = cursor.u32()? as usize;
                self.read_arr(cursor, n, depth)
            }
            MAP16 => {
                let n = cursor.u16()? as usize;
                self.read_map(cursor, n, depth)
            }
            MAP32 => {
                let n = cursor.u32()? as usize;
                self.read_map(cursor, n, depth)
            }
            // Reserved markers, 0xc1 included.
            _ => Err(PackError::UnknownMarker(byte)),
        }
    }

    fn read_str(&self, cursor: &mut ByteCursor<'_>, size: usize) -> Result<Value, PackError> {
        let bytes = cursor.bytes(size)?;
        let s = std::str::from_utf8(bytes).map_err(|_| PackError::InvalidUtf8)?;
        Ok(Value::Str(s.to_owned()))
    }

    fn read_bin(&self, cursor: &mut ByteCursor<'_>, size: usize) -> Result<Value, PackError> {
        Ok(Value::Bytes(cursor.bytes(size)?.to_vec()))
    }

    fn read_arr(
        &self,
        cursor: &mut ByteCursor<'_>,
        count: usize,
        depth: usize,
    ) -> Result<Value, PackError> {
        if depth >= MAX_NESTING_DEPTH {
            return Err(PackError::DepthLimitExceeded);
        }
        let mut items = Vec::with_capacity(count.min(PREALLOC_CAP));
        for _ in 0..count {
            items.push(self.read_value(cursor, depth + 1)?);
        }
        Ok(Value::Array(items))
    }

    fn read_map(
        &self,
        cursor: &mut ByteCursor<'_>,
        count: usize,
        depth: usize,
    ) -> Result<Value, PackError> {
        if depth >= MAX_NESTING_DEPTH {
            return Err(PackError::DepthLimitExceeded);
        }
        let mut pairs = Vec::with_capacity(count.min(PREALLOC_CAP));
        for _ in 0..count {
            let key = self.read_value(cursor, depth + 1)?;
            let val = self.read_value(cursor, depth + 1)?;
            pairs.push((key, val));
        }
        Ok(Value::Map(pairs))
    }

    fn read_ext(&self, cursor: &mut ByteCursor<'_>, size: usize) -> Result<Value, PackError> {
        let ext_type = cursor.i8()?;
        let data = cursor.bytes(size)?;
        if let Some(decode_fn) = self.registry.get(ext_type) {
            trace!(ext_type, "dispatching registered extension decoder");
            return decode_fn(data);
        }
        ExtensionValue::new(ext_type as i32, data.to_vec()).map(Value::Extension)
    }
}
