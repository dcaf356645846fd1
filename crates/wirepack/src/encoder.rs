//! Recursive MessagePack encoder.

use tracing::trace;
use wirepack_buffers::Writer;

use crate::constants::{
    ARRAY16, ARRAY32, BIN16, BIN32, BIN8, EXT16, EXT32, EXT8, FALSE, FIXARRAY_BASE, FIXEXT1,
    FIXEXT16, FIXEXT2, FIXEXT4, FIXEXT8, FIXMAP_BASE, FIXSTR_BASE, FLOAT32, FLOAT64, INT16, INT32,
    INT64, INT8, MAP16, MAP32, MAX_ARRAY_LEN, MAX_BIN_LEN, MAX_INT_VALUE, MAX_MAP_LEN,
    MAX_STR_BYTES, MIN_INT_VALUE, NIL, STR16, STR32, STR8, TRUE, UINT16, UINT32, UINT64, UINT8,
};
use crate::error::PackError;
use crate::ext::ExtensionValue;
use crate::timestamp::Timestamp;
use crate::value::Value;

/// Encodes [`Value`] trees into MessagePack bytes.
///
/// Each per-type `write_*` method owns that family's header selection; the
/// recursion through nested arrays and maps lives entirely in
/// [`write_any`](Encoder::write_any). Range violations abort the whole
/// encode call with the family's `OutOfRange` error.
pub struct Encoder {
    writer: Writer,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(),
        }
    }

    /// Encodes one value to a fresh byte vector.
    pub fn encode(&mut self, value: &Value) -> Result<Vec<u8>, PackError> {
        trace!("encoding value tree");
        self.writer.reset();
        self.write_any(value)?;
        Ok(self.writer.flush())
    }

    /// Dispatches on the value's kind and recurses into composites.
    pub fn write_any(&mut self, value: &Value) -> Result<(), PackError> {
        match value {
            Value::Nil => {
                self.write_nil();
                Ok(())
            }
            Value::Bool(b) => {
                self.write_bool(*b);
                Ok(())
            }
            Value::Str(s) => self.write_str(s),
            Value::Bytes(b) => self.write_bin(b),
            Value::Integer(i) => self.write_int(*i),
            Value::Float(f) => {
                self.write_float(*f);
                Ok(())
            }
            Value::Extension(ext) => {
                self.write_ext(ext);
                Ok(())
            }
            Value::Timestamp(ts) => {
                self.write_timestamp(ts);
                Ok(())
            }
            Value::Array(items) => self.write_arr(items),
            Value::Map(pairs) => self.write_map(pairs),
        }
    }

    pub fn write_nil(&mut self) {
        self.writer.u8(NIL);
    }

    pub fn write_bool(&mut self, b: bool) {
        self.writer.u8(if b { TRUE } else { FALSE });
    }

    /// Tightest-fit integer tiering. Signed tiers are checked before the
    /// unsigned tier of the same width, so 128 lands in uint8 and -33 in
    /// int8.
    pub fn write_int(&mut self, int: i128) -> Result<(), PackError> {
        if !(MIN_INT_VALUE..=MAX_INT_VALUE).contains(&int) {
            return Err(PackError::IntOutOfRange(int));
        }
        if (0..=0x7f).contains(&int) {
            self.writer.u8(int as u8);
        } else if (-32..0).contains(&int) {
            self.writer.i8(int as i8);
        } else if (-128..=127).contains(&int) {
            self.writer.u8(INT8);
            self.writer.i8(int as i8);
        } else if (0..=0xff).contains(&int) {
            self.writer.u8(UINT8);
            self.writer.u8(int as u8);
        } else if (-32_768..=32_767).contains(&int) {
            self.writer.u8(INT16);
            self.writer.i16(int as i16);
        } else if (0..=0xffff).contains(&int) {
            self.writer.u8u16(UINT16, int as u16);
        } else if (-2_147_483_648..=2_147_483_647).contains(&int) {
            self.writer.u8(INT32);
            self.writer.i32(int as i32);
        } else if (0..=0xffff_ffff).contains(&int) {
            self.writer.u8u32(UINT32, int as u32);
        } else if i64::try_from(int).is_ok() {
            self.writer.u8(INT64);
            self.writer.i64(int as i64);
        } else {
            self.writer.u8(UINT64);
            self.writer.u64(int as u64);
        }
        Ok(())
    }

    /// float32 only when the magnitude sits in the single-precision band
    /// and the value survives exact narrowing; NaN, infinities, zero, and
    /// everything else take float64.
    pub fn write_float(&mut self, float: f64) {
        let narrowed = float as f32;
        if (1.2e-38..=3.4e38).contains(&float.abs()) && f64::from(narrowed) == float {
            self.writer.u8(FLOAT32);
            self.writer.f32(narrowed);
        } else {
            self.writer.u8f64(FLOAT64, float);
        }
    }

    pub fn write_str_hdr(&mut self, length: usize) -> Result<(), PackError> {
        if length as u64 > MAX_STR_BYTES {
            return Err(PackError::StrOutOfRange(length));
        }
        if length <= 0x1f {
            self.writer.u8(FIXSTR_BASE | length as u8);
        } else if length <= 0xff {
            self.writer.u8(STR8);
            self.writer.u8(length as u8);
        } else if length <= 0xffff {
            self.writer.u8u16(STR16, length as u16);
        } else {
            self.writer.u8u32(STR32, length as u32);
        }
        Ok(())
    }

    /// Length is measured in UTF-8 bytes, not characters.
    pub fn write_str(&mut self, s: &str) -> Result<(), PackError> {
        self.write_str_hdr(s.len())?;
        self.writer.buf(s.as_bytes());
        Ok(())
    }

    pub fn write_bin_hdr(&mut self, length: usize) -> Result<(), PackError> {
        if length as u64 > MAX_BIN_LEN {
            return Err(PackError::BinOutOfRange(length));
        }
        if length <= 0xff {
            self.writer.u8(BIN8);
            self.writer.u8(length as u8);
        } else if length <= 0xffff {
            self.writer.u8u16(BIN16, length as u16);
        } else {
            self.writer.u8u32(BIN32, length as u32);
        }
        Ok(())
    }

    pub fn write_bin(&mut self, bytes: &[u8]) -> Result<(), PackError> {
        self.write_bin_hdr(bytes.len())?;
        self.writer.buf(bytes);
        Ok(())
    }

    pub fn write_arr_hdr(&mut self, length: usize) -> Result<(), PackError> {
        if length as u64 > MAX_ARRAY_LEN {
            return Err(PackError::ArrayOutOfRange(length));
        }
        if length <= 0xf {
            self.writer.u8(FIXARRAY_BASE | length as u8);
        } else if length <= 0xffff {
            self.writer.u8u16(ARRAY16, length as u16);
        } else {
            self.writer.u8u32(ARRAY32, length as u32);
        }
        Ok(())
    }

    pub fn write_arr(&mut self, items: &[Value]) -> Result<(), PackError> {
        self.write_arr_hdr(items.len())?;
        for item in items {
            self.write_any(item)?;
        }
        Ok(())
    }

    pub fn write_map_hdr(&mut self, length: usize) -> Result<(), PackError> {
        if length as u64 > MAX_MAP_LEN {
            return Err(PackError::MapOutOfRange(length));
        }
        if length <= 0xf {
            self.writer.u8(FIXMAP_BASE | length as u8);
        } else if length <= 0xffff {
            self.writer.u8u16(MAP16, length as u16);
        } else {
            self.writer.u8u32(MAP32, length as u32);
        }
        Ok(())
    }

    /// Pairs are written in iteration order; keys may be any value kind.
    pub fn write_map(&mut self, pairs: &[(Value, Value)]) -> Result<(), PackError> {
        self.write_map_hdr(pairs.len())?;
        for (key, val) in pairs {
            self.write_any(key)?;
            self.write_any(val)?;
        }
        Ok(())
    }

    /// Payload lengths of exactly 1/2/4/8/16 take a fixext marker with no
    /// explicit length field; everything else takes ext 8/16/32.
    pub fn write_ext_hdr(&mut self, ext_type: i8, length: usize) {
        match length {
            1 => self.writer.u8(FIXEXT1),
            2 => self.writer.u8(FIXEXT2),
            4 => self.writer.u8(FIXEXT4),
            8 => self.writer.u8(FIXEXT8),
            16 => self.writer.u8(FIXEXT16),
            _ if length <= 0xff => {
                self.writer.u8(EXT8);
                self.writer.u8(length as u8);
            }
            _ if length <= 0xffff => {
                self.writer.u8u16(EXT16, length as u16);
            }
            _ => {
                self.writer.u8u32(EXT32, length as u32);
            }
        }
        self.writer.i8(ext_type);
    }

    pub fn write_ext(&mut self, ext: &ExtensionValue) {
        self.write_ext_hdr(ext.ext_type(), ext.data().len());
        self.writer.buf(ext.data());
    }

    /// The 4/8-byte timestamp payloads inherit fixext framing; the 12-byte
    /// form always goes through ext 8 with an explicit length byte.
    pub fn write_timestamp(&mut self, ts: &Timestamp) {
        self.write_ext(&ts.to_extension());
    }
}
