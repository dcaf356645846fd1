//! The timestamp extension (type -1).
//!
//! Three payload layouts, chosen by magnitude:
//!
//! timestamp 32 - seconds fit 34 bits and nanoseconds are zero:
//! 4-byte big-endian unsigned seconds.
//!
//! timestamp 64 - seconds fit 34 bits: one 8-byte big-endian word packing
//! `(nanoseconds << 34) | seconds`, nanoseconds in the top 30 bits.
//!
//! timestamp 96 - everything else (including pre-epoch instants): 4-byte
//! big-endian unsigned nanoseconds, then 8-byte big-endian signed seconds.

use std::fmt;

use chrono::{DateTime, Utc};
use wirepack_buffers::ByteCursor;

use crate::error::PackError;
use crate::ext::ExtensionValue;

/// Extension type code reserved for timestamps.
pub const TIMESTAMP_TYPE: i8 = -1;

/// A point in time as seconds/nanoseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    seconds: i64,
    nanos: u32,
}

impl Timestamp {
    pub fn from_parts(seconds: i64, nanos: u32) -> Self {
        Self { seconds, nanos }
    }

    /// Derives whole seconds and nanoseconds-of-second from a calendar
    /// instant.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self {
            seconds: dt.timestamp(),
            nanos: dt.timestamp_subsec_nanos(),
        }
    }

    /// The calendar form, when representable by chrono.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.seconds, self.nanos)
    }

    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    pub fn nanos(&self) -> u32 {
        self.nanos
    }

    /// Packs into the 4-, 8-, or 12-byte wire payload.
    ///
    /// The 4-byte form requires seconds to fit 32 bits, not just 34: a
    /// zero-nanosecond instant with 33- or 34-bit seconds still takes the
    /// 8-byte form.
    pub fn to_payload(&self) -> Vec<u8> {
        if (self.seconds >> 34) == 0 {
            if self.nanos == 0 && (self.seconds >> 32) == 0 {
                (self.seconds as u32).to_be_bytes().to_vec()
            } else {
                let word = ((self.nanos as u64) << 34) | self.seconds as u64;
                word.to_be_bytes().to_vec()
            }
        } else {
            let mut payload = Vec::with_capacity(12);
            payload.extend_from_slice(&self.nanos.to_be_bytes());
            payload.extend_from_slice(&self.seconds.to_be_bytes());
            payload
        }
    }

    /// Unpacks a 4-, 8-, or 12-byte wire payload.
    pub fn from_payload(data: &[u8]) -> Result<Self, PackError> {
        let mut cursor = ByteCursor::new(data);
        match data.len() {
            4 => {
                let seconds = cursor.u32()? as i64;
                Ok(Self { seconds, nanos: 0 })
            }
            8 => {
                let word = cursor.u64()?;
                Ok(Self {
                    seconds: (word & 0x0000_0003_ffff_ffff) as i64,
                    nanos: (word >> 34) as u32,
                })
            }
            12 => {
                let nanos = cursor.u32()?;
                let seconds = cursor.i64()?;
                Ok(Self { seconds, nanos })
            }
            len => Err(PackError::TimestampPayload(len)),
        }
    }

    /// Wraps the payload as a type -1 extension.
    pub fn to_extension(&self) -> ExtensionValue {
        ExtensionValue::from_parts(TIMESTAMP_TYPE, self.to_payload())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::from_datetime(dt)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.datetime() {
            Some(dt) => write!(f, "{}", dt.format("%Y/%m/%d %H:%M:%S%.6f%z")),
            None => write!(f, "{}s {}ns since epoch", self.seconds, self.nanos),
        }
    }
}
