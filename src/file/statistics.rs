// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Column chunk statistics and their typed decoding.
//!
//! Min/max statistics are stored as raw byte strings whose meaning depends
//! on the column's physical type. [`Statistics`] keeps them as stored
//! (an empty byte string is a legitimate value, distinct from an absent
//! one); [`StatValue::from_bytes`] interprets them.

use std::fmt;

use crate::basic::Type;

/// Julian day number of 1970-01-01.
const JULIAN_DAY_OF_EPOCH: i64 = 2_440_588;

/// Statistics of one column chunk, as stored in the footer.
///
/// When a footer carries both the deprecated `min`/`max` fields and the
/// v2 `min_value`/`max_value` fields, the v2 values win.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statistics {
    pub(crate) min: Option<Vec<u8>>,
    pub(crate) max: Option<Vec<u8>>,
    pub(crate) null_count: i64,
    pub(crate) distinct_count: i64,
}

impl Statistics {
    /// Raw minimum value bytes, if recorded.
    pub fn min_bytes(&self) -> Option<&[u8]> {
        self.min.as_deref()
    }

    /// Raw maximum value bytes, if recorded.
    pub fn max_bytes(&self) -> Option<&[u8]> {
        self.max.as_deref()
    }

    /// Number of null values, or `-1` when not recorded.
    pub fn null_count(&self) -> i64 {
        self.null_count
    }

    /// Number of distinct values, or `-1` when not recorded.
    pub fn distinct_count(&self) -> i64 {
        self.distinct_count
    }

    /// The minimum decoded per `physical_type`, if recorded.
    pub fn min_value(&self, physical_type: Type) -> Option<StatValue> {
        self.min
            .as_deref()
            .map(|data| StatValue::from_bytes(physical_type, data))
    }

    /// The maximum decoded per `physical_type`, if recorded.
    pub fn max_value(&self, physical_type: Type) -> Option<StatValue> {
        self.max
            .as_deref()
            .map(|data| StatValue::from_bytes(physical_type, data))
    }
}

/// A deprecated 96 bit timestamp: nanoseconds within the day, then the
/// Julian day number, both little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Int96 {
    julian_day: u32,
    nanos_of_day: u64,
}

impl Int96 {
    pub(crate) fn new(julian_day: u32, nanos_of_day: u64) -> Self {
        Self {
            julian_day,
            nanos_of_day,
        }
    }

    /// The Julian day number.
    pub fn julian_day(&self) -> u32 {
        self.julian_day
    }

    /// Nanoseconds elapsed within the day.
    pub fn nanos_of_day(&self) -> u64 {
        self.nanos_of_day
    }

    /// Days between the Unix epoch and this value's date; negative for
    /// dates before 1970-01-01.
    pub fn days_since_epoch(&self) -> i64 {
        self.julian_day as i64 - JULIAN_DAY_OF_EPOCH
    }
}

impl fmt::Display for Int96 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:+}d {}ns",
            self.days_since_epoch(),
            self.nanos_of_day
        )
    }
}

/// A statistics byte string decoded per the column's physical type.
///
/// Byte strings whose length does not match the physical type's fixed
/// width decode to [`StatValue::Bytes`] rather than failing; statistics
/// are advisory and a bad length must not poison the whole footer.
#[derive(Debug, Clone, PartialEq)]
pub enum StatValue {
    Int32(i32),
    Int64(i64),
    Float(f32),
    Double(f64),
    Int96(Int96),
    /// The raw bytes, for the byte-array physical types and for any value
    /// of unexpected length.
    Bytes(Vec<u8>),
}

impl StatValue {
    /// Decode a statistics byte string.
    ///
    /// Values use PLAIN encoding, except that variable-length byte arrays
    /// carry no length prefix.
    pub fn from_bytes(physical_type: Type, data: &[u8]) -> StatValue {
        match physical_type {
            Type::INT32 => match <[u8; 4]>::try_from(data) {
                Ok(le) => StatValue::Int32(i32::from_le_bytes(le)),
                Err(_) => StatValue::Bytes(data.to_vec()),
            },
            Type::INT64 => match <[u8; 8]>::try_from(data) {
                Ok(le) => StatValue::Int64(i64::from_le_bytes(le)),
                Err(_) => StatValue::Bytes(data.to_vec()),
            },
            Type::FLOAT => match <[u8; 4]>::try_from(data) {
                Ok(le) => StatValue::Float(f32::from_le_bytes(le)),
                Err(_) => StatValue::Bytes(data.to_vec()),
            },
            Type::DOUBLE => match <[u8; 8]>::try_from(data) {
                Ok(le) => StatValue::Double(f64::from_le_bytes(le)),
                Err(_) => StatValue::Bytes(data.to_vec()),
            },
            Type::INT96 => {
                if data.len() == 12 {
                    // this unwrap is infallible after the length check
                    let nanos = u64::from_le_bytes(data[..8].try_into().unwrap());
                    let day = u32::from_le_bytes(data[8..].try_into().unwrap());
                    StatValue::Int96(Int96::new(day, nanos))
                } else {
                    StatValue::Bytes(data.to_vec())
                }
            }
            // BOOLEAN, BYTE_ARRAY and FIXED_LEN_BYTE_ARRAY stay raw
            _ => StatValue::Bytes(data.to_vec()),
        }
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StatValue::Int32(v) => write!(f, "{v}"),
            StatValue::Int64(v) => write!(f, "{v}"),
            StatValue::Float(v) => write!(f, "{v}"),
            StatValue::Double(v) => write!(f, "{v}"),
            StatValue::Int96(v) => write!(f, "{v}"),
            StatValue::Bytes(data) => {
                if !data.is_empty() && data.iter().all(|b| (32..127).contains(b)) {
                    // printable ASCII as-is, everything else as hex
                    for b in data {
                        write!(f, "{}", *b as char)?;
                    }
                    Ok(())
                } else {
                    write!(f, "0x")?;
                    for b in data {
                        write!(f, "{b:02x}")?;
                    }
                    Ok(())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_int32() {
        assert_eq!(
            StatValue::from_bytes(Type::INT32, &5i32.to_le_bytes()),
            StatValue::Int32(5)
        );
        assert_eq!(
            StatValue::from_bytes(Type::INT32, &(-7i32).to_le_bytes()),
            StatValue::Int32(-7)
        );
    }

    #[test]
    fn test_decode_int64() {
        assert_eq!(
            StatValue::from_bytes(Type::INT64, &i64::MIN.to_le_bytes()),
            StatValue::Int64(i64::MIN)
        );
    }

    #[test]
    fn test_decode_float_double() {
        assert_eq!(
            StatValue::from_bytes(Type::FLOAT, &1.5f32.to_le_bytes()),
            StatValue::Float(1.5)
        );
        assert_eq!(
            StatValue::from_bytes(Type::DOUBLE, &(-2.25f64).to_le_bytes()),
            StatValue::Double(-2.25)
        );
    }

    #[test]
    fn test_length_mismatch_returns_raw() {
        // 3 bytes can not be an INT32; the decoder must not fail
        assert_eq!(
            StatValue::from_bytes(Type::INT32, &[1, 2, 3]),
            StatValue::Bytes(vec![1, 2, 3])
        );
        assert_eq!(
            StatValue::from_bytes(Type::DOUBLE, &[0; 4]),
            StatValue::Bytes(vec![0; 4])
        );
    }

    #[test]
    fn test_empty_bytes_are_a_value() {
        assert_eq!(
            StatValue::from_bytes(Type::BYTE_ARRAY, &[]),
            StatValue::Bytes(vec![])
        );
        assert_eq!(
            StatValue::from_bytes(Type::INT32, &[]),
            StatValue::Bytes(vec![])
        );
    }

    #[test]
    fn test_int96_epoch() {
        // low 8 bytes: zero nanos; high 4 bytes: Julian day of the epoch
        let mut data = [0u8; 12];
        data[8..].copy_from_slice(&2_440_588u32.to_le_bytes());
        let StatValue::Int96(v) = StatValue::from_bytes(Type::INT96, &data) else {
            panic!("expected INT96 to decode");
        };
        assert_eq!(v.days_since_epoch(), 0);
        assert_eq!(v.nanos_of_day(), 0);
    }

    #[test]
    fn test_int96_nanos_and_day() {
        let mut data = [0u8; 12];
        data[..8].copy_from_slice(&86_399_999_999_999u64.to_le_bytes());
        data[8..].copy_from_slice(&2_440_589u32.to_le_bytes());
        let StatValue::Int96(v) = StatValue::from_bytes(Type::INT96, &data) else {
            panic!("expected INT96 to decode");
        };
        assert_eq!(v.days_since_epoch(), 1);
        assert_eq!(v.nanos_of_day(), 86_399_999_999_999);
        assert_eq!(v.julian_day(), 2_440_589);
    }

    #[test]
    fn test_boolean_stays_raw() {
        assert_eq!(
            StatValue::from_bytes(Type::BOOLEAN, &[1]),
            StatValue::Bytes(vec![1])
        );
    }

    #[test]
    fn test_display_hex_or_value() {
        assert_eq!(StatValue::Int32(42).to_string(), "42");
        assert_eq!(
            StatValue::Bytes(b"alpha".to_vec()).to_string(),
            "alpha"
        );
        assert_eq!(
            StatValue::Bytes(vec![0x00, 0xff]).to_string(),
            "0x00ff"
        );
    }
}
