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

//! Rust mirrors of the enums and unions in the Parquet thrift definition.
//!
//! Codes for encodings, compression codecs, repetition and converted types
//! that this crate does not know are preserved as `UNKNOWN` variants
//! carrying the raw integer; deciding how strict to be about them is left
//! to the consumer.

use std::{fmt, str};

use crate::errors::{ParquetError, Result};
use crate::thrift::{FieldType, ReadThrift, ThriftSliceInputProtocol};

// ----------------------------------------------------------------------
// Mirrors thrift enum `Type`

/// Physical types supported by Parquet.
///
/// These control the on disk storage format; the interpretation of the
/// stored values is given by [`LogicalType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum Type {
    /// 1 bit per value.
    BOOLEAN,
    /// Little-endian signed 32 bit integers.
    INT32,
    /// Little-endian signed 64 bit integers.
    INT64,
    /// Deprecated 96 bit timestamps, only written by legacy implementations.
    INT96,
    /// IEEE 754 binary32.
    FLOAT,
    /// IEEE 754 binary64.
    DOUBLE,
    /// Length-prefixed byte strings.
    BYTE_ARRAY,
    /// Byte strings of a fixed length recorded in the schema.
    FIXED_LEN_BYTE_ARRAY,
}

impl Type {
    /// The thrift enum code for this physical type.
    pub fn as_code(&self) -> i32 {
        match self {
            Type::BOOLEAN => 0,
            Type::INT32 => 1,
            Type::INT64 => 2,
            Type::INT96 => 3,
            Type::FLOAT => 4,
            Type::DOUBLE => 5,
            Type::BYTE_ARRAY => 6,
            Type::FIXED_LEN_BYTE_ARRAY => 7,
        }
    }

    /// Decode a thrift enum code. Unlike the enums below there is no
    /// tolerated unknown here: a column with an unknown physical type can
    /// not be interpreted at all.
    pub fn try_from_code(code: i32) -> Result<Type> {
        match code {
            0 => Ok(Type::BOOLEAN),
            1 => Ok(Type::INT32),
            2 => Ok(Type::INT64),
            3 => Ok(Type::INT96),
            4 => Ok(Type::FLOAT),
            5 => Ok(Type::DOUBLE),
            6 => Ok(Type::BYTE_ARRAY),
            7 => Ok(Type::FIXED_LEN_BYTE_ARRAY),
            _ => Err(malformed_err!("unexpected physical type {}", code)),
        }
    }
}

impl ReadThrift for Type {
    fn read_thrift(prot: &mut ThriftSliceInputProtocol<'_>) -> Result<Self> {
        Type::try_from_code(prot.read_i32()?)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl str::FromStr for Type {
    type Err = ParquetError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "BOOLEAN" => Ok(Type::BOOLEAN),
            "INT32" => Ok(Type::INT32),
            "INT64" => Ok(Type::INT64),
            "INT96" => Ok(Type::INT96),
            "FLOAT" => Ok(Type::FLOAT),
            "DOUBLE" => Ok(Type::DOUBLE),
            "BYTE_ARRAY" => Ok(Type::BYTE_ARRAY),
            "FIXED_LEN_BYTE_ARRAY" => Ok(Type::FIXED_LEN_BYTE_ARRAY),
            _ => Err(malformed_err!("unknown physical type name {}", s)),
        }
    }
}

// ----------------------------------------------------------------------
// Mirrors thrift enum `FieldRepetitionType`

/// Repetition of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum Repetition {
    /// Exactly one value per row, never null.
    REQUIRED,
    /// Zero or one value per row.
    OPTIONAL,
    /// Zero or more values per row.
    REPEATED,
    /// A repetition code this crate does not know.
    UNKNOWN(i32),
}

impl Repetition {
    pub fn from_code(code: i32) -> Repetition {
        match code {
            0 => Repetition::REQUIRED,
            1 => Repetition::OPTIONAL,
            2 => Repetition::REPEATED,
            other => Repetition::UNKNOWN(other),
        }
    }

    pub fn as_code(&self) -> i32 {
        match self {
            Repetition::REQUIRED => 0,
            Repetition::OPTIONAL => 1,
            Repetition::REPEATED => 2,
            Repetition::UNKNOWN(code) => *code,
        }
    }
}

impl ReadThrift for Repetition {
    fn read_thrift(prot: &mut ThriftSliceInputProtocol<'_>) -> Result<Self> {
        Ok(Repetition::from_code(prot.read_i32()?))
    }
}

impl fmt::Display for Repetition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

// ----------------------------------------------------------------------
// Mirrors thrift enum `Encoding`

/// Page encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum Encoding {
    PLAIN,
    PLAIN_DICTIONARY,
    RLE,
    BIT_PACKED,
    DELTA_BINARY_PACKED,
    DELTA_LENGTH_BYTE_ARRAY,
    DELTA_BYTE_ARRAY,
    RLE_DICTIONARY,
    BYTE_STREAM_SPLIT,
    /// An encoding code this crate does not know.
    UNKNOWN(i32),
}

impl Encoding {
    pub fn from_code(code: i32) -> Encoding {
        match code {
            0 => Encoding::PLAIN,
            2 => Encoding::PLAIN_DICTIONARY,
            3 => Encoding::RLE,
            4 => Encoding::BIT_PACKED,
            5 => Encoding::DELTA_BINARY_PACKED,
            6 => Encoding::DELTA_LENGTH_BYTE_ARRAY,
            7 => Encoding::DELTA_BYTE_ARRAY,
            8 => Encoding::RLE_DICTIONARY,
            9 => Encoding::BYTE_STREAM_SPLIT,
            other => Encoding::UNKNOWN(other),
        }
    }

    pub fn as_code(&self) -> i32 {
        match self {
            Encoding::PLAIN => 0,
            Encoding::PLAIN_DICTIONARY => 2,
            Encoding::RLE => 3,
            Encoding::BIT_PACKED => 4,
            Encoding::DELTA_BINARY_PACKED => 5,
            Encoding::DELTA_LENGTH_BYTE_ARRAY => 6,
            Encoding::DELTA_BYTE_ARRAY => 7,
            Encoding::RLE_DICTIONARY => 8,
            Encoding::BYTE_STREAM_SPLIT => 9,
            Encoding::UNKNOWN(code) => *code,
        }
    }
}

impl ReadThrift for Encoding {
    fn read_thrift(prot: &mut ThriftSliceInputProtocol<'_>) -> Result<Self> {
        Ok(Encoding::from_code(prot.read_i32()?))
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Encoding::UNKNOWN(code) => write!(f, "UNKNOWN({code})"),
            _ => write!(f, "{self:?}"),
        }
    }
}

impl str::FromStr for Encoding {
    type Err = ParquetError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "PLAIN" => Ok(Encoding::PLAIN),
            "PLAIN_DICTIONARY" => Ok(Encoding::PLAIN_DICTIONARY),
            "RLE" => Ok(Encoding::RLE),
            "BIT_PACKED" => Ok(Encoding::BIT_PACKED),
            "DELTA_BINARY_PACKED" => Ok(Encoding::DELTA_BINARY_PACKED),
            "DELTA_LENGTH_BYTE_ARRAY" => Ok(Encoding::DELTA_LENGTH_BYTE_ARRAY),
            "DELTA_BYTE_ARRAY" => Ok(Encoding::DELTA_BYTE_ARRAY),
            "RLE_DICTIONARY" => Ok(Encoding::RLE_DICTIONARY),
            "BYTE_STREAM_SPLIT" => Ok(Encoding::BYTE_STREAM_SPLIT),
            _ => Err(malformed_err!("unknown encoding name {}", s)),
        }
    }
}

// ----------------------------------------------------------------------
// Mirrors thrift enum `CompressionCodec`

/// Compression codecs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum Compression {
    UNCOMPRESSED,
    SNAPPY,
    GZIP,
    LZO,
    BROTLI,
    LZ4,
    ZSTD,
    LZ4_RAW,
    /// A codec code this crate does not know.
    UNKNOWN(i32),
}

impl Compression {
    pub fn from_code(code: i32) -> Compression {
        match code {
            0 => Compression::UNCOMPRESSED,
            1 => Compression::SNAPPY,
            2 => Compression::GZIP,
            3 => Compression::LZO,
            4 => Compression::BROTLI,
            5 => Compression::LZ4,
            6 => Compression::ZSTD,
            7 => Compression::LZ4_RAW,
            other => Compression::UNKNOWN(other),
        }
    }

    pub fn as_code(&self) -> i32 {
        match self {
            Compression::UNCOMPRESSED => 0,
            Compression::SNAPPY => 1,
            Compression::GZIP => 2,
            Compression::LZO => 3,
            Compression::BROTLI => 4,
            Compression::LZ4 => 5,
            Compression::ZSTD => 6,
            Compression::LZ4_RAW => 7,
            Compression::UNKNOWN(code) => *code,
        }
    }
}

impl ReadThrift for Compression {
    fn read_thrift(prot: &mut ThriftSliceInputProtocol<'_>) -> Result<Self> {
        Ok(Compression::from_code(prot.read_i32()?))
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Compression::UNKNOWN(code) => write!(f, "UNKNOWN({code})"),
            _ => write!(f, "{self:?}"),
        }
    }
}

impl str::FromStr for Compression {
    type Err = ParquetError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "UNCOMPRESSED" => Ok(Compression::UNCOMPRESSED),
            "SNAPPY" => Ok(Compression::SNAPPY),
            "GZIP" => Ok(Compression::GZIP),
            "LZO" => Ok(Compression::LZO),
            "BROTLI" => Ok(Compression::BROTLI),
            "LZ4" => Ok(Compression::LZ4),
            "ZSTD" => Ok(Compression::ZSTD),
            "LZ4_RAW" => Ok(Compression::LZ4_RAW),
            _ => Err(malformed_err!("unknown compression codec name {}", s)),
        }
    }
}

// ----------------------------------------------------------------------
// Mirrors thrift enum `ConvertedType`

/// Deprecated logical type annotations, superseded by [`LogicalType`] in
/// format 2.4.0+ but still the only annotation older files carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum ConvertedType {
    UTF8,
    MAP,
    MAP_KEY_VALUE,
    LIST,
    ENUM,
    DECIMAL,
    DATE,
    TIME_MILLIS,
    TIME_MICROS,
    TIMESTAMP_MILLIS,
    TIMESTAMP_MICROS,
    UINT_8,
    UINT_16,
    UINT_32,
    UINT_64,
    INT_8,
    INT_16,
    INT_32,
    INT_64,
    JSON,
    BSON,
    INTERVAL,
    /// A converted type code this crate does not know.
    UNKNOWN(i32),
}

impl ConvertedType {
    pub fn from_code(code: i32) -> ConvertedType {
        match code {
            0 => ConvertedType::UTF8,
            1 => ConvertedType::MAP,
            2 => ConvertedType::MAP_KEY_VALUE,
            3 => ConvertedType::LIST,
            4 => ConvertedType::ENUM,
            5 => ConvertedType::DECIMAL,
            6 => ConvertedType::DATE,
            7 => ConvertedType::TIME_MILLIS,
            8 => ConvertedType::TIME_MICROS,
            9 => ConvertedType::TIMESTAMP_MILLIS,
            10 => ConvertedType::TIMESTAMP_MICROS,
            11 => ConvertedType::UINT_8,
            12 => ConvertedType::UINT_16,
            13 => ConvertedType::UINT_32,
            14 => ConvertedType::UINT_64,
            15 => ConvertedType::INT_8,
            16 => ConvertedType::INT_16,
            17 => ConvertedType::INT_32,
            18 => ConvertedType::INT_64,
            19 => ConvertedType::JSON,
            20 => ConvertedType::BSON,
            21 => ConvertedType::INTERVAL,
            other => ConvertedType::UNKNOWN(other),
        }
    }

    pub fn as_code(&self) -> i32 {
        match self {
            ConvertedType::UTF8 => 0,
            ConvertedType::MAP => 1,
            ConvertedType::MAP_KEY_VALUE => 2,
            ConvertedType::LIST => 3,
            ConvertedType::ENUM => 4,
            ConvertedType::DECIMAL => 5,
            ConvertedType::DATE => 6,
            ConvertedType::TIME_MILLIS => 7,
            ConvertedType::TIME_MICROS => 8,
            ConvertedType::TIMESTAMP_MILLIS => 9,
            ConvertedType::TIMESTAMP_MICROS => 10,
            ConvertedType::UINT_8 => 11,
            ConvertedType::UINT_16 => 12,
            ConvertedType::UINT_32 => 13,
            ConvertedType::UINT_64 => 14,
            ConvertedType::INT_8 => 15,
            ConvertedType::INT_16 => 16,
            ConvertedType::INT_32 => 17,
            ConvertedType::INT_64 => 18,
            ConvertedType::JSON => 19,
            ConvertedType::BSON => 20,
            ConvertedType::INTERVAL => 21,
            ConvertedType::UNKNOWN(code) => *code,
        }
    }
}

impl ReadThrift for ConvertedType {
    fn read_thrift(prot: &mut ThriftSliceInputProtocol<'_>) -> Result<Self> {
        Ok(ConvertedType::from_code(prot.read_i32()?))
    }
}

impl fmt::Display for ConvertedType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

// ----------------------------------------------------------------------
// Mirrors thrift union `TimeUnit`

/// Time unit for [`LogicalType::Time`] and [`LogicalType::Timestamp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum TimeUnit {
    MILLIS = 0,
    MICROS = 1,
    NANOS = 2,
}

impl ReadThrift for TimeUnit {
    // On the wire this is a thrift union of empty structs with field ids
    // 1 (millis), 2 (micros) and 3 (nanos).
    fn read_thrift(prot: &mut ThriftSliceInputProtocol<'_>) -> Result<Self> {
        let field_ident = prot.read_field_begin(0)?;
        if field_ident.field_type == FieldType::Stop {
            return Err(malformed_err!("received empty union for TimeUnit"));
        }
        let ret = match field_ident.id {
            1 => TimeUnit::MILLIS,
            2 => TimeUnit::MICROS,
            3 => TimeUnit::NANOS,
            id => return Err(malformed_err!("unexpected TimeUnit {}", id)),
        };
        prot.skip_empty_struct()?;
        let field_ident = prot.read_field_begin(0)?;
        if field_ident.field_type != FieldType::Stop {
            return Err(malformed_err!("received multiple fields for TimeUnit union"));
        }
        Ok(ret)
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

// ----------------------------------------------------------------------
// Mirrors thrift union `LogicalType`

/// Logical type annotations used by format 2.4.0+.
///
/// `None` says the column carries no annotation at all; it is distinct
/// from `Unknown`, which says the file carried an annotation this crate
/// does not recognize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogicalType {
    /// A UTF-8 encoded string.
    String,
    /// A map of key-value pairs.
    Map,
    /// A list of elements.
    List,
    /// One of a set of predefined values.
    Enum,
    /// A decimal value of fixed precision and scale.
    Decimal {
        /// Total number of digits.
        precision: i32,
        /// Digits after the decimal point.
        scale: i32,
    },
    /// Days since the Unix epoch.
    Date,
    /// Time of day.
    Time {
        /// Unit the time is stored in.
        unit: TimeUnit,
        /// Whether the value is adjusted to UTC.
        is_adjusted_to_utc: bool,
    },
    /// An instant as elapsed time since the Unix epoch.
    Timestamp {
        /// Unit the timestamp is stored in.
        unit: TimeUnit,
        /// Whether the value is adjusted to UTC.
        is_adjusted_to_utc: bool,
    },
    /// An integer of explicit width and signedness.
    Integer {
        /// Width in bits.
        bit_width: i8,
        /// Whether the integer is signed.
        is_signed: bool,
    },
    /// A JSON document.
    Json,
    /// A BSON document.
    Bson,
    /// A 16 byte UUID.
    Uuid,
    /// An IEEE 754 binary16.
    Float16,
    /// An annotation this crate does not recognize.
    Unknown,
    /// No annotation.
    None,
}

// private structs for decoding parameterized logical type variants

struct DecimalType {
    scale: i32,
    precision: i32,
}

impl ReadThrift for DecimalType {
    fn read_thrift(prot: &mut ThriftSliceInputProtocol<'_>) -> Result<Self> {
        let mut scale: Option<i32> = None;
        let mut precision: Option<i32> = None;
        let mut last_field_id = 0i16;
        loop {
            let field_ident = prot.read_field_begin(last_field_id)?;
            if field_ident.field_type == FieldType::Stop {
                break;
            }
            match field_ident.id {
                1 => scale = Some(prot.read_i32()?),
                2 => precision = Some(prot.read_i32()?),
                _ => prot.skip(field_ident.field_type)?,
            }
            last_field_id = field_ident.id;
        }
        let Some(scale) = scale else {
            return Err(missing_field_err!("scale"));
        };
        let Some(precision) = precision else {
            return Err(missing_field_err!("precision"));
        };
        Ok(Self { scale, precision })
    }
}

struct TimestampType {
    is_adjusted_to_utc: bool,
    unit: TimeUnit,
}

// the TIME and TIMESTAMP annotations share one encoding
use TimestampType as TimeType;

impl ReadThrift for TimestampType {
    fn read_thrift(prot: &mut ThriftSliceInputProtocol<'_>) -> Result<Self> {
        let mut is_adjusted_to_utc: Option<bool> = None;
        let mut unit: Option<TimeUnit> = None;
        let mut last_field_id = 0i16;
        loop {
            let field_ident = prot.read_field_begin(last_field_id)?;
            if field_ident.field_type == FieldType::Stop {
                break;
            }
            match field_ident.id {
                1 => is_adjusted_to_utc = field_ident.bool_val,
                2 => unit = Some(TimeUnit::read_thrift(prot)?),
                _ => prot.skip(field_ident.field_type)?,
            }
            last_field_id = field_ident.id;
        }
        let Some(is_adjusted_to_utc) = is_adjusted_to_utc else {
            return Err(missing_field_err!("is_adjusted_to_utc"));
        };
        let Some(unit) = unit else {
            return Err(missing_field_err!("unit"));
        };
        Ok(Self {
            is_adjusted_to_utc,
            unit,
        })
    }
}

struct IntType {
    bit_width: i8,
    is_signed: bool,
}

impl ReadThrift for IntType {
    fn read_thrift(prot: &mut ThriftSliceInputProtocol<'_>) -> Result<Self> {
        let mut bit_width: Option<i8> = None;
        let mut is_signed: Option<bool> = None;
        let mut last_field_id = 0i16;
        loop {
            let field_ident = prot.read_field_begin(last_field_id)?;
            if field_ident.field_type == FieldType::Stop {
                break;
            }
            match field_ident.id {
                1 => bit_width = Some(prot.read_i8()?),
                2 => is_signed = field_ident.bool_val,
                _ => prot.skip(field_ident.field_type)?,
            }
            last_field_id = field_ident.id;
        }
        let Some(bit_width) = bit_width else {
            return Err(missing_field_err!("bit_width"));
        };
        let Some(is_signed) = is_signed else {
            return Err(missing_field_err!("is_signed"));
        };
        Ok(Self {
            bit_width,
            is_signed,
        })
    }
}

impl ReadThrift for LogicalType {
    // A thrift union: exactly one field is present, and the field id picks
    // the variant. Unrecognized ids decode to `Unknown` with the value
    // skipped, so newer annotations never break the parse.
    fn read_thrift(prot: &mut ThriftSliceInputProtocol<'_>) -> Result<Self> {
        let field_ident = prot.read_field_begin(0)?;
        if field_ident.field_type == FieldType::Stop {
            return Err(malformed_err!("received empty union for LogicalType"));
        }
        let ret = match field_ident.id {
            1 => {
                prot.skip_empty_struct()?;
                Self::String
            }
            2 => {
                prot.skip_empty_struct()?;
                Self::Map
            }
            3 => {
                prot.skip_empty_struct()?;
                Self::List
            }
            4 => {
                prot.skip_empty_struct()?;
                Self::Enum
            }
            5 => {
                let val = DecimalType::read_thrift(prot)?;
                Self::Decimal {
                    precision: val.precision,
                    scale: val.scale,
                }
            }
            6 => {
                prot.skip_empty_struct()?;
                Self::Date
            }
            7 => {
                let val = TimeType::read_thrift(prot)?;
                Self::Time {
                    unit: val.unit,
                    is_adjusted_to_utc: val.is_adjusted_to_utc,
                }
            }
            8 => {
                let val = TimestampType::read_thrift(prot)?;
                Self::Timestamp {
                    unit: val.unit,
                    is_adjusted_to_utc: val.is_adjusted_to_utc,
                }
            }
            9 => {
                let val = IntType::read_thrift(prot)?;
                Self::Integer {
                    bit_width: val.bit_width,
                    is_signed: val.is_signed,
                }
            }
            10 => {
                prot.skip_empty_struct()?;
                Self::Json
            }
            11 => {
                prot.skip_empty_struct()?;
                Self::Bson
            }
            12 => {
                prot.skip_empty_struct()?;
                Self::Uuid
            }
            13 => {
                prot.skip_empty_struct()?;
                Self::Float16
            }
            _ => {
                prot.skip(field_ident.field_type)?;
                Self::Unknown
            }
        };
        let field_ident = prot.read_field_begin(0)?;
        if field_ident.field_type != FieldType::Stop {
            return Err(malformed_err!(
                "received multiple fields for LogicalType union"
            ));
        }
        Ok(ret)
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LogicalType::String => write!(f, "STRING"),
            LogicalType::Map => write!(f, "MAP"),
            LogicalType::List => write!(f, "LIST"),
            LogicalType::Enum => write!(f, "ENUM"),
            LogicalType::Decimal { precision, scale } => {
                write!(f, "DECIMAL({precision},{scale})")
            }
            LogicalType::Date => write!(f, "DATE"),
            LogicalType::Time {
                unit,
                is_adjusted_to_utc,
            } => write!(
                f,
                "TIME({unit},{})",
                if *is_adjusted_to_utc { "UTC" } else { "local" }
            ),
            LogicalType::Timestamp {
                unit,
                is_adjusted_to_utc,
            } => write!(
                f,
                "TIMESTAMP({unit},{})",
                if *is_adjusted_to_utc { "UTC" } else { "local" }
            ),
            LogicalType::Integer {
                bit_width,
                is_signed,
            } => write!(f, "INT({bit_width},{is_signed})"),
            LogicalType::Json => write!(f, "JSON"),
            LogicalType::Bson => write!(f, "BSON"),
            LogicalType::Uuid => write!(f, "UUID"),
            LogicalType::Float16 => write!(f, "FLOAT16"),
            LogicalType::Unknown => write!(f, "UNKNOWN"),
            LogicalType::None => write!(f, "NONE"),
        }
    }
}
