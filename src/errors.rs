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

//! Common errors and macros.

use std::error::Error;
use std::{io, result};

/// Decoder error enumeration.
///
/// A decode call either produces a complete result or exactly one of these;
/// the decoder never retries, never logs, and never returns partial output.
#[derive(Debug)]
pub enum ParquetError {
    /// The byte source is too short to hold the 8 byte footer trailer.
    TooSmall(String),
    /// The trailing magic bytes are not `PAR1`.
    BadMagic(String),
    /// The input ended in the middle of a value.
    TruncatedInput(String),
    /// Bytes were present but could not be decoded.
    MalformedEncoding(String),
    /// A field the format makes mandatory is absent.
    MissingRequiredField(String),
    /// A column chunk path does not correspond to exactly one schema leaf.
    SchemaMismatch(String),
    /// A bloom filter probe was requested for a column that has none.
    BloomAbsent(String),
    /// The underlying byte source failed.
    IoError(io::Error),
}

impl std::fmt::Display for ParquetError {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match &self {
            ParquetError::TooSmall(message) => {
                write!(fmt, "Parquet file too small: {message}")
            }
            ParquetError::BadMagic(message) => write!(fmt, "Bad Parquet magic: {message}"),
            ParquetError::TruncatedInput(message) => write!(fmt, "Truncated input: {message}"),
            ParquetError::MalformedEncoding(message) => {
                write!(fmt, "Malformed encoding: {message}")
            }
            ParquetError::MissingRequiredField(message) => {
                write!(fmt, "Required field {message} is missing")
            }
            ParquetError::SchemaMismatch(message) => write!(fmt, "Schema mismatch: {message}"),
            ParquetError::BloomAbsent(message) => write!(fmt, "No bloom filter: {message}"),
            ParquetError::IoError(e) => write!(fmt, "IO error: {e}"),
        }
    }
}

impl Error for ParquetError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParquetError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ParquetError {
    fn from(e: io::Error) -> ParquetError {
        ParquetError::IoError(e)
    }
}

impl From<std::string::FromUtf8Error> for ParquetError {
    fn from(e: std::string::FromUtf8Error) -> ParquetError {
        ParquetError::MalformedEncoding(format!("invalid utf8: {e}"))
    }
}

/// A specialized `Result` for decoder errors.
pub type Result<T, E = ParquetError> = result::Result<T, E>;

// ----------------------------------------------------------------------
// Convenient macros for different errors

macro_rules! malformed_err {
    ($fmt:expr) => (ParquetError::MalformedEncoding($fmt.to_owned()));
    ($fmt:expr, $($args:expr),*) => (ParquetError::MalformedEncoding(format!($fmt, $($args),*)));
}

macro_rules! eof_err {
    ($fmt:expr) => (ParquetError::TruncatedInput($fmt.to_owned()));
    ($fmt:expr, $($args:expr),*) => (ParquetError::TruncatedInput(format!($fmt, $($args),*)));
}

macro_rules! missing_field_err {
    ($fmt:expr) => (ParquetError::MissingRequiredField($fmt.to_owned()));
    ($fmt:expr, $($args:expr),*) => (ParquetError::MissingRequiredField(format!($fmt, $($args),*)));
}

macro_rules! schema_err {
    ($fmt:expr) => (ParquetError::SchemaMismatch($fmt.to_owned()));
    ($fmt:expr, $($args:expr),*) => (ParquetError::SchemaMismatch(format!($fmt, $($args),*)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            ParquetError::MissingRequiredField("num_rows".to_owned()).to_string(),
            "Required field num_rows is missing"
        );
        assert_eq!(
            ParquetError::BadMagic("corrupt footer".to_owned()).to_string(),
            "Bad Parquet magic: corrupt footer"
        );
    }

    #[test]
    fn test_io_error_source() {
        let err = ParquetError::from(io::Error::new(io::ErrorKind::UnexpectedEof, "short read"));
        assert!(err.source().is_some());
        assert!(matches!(err, ParquetError::IoError(_)));
    }
}
