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

//! Locating and decoding the Parquet footer.
//!
//! ```text
//! +--------------------------+----------+----------------+
//! |      rest of file        | metadata | len u32 'PAR1' |
//! +--------------------------+----------+----------------+
//! ```
//!
//! [`parse_metadata`] reads the trailer, validates the magic and the
//! declared length, then decodes the thrift `FileMetaData` that precedes
//! it. The metadata region is held wholly in memory during the parse; the
//! format is backward-referenced and cannot be streamed.

use crate::errors::{ParquetError, Result};
use crate::file::metadata::{thrift, FileMetaData};
use crate::file::reader::{ChunkReader, Length};
use crate::file::{FOOTER_SIZE, PARQUET_MAGIC, PARQUET_MAGIC_ENCRYPTED_FOOTER};

/// Read and decode the [`FileMetaData`] from the footer of a Parquet file.
///
/// Issues two reads against `reader`: the 8 byte trailer, then the
/// metadata region whose length the trailer declares.
pub fn parse_metadata<R: ChunkReader>(reader: &R) -> Result<FileMetaData> {
    let file_size = reader.len();
    if file_size < FOOTER_SIZE as u64 {
        return Err(ParquetError::TooSmall(format!(
            "{file_size} bytes cannot hold a Parquet footer"
        )));
    }

    let tail = reader.get_bytes(file_size - FOOTER_SIZE as u64, FOOTER_SIZE)?;
    let tail: &[u8; FOOTER_SIZE] = tail
        .as_ref()
        .try_into()
        .map_err(|_| eof_err!("byte source returned a short trailer read"))?;
    let metadata_len = decode_footer(tail)?;

    if metadata_len as u64 + FOOTER_SIZE as u64 > file_size {
        return Err(malformed_err!(
            "reported metadata length of {} + {} byte footer, but file is only {} bytes",
            metadata_len,
            FOOTER_SIZE,
            file_size
        ));
    }

    let start = file_size - metadata_len as u64 - FOOTER_SIZE as u64;
    let buf = reader.get_bytes(start, metadata_len)?;
    let mut metadata = decode_metadata(buf.as_ref())?;
    metadata.file_size = file_size;
    Ok(metadata)
}

/// Decode the 8 byte trailer, returning the metadata length.
///
/// Fails with `BadMagic` unless the trailer ends in `PAR1` (files ending
/// in `PARE` carry an encrypted footer, which this crate does not read),
/// and with `MalformedEncoding` for a declared length of zero.
pub fn decode_footer(slice: &[u8; FOOTER_SIZE]) -> Result<usize> {
    if slice[4..] == PARQUET_MAGIC_ENCRYPTED_FOOTER {
        return Err(ParquetError::BadMagic(
            "encrypted footer (PARE) is not supported".to_owned(),
        ));
    }
    if slice[4..] != PARQUET_MAGIC {
        return Err(ParquetError::BadMagic("corrupt footer".to_owned()));
    }

    // infallible: the slice is exactly 4 bytes
    let metadata_len = u32::from_le_bytes(slice[..4].try_into().unwrap());
    if metadata_len == 0 {
        return Err(malformed_err!("footer length of zero"));
    }
    Ok(metadata_len as usize)
}

/// Decode [`FileMetaData`] from an already-located footer slice.
///
/// `buf` is the thrift compact encoding of `FileMetaData`, i.e. the bytes
/// immediately preceding the trailer. [`FileMetaData::file_size`] is zero
/// on the returned value since a bare slice has no enclosing file.
pub fn decode_metadata(buf: &[u8]) -> Result<FileMetaData> {
    thrift::file_meta_from_bytes(buf)
}
