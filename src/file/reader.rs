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

//! The byte source contract consumed by the decoder.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};

use bytes::Bytes;

use crate::errors::{ParquetError, Result};

/// Length of an object from which bytes can be read.
pub trait Length {
    /// Total size in bytes.
    fn len(&self) -> u64;
}

/// A random-access byte source.
///
/// The decoder issues a small number of strictly ordered, idempotent reads
/// per decode call and borrows the source only for the duration of the
/// call. Independent decode calls may share a source if its positioned
/// reads are safe to issue concurrently.
pub trait ChunkReader: Length {
    /// Read exactly `length` bytes starting at `start`, or fail.
    fn get_bytes(&self, start: u64, length: usize) -> Result<Bytes>;
}

impl Length for File {
    fn len(&self) -> u64 {
        self.metadata().map(|m| m.len()).unwrap_or(0u64)
    }
}

impl ChunkReader for File {
    fn get_bytes(&self, start: u64, length: usize) -> Result<Bytes> {
        let mut reader = self.try_clone()?;
        reader.seek(SeekFrom::Start(start))?;
        let mut buffer = vec![0u8; length];
        reader.read_exact(&mut buffer)?;
        Ok(buffer.into())
    }
}

impl Length for Bytes {
    fn len(&self) -> u64 {
        self.as_ref().len() as u64
    }
}

impl ChunkReader for Bytes {
    fn get_bytes(&self, start: u64, length: usize) -> Result<Bytes> {
        let start = usize::try_from(start)
            .map_err(|_| eof_err!("read at offset {} beyond end of in-memory source", start))?;
        let end = start
            .checked_add(length)
            .filter(|end| *end <= self.as_ref().len())
            .ok_or_else(|| {
                eof_err!(
                    "read of {} bytes at offset {} beyond source of {} bytes",
                    length,
                    start,
                    self.as_ref().len()
                )
            })?;
        Ok(self.slice(start..end))
    }
}
