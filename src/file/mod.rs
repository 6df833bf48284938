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

//! File-level APIs: the byte source contract, footer location, and the
//! decoded metadata model.
//!
//! A Parquet file ends with an 8 byte trailer: a little-endian u32 footer
//! length followed by the magic `PAR1`. The thrift-encoded `FileMetaData`
//! immediately precedes the trailer. [`footer::parse_metadata`] is the
//! entry point tying these pieces together.

pub mod footer;
pub mod metadata;
pub mod printer;
pub mod reader;
pub mod statistics;

/// Length of the file trailer: footer length plus magic.
pub const FOOTER_SIZE: usize = 8;
/// Magic bytes at the start and end of every Parquet file.
pub(crate) const PARQUET_MAGIC: [u8; 4] = [b'P', b'A', b'R', b'1'];
/// Trailing magic of files with an encrypted footer, which this crate
/// does not read.
pub(crate) const PARQUET_MAGIC_ENCRYPTED_FOOTER: [u8; 4] = [b'P', b'A', b'R', b'E'];
