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

//! A read-only decoder for [Apache Parquet](https://parquet.apache.org/)
//! file metadata.
//!
//! Given a random-access byte source holding a Parquet file, this crate
//! locates and validates the footer, decodes the thrift compact encoded
//! `FileMetaData` into a self-contained model (row groups, column chunks,
//! schema with resolved logical types, statistics, key/value metadata),
//! and can probe a column chunk's split block bloom filter, all without
//! touching a single page of row data.
//!
//! # Example
//!
//! ```no_run
//! use std::fs::File;
//!
//! use parquet_meta::bloom_filter::test_bloom;
//! use parquet_meta::file::footer::parse_metadata;
//!
//! # fn main() -> parquet_meta::errors::Result<()> {
//! let file = File::open("data.parquet")?;
//! let metadata = parse_metadata(&file)?;
//! println!("{} rows", metadata.num_rows());
//!
//! for row_group in metadata.row_groups() {
//!     for column in row_group.columns() {
//!         if column.has_bloom_filter() {
//!             let hit = test_bloom(
//!                 &file,
//!                 column.bloom_filter_offset(),
//!                 column.bloom_filter_length(),
//!                 b"needle",
//!             )
//!             .unwrap_or(true); // bloom errors degrade to "possibly present"
//!             println!("{}: possibly present = {}", column.column_path(), hit);
//!         }
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Reading row data, writing files, and decrypting encrypted footers are
//! explicitly out of scope.

#[macro_use]
pub mod errors;
pub mod basic;

mod thrift;

pub mod bloom_filter;
pub mod file;
pub mod schema;
