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

//! The decoded metadata model.
//!
//! [`FileMetaData`] and everything it contains is self-contained and
//! immutable once returned: nothing references the byte source the footer
//! was decoded from. Optional integers (page offsets, bloom filter
//! location, counts) surface as `-1` when the footer did not record them,
//! keeping "absent" distinguishable from a legitimate zero.

use std::collections::HashMap;

use crate::basic::{Compression, Encoding, LogicalType, Type};
use crate::file::statistics::{StatValue, Statistics};
use crate::schema::types::{SchemaDescriptor, SchemaElement};

pub(crate) mod thrift;

/// Decoded metadata of one Parquet file.
#[derive(Debug, Clone)]
pub struct FileMetaData {
    pub(crate) version: i32,
    pub(crate) num_rows: i64,
    pub(crate) created_by: String,
    pub(crate) file_size: u64,
    pub(crate) schema_descr: SchemaDescriptor,
    pub(crate) row_groups: Vec<RowGroupMetaData>,
    pub(crate) key_value_metadata: HashMap<String, String>,
}

impl FileMetaData {
    /// Format version recorded by the writer, 0 when absent.
    pub fn version(&self) -> i32 {
        self.version
    }

    /// Total number of rows across all row groups.
    pub fn num_rows(&self) -> i64 {
        self.num_rows
    }

    /// The application that wrote the file; empty when not recorded.
    pub fn created_by(&self) -> &str {
        &self.created_by
    }

    /// Size in bytes of the decoded file. Zero when the footer was decoded
    /// from a bare byte slice rather than a sized source.
    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// The schema, with leaf paths and resolved logical types.
    pub fn schema(&self) -> &SchemaDescriptor {
        &self.schema_descr
    }

    /// The flattened schema element list, root first.
    pub fn schema_elements(&self) -> &[SchemaElement] {
        self.schema_descr.elements()
    }

    /// Row groups in file order.
    pub fn row_groups(&self) -> &[RowGroupMetaData] {
        &self.row_groups
    }

    /// File-level key/value metadata.
    pub fn key_value_metadata(&self) -> &HashMap<String, String> {
        &self.key_value_metadata
    }
}

/// Metadata of one row group.
#[derive(Debug, Clone)]
pub struct RowGroupMetaData {
    pub(crate) num_rows: i64,
    pub(crate) total_byte_size: i64,
    pub(crate) columns: Vec<ColumnChunkMetaData>,
}

impl RowGroupMetaData {
    /// Number of rows in this row group.
    pub fn num_rows(&self) -> i64 {
        self.num_rows
    }

    /// Total uncompressed size claimed by the writer. Not guaranteed to
    /// equal the sum of the column chunk sizes.
    pub fn total_byte_size(&self) -> i64 {
        self.total_byte_size
    }

    /// Number of column chunks.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Column chunks in schema order.
    pub fn columns(&self) -> &[ColumnChunkMetaData] {
        &self.columns
    }

    /// The `i`-th column chunk.
    pub fn column(&self, i: usize) -> &ColumnChunkMetaData {
        &self.columns[i]
    }
}

/// Metadata of one column chunk.
#[derive(Debug, Clone)]
pub struct ColumnChunkMetaData {
    pub(crate) column_path: String,
    pub(crate) file_path: String,
    pub(crate) file_offset: i64,
    pub(crate) physical_type: Type,
    pub(crate) logical_type: LogicalType,
    pub(crate) encodings: Vec<Encoding>,
    pub(crate) compression: Compression,
    pub(crate) num_values: i64,
    pub(crate) total_uncompressed_size: i64,
    pub(crate) total_compressed_size: i64,
    pub(crate) data_page_offset: i64,
    pub(crate) index_page_offset: i64,
    pub(crate) dictionary_page_offset: i64,
    pub(crate) statistics: Option<Statistics>,
    pub(crate) bloom_filter_offset: i64,
    pub(crate) bloom_filter_length: i64,
    pub(crate) key_value_metadata: HashMap<String, String>,
}

impl ColumnChunkMetaData {
    /// Dotted path of the column within the schema, e.g. `a.b`.
    pub fn column_path(&self) -> &str {
        &self.column_path
    }

    /// Path of the external file holding this chunk's data; empty for the
    /// common case of data stored in the same file. Recorded only, never
    /// followed.
    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    /// Offset recorded in the `file_offset` field. Informational; writers
    /// disagree about its meaning.
    pub fn file_offset(&self) -> i64 {
        self.file_offset
    }

    /// Physical type of the column.
    pub fn physical_type(&self) -> Type {
        self.physical_type
    }

    /// Logical type resolved from the schema leaf this chunk belongs to.
    pub fn logical_type(&self) -> &LogicalType {
        &self.logical_type
    }

    /// Encodings used by pages of this chunk, in the order recorded.
    pub fn encodings(&self) -> &[Encoding] {
        &self.encodings
    }

    /// Compression codec of this chunk.
    pub fn compression(&self) -> Compression {
        self.compression
    }

    /// Number of values, including nulls.
    pub fn num_values(&self) -> i64 {
        self.num_values
    }

    /// Total byte size after decompression.
    pub fn total_uncompressed_size(&self) -> i64 {
        self.total_uncompressed_size
    }

    /// Total byte size as stored.
    pub fn total_compressed_size(&self) -> i64 {
        self.total_compressed_size
    }

    /// Offset of the first data page, or `-1` when not recorded.
    pub fn data_page_offset(&self) -> i64 {
        self.data_page_offset
    }

    /// Offset of the index page, or `-1` when not recorded.
    pub fn index_page_offset(&self) -> i64 {
        self.index_page_offset
    }

    /// Offset of the dictionary page, or `-1` when not recorded.
    pub fn dictionary_page_offset(&self) -> i64 {
        self.dictionary_page_offset
    }

    /// Statistics for this chunk, if recorded.
    pub fn statistics(&self) -> Option<&Statistics> {
        self.statistics.as_ref()
    }

    /// Offset of this chunk's bloom filter, or `-1` when it has none.
    pub fn bloom_filter_offset(&self) -> i64 {
        self.bloom_filter_offset
    }

    /// Length in bytes of this chunk's bloom filter, or `-1` when unknown.
    pub fn bloom_filter_length(&self) -> i64 {
        self.bloom_filter_length
    }

    /// Whether this chunk has a bloom filter.
    pub fn has_bloom_filter(&self) -> bool {
        self.bloom_filter_offset >= 0
    }

    /// Column-level key/value metadata.
    pub fn key_value_metadata(&self) -> &HashMap<String, String> {
        &self.key_value_metadata
    }

    /// The recorded minimum, decoded per this column's physical type.
    pub fn min_value(&self) -> Option<StatValue> {
        self.statistics
            .as_ref()
            .and_then(|s| s.min_value(self.physical_type))
    }

    /// The recorded maximum, decoded per this column's physical type.
    pub fn max_value(&self) -> Option<StatValue> {
        self.statistics
            .as_ref()
            .and_then(|s| s.max_value(self.physical_type))
    }
}
