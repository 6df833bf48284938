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

//! Human-readable dumps of decoded metadata.

use std::io;

use crate::file::metadata::{ColumnChunkMetaData, FileMetaData, RowGroupMetaData};

/// Prints a summary of [`FileMetaData`]: file level fields, then every row
/// group with its column chunks. Statistics print as native values where
/// the bytes decode, hex otherwise.
#[allow(unused_must_use)]
pub fn print_file_metadata(out: &mut dyn io::Write, metadata: &FileMetaData) {
    writeln!(out, "version: {}", metadata.version());
    writeln!(out, "num of rows: {}", metadata.num_rows());
    if !metadata.created_by().is_empty() {
        writeln!(out, "created by: {}", metadata.created_by());
    }
    if !metadata.key_value_metadata().is_empty() {
        writeln!(out, "metadata:");
        let mut keys: Vec<_> = metadata.key_value_metadata().keys().collect();
        keys.sort();
        for key in keys {
            writeln!(out, "  {}: {}", key, metadata.key_value_metadata()[key]);
        }
    }
    writeln!(out, "num of row groups: {}", metadata.row_groups().len());
    for (i, row_group) in metadata.row_groups().iter().enumerate() {
        writeln!(out, "row group {i}:");
        print_row_group_metadata(out, row_group);
    }
}

#[allow(unused_must_use)]
fn print_row_group_metadata(out: &mut dyn io::Write, rg_metadata: &RowGroupMetaData) {
    writeln!(out, "  total byte size: {}", rg_metadata.total_byte_size());
    writeln!(out, "  num of rows: {}", rg_metadata.num_rows());
    writeln!(out, "  num of columns: {}", rg_metadata.num_columns());
    for (i, column) in rg_metadata.columns().iter().enumerate() {
        writeln!(out, "  column {i}:");
        print_column_chunk_metadata(out, column);
    }
}

#[allow(unused_must_use)]
fn print_column_chunk_metadata(out: &mut dyn io::Write, cc_metadata: &ColumnChunkMetaData) {
    writeln!(out, "    column path: {}", cc_metadata.column_path());
    writeln!(out, "    physical type: {}", cc_metadata.physical_type());
    writeln!(out, "    logical type: {}", cc_metadata.logical_type());
    let encodings = cc_metadata
        .encodings()
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    writeln!(out, "    encodings: {encodings}");
    writeln!(out, "    compression: {}", cc_metadata.compression());
    writeln!(out, "    num of values: {}", cc_metadata.num_values());
    writeln!(
        out,
        "    total compressed size (in bytes): {}",
        cc_metadata.total_compressed_size()
    );
    writeln!(
        out,
        "    total uncompressed size (in bytes): {}",
        cc_metadata.total_uncompressed_size()
    );
    writeln!(out, "    data page offset: {}", cc_metadata.data_page_offset());
    if let Some(stats) = cc_metadata.statistics() {
        let min = match cc_metadata.min_value() {
            Some(v) => v.to_string(),
            None => "N/A".to_owned(),
        };
        let max = match cc_metadata.max_value() {
            Some(v) => v.to_string(),
            None => "N/A".to_owned(),
        };
        writeln!(
            out,
            "    statistics: min={} max={} nulls={} distinct={}",
            min,
            max,
            stats.null_count(),
            stats.distinct_count()
        );
    }
    if cc_metadata.has_bloom_filter() {
        writeln!(
            out,
            "    bloom filter: offset={} length={}",
            cc_metadata.bloom_filter_offset(),
            cc_metadata.bloom_filter_length()
        );
    }
}
