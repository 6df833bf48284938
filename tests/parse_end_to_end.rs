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

//! Decodes a complete hand-assembled Parquet file through the public API:
//! footer location, metadata, schema resolution, statistics and a bloom
//! filter probe, against both in-memory and `File` backed sources.

use std::io::Write;

use bytes::Bytes;

use parquet_meta::basic::{Compression, Encoding, LogicalType, TimeUnit, Type};
use parquet_meta::bloom_filter::{test_bloom, Sbbf};
use parquet_meta::errors::ParquetError;
use parquet_meta::file::footer::{decode_metadata, parse_metadata};
use parquet_meta::file::metadata::FileMetaData;
use parquet_meta::file::statistics::StatValue;

/// Just enough of a thrift compact encoder to assemble a footer.
struct Enc {
    buf: Vec<u8>,
}

impl Enc {
    fn new() -> Self {
        Self { buf: Vec::new() }
    }

    fn byte(&mut self, b: u8) {
        self.buf.push(b);
    }

    fn vlq(&mut self, mut v: u64) {
        while v > 0x7f {
            self.byte(v as u8 | 0x80);
            v >>= 7;
        }
        self.byte(v as u8);
    }

    fn zig_zag(&mut self, v: i64) {
        self.vlq(((v << 1) ^ (v >> 63)) as u64);
    }

    fn i32(&mut self, v: i32) {
        self.zig_zag(v as i64);
    }

    fn i64(&mut self, v: i64) {
        self.zig_zag(v);
    }

    fn bytes(&mut self, v: &[u8]) {
        self.vlq(v.len() as u64);
        self.buf.extend_from_slice(v);
    }

    /// Field header; wire types: 1/2 bool, 5 i32, 6 i64, 8 binary,
    /// 9 list, 12 struct. Returns `id` for chaining.
    fn field(&mut self, wire_type: u8, id: i16, last_id: i16) -> i16 {
        let delta = id.wrapping_sub(last_id);
        if delta > 0 && delta <= 0xf {
            self.byte((delta as u8) << 4 | wire_type);
        } else {
            self.byte(wire_type);
            self.zig_zag(id as i64);
        }
        id
    }

    fn list(&mut self, elem_type: u8, len: usize) {
        if len < 15 {
            self.byte((len as u8) << 4 | elem_type);
        } else {
            self.byte(0xf0 | elem_type);
            self.vlq(len as u64);
        }
    }

    fn stop(&mut self) {
        self.byte(0);
    }
}

// root group "schema" with two leaves:
//   id   INT64      logicalType TIMESTAMP(MICROS, utc)
//   name BYTE_ARRAY converted_type UTF8
fn write_schema(e: &mut Enc) {
    e.list(12, 3);

    // root
    let last = e.field(8, 4, 0);
    e.bytes(b"schema");
    e.field(5, 5, last);
    e.i32(2);
    e.stop();

    // id
    let mut last = e.field(5, 1, 0);
    e.i32(2); // INT64
    last = e.field(5, 3, last);
    e.i32(0); // REQUIRED
    last = e.field(8, 4, last);
    e.bytes(b"id");
    e.field(12, 10, last); // logicalType
    {
        e.field(12, 8, 0); // Timestamp variant
        {
            let ts_last = e.field(1, 1, 0); // is_adjusted_to_utc = true
            e.field(12, 2, ts_last); // unit
            {
                e.field(12, 2, 0); // MICROS variant
                e.stop(); // empty struct
                e.stop(); // unit union
            }
            e.stop(); // TimestampType
        }
        e.stop(); // logicalType union
    }
    e.stop();

    // name
    let mut last = e.field(5, 1, 0);
    e.i32(6); // BYTE_ARRAY
    last = e.field(5, 3, last);
    e.i32(1); // OPTIONAL
    last = e.field(8, 4, last);
    e.bytes(b"name");
    e.field(5, 6, last); // converted_type
    e.i32(0); // UTF8
    e.stop();
}

struct ColumnSpec<'a> {
    path: &'a [&'a str],
    type_code: i32,
    codec: i32,
    num_values: i64,
    // (legacy_min, legacy_max, min_value, max_value)
    stats: Option<(&'a [u8], &'a [u8], &'a [u8], &'a [u8])>,
    bloom: Option<(i64, i64)>,
}

#[allow(unused_assignments)]
fn write_column_chunk(e: &mut Enc, spec: &ColumnSpec<'_>) {
    e.field(12, 3, 0); // meta_data
    {
        let mut last = e.field(5, 1, 0); // type
        e.i32(spec.type_code);
        last = e.field(9, 2, last); // encodings
        e.list(5, 2);
        e.i32(0); // PLAIN
        e.i32(8); // RLE_DICTIONARY
        last = e.field(9, 3, last); // path_in_schema
        e.list(8, spec.path.len());
        for part in spec.path {
            e.bytes(part.as_bytes());
        }
        last = e.field(5, 4, last); // codec
        e.i32(spec.codec);
        last = e.field(6, 5, last); // num_values
        e.i64(spec.num_values);
        last = e.field(6, 6, last); // total_uncompressed_size
        e.i64(512);
        last = e.field(6, 7, last); // total_compressed_size
        e.i64(256);
        last = e.field(6, 9, last); // data_page_offset
        e.i64(64);
        if let Some((legacy_min, legacy_max, min_value, max_value)) = spec.stats {
            last = e.field(12, 12, last);
            let mut s_last = e.field(8, 1, 0); // legacy max
            e.bytes(legacy_max);
            s_last = e.field(8, 2, s_last); // legacy min
            e.bytes(legacy_min);
            s_last = e.field(6, 3, s_last); // null_count
            e.i64(0);
            s_last = e.field(8, 5, s_last); // max_value
            e.bytes(max_value);
            e.field(8, 6, s_last); // min_value
            e.bytes(min_value);
            e.stop();
        }
        if let Some((offset, length)) = spec.bloom {
            last = e.field(6, 14, last);
            e.i64(offset);
            e.field(6, 15, last);
            e.i64(length);
        }
        e.stop(); // ColumnMetaData
    }
    e.stop(); // ColumnChunk
}

#[allow(unused_assignments)]
fn write_footer(bloom_offset: i64, bloom_length: i64) -> Vec<u8> {
    let mut e = Enc::new();

    let mut last = e.field(5, 1, 0); // version
    e.i32(2);
    last = e.field(9, 2, last); // schema
    write_schema(&mut e);
    last = e.field(6, 3, last); // num_rows
    e.i64(3);
    last = e.field(9, 4, last); // row_groups
    e.list(12, 1);
    {
        let mut rg_last = e.field(9, 1, 0); // columns
        e.list(12, 2);
        write_column_chunk(
            &mut e,
            &ColumnSpec {
                path: &["id"],
                type_code: 2,
                codec: 0,
                num_values: 3,
                stats: Some((
                    &9i64.to_le_bytes(),
                    &99i64.to_le_bytes(),
                    &1i64.to_le_bytes(),
                    &3i64.to_le_bytes(),
                )),
                bloom: None,
            },
        );
        write_column_chunk(
            &mut e,
            &ColumnSpec {
                path: &["name"],
                type_code: 6,
                codec: 6,
                num_values: 3,
                stats: Some((b"", b"", b"alpha", b"omega")),
                bloom: Some((bloom_offset, bloom_length)),
            },
        );
        rg_last = e.field(6, 2, rg_last); // total_byte_size
        e.i64(4096);
        e.field(6, 3, rg_last); // num_rows
        e.i64(3);
        e.stop();
    }
    last = e.field(9, 5, last); // key_value_metadata
    e.list(12, 1);
    {
        let kv_last = e.field(8, 1, 0);
        e.bytes(b"writer.note");
        e.field(8, 2, kv_last);
        e.bytes(b"integration");
        e.stop();
    }
    e.field(8, 6, last); // created_by
    e.bytes(b"parquet-meta integration suite");
    e.stop();
    e.buf
}

/// Assemble the whole file: leading magic, a bloom filter for the `name`
/// column, the footer, the trailer.
fn build_file() -> Vec<u8> {
    let mut file = Vec::new();
    file.extend_from_slice(b"PAR1");
    file.extend_from_slice(&[0u8; 4]); // row data would go here

    let mut sbbf = Sbbf::with_num_blocks(16);
    sbbf.insert(b"alpha");
    sbbf.insert(b"beta");
    let bloom_bytes = sbbf.to_bytes();
    let bloom_offset = file.len() as i64;
    file.extend_from_slice(&bloom_bytes);

    let footer = write_footer(bloom_offset, bloom_bytes.len() as i64);
    file.extend_from_slice(&footer);
    file.extend_from_slice(&(footer.len() as u32).to_le_bytes());
    file.extend_from_slice(b"PAR1");
    file
}

fn check_metadata(metadata: &FileMetaData, file_len: u64) {
    assert_eq!(metadata.version(), 2);
    assert_eq!(metadata.num_rows(), 3);
    assert_eq!(metadata.file_size(), file_len);
    assert_eq!(metadata.created_by(), "parquet-meta integration suite");
    assert_eq!(
        metadata
            .key_value_metadata()
            .get("writer.note")
            .map(String::as_str),
        Some("integration")
    );

    assert_eq!(metadata.schema().leaf_paths(), &["id", "name"]);
    let row_groups = metadata.row_groups();
    assert_eq!(row_groups.len(), 1);
    let total: i64 = row_groups.iter().map(|rg| rg.num_rows()).sum();
    assert_eq!(total, metadata.num_rows());

    let id = row_groups[0].column(0);
    assert_eq!(id.column_path(), "id");
    assert_eq!(id.physical_type(), Type::INT64);
    assert_eq!(
        id.logical_type(),
        &LogicalType::Timestamp {
            unit: TimeUnit::MICROS,
            is_adjusted_to_utc: true
        }
    );
    assert_eq!(id.compression(), Compression::UNCOMPRESSED);
    assert_eq!(
        id.encodings(),
        &[Encoding::PLAIN, Encoding::RLE_DICTIONARY]
    );
    // the v2 statistics fields win over the deprecated pair
    assert_eq!(id.min_value(), Some(StatValue::Int64(1)));
    assert_eq!(id.max_value(), Some(StatValue::Int64(3)));
    assert_eq!(id.data_page_offset(), 64);
    assert_eq!(id.dictionary_page_offset(), -1);
    assert!(!id.has_bloom_filter());

    let name = row_groups[0].column(1);
    assert_eq!(name.column_path(), "name");
    assert_eq!(name.physical_type(), Type::BYTE_ARRAY);
    assert_eq!(name.logical_type(), &LogicalType::String);
    assert_eq!(name.compression(), Compression::ZSTD);
    assert_eq!(name.min_value(), Some(StatValue::Bytes(b"alpha".to_vec())));
    assert_eq!(name.max_value(), Some(StatValue::Bytes(b"omega".to_vec())));
    assert!(name.has_bloom_filter());
}

#[test]
fn parse_from_bytes_source() {
    let file = build_file();
    let data = Bytes::from(file);
    let metadata = parse_metadata(&data).unwrap();
    check_metadata(&metadata, data.as_ref().len() as u64);
}

#[test]
fn parse_from_file_source() {
    let contents = build_file();
    let mut file = tempfile::tempfile().unwrap();
    file.write_all(&contents).unwrap();
    let metadata = parse_metadata(&file).unwrap();
    check_metadata(&metadata, contents.len() as u64);
}

#[test]
fn bloom_probe_through_file() {
    let contents = build_file();
    let mut file = tempfile::tempfile().unwrap();
    file.write_all(&contents).unwrap();
    let metadata = parse_metadata(&file).unwrap();

    let name = metadata.row_groups()[0].column(1);
    let (offset, length) = (name.bloom_filter_offset(), name.bloom_filter_length());
    assert!(test_bloom(&file, offset, length, b"alpha").unwrap());
    assert!(test_bloom(&file, offset, length, b"beta").unwrap());
    assert!(!test_bloom(&file, offset, length, b"gamma").unwrap());
    // the recorded length is advisory; probing must also work without it
    assert!(test_bloom(&file, offset, -1, b"alpha").unwrap());

    let id = metadata.row_groups()[0].column(0);
    assert!(matches!(
        test_bloom(&file, id.bloom_filter_offset(), -1, b"alpha").unwrap_err(),
        ParquetError::BloomAbsent(_)
    ));
}

#[test]
fn decode_metadata_from_bare_footer_slice() {
    let footer = write_footer(-1, -1);
    let metadata = decode_metadata(&footer).unwrap();
    assert_eq!(metadata.num_rows(), 3);
    // a bare slice has no enclosing file
    assert_eq!(metadata.file_size(), 0);
    // the -1 bloom sentinels written above round-trip as "absent"
    assert!(!metadata.row_groups()[0].column(1).has_bloom_filter());
}

#[test]
fn trailer_violations_error() {
    let mut file = build_file();
    // flip the trailing magic
    let len = file.len();
    file[len - 1] = b'X';
    assert!(matches!(
        parse_metadata(&Bytes::from(file)).unwrap_err(),
        ParquetError::BadMagic(_)
    ));

    assert!(matches!(
        parse_metadata(&Bytes::from_static(b"PAR1")).unwrap_err(),
        ParquetError::TooSmall(_)
    ));
}
