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

//! The bridge between the thrift-encoded footer and the metadata model:
//! one hand-written field loop per thrift struct. Unknown field ids are
//! skipped; required fields are tracked with bit masks and reported as
//! missing after each struct's stop marker.

use std::collections::HashMap;

use crate::basic::{Compression, ConvertedType, Encoding, LogicalType, Repetition, Type};
use crate::errors::{ParquetError, Result};
use crate::file::metadata::{ColumnChunkMetaData, FileMetaData, RowGroupMetaData};
use crate::file::statistics::Statistics;
use crate::schema::types::{SchemaDescriptor, SchemaElement};
use crate::thrift::{read_thrift_vec, FieldType, ReadThrift, ThriftSliceInputProtocol};

// struct KeyValue {
//   1: required string key
//   2: optional string value
// }
struct KeyValue {
    key: String,
    value: String,
}

impl ReadThrift for KeyValue {
    fn read_thrift(prot: &mut ThriftSliceInputProtocol<'_>) -> Result<Self> {
        let mut key: Option<String> = None;
        let mut value: Option<String> = None;
        let mut last_field_id = 0i16;
        loop {
            let field_ident = prot.read_field_begin(last_field_id)?;
            if field_ident.field_type == FieldType::Stop {
                break;
            }
            match field_ident.id {
                1 => key = Some(String::read_thrift(prot)?),
                2 => value = Some(String::read_thrift(prot)?),
                _ => prot.skip(field_ident.field_type)?,
            }
            last_field_id = field_ident.id;
        }
        let Some(key) = key else {
            return Err(missing_field_err!("key"));
        };
        Ok(Self {
            key,
            value: value.unwrap_or_default(),
        })
    }
}

fn key_value_map(kvs: Vec<KeyValue>) -> HashMap<String, String> {
    kvs.into_iter().map(|kv| (kv.key, kv.value)).collect()
}

// struct SchemaElement {
//   1: optional Type type;
//   2: optional i32 type_length;
//   3: optional FieldRepetitionType repetition_type;
//   4: required string name;
//   5: optional i32 num_children;
//   6: optional ConvertedType converted_type;
//   7: optional i32 scale
//   8: optional i32 precision
//   9: optional i32 field_id;
//   10: optional LogicalType logical_type
// }
impl ReadThrift for SchemaElement {
    fn read_thrift(prot: &mut ThriftSliceInputProtocol<'_>) -> Result<Self> {
        let mut name: Option<String> = None;
        let mut physical_type: Option<Type> = None;
        let mut repetition: Option<Repetition> = None;
        let mut num_children = 0i32;
        let mut type_length: Option<i32> = None;
        let mut scale: Option<i32> = None;
        let mut precision: Option<i32> = None;
        let mut field_id: Option<i32> = None;
        let mut converted_type: Option<ConvertedType> = None;
        let mut logical_type: Option<LogicalType> = None;

        let mut last_field_id = 0i16;
        loop {
            let field_ident = prot.read_field_begin(last_field_id)?;
            if field_ident.field_type == FieldType::Stop {
                break;
            }
            match field_ident.id {
                1 => physical_type = Some(Type::read_thrift(prot)?),
                2 => type_length = Some(prot.read_i32()?),
                3 => repetition = Some(Repetition::read_thrift(prot)?),
                4 => name = Some(String::read_thrift(prot)?),
                5 => num_children = prot.read_i32()?,
                6 => converted_type = Some(ConvertedType::read_thrift(prot)?),
                7 => scale = Some(prot.read_i32()?),
                8 => precision = Some(prot.read_i32()?),
                9 => field_id = Some(prot.read_i32()?),
                10 => logical_type = Some(LogicalType::read_thrift(prot)?),
                _ => prot.skip(field_ident.field_type)?,
            }
            last_field_id = field_ident.id;
        }
        let Some(name) = name else {
            return Err(missing_field_err!("name"));
        };
        Ok(SchemaElement {
            name,
            physical_type,
            repetition,
            num_children,
            type_length,
            scale,
            precision,
            field_id,
            converted_type,
            logical_type,
        })
    }
}

// struct Statistics {
//    1: optional binary max;
//    2: optional binary min;
//    3: optional i64 null_count;
//    4: optional i64 distinct_count;
//    5: optional binary max_value;
//    6: optional binary min_value;
// }
fn read_statistics(prot: &mut ThriftSliceInputProtocol<'_>) -> Result<Statistics> {
    let mut legacy_max: Option<Vec<u8>> = None;
    let mut legacy_min: Option<Vec<u8>> = None;
    let mut max_value: Option<Vec<u8>> = None;
    let mut min_value: Option<Vec<u8>> = None;
    let mut null_count: Option<i64> = None;
    let mut distinct_count: Option<i64> = None;

    let mut last_field_id = 0i16;
    loop {
        let field_ident = prot.read_field_begin(last_field_id)?;
        if field_ident.field_type == FieldType::Stop {
            break;
        }
        match field_ident.id {
            1 => legacy_max = Some(prot.read_bytes()?.to_vec()),
            2 => legacy_min = Some(prot.read_bytes()?.to_vec()),
            3 => null_count = Some(prot.read_i64()?),
            4 => distinct_count = Some(prot.read_i64()?),
            5 => max_value = Some(prot.read_bytes()?.to_vec()),
            6 => min_value = Some(prot.read_bytes()?.to_vec()),
            _ => prot.skip(field_ident.field_type)?,
        }
        last_field_id = field_ident.id;
    }

    if let Some(n) = null_count {
        if n < 0 {
            return Err(malformed_err!("statistics null count is negative: {}", n));
        }
    }

    // whether this chunk predates the v2 min_value/max_value fields; when
    // either v2 field is present the legacy pair is ignored entirely
    let old_format = min_value.is_none() && max_value.is_none();
    let (min, max) = if old_format {
        (legacy_min, legacy_max)
    } else {
        (min_value, max_value)
    };

    Ok(Statistics {
        min,
        max,
        null_count: null_count.unwrap_or(-1),
        distinct_count: distinct_count.unwrap_or(-1),
    })
}

// bit positions for required fields in the thrift ColumnMetaData struct
const COL_META_TYPE: u16 = 1 << 1;
const COL_META_ENCODINGS: u16 = 1 << 2;
const COL_META_PATH: u16 = 1 << 3;
const COL_META_CODEC: u16 = 1 << 4;
const COL_META_NUM_VALUES: u16 = 1 << 5;
const COL_META_TOTAL_UNCOMP_SZ: u16 = 1 << 6;
const COL_META_TOTAL_COMP_SZ: u16 = 1 << 7;

const COL_META_ALL_REQUIRED: u16 = COL_META_TYPE
    | COL_META_ENCODINGS
    | COL_META_PATH
    | COL_META_CODEC
    | COL_META_NUM_VALUES
    | COL_META_TOTAL_UNCOMP_SZ
    | COL_META_TOTAL_COMP_SZ;

fn validate_column_metadata(mask: u16) -> Result<()> {
    if mask != COL_META_ALL_REQUIRED {
        if mask & COL_META_TYPE == 0 {
            return Err(missing_field_err!("type"));
        }
        if mask & COL_META_ENCODINGS == 0 {
            return Err(missing_field_err!("encodings"));
        }
        if mask & COL_META_PATH == 0 {
            return Err(missing_field_err!("path_in_schema"));
        }
        if mask & COL_META_CODEC == 0 {
            return Err(missing_field_err!("codec"));
        }
        if mask & COL_META_NUM_VALUES == 0 {
            return Err(missing_field_err!("num_values"));
        }
        if mask & COL_META_TOTAL_UNCOMP_SZ == 0 {
            return Err(missing_field_err!("total_uncompressed_size"));
        }
        if mask & COL_META_TOTAL_COMP_SZ == 0 {
            return Err(missing_field_err!("total_compressed_size"));
        }
    }
    Ok(())
}

// Decode ColumnMetaData into `column`, returning the mask of required
// fields that were seen for `validate_column_metadata`.
//
// struct ColumnMetaData {
//   1: required Type type
//   2: required list<Encoding> encodings
//   3: required list<string> path_in_schema
//   4: required CompressionCodec codec
//   5: required i64 num_values
//   6: required i64 total_uncompressed_size
//   7: required i64 total_compressed_size
//   8: optional list<KeyValue> key_value_metadata
//   9: required i64 data_page_offset
//   10: optional i64 index_page_offset
//   11: optional i64 dictionary_page_offset
//   12: optional Statistics statistics;
//   13: optional list<PageEncodingStats> encoding_stats;
//   14: optional i64 bloom_filter_offset;
//   15: optional i32 bloom_filter_length;
// }
fn read_column_metadata(
    prot: &mut ThriftSliceInputProtocol<'_>,
    column: &mut ColumnChunkMetaData,
) -> Result<u16> {
    let mut seen_mask = 0u16;

    let mut last_field_id = 0i16;
    loop {
        let field_ident = prot.read_field_begin(last_field_id)?;
        if field_ident.field_type == FieldType::Stop {
            break;
        }
        match field_ident.id {
            1 => {
                column.physical_type = Type::read_thrift(prot)?;
                seen_mask |= COL_META_TYPE;
            }
            2 => {
                column.encodings = read_thrift_vec::<Encoding>(prot)?;
                seen_mask |= COL_META_ENCODINGS;
            }
            3 => {
                let parts = read_thrift_vec::<String>(prot)?;
                column.column_path = parts.join(".");
                seen_mask |= COL_META_PATH;
            }
            4 => {
                column.compression = Compression::read_thrift(prot)?;
                seen_mask |= COL_META_CODEC;
            }
            5 => {
                column.num_values = prot.read_i64()?;
                seen_mask |= COL_META_NUM_VALUES;
            }
            6 => {
                column.total_uncompressed_size = prot.read_i64()?;
                seen_mask |= COL_META_TOTAL_UNCOMP_SZ;
            }
            7 => {
                column.total_compressed_size = prot.read_i64()?;
                seen_mask |= COL_META_TOTAL_COMP_SZ;
            }
            8 => {
                column.key_value_metadata = key_value_map(read_thrift_vec::<KeyValue>(prot)?);
            }
            9 => {
                column.data_page_offset = prot.read_i64()?;
            }
            10 => {
                column.index_page_offset = prot.read_i64()?;
            }
            11 => {
                column.dictionary_page_offset = prot.read_i64()?;
            }
            12 => {
                column.statistics = Some(read_statistics(prot)?);
            }
            14 => {
                column.bloom_filter_offset = prot.read_i64()?;
            }
            15 => {
                column.bloom_filter_length = prot.read_i64()?;
            }
            // 13 (encoding_stats) and anything newer
            _ => prot.skip(field_ident.field_type)?,
        }
        last_field_id = field_ident.id;
    }

    Ok(seen_mask)
}

// struct ColumnChunk {
//   1: optional string file_path
//   2: optional i64 file_offset
//   3: optional ColumnMetaData meta_data
//   ... offset/column index and crypto fields skipped
// }
impl ReadThrift for ColumnChunkMetaData {
    fn read_thrift(prot: &mut ThriftSliceInputProtocol<'_>) -> Result<Self> {
        let mut column = ColumnChunkMetaData {
            column_path: String::new(),
            file_path: String::new(),
            file_offset: -1,
            physical_type: Type::BOOLEAN,
            logical_type: LogicalType::None,
            encodings: Vec::new(),
            compression: Compression::UNCOMPRESSED,
            num_values: 0,
            total_uncompressed_size: 0,
            total_compressed_size: 0,
            data_page_offset: -1,
            index_page_offset: -1,
            dictionary_page_offset: -1,
            statistics: None,
            bloom_filter_offset: -1,
            bloom_filter_length: -1,
            key_value_metadata: HashMap::new(),
        };

        let mut has_meta_data = false;
        let mut col_meta_mask = 0u16;

        let mut last_field_id = 0i16;
        loop {
            let field_ident = prot.read_field_begin(last_field_id)?;
            if field_ident.field_type == FieldType::Stop {
                break;
            }
            match field_ident.id {
                1 => column.file_path = String::read_thrift(prot)?,
                2 => column.file_offset = prot.read_i64()?,
                3 => {
                    col_meta_mask = read_column_metadata(prot, &mut column)?;
                    has_meta_data = true;
                }
                _ => prot.skip(field_ident.field_type)?,
            }
            last_field_id = field_ident.id;
        }

        // a chunk without metadata has no path and can never be matched to
        // a schema leaf
        if !has_meta_data {
            return Err(missing_field_err!("meta_data"));
        }
        validate_column_metadata(col_meta_mask)?;

        Ok(column)
    }
}

// struct RowGroup {
//   1: required list<ColumnChunk> columns
//   2: required i64 total_byte_size
//   3: required i64 num_rows
//   ... sorting columns, file offset and ordinal skipped
// }
impl ReadThrift for RowGroupMetaData {
    fn read_thrift(prot: &mut ThriftSliceInputProtocol<'_>) -> Result<Self> {
        const RG_COLUMNS: u8 = 1 << 1;
        const RG_TOT_BYTE_SIZE: u8 = 1 << 2;
        const RG_NUM_ROWS: u8 = 1 << 3;
        const RG_ALL_REQUIRED: u8 = RG_COLUMNS | RG_TOT_BYTE_SIZE | RG_NUM_ROWS;

        let mut row_group = RowGroupMetaData {
            num_rows: 0,
            total_byte_size: 0,
            columns: Vec::new(),
        };
        let mut mask = 0u8;

        let mut last_field_id = 0i16;
        loop {
            let field_ident = prot.read_field_begin(last_field_id)?;
            if field_ident.field_type == FieldType::Stop {
                break;
            }
            match field_ident.id {
                1 => {
                    row_group.columns = read_thrift_vec::<ColumnChunkMetaData>(prot)?;
                    mask |= RG_COLUMNS;
                }
                2 => {
                    row_group.total_byte_size = prot.read_i64()?;
                    mask |= RG_TOT_BYTE_SIZE;
                }
                3 => {
                    row_group.num_rows = prot.read_i64()?;
                    mask |= RG_NUM_ROWS;
                }
                _ => prot.skip(field_ident.field_type)?,
            }
            last_field_id = field_ident.id;
        }

        if mask != RG_ALL_REQUIRED {
            if mask & RG_COLUMNS == 0 {
                return Err(missing_field_err!("columns"));
            }
            if mask & RG_TOT_BYTE_SIZE == 0 {
                return Err(missing_field_err!("total_byte_size"));
            }
            if mask & RG_NUM_ROWS == 0 {
                return Err(missing_field_err!("num_rows"));
            }
        }
        if row_group.num_rows < 0 {
            return Err(malformed_err!(
                "row group declares {} rows",
                row_group.num_rows
            ));
        }
        if row_group.total_byte_size < 0 {
            return Err(malformed_err!(
                "row group declares a total byte size of {}",
                row_group.total_byte_size
            ));
        }

        Ok(row_group)
    }
}

/// Decode a complete thrift `FileMetaData` from `buf` and resolve every
/// column chunk against the schema.
///
/// ```text
/// struct FileMetaData {
///   1: required i32 version
///   2: required list<SchemaElement> schema;
///   3: required i64 num_rows
///   4: required list<RowGroup> row_groups
///   5: optional list<KeyValue> key_value_metadata
///   6: optional string created_by
///   ... column orders, encryption and signing fields skipped
/// }
/// ```
pub(crate) fn file_meta_from_bytes(buf: &[u8]) -> Result<FileMetaData> {
    let mut prot = ThriftSliceInputProtocol::new(buf);

    let mut version = 0i32;
    let mut num_rows: Option<i64> = None;
    let mut schema: Option<Vec<SchemaElement>> = None;
    let mut row_groups: Option<Vec<RowGroupMetaData>> = None;
    let mut key_value_metadata: HashMap<String, String> = HashMap::new();
    let mut created_by = String::new();

    let mut last_field_id = 0i16;
    loop {
        let field_ident = prot.read_field_begin(last_field_id)?;
        if field_ident.field_type == FieldType::Stop {
            break;
        }
        match field_ident.id {
            1 => version = prot.read_i32()?,
            2 => schema = Some(read_thrift_vec::<SchemaElement>(&mut prot)?),
            3 => num_rows = Some(prot.read_i64()?),
            4 => row_groups = Some(read_thrift_vec::<RowGroupMetaData>(&mut prot)?),
            5 => key_value_metadata = key_value_map(read_thrift_vec::<KeyValue>(&mut prot)?),
            6 => created_by = String::read_thrift(&mut prot)?,
            _ => prot.skip(field_ident.field_type)?,
        }
        last_field_id = field_ident.id;
    }

    let Some(schema) = schema else {
        return Err(missing_field_err!("schema"));
    };
    let Some(num_rows) = num_rows else {
        return Err(missing_field_err!("num_rows"));
    };
    let Some(mut row_groups) = row_groups else {
        return Err(missing_field_err!("row_groups"));
    };
    if num_rows < 0 {
        return Err(malformed_err!("file declares {} rows", num_rows));
    }

    let schema_descr = SchemaDescriptor::try_new(schema)?;

    // every chunk must name exactly one schema leaf; stamp its resolved
    // logical type while checking
    for row_group in &mut row_groups {
        for column in &mut row_group.columns {
            column.logical_type = schema_descr.require_leaf(&column.column_path)?;
        }
    }

    Ok(FileMetaData {
        version,
        num_rows,
        created_by,
        file_size: 0,
        schema_descr,
        row_groups,
        key_value_metadata,
    })
}
