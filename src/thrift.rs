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

//! Pull-style decoder for the Thrift [compact protocol].
//!
//! The Parquet footer (and the bloom filter header) are Thrift compact
//! encoded. [`ThriftSliceInputProtocol`] reads from an in-memory slice,
//! which is the only input shape this crate ever decodes; higher layers
//! drive it with per-struct field loops.
//!
//! [compact protocol]: https://github.com/apache/thrift/blob/master/doc/specs/thrift-compact-protocol.md

use crate::errors::{ParquetError, Result};

#[derive(Debug)]
pub(crate) enum ThriftProtocolError {
    Eof { offset: usize },
    VarintOverflow { offset: usize },
    InvalidFieldType { value: u8, offset: usize },
    InvalidElementType { value: u8, offset: usize },
    InvalidBoolean { value: u8, offset: usize },
    InvalidUtf8 { offset: usize },
    FieldDeltaOverflow { field_delta: u8, last_field_id: i16 },
    ListTooLong { size: i32, remaining: usize },
    SkipDepth(FieldType),
}

impl From<ThriftProtocolError> for ParquetError {
    fn from(e: ThriftProtocolError) -> Self {
        match e {
            ThriftProtocolError::Eof { offset } => {
                eof_err!("unexpected end of input at offset {}", offset)
            }
            ThriftProtocolError::VarintOverflow { offset } => {
                malformed_err!("varint exceeding 10 bytes at offset {}", offset)
            }
            ThriftProtocolError::InvalidFieldType { value, offset } => {
                malformed_err!("unexpected struct field type {} at offset {}", value, offset)
            }
            ThriftProtocolError::InvalidElementType { value, offset } => {
                malformed_err!("unexpected element type {} at offset {}", value, offset)
            }
            ThriftProtocolError::InvalidBoolean { value, offset } => {
                malformed_err!("cannot convert {} into bool at offset {}", value, offset)
            }
            ThriftProtocolError::InvalidUtf8 { offset } => {
                malformed_err!("invalid utf8 at offset {}", offset)
            }
            ThriftProtocolError::FieldDeltaOverflow {
                field_delta,
                last_field_id,
            } => malformed_err!("cannot add field delta {} to {}", field_delta, last_field_id),
            ThriftProtocolError::ListTooLong { size, remaining } => {
                eof_err!("list of {} elements with only {} bytes remaining", size, remaining)
            }
            ThriftProtocolError::SkipDepth(field_type) => {
                malformed_err!("cannot skip past {:?}", field_type)
            }
        }
    }
}

pub(crate) type ThriftProtocolResult<T> = Result<T, ThriftProtocolError>;

/// Thrift compact protocol types for struct fields.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum FieldType {
    Stop = 0,
    BooleanTrue = 1,
    BooleanFalse = 2,
    Byte = 3,
    I16 = 4,
    I32 = 5,
    I64 = 6,
    Double = 7,
    Binary = 8,
    List = 9,
    Set = 10,
    Map = 11,
    Struct = 12,
}

impl FieldType {
    fn try_new(value: u8, offset: usize) -> ThriftProtocolResult<Self> {
        match value {
            0 => Ok(Self::Stop),
            1 => Ok(Self::BooleanTrue),
            2 => Ok(Self::BooleanFalse),
            3 => Ok(Self::Byte),
            4 => Ok(Self::I16),
            5 => Ok(Self::I32),
            6 => Ok(Self::I64),
            7 => Ok(Self::Double),
            8 => Ok(Self::Binary),
            9 => Ok(Self::List),
            10 => Ok(Self::Set),
            11 => Ok(Self::Map),
            12 => Ok(Self::Struct),
            _ => Err(ThriftProtocolError::InvalidFieldType { value, offset }),
        }
    }
}

impl From<ElementType> for FieldType {
    fn from(value: ElementType) -> Self {
        match value {
            ElementType::Bool => Self::BooleanTrue,
            ElementType::Byte => Self::Byte,
            ElementType::I16 => Self::I16,
            ElementType::I32 => Self::I32,
            ElementType::I64 => Self::I64,
            ElementType::Double => Self::Double,
            ElementType::Binary => Self::Binary,
            ElementType::List => Self::List,
            ElementType::Set => Self::Set,
            ElementType::Map => Self::Map,
            ElementType::Struct => Self::Struct,
        }
    }
}

/// Thrift compact protocol types for list, set and map elements.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ElementType {
    Bool = 2,
    Byte = 3,
    I16 = 4,
    I32 = 5,
    I64 = 6,
    Double = 7,
    Binary = 8,
    List = 9,
    Set = 10,
    Map = 11,
    Struct = 12,
}

impl ElementType {
    fn try_new(value: u8, offset: usize) -> ThriftProtocolResult<Self> {
        match value {
            // The original spec mandated 2 for bool elements, but a widespread
            // implementation bug made 1 the de-facto standard. Accept both.
            1 | 2 => Ok(Self::Bool),
            3 => Ok(Self::Byte),
            4 => Ok(Self::I16),
            5 => Ok(Self::I32),
            6 => Ok(Self::I64),
            7 => Ok(Self::Double),
            8 => Ok(Self::Binary),
            9 => Ok(Self::List),
            10 => Ok(Self::Set),
            11 => Ok(Self::Map),
            12 => Ok(Self::Struct),
            _ => Err(ThriftProtocolError::InvalidElementType { value, offset }),
        }
    }
}

/// Describes one field of a Thrift struct during decoding.
#[derive(Debug)]
pub(crate) struct FieldIdentifier {
    /// The wire type for the field.
    pub(crate) field_type: FieldType,
    /// The field id, either computed from the delta or directly decoded.
    pub(crate) id: i16,
    /// Boolean fields carry their value in the field type rather than in
    /// the field data; it is surfaced here.
    pub(crate) bool_val: Option<bool>,
}

/// Describes a Thrift list or set.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct ListIdentifier {
    pub(crate) element_type: ElementType,
    pub(crate) size: i32,
}

/// Describes a Thrift map. The element types are absent for empty maps,
/// whose header is a single zero byte.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MapIdentifier {
    pub(crate) key_type: Option<ElementType>,
    pub(crate) value_type: Option<ElementType>,
    pub(crate) size: i32,
}

const DEFAULT_SKIP_DEPTH: i8 = 64;

/// Thrift compact protocol reader over a slice of bytes.
///
/// Every read either consumes exactly the bytes of the requested value and
/// returns it, or fails without any guarantee about the cursor position.
pub(crate) struct ThriftSliceInputProtocol<'a> {
    buf: &'a [u8],
    len: usize,
}

impl<'a> ThriftSliceInputProtocol<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Self { buf, len: buf.len() }
    }

    /// Byte offset of the cursor within the original input.
    pub(crate) fn pos(&self) -> usize {
        self.len - self.buf.len()
    }

    /// Number of unconsumed bytes.
    pub(crate) fn remaining(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub(crate) fn read_byte(&mut self) -> ThriftProtocolResult<u8> {
        let ret = *self
            .buf
            .first()
            .ok_or(ThriftProtocolError::Eof { offset: self.pos() })?;
        self.buf = &self.buf[1..];
        Ok(ret)
    }

    /// Read a Thrift encoded binary: a varint length followed by the bytes.
    pub(crate) fn read_bytes(&mut self) -> ThriftProtocolResult<&'a [u8]> {
        let len = self.read_vlq()? as usize;
        let ret = self
            .buf
            .get(..len)
            .ok_or(ThriftProtocolError::Eof { offset: self.pos() })?;
        self.buf = &self.buf[len..];
        Ok(ret)
    }

    /// Read a Thrift binary as a UTF-8 string.
    pub(crate) fn read_string(&mut self) -> ThriftProtocolResult<&'a str> {
        let offset = self.pos();
        let slice = self.read_bytes()?;
        std::str::from_utf8(slice).map_err(|_| ThriftProtocolError::InvalidUtf8 { offset })
    }

    #[inline]
    fn skip_bytes(&mut self, n: usize) -> ThriftProtocolResult<()> {
        self.buf
            .get(..n)
            .ok_or(ThriftProtocolError::Eof { offset: self.pos() })?;
        self.buf = &self.buf[n..];
        Ok(())
    }

    /// Read a ULEB128 encoded unsigned varint. Values are at most 10 bytes
    /// on the wire; an 11th byte is malformed.
    pub(crate) fn read_vlq(&mut self) -> ThriftProtocolResult<u64> {
        // try the single byte happy path first
        let byte = self.read_byte()?;
        if byte & 0x80 == 0 {
            return Ok(byte as u64);
        }
        let mut in_progress = (byte & 0x7f) as u64;
        let mut shift = 7u32;
        loop {
            if shift >= 70 {
                return Err(ThriftProtocolError::VarintOverflow { offset: self.pos() });
            }
            let byte = self.read_byte()?;
            in_progress |= ((byte & 0x7f) as u64).wrapping_shl(shift);
            if byte & 0x80 == 0 {
                return Ok(in_progress);
            }
            shift += 7;
        }
    }

    /// Read a zig-zag encoded signed varint.
    pub(crate) fn read_zig_zag(&mut self) -> ThriftProtocolResult<i64> {
        let val = self.read_vlq()?;
        Ok((val >> 1) as i64 ^ -((val & 1) as i64))
    }

    pub(crate) fn read_i8(&mut self) -> ThriftProtocolResult<i8> {
        Ok(self.read_byte()? as _)
    }

    pub(crate) fn read_i16(&mut self) -> ThriftProtocolResult<i16> {
        Ok(self.read_zig_zag()? as _)
    }

    pub(crate) fn read_i32(&mut self) -> ThriftProtocolResult<i32> {
        Ok(self.read_zig_zag()? as _)
    }

    pub(crate) fn read_i64(&mut self) -> ThriftProtocolResult<i64> {
        self.read_zig_zag()
    }

    /// Read a boolean list element. Struct fields carry booleans in the
    /// field type instead; see [`FieldIdentifier::bool_val`].
    pub(crate) fn read_bool(&mut self) -> ThriftProtocolResult<bool> {
        let offset = self.pos();
        match self.read_byte()? {
            0x01 => Ok(true),
            0x00 | 0x02 => Ok(false),
            value => Err(ThriftProtocolError::InvalidBoolean { value, offset }),
        }
    }

    // Full field ids are uncommon; keeping this out of line keeps
    // `read_field_begin` small.
    #[cold]
    fn read_full_field_id(&mut self) -> ThriftProtocolResult<i16> {
        self.read_i16()
    }

    /// Read the [`FieldIdentifier`] for the next field of a struct.
    /// `last_field_id` is the id of the previous field in the same struct
    /// frame (0 at the start of a struct), used to resolve delta encoding.
    pub(crate) fn read_field_begin(
        &mut self,
        last_field_id: i16,
    ) -> ThriftProtocolResult<FieldIdentifier> {
        let offset = self.pos();
        let header = self.read_byte()?;
        let field_delta = (header & 0xf0) >> 4;
        let field_type = FieldType::try_new(header & 0x0f, offset)?;

        match field_type {
            FieldType::Stop => Ok(FieldIdentifier {
                field_type: FieldType::Stop,
                id: 0,
                bool_val: None,
            }),
            _ => {
                let bool_val = match field_type {
                    FieldType::BooleanTrue => Some(true),
                    FieldType::BooleanFalse => Some(false),
                    _ => None,
                };
                let id = if field_delta != 0 {
                    last_field_id.checked_add(field_delta as i16).ok_or(
                        ThriftProtocolError::FieldDeltaOverflow {
                            field_delta,
                            last_field_id,
                        },
                    )?
                } else {
                    self.read_full_field_id()?
                };
                Ok(FieldIdentifier {
                    field_type,
                    id,
                    bool_val,
                })
            }
        }
    }

    /// Read the [`ListIdentifier`] for a Thrift list or set.
    pub(crate) fn read_list_begin(&mut self) -> ThriftProtocolResult<ListIdentifier> {
        let offset = self.pos();
        let header = self.read_byte()?;
        // some writers emit an element type of 0 for an empty list; return a
        // bogus but valid element type in that case.
        if header == 0 {
            return Ok(ListIdentifier {
                element_type: ElementType::Byte,
                size: 0,
            });
        }
        let element_type = ElementType::try_new(header & 0x0f, offset)?;
        let size = match (header & 0xf0) >> 4 {
            // high nibble of 15 means the size is a separate varint
            15 => self.read_vlq()? as i32,
            n => n as i32,
        };
        Ok(ListIdentifier { element_type, size })
    }

    /// Read the [`MapIdentifier`] for a Thrift map. An empty map is a single
    /// zero byte; otherwise a varint size is followed by one byte carrying
    /// the key and value element types.
    pub(crate) fn read_map_begin(&mut self) -> ThriftProtocolResult<MapIdentifier> {
        let size = self.read_vlq()? as i32;
        if size == 0 {
            return Ok(MapIdentifier {
                key_type: None,
                value_type: None,
                size: 0,
            });
        }
        let offset = self.pos();
        let types = self.read_byte()?;
        Ok(MapIdentifier {
            key_type: Some(ElementType::try_new(types >> 4, offset)?),
            value_type: Some(ElementType::try_new(types & 0x0f, offset)?),
            size,
        })
    }

    fn skip_vlq(&mut self) -> ThriftProtocolResult<()> {
        self.read_vlq().map(|_| ())
    }

    fn skip_binary(&mut self) -> ThriftProtocolResult<()> {
        let len = self.read_vlq()? as usize;
        self.skip_bytes(len)
    }

    /// An empty struct (common in Thrift unions) is a single zero byte for
    /// the field stop record. Consume it, failing if fields are present.
    pub(crate) fn skip_empty_struct(&mut self) -> Result<()> {
        let offset = self.pos();
        if self.read_byte()? != 0 {
            return Err(malformed_err!("empty struct has fields at offset {}", offset));
        }
        Ok(())
    }

    /// Skip a field of wire type `field_type`, recursing up to the default
    /// depth limit. Unknown wire types never reach here: they fail when the
    /// field header is decoded, which keeps a corrupt field from silently
    /// desynchronizing every field after it.
    pub(crate) fn skip(&mut self, field_type: FieldType) -> ThriftProtocolResult<()> {
        self.skip_till_depth(field_type, DEFAULT_SKIP_DEPTH)
    }

    fn skip_till_depth(&mut self, field_type: FieldType, depth: i8) -> ThriftProtocolResult<()> {
        if depth == 0 {
            return Err(ThriftProtocolError::SkipDepth(field_type));
        }

        match field_type {
            FieldType::Stop => Ok(()),
            // boolean fields have no data
            FieldType::BooleanTrue | FieldType::BooleanFalse => Ok(()),
            FieldType::Byte => self.read_i8().map(|_| ()),
            FieldType::I16 | FieldType::I32 | FieldType::I64 => self.skip_vlq(),
            FieldType::Double => self.skip_bytes(8),
            FieldType::Binary => self.skip_binary(),
            FieldType::Struct => {
                let mut last_field_id = 0i16;
                loop {
                    let field_ident = self.read_field_begin(last_field_id)?;
                    if field_ident.field_type == FieldType::Stop {
                        break;
                    }
                    self.skip_till_depth(field_ident.field_type, depth - 1)?;
                    last_field_id = field_ident.id;
                }
                Ok(())
            }
            FieldType::List | FieldType::Set => {
                let list_ident = self.read_list_begin()?;
                self.check_list_len(list_ident.size)?;
                for _ in 0..list_ident.size {
                    self.skip_element(list_ident.element_type, depth - 1)?;
                }
                Ok(())
            }
            FieldType::Map => {
                let map_ident = self.read_map_begin()?;
                self.check_list_len(map_ident.size)?;
                if let (Some(key_type), Some(value_type)) =
                    (map_ident.key_type, map_ident.value_type)
                {
                    for _ in 0..map_ident.size {
                        self.skip_element(key_type, depth - 1)?;
                        self.skip_element(value_type, depth - 1)?;
                    }
                }
                Ok(())
            }
        }
    }

    // Unlike struct fields, boolean container elements occupy one byte.
    fn skip_element(&mut self, element_type: ElementType, depth: i8) -> ThriftProtocolResult<()> {
        match element_type {
            ElementType::Bool => self.read_bool().map(|_| ()),
            other => self.skip_till_depth(FieldType::from(other), depth),
        }
    }

    /// Reject container sizes that cannot possibly fit in the remaining
    /// input (every element takes at least one byte). Keeps corrupt sizes
    /// from driving huge allocations or long skip loops.
    pub(crate) fn check_list_len(&self, size: i32) -> ThriftProtocolResult<()> {
        if size < 0 || size as usize > self.remaining() {
            return Err(ThriftProtocolError::ListTooLong {
                size,
                remaining: self.remaining(),
            });
        }
        Ok(())
    }
}

/// Trait for objects deserializable from a Thrift compact input stream.
/// Implementations are provided for the Thrift primitive types; structs and
/// enums in other modules implement it with hand-written field loops.
pub(crate) trait ReadThrift: Sized {
    fn read_thrift(prot: &mut ThriftSliceInputProtocol<'_>) -> Result<Self>;
}

impl ReadThrift for bool {
    fn read_thrift(prot: &mut ThriftSliceInputProtocol<'_>) -> Result<Self> {
        Ok(prot.read_bool()?)
    }
}

impl ReadThrift for i8 {
    fn read_thrift(prot: &mut ThriftSliceInputProtocol<'_>) -> Result<Self> {
        Ok(prot.read_i8()?)
    }
}

impl ReadThrift for i16 {
    fn read_thrift(prot: &mut ThriftSliceInputProtocol<'_>) -> Result<Self> {
        Ok(prot.read_i16()?)
    }
}

impl ReadThrift for i32 {
    fn read_thrift(prot: &mut ThriftSliceInputProtocol<'_>) -> Result<Self> {
        Ok(prot.read_i32()?)
    }
}

impl ReadThrift for i64 {
    fn read_thrift(prot: &mut ThriftSliceInputProtocol<'_>) -> Result<Self> {
        Ok(prot.read_i64()?)
    }
}

impl ReadThrift for String {
    fn read_thrift(prot: &mut ThriftSliceInputProtocol<'_>) -> Result<Self> {
        Ok(prot.read_string()?.to_owned())
    }
}

impl ReadThrift for Vec<u8> {
    fn read_thrift(prot: &mut ThriftSliceInputProtocol<'_>) -> Result<Self> {
        Ok(prot.read_bytes()?.to_vec())
    }
}

/// Read a Thrift encoded list of `T` from the input.
pub(crate) fn read_thrift_vec<T: ReadThrift>(
    prot: &mut ThriftSliceInputProtocol<'_>,
) -> Result<Vec<T>> {
    let list_ident = prot.read_list_begin()?;
    prot.check_list_len(list_ident.size)?;
    let mut res = Vec::with_capacity(list_ident.size as usize);
    for _ in 0..list_ident.size {
        res.push(T::read_thrift(prot)?);
    }
    Ok(res)
}

/// Minimal Thrift compact encoder, only used to assemble test inputs.
/// Writing Parquet is out of scope for this crate, so none of this is
/// compiled into release builds.
#[cfg(test)]
pub(crate) mod writer {
    /// Byte-sink counterpart of `ThriftSliceInputProtocol`. Wire types are
    /// taken as raw `u8` so tests can also produce invalid encodings.
    pub(crate) struct ThriftCompactOutputProtocol {
        buf: Vec<u8>,
    }

    impl ThriftCompactOutputProtocol {
        pub(crate) fn new() -> Self {
            Self { buf: Vec::new() }
        }

        pub(crate) fn into_inner(self) -> Vec<u8> {
            self.buf
        }

        pub(crate) fn write_byte(&mut self, b: u8) {
            self.buf.push(b);
        }

        pub(crate) fn write_vlq(&mut self, val: u64) {
            let mut v = val;
            while v > 0x7f {
                self.write_byte(v as u8 | 0x80);
                v >>= 7;
            }
            self.write_byte(v as u8);
        }

        pub(crate) fn write_zig_zag(&mut self, val: i64) {
            self.write_vlq(((val << 1) ^ (val >> 63)) as u64);
        }

        pub(crate) fn write_i32(&mut self, val: i32) {
            self.write_zig_zag(val as i64);
        }

        pub(crate) fn write_i64(&mut self, val: i64) {
            self.write_zig_zag(val);
        }

        /// Write a field header, using the short delta form when possible.
        /// Returns `field_id` for chaining into the next call.
        pub(crate) fn write_field_begin(
            &mut self,
            field_type: u8,
            field_id: i16,
            last_field_id: i16,
        ) -> i16 {
            let delta = field_id.wrapping_sub(last_field_id);
            if delta > 0 && delta <= 0xf {
                self.write_byte((delta as u8) << 4 | field_type);
            } else {
                self.write_byte(field_type);
                self.write_zig_zag(field_id as i64);
            }
            field_id
        }

        pub(crate) fn write_stop(&mut self) {
            self.write_byte(0);
        }

        pub(crate) fn write_list_begin(&mut self, element_type: u8, len: usize) {
            if len < 15 {
                self.write_byte((len as u8) << 4 | element_type);
            } else {
                self.write_byte(0xf0 | element_type);
                self.write_vlq(len as u64);
            }
        }

        pub(crate) fn write_bytes(&mut self, val: &[u8]) {
            self.write_vlq(val.len() as u64);
            self.buf.extend_from_slice(val);
        }

        pub(crate) fn write_str(&mut self, val: &str) {
            self.write_bytes(val.as_bytes());
        }

        /// Encode a field holding an empty struct (a Thrift union variant
        /// with no payload).
        pub(crate) fn write_empty_struct(&mut self, field_id: i16, last_field_id: i16) -> i16 {
            self.write_field_begin(12, field_id, last_field_id);
            self.write_stop();
            field_id
        }

        pub(crate) fn write_bool_field(
            &mut self,
            field_id: i16,
            last_field_id: i16,
            val: bool,
        ) -> i16 {
            self.write_field_begin(if val { 1 } else { 2 }, field_id, last_field_id)
        }
    }
}
