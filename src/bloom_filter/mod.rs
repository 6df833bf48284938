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

//! Split block bloom filters, as described in the Parquet
//! [spec](https://github.com/apache/parquet-format/blob/master/BloomFilter.md).
//!
//! On disk a filter is a thrift compact `BloomFilterHeader` followed by
//! the bitset: `num_bytes` of blocks, each block 256 bits laid out as
//! eight 32 bit little-endian words. Keys are hashed with xxHash64
//! (seed 0); the high half of the hash picks the block and the low half
//! drives the eight salted lane masks.
//!
//! A probe answers "definitely absent" or "possibly present". Callers
//! receiving any error from this module must degrade to "possibly
//! present" rather than treating the column as filtered.

use std::hash::Hasher;

use twox_hash::XxHash64;

use crate::errors::{ParquetError, Result};
use crate::file::reader::ChunkReader;
use crate::thrift::{FieldType, ThriftSliceInputProtocol};

/// Salt values as defined in the spec; lane `i` of a block mask is bit
/// `(x * SALT[i]) >> 27` of word `i`.
const SALT: [u32; 8] = [
    0x47b6137b_u32,
    0x44974d91_u32,
    0x8824ad5b_u32,
    0xa2b7289d_u32,
    0x705495c7_u32,
    0x2df1424b_u32,
    0x9efc4947_u32,
    0x5c6bfb31_u32,
];

/// Bytes per block: 8 words of 32 bits.
const BLOCK_SIZE: usize = 32;

/// Bytes read to pick up the thrift header when the footer did not record
/// the filter's length. The header is four small fields and never comes
/// close to this.
const HEADER_SIZE_ESTIMATE: usize = 32;

/// Each block is 256 bits, broken up into eight contiguous "words", each
/// consisting of 32 bits. Each word is thought of as an array of bits;
/// each bit is either "set" or "not set".
type Block = [u32; 8];

/// Takes as its argument a single unsigned 32-bit integer and returns a
/// block in which each word has exactly one bit set.
fn mask(x: u32) -> Block {
    let mut result = [0_u32; 8];
    for i in 0..8 {
        // wrapping instead of checking for overflow
        let y = x.wrapping_mul(SALT[i]);
        result[i] = 1 << (y >> 27);
    }
    result
}

/// Sets every bit in the block that is also set in the result of mask.
fn block_insert(block: &mut Block, hash: u32) {
    let mask = mask(hash);
    for i in 0..8 {
        block[i] |= mask[i];
    }
}

/// Returns true when every bit set in the result of mask is also set in
/// the block.
fn block_check(block: &Block, hash: u32) -> bool {
    let mask = mask(hash);
    for i in 0..8 {
        if block[i] & mask[i] == 0 {
            return false;
        }
    }
    true
}

// per spec the hash is xxHash64 with seed=0
const SEED: u64 = 0;

fn hash_bytes(value: &[u8]) -> u64 {
    let mut hasher = XxHash64::with_seed(SEED);
    hasher.write(value);
    hasher.finish()
}

// The filter's thrift header. Algorithm, hash and compression are each a
// single-variant union; anything but BLOCK/XXHASH/UNCOMPRESSED means the
// bitset cannot be evaluated and the parse fails.
//
// struct BloomFilterHeader {
//   1: required i32 numBytes;
//   2: required BloomFilterAlgorithm algorithm;
//   3: required BloomFilterHash hash;
//   4: required BloomFilterCompression compression;
// }
fn read_bloom_filter_header(prot: &mut ThriftSliceInputProtocol<'_>) -> Result<usize> {
    let mut num_bytes: Option<i32> = None;
    let mut has_algorithm = false;
    let mut has_hash = false;
    let mut has_compression = false;

    let mut last_field_id = 0i16;
    loop {
        let field_ident = prot.read_field_begin(last_field_id)?;
        if field_ident.field_type == FieldType::Stop {
            break;
        }
        match field_ident.id {
            1 => num_bytes = Some(prot.read_i32()?),
            2 => {
                read_singleton_union(prot, "algorithm", "BLOCK")?;
                has_algorithm = true;
            }
            3 => {
                read_singleton_union(prot, "hash", "XXHASH")?;
                has_hash = true;
            }
            4 => {
                read_singleton_union(prot, "compression", "UNCOMPRESSED")?;
                has_compression = true;
            }
            _ => prot.skip(field_ident.field_type)?,
        }
        last_field_id = field_ident.id;
    }

    let Some(num_bytes) = num_bytes else {
        return Err(missing_field_err!("numBytes"));
    };
    if !has_algorithm {
        return Err(missing_field_err!("algorithm"));
    }
    if !has_hash {
        return Err(missing_field_err!("hash"));
    }
    if !has_compression {
        return Err(missing_field_err!("compression"));
    }
    if num_bytes <= 0 || num_bytes as usize % BLOCK_SIZE != 0 {
        return Err(malformed_err!(
            "implausible bloom filter bitset size {}",
            num_bytes
        ));
    }
    Ok(num_bytes as usize)
}

// All three header unions have exactly one defined variant with field
// id 1 and no payload.
fn read_singleton_union(
    prot: &mut ThriftSliceInputProtocol<'_>,
    what: &str,
    expected: &str,
) -> Result<()> {
    let field_ident = prot.read_field_begin(0)?;
    if field_ident.field_type == FieldType::Stop {
        return Err(malformed_err!("received empty union for bloom filter {}", what));
    }
    if field_ident.id != 1 {
        return Err(malformed_err!(
            "bloom filter {} {} is not {}",
            what,
            field_ident.id,
            expected
        ));
    }
    prot.skip_empty_struct()?;
    let field_ident = prot.read_field_begin(0)?;
    if field_ident.field_type != FieldType::Stop {
        return Err(malformed_err!(
            "received multiple fields for bloom filter {} union",
            what
        ));
    }
    Ok(())
}

/// A split block bloom filter.
#[derive(Debug, Clone)]
pub struct Sbbf(Vec<Block>);

impl Sbbf {
    /// Build a filter from a raw bitset. The length must be a multiple of
    /// the 32 byte block size; trailing partial blocks are not allowed by
    /// the format and are dropped here.
    pub fn new(bitset: &[u8]) -> Self {
        let data = bitset
            .chunks_exact(BLOCK_SIZE)
            .map(|chunk| {
                let mut block = [0_u32; 8];
                for (i, word) in chunk.chunks_exact(4).enumerate() {
                    // infallible: chunks_exact yields 4 byte words
                    block[i] = u32::from_le_bytes(word.try_into().unwrap());
                }
                block
            })
            .collect();
        Self(data)
    }

    /// An all-zero filter of `num_blocks` blocks, for building filters to
    /// probe in tests and tools.
    pub fn with_num_blocks(num_blocks: usize) -> Self {
        Self(vec![[0_u32; 8]; num_blocks])
    }

    /// Read a filter from `reader` at `offset`. `length` is the total
    /// length (header plus bitset) recorded in the column chunk, or
    /// negative when the footer did not record one, in which case the
    /// header is read through a bounded prefetch.
    pub fn read_from_reader<R: ChunkReader>(
        reader: &R,
        offset: u64,
        length: i64,
    ) -> Result<Self> {
        let file_size = reader.len();
        if offset >= file_size {
            return Err(eof_err!(
                "bloom filter offset {} beyond file of {} bytes",
                offset,
                file_size
            ));
        }

        let prefetch = if length >= 0 {
            length as usize
        } else {
            HEADER_SIZE_ESTIMATE.min((file_size - offset) as usize)
        };
        let header_buf = reader.get_bytes(offset, prefetch.min((file_size - offset) as usize))?;
        let mut prot = ThriftSliceInputProtocol::new(header_buf.as_ref());
        let num_bytes = read_bloom_filter_header(&mut prot)?;
        let header_len = header_buf.as_ref().len() - prot.remaining();

        if offset + header_len as u64 + num_bytes as u64 > file_size {
            return Err(eof_err!(
                "bloom filter bitset of {} bytes at offset {} beyond file of {} bytes",
                num_bytes,
                offset + header_len as u64,
                file_size
            ));
        }
        if length >= 0 && header_len + num_bytes > length as usize {
            return Err(malformed_err!(
                "bloom filter bitset of {} bytes exceeds recorded length {}",
                num_bytes,
                length
            ));
        }

        let bitset = if length >= 0 {
            // the prefetch already covers header and bitset
            header_buf.slice(header_len..header_len + num_bytes)
        } else {
            reader.get_bytes(offset + header_len as u64, num_bytes)?
        };
        Ok(Self::new(bitset.as_ref()))
    }

    #[inline]
    fn hash_to_block_index(&self, hash: u64) -> usize {
        // unbiased reduction of the high 32 bits onto the block range
        (((hash >> 32).wrapping_mul(self.0.len() as u64)) >> 32) as usize
    }

    /// Insert a serialized key into the filter.
    pub fn insert(&mut self, value: &[u8]) {
        let hash = hash_bytes(value);
        let block_index = self.hash_to_block_index(hash);
        block_insert(&mut self.0[block_index], hash as u32);
    }

    /// Whether a serialized key is possibly present (true) or definitely
    /// absent (false).
    pub fn check(&self, value: &[u8]) -> bool {
        let hash = hash_bytes(value);
        let block_index = self.hash_to_block_index(hash);
        block_check(&self.0[block_index], hash as u32)
    }

    /// Number of 32 byte blocks in the filter.
    pub fn num_blocks(&self) -> usize {
        self.0.len()
    }

    /// Serialize as stored on disk: the thrift header, then the bitset.
    ///
    /// This is the counterpart of [`Self::read_from_reader`] for filters
    /// built in memory with [`Self::insert`] (fixtures, tooling). Writing
    /// Parquet files themselves is out of scope for this crate.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.0.len() * BLOCK_SIZE + 20);
        // header: numBytes, then the three singleton unions, all with
        // their only defined variant (field id 1, empty struct)
        out.push(0x15); // field 1, i32
        let mut num_bytes = ((self.0.len() * BLOCK_SIZE) as u64) << 1; // zig-zag
        while num_bytes > 0x7f {
            out.push(num_bytes as u8 | 0x80);
            num_bytes >>= 7;
        }
        out.push(num_bytes as u8);
        for _ in 0..3 {
            // struct field (delta 1), variant 1 empty struct, union stop
            out.extend_from_slice(&[0x1c, 0x1c, 0x00, 0x00]);
        }
        out.push(0x00); // header stop
        for block in &self.0 {
            for word in block {
                out.extend_from_slice(&word.to_le_bytes());
            }
        }
        out
    }
}

/// Probe the bloom filter of a column chunk for a serialized key.
///
/// `offset` and `length` come straight from the column chunk metadata,
/// `-1` sentinels included: a negative `offset` means the column has no
/// filter and fails with `BloomAbsent`; a negative `length` merely means
/// the footer did not record the filter's size.
pub fn test_bloom<R: ChunkReader>(
    reader: &R,
    offset: i64,
    length: i64,
    key: &[u8],
) -> Result<bool> {
    if offset < 0 {
        return Err(ParquetError::BloomAbsent(
            "column records no bloom filter offset".to_owned(),
        ));
    }
    let sbbf = Sbbf::read_from_reader(reader, offset as u64, length)?;
    Ok(sbbf.check(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn test_hash_bytes() {
        // xxHash64 with seed 0 of the empty input
        assert_eq!(hash_bytes(b""), 17241709254077376921);
    }

    #[test]
    fn test_mask_set_quick_check() {
        for i in (0..1_000_000).step_by(97) {
            let result = mask(i);
            assert!(result.iter().all(|&x| x.count_ones() == 1));
        }
    }

    #[test]
    fn test_block_insert_and_check() {
        for i in (0..1_000_000).step_by(97) {
            let mut block = [0_u32; 8];
            block_insert(&mut block, i);
            assert!(block_check(&block, i));
        }
    }

    #[test]
    fn test_sbbf_insert_and_check() {
        let mut sbbf = Sbbf::with_num_blocks(32);
        for key in [&b"alpha"[..], b"beta", b"gamma", b""] {
            sbbf.insert(key);
            assert!(sbbf.check(key));
        }
    }

    #[test]
    fn test_membership_and_false_positive_rate() {
        // 64 blocks = 2 KiB for a handful of keys keeps the false
        // positive rate far below 1%
        let mut sbbf = Sbbf::with_num_blocks(64);
        sbbf.insert(b"alpha");
        sbbf.insert(b"beta");
        assert!(sbbf.check(b"alpha"));
        assert!(sbbf.check(b"beta"));
        assert!(!sbbf.check(b"gamma"));

        let false_positives = (0..10_000)
            .filter(|i| sbbf.check(format!("absent-{i}").as_bytes()))
            .count();
        assert!(false_positives < 100, "{false_positives} false positives");
    }

    fn filter_in_file(sbbf: &Sbbf, offset: usize) -> Bytes {
        let mut file = vec![0xee; offset];
        file.extend_from_slice(&sbbf.to_bytes());
        file.into()
    }

    #[test]
    fn test_read_from_reader_with_length() {
        let mut sbbf = Sbbf::with_num_blocks(8);
        sbbf.insert(b"alpha");
        let total_len = sbbf.to_bytes().len() as i64;
        let data = filter_in_file(&sbbf, 100);

        let read = Sbbf::read_from_reader(&data, 100, total_len).unwrap();
        assert_eq!(read.num_blocks(), 8);
        assert!(read.check(b"alpha"));
        assert!(!read.check(b"omega"));
    }

    #[test]
    fn test_read_from_reader_without_length() {
        let mut sbbf = Sbbf::with_num_blocks(8);
        sbbf.insert(b"alpha");
        let data = filter_in_file(&sbbf, 64);

        let read = Sbbf::read_from_reader(&data, 64, -1).unwrap();
        assert!(read.check(b"alpha"));
        assert!(!read.check(b"omega"));
    }

    #[test]
    fn test_test_bloom_absent() {
        let data = Bytes::from_static(b"irrelevant");
        assert!(matches!(
            test_bloom(&data, -1, -1, b"alpha").unwrap_err(),
            ParquetError::BloomAbsent(_)
        ));
    }

    #[test]
    fn test_bloom_end_to_end() {
        let mut sbbf = Sbbf::with_num_blocks(16);
        sbbf.insert(b"alpha");
        sbbf.insert(b"beta");
        let total_len = sbbf.to_bytes().len() as i64;
        let data = filter_in_file(&sbbf, 10);

        assert!(test_bloom(&data, 10, total_len, b"alpha").unwrap());
        assert!(test_bloom(&data, 10, total_len, b"beta").unwrap());
        assert!(!test_bloom(&data, 10, -1, b"gamma").unwrap());
    }

    #[test]
    fn test_truncated_bitset() {
        let sbbf = Sbbf::with_num_blocks(8);
        let bytes = sbbf.to_bytes();
        // drop half the bitset
        let data = Bytes::copy_from_slice(&bytes[..bytes.len() - 128]);
        let err = Sbbf::read_from_reader(&data, 0, -1).unwrap_err();
        assert!(matches!(err, ParquetError::TruncatedInput(_)));
    }

    #[test]
    fn test_offset_beyond_eof() {
        let data = Bytes::from_static(b"tiny");
        let err = Sbbf::read_from_reader(&data, 400, -1).unwrap_err();
        assert!(matches!(err, ParquetError::TruncatedInput(_)));
    }

    #[test]
    fn test_implausible_bitset_size() {
        use crate::thrift::writer::ThriftCompactOutputProtocol;
        // header declaring 33 bytes: not a whole number of blocks
        let mut w = ThriftCompactOutputProtocol::new();
        let mut last = w.write_field_begin(5, 1, 0);
        w.write_i32(33);
        last = w.write_field_begin(12, 2, last);
        w.write_empty_struct(1, 0);
        w.write_stop();
        last = w.write_field_begin(12, 3, last);
        w.write_empty_struct(1, 0);
        w.write_stop();
        w.write_field_begin(12, 4, last);
        w.write_empty_struct(1, 0);
        w.write_stop();
        w.write_stop();
        let mut bytes = w.into_inner();
        bytes.extend_from_slice(&[0; 64]);
        let data = Bytes::from(bytes);
        let err = Sbbf::read_from_reader(&data, 0, -1).unwrap_err();
        assert!(matches!(err, ParquetError::MalformedEncoding(_)));
    }

    #[test]
    fn test_unknown_hash_union_rejected() {
        use crate::thrift::writer::ThriftCompactOutputProtocol;
        let mut w = ThriftCompactOutputProtocol::new();
        let mut last = w.write_field_begin(5, 1, 0);
        w.write_i32(64);
        last = w.write_field_begin(12, 2, last);
        w.write_empty_struct(1, 0);
        w.write_stop();
        last = w.write_field_begin(12, 3, last);
        w.write_empty_struct(2, 0); // not XXHASH
        w.write_stop();
        w.write_field_begin(12, 4, last);
        w.write_empty_struct(1, 0);
        w.write_stop();
        w.write_stop();
        let mut bytes = w.into_inner();
        bytes.extend_from_slice(&[0; 64]);
        let data = Bytes::from(bytes);
        let err = Sbbf::read_from_reader(&data, 0, -1).unwrap_err();
        assert!(matches!(err, ParquetError::MalformedEncoding(_)));
    }
}
