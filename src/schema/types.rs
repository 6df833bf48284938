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

//! Schema element records and the schema descriptor.
//!
//! The footer stores the schema as a flat list in depth-first order, each
//! node carrying a child count instead of pointers. [`SchemaDescriptor`]
//! rebuilds the tree shape from the counts, derives the dotted path of
//! every leaf, and resolves each leaf's logical type.

use std::collections::HashMap;

use crate::basic::{ConvertedType, LogicalType, Repetition, TimeUnit, Type};
use crate::errors::{ParquetError, Result};

/// One node of the flattened schema tree, in the order stored in the file.
///
/// A node with `num_children == 0` is a leaf (a column); any other node is
/// an intermediate group, and groups carry no physical type.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaElement {
    /// Field name.
    pub name: String,
    /// Physical type. Not set for intermediate groups.
    pub physical_type: Option<Type>,
    /// Repetition of the field. The root does not have one.
    pub repetition: Option<Repetition>,
    /// Number of direct children; 0 for leaves.
    pub num_children: i32,
    /// Byte length of FIXED_LEN_BYTE_ARRAY values.
    pub type_length: Option<i32>,
    /// DECIMAL scale.
    pub scale: Option<i32>,
    /// DECIMAL precision.
    pub precision: Option<i32>,
    /// Field id from the originating schema, if any.
    pub field_id: Option<i32>,
    /// Deprecated logical type annotation.
    pub converted_type: Option<ConvertedType>,
    /// Logical type annotation; takes priority over `converted_type`.
    pub logical_type: Option<LogicalType>,
}

impl SchemaElement {
    /// Whether this element is a leaf of the schema tree.
    pub fn is_leaf(&self) -> bool {
        self.num_children == 0
    }

    /// The logical type of this leaf after applying annotation priority and
    /// fallbacks:
    ///
    /// 1. a recognized `logical_type` annotation wins;
    /// 2. otherwise the deprecated `converted_type` is mapped;
    /// 3. otherwise BYTE_ARRAY columns default to strings, INT96 columns to
    ///    non-UTC nanosecond timestamps, and anything else to no annotation.
    pub fn resolved_logical_type(&self) -> LogicalType {
        match &self.logical_type {
            Some(lt) if *lt != LogicalType::Unknown => return lt.clone(),
            _ => {}
        }
        if let Some(ct) = self.converted_type {
            if let Some(lt) = self.logical_from_converted(ct) {
                return lt;
            }
        }
        match self.physical_type {
            Some(Type::BYTE_ARRAY) => LogicalType::String,
            Some(Type::INT96) => LogicalType::Timestamp {
                unit: TimeUnit::NANOS,
                is_adjusted_to_utc: false,
            },
            _ => LogicalType::None,
        }
    }

    // Legacy annotation table. Converted TIME/TIMESTAMP are always
    // UTC-adjusted; INTERVAL has no modern equivalent.
    fn logical_from_converted(&self, ct: ConvertedType) -> Option<LogicalType> {
        let lt = match ct {
            ConvertedType::UTF8 => LogicalType::String,
            ConvertedType::MAP | ConvertedType::MAP_KEY_VALUE => LogicalType::Map,
            ConvertedType::LIST => LogicalType::List,
            ConvertedType::ENUM => LogicalType::Enum,
            ConvertedType::DECIMAL => LogicalType::Decimal {
                precision: self.precision.unwrap_or(0),
                scale: self.scale.unwrap_or(0),
            },
            ConvertedType::DATE => LogicalType::Date,
            ConvertedType::TIME_MILLIS => LogicalType::Time {
                unit: TimeUnit::MILLIS,
                is_adjusted_to_utc: true,
            },
            ConvertedType::TIME_MICROS => LogicalType::Time {
                unit: TimeUnit::MICROS,
                is_adjusted_to_utc: true,
            },
            ConvertedType::TIMESTAMP_MILLIS => LogicalType::Timestamp {
                unit: TimeUnit::MILLIS,
                is_adjusted_to_utc: true,
            },
            ConvertedType::TIMESTAMP_MICROS => LogicalType::Timestamp {
                unit: TimeUnit::MICROS,
                is_adjusted_to_utc: true,
            },
            ConvertedType::UINT_8 => int_type(8, false),
            ConvertedType::UINT_16 => int_type(16, false),
            ConvertedType::UINT_32 => int_type(32, false),
            ConvertedType::UINT_64 => int_type(64, false),
            ConvertedType::INT_8 => int_type(8, true),
            ConvertedType::INT_16 => int_type(16, true),
            ConvertedType::INT_32 => int_type(32, true),
            ConvertedType::INT_64 => int_type(64, true),
            ConvertedType::JSON => LogicalType::Json,
            ConvertedType::BSON => LogicalType::Bson,
            ConvertedType::INTERVAL => LogicalType::None,
            // fall through to the physical-type fallback
            ConvertedType::UNKNOWN(_) => return None,
        };
        Some(lt)
    }
}

fn int_type(bit_width: i8, is_signed: bool) -> LogicalType {
    LogicalType::Integer {
        bit_width,
        is_signed,
    }
}

/// The schema of a file: the flattened element list plus the dotted paths
/// of its leaves with their resolved logical types.
#[derive(Debug, Clone)]
pub struct SchemaDescriptor {
    elements: Vec<SchemaElement>,
    // dotted path (root excluded) of every leaf, in schema order
    leaf_paths: Vec<String>,
    leaf_types: HashMap<String, LogicalType>,
}

impl SchemaDescriptor {
    /// Rebuild the tree shape from the flattened `elements` and resolve all
    /// leaves. The first element is the root and contributes nothing to the
    /// dotted paths.
    pub fn try_new(elements: Vec<SchemaElement>) -> Result<Self> {
        let Some(root) = elements.first() else {
            return Err(malformed_err!("schema element list is empty"));
        };
        if root.num_children < 0 {
            return Err(malformed_err!(
                "schema root declares {} children",
                root.num_children
            ));
        }

        let mut leaf_paths: Vec<String> = Vec::new();
        let mut leaf_types: HashMap<String, LogicalType> = HashMap::new();

        // one counter of unconsumed children per open group, root first;
        // `path` holds the names of the open groups below the root
        let mut stack: Vec<i32> = Vec::new();
        let mut path: Vec<&str> = Vec::new();
        if root.num_children > 0 {
            stack.push(root.num_children);
        }

        for element in &elements[1..] {
            let Some(remaining) = stack.last_mut() else {
                return Err(malformed_err!(
                    "schema element {} appears after the tree is complete",
                    element.name
                ));
            };
            *remaining -= 1;

            if element.num_children < 0 {
                return Err(malformed_err!(
                    "schema element {} declares {} children",
                    element.name,
                    element.num_children
                ));
            }
            if element.is_leaf() {
                let mut full_path = path.join(".");
                if !full_path.is_empty() {
                    full_path.push('.');
                }
                full_path.push_str(&element.name);

                if leaf_types
                    .insert(full_path.clone(), element.resolved_logical_type())
                    .is_some()
                {
                    return Err(schema_err!("duplicate leaf path {}", full_path));
                }
                leaf_paths.push(full_path);

                // close any groups whose subtrees just completed
                while stack.last() == Some(&0) {
                    stack.pop();
                    path.pop();
                }
            } else {
                path.push(&element.name);
                stack.push(element.num_children);
            }
        }

        if !stack.is_empty() {
            return Err(malformed_err!(
                "schema tree is missing {} elements",
                stack.iter().map(|c| *c as i64).sum::<i64>()
            ));
        }

        Ok(Self {
            elements,
            leaf_paths,
            leaf_types,
        })
    }

    /// The flattened schema element list, root first, in file order.
    pub fn elements(&self) -> &[SchemaElement] {
        &self.elements
    }

    /// Number of leaf columns.
    pub fn num_leaves(&self) -> usize {
        self.leaf_paths.len()
    }

    /// Dotted paths of the leaf columns, in schema order.
    pub fn leaf_paths(&self) -> &[String] {
        &self.leaf_paths
    }

    /// The resolved logical type of the leaf at `path`, or `None` if no
    /// such leaf exists.
    pub fn logical_type(&self, path: &str) -> Option<&LogicalType> {
        self.leaf_types.get(path)
    }

    /// Like [`Self::logical_type`] but demanding that the path names a leaf.
    pub(crate) fn require_leaf(&self, path: &str) -> Result<LogicalType> {
        self.leaf_types
            .get(path)
            .cloned()
            .ok_or_else(|| schema_err!("column {} does not name a schema leaf", path))
    }
}
