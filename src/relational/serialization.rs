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

//! Binary encoding of the relational core.
//!
//! Layout: version, family, dimensions, timestamp, factor, the three
//! scratch index buffers (edge, source, destination), then the six sketch
//! blocks as (current, total) pairs in the same order.

use crate::codec::ensure_family_is;
use crate::codec::ensure_serial_version_is;
use crate::codec::insufficient_data;
use crate::codec::SketchBytes;
use crate::codec::SketchSlice;
use crate::common::snapshot::check_factor;
use crate::countmin::serialization as countmin;
use crate::error::Error;
use crate::normal::serialization::read_core_header;
use crate::normal::serialization::read_core_sketch;
use crate::normal::serialization::read_index;
use crate::relational::RelationalCore;

pub(super) const RELATIONAL_FAMILY_ID: u8 = 3;
pub(super) const SERIAL_VERSION: u8 = 1;

pub(super) fn serialize(core: &RelationalCore) -> Vec<u8> {
    let sketch_len = countmin::encoded_len(&core.num_current_edge);
    let mut bytes =
        SketchBytes::with_capacity(26 + 3 * core.num_rows * 8 + 6 * sketch_len);
    bytes.write_u8(SERIAL_VERSION);
    bytes.write_u8(RELATIONAL_FAMILY_ID);
    bytes.write_u32_le(core.num_rows as u32);
    bytes.write_u32_le(core.num_columns as u32);
    bytes.write_u64_le(core.timestamp);
    bytes.write_f64_le(core.factor);
    for index in [&core.index_edge, &core.index_source, &core.index_destination] {
        for &offset in index {
            bytes.write_u64_le(offset as u64);
        }
    }
    countmin::write_block(&mut bytes, &core.num_current_edge);
    countmin::write_block(&mut bytes, &core.num_total_edge);
    countmin::write_block(&mut bytes, &core.num_current_source);
    countmin::write_block(&mut bytes, &core.num_total_source);
    countmin::write_block(&mut bytes, &core.num_current_destination);
    countmin::write_block(&mut bytes, &core.num_total_destination);
    bytes.into_bytes()
}

pub(super) fn deserialize(bytes: &[u8]) -> Result<RelationalCore, Error> {
    let mut cursor = SketchSlice::new(bytes);
    let serial_version = cursor.read_u8().map_err(insufficient_data("serial_version"))?;
    let family_id = cursor.read_u8().map_err(insufficient_data("family_id"))?;
    ensure_serial_version_is(SERIAL_VERSION, serial_version)?;
    ensure_family_is(RELATIONAL_FAMILY_ID, "RELATIONAL", family_id)?;

    let (num_rows, num_columns, timestamp) = read_core_header(&mut cursor)?;
    let factor = cursor.read_f64_le().map_err(insufficient_data("factor"))?;
    check_factor(factor).map_err(|_| {
        Error::deserial("factor must lie in (0, 1]").with_context("factor", factor)
    })?;

    let index_edge = read_index(&mut cursor, num_rows, num_columns, "index_edge")?;
    let index_source = read_index(&mut cursor, num_rows, num_columns, "index_source")?;
    let index_destination =
        read_index(&mut cursor, num_rows, num_columns, "index_destination")?;

    let num_current_edge =
        read_core_sketch(&mut cursor, num_rows, num_columns, "num_current_edge")?;
    let num_total_edge = read_core_sketch(&mut cursor, num_rows, num_columns, "num_total_edge")?;
    let num_current_source =
        read_core_sketch(&mut cursor, num_rows, num_columns, "num_current_source")?;
    let num_total_source =
        read_core_sketch(&mut cursor, num_rows, num_columns, "num_total_source")?;
    let num_current_destination =
        read_core_sketch(&mut cursor, num_rows, num_columns, "num_current_destination")?;
    let num_total_destination =
        read_core_sketch(&mut cursor, num_rows, num_columns, "num_total_destination")?;

    Ok(RelationalCore {
        num_rows,
        num_columns,
        timestamp,
        factor,
        index_edge,
        index_source,
        index_destination,
        num_current_edge,
        num_total_edge,
        num_current_source,
        num_total_source,
        num_current_destination,
        num_total_destination,
    })
}
