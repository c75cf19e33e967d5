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

//! Binary encoding of the filtering core.
//!
//! Layout: version, family, dimensions, timestamp, factor, threshold,
//! the cached timestamp reciprocal, the three scratch index buffers, the
//! per-cell merge flags (one byte each, 0 or 1), then the nine sketch
//! blocks as (current, total, score) triples for edge, source, and
//! destination.

use crate::codec::ensure_family_is;
use crate::codec::ensure_serial_version_is;
use crate::codec::insufficient_data;
use crate::codec::SketchBytes;
use crate::codec::SketchSlice;
use crate::common::snapshot::check_factor;
use crate::common::snapshot::check_threshold;
use crate::countmin::serialization as countmin;
use crate::error::Error;
use crate::filtering::FilteringCore;
use crate::normal::serialization::read_core_header;
use crate::normal::serialization::read_core_sketch;
use crate::normal::serialization::read_index;

pub(super) const FILTERING_FAMILY_ID: u8 = 4;
pub(super) const SERIAL_VERSION: u8 = 1;

pub(super) fn serialize(core: &FilteringCore) -> Vec<u8> {
    let sketch_len = countmin::encoded_len(&core.num_current_edge);
    let num_cells = core.should_merge.len();
    let mut bytes = SketchBytes::with_capacity(
        42 + 3 * core.num_rows * 8 + num_cells + 9 * sketch_len,
    );
    bytes.write_u8(SERIAL_VERSION);
    bytes.write_u8(FILTERING_FAMILY_ID);
    bytes.write_u32_le(core.num_rows as u32);
    bytes.write_u32_le(core.num_columns as u32);
    bytes.write_u64_le(core.timestamp);
    bytes.write_f64_le(core.factor);
    bytes.write_f64_le(core.threshold);
    bytes.write_f64_le(core.timestamp_reciprocal);
    for index in [&core.index_edge, &core.index_source, &core.index_destination] {
        for &offset in index {
            bytes.write_u64_le(offset as u64);
        }
    }
    for &flag in &core.should_merge {
        bytes.write_u8(flag as u8);
    }
    countmin::write_block(&mut bytes, &core.num_current_edge);
    countmin::write_block(&mut bytes, &core.num_total_edge);
    countmin::write_block(&mut bytes, &core.score_edge);
    countmin::write_block(&mut bytes, &core.num_current_source);
    countmin::write_block(&mut bytes, &core.num_total_source);
    countmin::write_block(&mut bytes, &core.score_source);
    countmin::write_block(&mut bytes, &core.num_current_destination);
    countmin::write_block(&mut bytes, &core.num_total_destination);
    countmin::write_block(&mut bytes, &core.score_destination);
    bytes.into_bytes()
}

pub(super) fn deserialize(bytes: &[u8]) -> Result<FilteringCore, Error> {
    let mut cursor = SketchSlice::new(bytes);
    let serial_version = cursor.read_u8().map_err(insufficient_data("serial_version"))?;
    let family_id = cursor.read_u8().map_err(insufficient_data("family_id"))?;
    ensure_serial_version_is(SERIAL_VERSION, serial_version)?;
    ensure_family_is(FILTERING_FAMILY_ID, "FILTERING", family_id)?;

    let (num_rows, num_columns, timestamp) = read_core_header(&mut cursor)?;
    let factor = cursor.read_f64_le().map_err(insufficient_data("factor"))?;
    check_factor(factor).map_err(|_| {
        Error::deserial("factor must lie in (0, 1]").with_context("factor", factor)
    })?;
    let threshold = cursor.read_f64_le().map_err(insufficient_data("threshold"))?;
    check_threshold(threshold).map_err(|_| {
        Error::deserial("threshold must be positive").with_context("threshold", threshold)
    })?;
    let timestamp_reciprocal = cursor
        .read_f64_le()
        .map_err(insufficient_data("timestamp_reciprocal"))?;
    if !timestamp_reciprocal.is_finite() || timestamp_reciprocal < 0.0 {
        return Err(Error::deserial("timestamp reciprocal must be finite and non-negative")
            .with_context("timestamp_reciprocal", timestamp_reciprocal));
    }

    let index_edge = read_index(&mut cursor, num_rows, num_columns, "index_edge")?;
    let index_source = read_index(&mut cursor, num_rows, num_columns, "index_source")?;
    let index_destination =
        read_index(&mut cursor, num_rows, num_columns, "index_destination")?;

    let num_cells = num_rows * num_columns;
    let mut should_merge = Vec::with_capacity(num_cells);
    for _ in 0..num_cells {
        let flag = cursor.read_u8().map_err(insufficient_data("should_merge"))?;
        match flag {
            0 => should_merge.push(false),
            1 => should_merge.push(true),
            other => {
                return Err(Error::deserial("merge flags must be 0 or 1")
                    .with_context("flag", other));
            }
        }
    }

    let num_current_edge =
        read_core_sketch(&mut cursor, num_rows, num_columns, "num_current_edge")?;
    let num_total_edge = read_core_sketch(&mut cursor, num_rows, num_columns, "num_total_edge")?;
    let score_edge = read_core_sketch(&mut cursor, num_rows, num_columns, "score_edge")?;
    let num_current_source =
        read_core_sketch(&mut cursor, num_rows, num_columns, "num_current_source")?;
    let num_total_source =
        read_core_sketch(&mut cursor, num_rows, num_columns, "num_total_source")?;
    let score_source = read_core_sketch(&mut cursor, num_rows, num_columns, "score_source")?;
    let num_current_destination =
        read_core_sketch(&mut cursor, num_rows, num_columns, "num_current_destination")?;
    let num_total_destination =
        read_core_sketch(&mut cursor, num_rows, num_columns, "num_total_destination")?;
    let score_destination =
        read_core_sketch(&mut cursor, num_rows, num_columns, "score_destination")?;

    Ok(FilteringCore {
        num_rows,
        num_columns,
        threshold,
        timestamp,
        factor,
        timestamp_reciprocal,
        index_edge,
        index_source,
        index_destination,
        num_current_edge,
        num_total_edge,
        score_edge,
        num_current_source,
        num_total_source,
        score_source,
        num_current_destination,
        num_total_destination,
        score_destination,
        should_merge,
    })
}
