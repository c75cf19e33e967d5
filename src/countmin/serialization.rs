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

//! Binary encoding of a Count-Min sketch block.
//!
//! The block is self-describing and is reused verbatim inside the core
//! encodings: version and family bytes, the shape, both hash parameter
//! vectors, then all cells as little-endian IEEE-754 doubles. Cells
//! round-trip bit-exactly.

use crate::codec::ensure_family_is;
use crate::codec::ensure_serial_version_is;
use crate::codec::insufficient_data;
use crate::codec::SketchBytes;
use crate::codec::SketchSlice;
use crate::countmin::CountMinSketch;
use crate::error::Error;

pub(crate) const COUNTMIN_FAMILY_ID: u8 = 1;
pub(crate) const SERIAL_VERSION: u8 = 1;

pub(crate) fn serialize(sketch: &CountMinSketch) -> Vec<u8> {
    let mut bytes = SketchBytes::with_capacity(encoded_len(sketch));
    write_block(&mut bytes, sketch);
    bytes.into_bytes()
}

pub(crate) fn deserialize(bytes: &[u8]) -> Result<CountMinSketch, Error> {
    let mut cursor = SketchSlice::new(bytes);
    read_block(&mut cursor)
}

pub(crate) fn encoded_len(sketch: &CountMinSketch) -> usize {
    2 + 8 + sketch.num_rows() * 16 + sketch.num_cells() * 8
}

pub(crate) fn write_block(bytes: &mut SketchBytes, sketch: &CountMinSketch) {
    bytes.write_u8(SERIAL_VERSION);
    bytes.write_u8(COUNTMIN_FAMILY_ID);
    bytes.write_u32_le(sketch.num_rows() as u32);
    bytes.write_u32_le(sketch.num_columns() as u32);
    for &param in sketch.param1() {
        bytes.write_u64_le(param);
    }
    for &param in sketch.param2() {
        bytes.write_u64_le(param);
    }
    for &cell in sketch.cells() {
        bytes.write_f64_le(cell);
    }
}

pub(crate) fn read_block(cursor: &mut SketchSlice<'_>) -> Result<CountMinSketch, Error> {
    let serial_version = cursor.read_u8().map_err(insufficient_data("serial_version"))?;
    let family_id = cursor.read_u8().map_err(insufficient_data("family_id"))?;
    ensure_serial_version_is(SERIAL_VERSION, serial_version)?;
    ensure_family_is(COUNTMIN_FAMILY_ID, "COUNTMIN", family_id)?;

    let num_rows = cursor.read_u32_le().map_err(insufficient_data("num_rows"))? as usize;
    let num_columns = cursor
        .read_u32_le()
        .map_err(insufficient_data("num_columns"))? as usize;
    if num_rows == 0 || num_columns == 0 {
        return Err(Error::deserial("sketch dimensions must be at least 1")
            .with_context("num_rows", num_rows)
            .with_context("num_columns", num_columns));
    }
    let num_cells = num_rows
        .checked_mul(num_columns)
        .ok_or_else(|| Error::deserial("sketch cell count overflow"))?;

    let mut param1 = Vec::with_capacity(num_rows);
    for _ in 0..num_rows {
        let param = cursor.read_u64_le().map_err(insufficient_data("param1"))?;
        if param == 0 {
            return Err(Error::deserial("param1 entries must be non-zero"));
        }
        param1.push(param);
    }
    let mut param2 = Vec::with_capacity(num_rows);
    for _ in 0..num_rows {
        param2.push(cursor.read_u64_le().map_err(insufficient_data("param2"))?);
    }
    let mut cells = Vec::with_capacity(num_cells);
    for _ in 0..num_cells {
        cells.push(cursor.read_f64_le().map_err(insufficient_data("cells"))?);
    }

    Ok(CountMinSketch::from_parts(
        num_rows,
        num_columns,
        param1,
        param2,
        cells,
    ))
}
