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

//! Binary encoding of the normal core.
//!
//! Layout: version, family, dimensions, timestamp, the scratch index
//! buffer, then the current and total sketch blocks in that order.

use crate::codec::ensure_family_is;
use crate::codec::ensure_serial_version_is;
use crate::codec::insufficient_data;
use crate::codec::SketchBytes;
use crate::codec::SketchSlice;
use crate::countmin::serialization as countmin;
use crate::countmin::CountMinSketch;
use crate::error::Error;
use crate::normal::NormalCore;

pub(super) const NORMAL_FAMILY_ID: u8 = 2;
pub(super) const SERIAL_VERSION: u8 = 1;

pub(super) fn serialize(core: &NormalCore) -> Vec<u8> {
    let sketch_len = countmin::encoded_len(&core.num_current);
    let mut bytes = SketchBytes::with_capacity(18 + core.num_rows * 8 + 2 * sketch_len);
    bytes.write_u8(SERIAL_VERSION);
    bytes.write_u8(NORMAL_FAMILY_ID);
    bytes.write_u32_le(core.num_rows as u32);
    bytes.write_u32_le(core.num_columns as u32);
    bytes.write_u64_le(core.timestamp);
    for &offset in &core.index {
        bytes.write_u64_le(offset as u64);
    }
    countmin::write_block(&mut bytes, &core.num_current);
    countmin::write_block(&mut bytes, &core.num_total);
    bytes.into_bytes()
}

pub(super) fn deserialize(bytes: &[u8]) -> Result<NormalCore, Error> {
    let mut cursor = SketchSlice::new(bytes);
    let serial_version = cursor.read_u8().map_err(insufficient_data("serial_version"))?;
    let family_id = cursor.read_u8().map_err(insufficient_data("family_id"))?;
    ensure_serial_version_is(SERIAL_VERSION, serial_version)?;
    ensure_family_is(NORMAL_FAMILY_ID, "NORMAL", family_id)?;

    let (num_rows, num_columns, timestamp) = read_core_header(&mut cursor)?;
    let index = read_index(&mut cursor, num_rows, num_columns, "index")?;
    let num_current = read_core_sketch(&mut cursor, num_rows, num_columns, "num_current")?;
    let num_total = read_core_sketch(&mut cursor, num_rows, num_columns, "num_total")?;

    Ok(NormalCore {
        num_rows,
        num_columns,
        timestamp,
        index,
        num_current,
        num_total,
    })
}

pub(crate) fn read_core_header(
    cursor: &mut SketchSlice<'_>,
) -> Result<(usize, usize, u64), Error> {
    let num_rows = cursor.read_u32_le().map_err(insufficient_data("num_rows"))? as usize;
    let num_columns = cursor
        .read_u32_le()
        .map_err(insufficient_data("num_columns"))? as usize;
    if num_rows == 0 || num_columns == 0 {
        return Err(Error::deserial("core dimensions must be at least 1")
            .with_context("num_rows", num_rows)
            .with_context("num_columns", num_columns));
    }
    let timestamp = cursor.read_u64_le().map_err(insufficient_data("timestamp"))?;
    if timestamp == 0 {
        return Err(Error::deserial("timestamp must be at least 1"));
    }
    Ok((num_rows, num_columns, timestamp))
}

pub(crate) fn read_index(
    cursor: &mut SketchSlice<'_>,
    num_rows: usize,
    num_columns: usize,
    field: &'static str,
) -> Result<Vec<usize>, Error> {
    let num_cells = num_rows as u64 * num_columns as u64;
    let mut index = Vec::with_capacity(num_rows);
    for _ in 0..num_rows {
        let offset = cursor.read_u64_le().map_err(insufficient_data(field))?;
        if offset >= num_cells {
            return Err(Error::deserial("scratch index offset out of range")
                .with_context("field", field)
                .with_context("offset", offset));
        }
        index.push(offset as usize);
    }
    Ok(index)
}

pub(crate) fn read_core_sketch(
    cursor: &mut SketchSlice<'_>,
    num_rows: usize,
    num_columns: usize,
    field: &'static str,
) -> Result<CountMinSketch, Error> {
    let sketch = countmin::read_block(cursor)
        .map_err(|err| err.with_context("sketch", field))?;
    if sketch.num_rows() != num_rows || sketch.num_columns() != num_columns {
        return Err(Error::deserial("sketch shape does not match the core")
            .with_context("sketch", field)
            .with_context("num_rows", sketch.num_rows())
            .with_context("num_columns", sketch.num_columns()));
    }
    Ok(sketch)
}
