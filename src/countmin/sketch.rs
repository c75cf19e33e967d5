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

use std::fs;
use std::path::Path;

use crate::common::RandomSource;
use crate::countmin::serialization;
use crate::error::Error;
use crate::error::ErrorKind;

/// Prime mixed into the second key so that ordered pairs `(a, b)` land on
/// columns independent of `(b, a)` with high probability.
pub(crate) const MIXING_PRIME: u64 = 104729;

/// Count-Min sketch over `u64` keys with `f64` cells.
///
/// The shape (`num_rows` x `num_columns`) and the per-row hash parameters
/// are fixed at construction; only the cells mutate. Two sketches built via
/// [`CountMinSketch::with_layout_of`] hash every key to the same offsets,
/// so one precomputed index vector addresses both.
#[derive(Debug, Clone)]
pub struct CountMinSketch {
    num_rows: usize,
    num_columns: usize,
    param1: Vec<u64>,
    param2: Vec<u64>,
    cells: Vec<f64>,
}

impl CountMinSketch {
    /// Creates a sketch, drawing hash parameters from `rng`.
    ///
    /// # Panics
    ///
    /// Panics if `num_rows` or `num_columns` is zero.
    pub fn new(num_rows: usize, num_columns: usize, rng: &mut dyn RandomSource) -> Self {
        assert!(num_rows >= 1, "num_rows must be at least 1");
        assert!(num_columns >= 1, "num_columns must be at least 1");
        let mut param1 = Vec::with_capacity(num_rows);
        let mut param2 = Vec::with_capacity(num_rows);
        for _ in 0..num_rows {
            // A zero multiplier would collapse a whole row to one column.
            param1.push(rng.next_nonzero_u64());
            param2.push(rng.next_u64());
        }
        Self {
            num_rows,
            num_columns,
            param1,
            param2,
            cells: vec![0.0; num_rows * num_columns],
        }
    }

    /// Creates a sketch sharing `template`'s shape and hash parameters,
    /// with independently owned, zeroed cells.
    pub fn with_layout_of(template: &Self) -> Self {
        Self {
            num_rows: template.num_rows,
            num_columns: template.num_columns,
            param1: template.param1.clone(),
            param2: template.param2.clone(),
            cells: vec![0.0; template.cells.len()],
        }
    }

    pub(crate) fn from_parts(
        num_rows: usize,
        num_columns: usize,
        param1: Vec<u64>,
        param2: Vec<u64>,
        cells: Vec<f64>,
    ) -> Self {
        Self {
            num_rows,
            num_columns,
            param1,
            param2,
            cells,
        }
    }

    /// Returns the number of rows.
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Returns the number of columns per row.
    pub fn num_columns(&self) -> usize {
        self.num_columns
    }

    /// Returns the total number of cells.
    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    pub(crate) fn param1(&self) -> &[u64] {
        &self.param1
    }

    pub(crate) fn param2(&self) -> &[u64] {
        &self.param2
    }

    pub(crate) fn cells(&self) -> &[f64] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [f64] {
        &mut self.cells
    }

    /// Hashes the key pair `(a, b)` into one flat offset per row.
    ///
    /// Pass `b = 0` to hash a single key. Arithmetic wraps modulo 2^64
    /// before the column reduction.
    ///
    /// # Panics
    ///
    /// Panics if `index_out` is shorter than the number of rows.
    pub fn hash_into(&self, index_out: &mut [usize], a: u64, b: u64) {
        let mixed = a.wrapping_add(MIXING_PRIME.wrapping_mul(b));
        let columns = self.num_columns as u64;
        for (i, slot) in index_out[..self.num_rows].iter_mut().enumerate() {
            let column = mixed
                .wrapping_mul(self.param1[i])
                .wrapping_add(self.param2[i])
                % columns;
            *slot = i * self.num_columns + column as usize;
        }
    }

    /// Returns the point estimate: the minimum cell across the rows.
    pub fn query(&self, index: &[usize]) -> f64 {
        let mut least = f64::INFINITY;
        for &offset in &index[..self.num_rows] {
            least = least.min(self.cells[offset]);
        }
        least
    }

    /// Sets every referenced cell to `value` and returns `value`.
    pub fn assign(&mut self, index: &[usize], value: f64) -> f64 {
        for &offset in &index[..self.num_rows] {
            self.cells[offset] = value;
        }
        value
    }

    /// Adds `by` to every referenced cell.
    pub fn add(&mut self, index: &[usize], by: f64) {
        for &offset in &index[..self.num_rows] {
            self.cells[offset] += by;
        }
    }

    /// Sets all cells to `value`.
    pub fn fill(&mut self, value: f64) {
        self.cells.fill(value);
    }

    /// Multiplies all cells by `by`.
    pub fn scale(&mut self, by: f64) {
        for cell in self.cells.iter_mut() {
            *cell *= by;
        }
    }

    /// Serializes this sketch into a byte vector.
    pub fn serialize(&self) -> Vec<u8> {
        serialization::serialize(self)
    }

    /// Deserializes a sketch from bytes.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, Error> {
        serialization::deserialize(bytes)
    }

    /// Writes the serialized sketch to `path`.
    pub fn dump(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        fs::write(path, self.serialize()).map_err(|err| {
            Error::new(ErrorKind::Io, "failed to write sketch")
                .with_context("path", path.display())
                .set_source(err)
        })
    }

    /// Reads a serialized sketch from `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|err| {
            Error::new(ErrorKind::Io, "failed to read sketch")
                .with_context("path", path.display())
                .set_source(err)
        })?;
        Self::deserialize(&bytes)
    }
}
