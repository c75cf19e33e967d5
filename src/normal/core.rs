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

use std::path::Path;

use crate::common::score::chi_squared;
use crate::common::snapshot::check_dimensions;
use crate::common::snapshot::read_snapshot;
use crate::common::snapshot::write_snapshot;
use crate::common::RandomSource;
use crate::common::XorShift64;
use crate::common::DEFAULT_SEED;
use crate::countmin::CountMinSketch;
use crate::error::Error;
use crate::hash::djb2;
use crate::normal::serialization;

/// Online scorer over edge counts only.
///
/// `observe` is O(rows) and allocates nothing; tick boundaries clear the
/// current-tick sketch in O(rows x columns). Edges must arrive with
/// non-decreasing timestamps; an older timestamp is still folded in and
/// scored, but never rolls the tick back.
#[derive(Debug)]
pub struct NormalCore {
    pub(super) num_rows: usize,
    pub(super) num_columns: usize,
    pub(super) timestamp: u64,
    pub(super) index: Vec<usize>,
    pub(super) num_current: CountMinSketch,
    pub(super) num_total: CountMinSketch,
}

impl NormalCore {
    /// Creates a core with the default hash-parameter seed.
    ///
    /// Returns [`ErrorKind::ConfigInvalid`](crate::error::ErrorKind) if a
    /// dimension is zero.
    pub fn new(num_rows: usize, num_columns: usize) -> Result<Self, Error> {
        Self::with_seed(num_rows, num_columns, DEFAULT_SEED)
    }

    /// Creates a core whose hash parameters are drawn from `seed`.
    ///
    /// Cores built with equal shapes and seeds hash identically and
    /// therefore produce identical scores on identical streams.
    pub fn with_seed(num_rows: usize, num_columns: usize, seed: u64) -> Result<Self, Error> {
        check_dimensions(num_rows, num_columns)?;
        let mut rng = XorShift64::seeded(seed);
        Ok(Self::with_rng(num_rows, num_columns, &mut rng))
    }

    fn with_rng(num_rows: usize, num_columns: usize, rng: &mut dyn RandomSource) -> Self {
        let num_current = CountMinSketch::new(num_rows, num_columns, rng);
        let num_total = CountMinSketch::with_layout_of(&num_current);
        Self {
            num_rows,
            num_columns,
            timestamp: 1,
            index: vec![0; num_rows],
            num_current,
            num_total,
        }
    }

    /// Returns the number of sketch rows.
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Returns the number of sketch columns.
    pub fn num_columns(&self) -> usize {
        self.num_columns
    }

    /// Returns the last observed tick.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Scores one directed edge at `timestamp`, updating the statistics.
    pub fn observe(&mut self, source: u64, destination: u64, timestamp: u64) -> f64 {
        if timestamp > self.timestamp {
            self.num_current.fill(0.0);
            self.timestamp = timestamp;
        }
        self.num_current.hash_into(&mut self.index, source, destination);
        self.num_current.add(&self.index, 1.0);
        self.num_total.add(&self.index, 1.0);
        chi_squared(
            self.num_current.query(&self.index),
            self.num_total.query(&self.index),
            timestamp,
        )
    }

    /// Scores one directed edge with string endpoints.
    pub fn observe_str(&mut self, source: &str, destination: &str, timestamp: u64) -> f64 {
        self.observe(djb2(source), djb2(destination), timestamp)
    }

    /// Serializes this core into a byte vector.
    pub fn serialize(&self) -> Vec<u8> {
        serialization::serialize(self)
    }

    /// Deserializes a core from bytes.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, Error> {
        serialization::deserialize(bytes)
    }

    /// Writes the serialized core to `path`.
    pub fn dump(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        write_snapshot(path.as_ref(), &self.serialize())
    }

    /// Reads a serialized core from `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        Self::deserialize(&read_snapshot(path.as_ref())?)
    }
}
