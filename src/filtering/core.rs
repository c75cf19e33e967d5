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

use crate::common::score::chi_squared_filtered;
use crate::common::snapshot::check_dimensions;
use crate::common::snapshot::check_factor;
use crate::common::snapshot::check_threshold;
use crate::common::snapshot::read_snapshot;
use crate::common::snapshot::write_snapshot;
use crate::common::RandomSource;
use crate::common::XorShift64;
use crate::common::DEFAULT_SEED;
use crate::countmin::CountMinSketch;
use crate::error::Error;
use crate::filtering::serialization;
use crate::hash::djb2;

/// Decay applied to the current-tick sketches at a tick boundary when the
/// caller does not choose one.
pub const DEFAULT_FACTOR: f64 = 0.5;

/// Online scorer that withholds suspected anomalies from its baseline.
///
/// Keeps the relational statistics plus, per statistic, a sketch of the
/// most recently assigned score. A cell is merged into the totals at the
/// next tick boundary only while its score stays below `threshold`;
/// otherwise the totals are advanced by the per-tick rate observed so far
/// (`total / (timestamp - 1)`), cached as `timestamp_reciprocal`.
#[derive(Debug)]
pub struct FilteringCore {
    pub(super) num_rows: usize,
    pub(super) num_columns: usize,
    pub(super) threshold: f64,
    pub(super) timestamp: u64,
    pub(super) factor: f64,
    pub(super) timestamp_reciprocal: f64,
    pub(super) index_edge: Vec<usize>,
    pub(super) index_source: Vec<usize>,
    pub(super) index_destination: Vec<usize>,
    pub(super) num_current_edge: CountMinSketch,
    pub(super) num_total_edge: CountMinSketch,
    pub(super) score_edge: CountMinSketch,
    pub(super) num_current_source: CountMinSketch,
    pub(super) num_total_source: CountMinSketch,
    pub(super) score_source: CountMinSketch,
    pub(super) num_current_destination: CountMinSketch,
    pub(super) num_total_destination: CountMinSketch,
    pub(super) score_destination: CountMinSketch,
    pub(super) should_merge: Vec<bool>,
}

impl FilteringCore {
    /// Creates a core with [`DEFAULT_FACTOR`] and the default seed.
    pub fn new(num_rows: usize, num_columns: usize, threshold: f64) -> Result<Self, Error> {
        Self::with_factor(num_rows, num_columns, threshold, DEFAULT_FACTOR)
    }

    /// Creates a core with an explicit decay factor.
    ///
    /// Returns [`ErrorKind::ConfigInvalid`](crate::error::ErrorKind) if a
    /// dimension is zero, `threshold` is not positive, or `factor` lies
    /// outside (0, 1].
    pub fn with_factor(
        num_rows: usize,
        num_columns: usize,
        threshold: f64,
        factor: f64,
    ) -> Result<Self, Error> {
        Self::with_seed(num_rows, num_columns, threshold, factor, DEFAULT_SEED)
    }

    /// Creates a core whose hash parameters are drawn from `seed`.
    pub fn with_seed(
        num_rows: usize,
        num_columns: usize,
        threshold: f64,
        factor: f64,
        seed: u64,
    ) -> Result<Self, Error> {
        check_dimensions(num_rows, num_columns)?;
        check_threshold(threshold)?;
        check_factor(factor)?;
        let mut rng = XorShift64::seeded(seed);
        Ok(Self::with_rng(num_rows, num_columns, threshold, factor, &mut rng))
    }

    fn with_rng(
        num_rows: usize,
        num_columns: usize,
        threshold: f64,
        factor: f64,
        rng: &mut dyn RandomSource,
    ) -> Self {
        let num_current_edge = CountMinSketch::new(num_rows, num_columns, rng);
        let num_total_edge = CountMinSketch::with_layout_of(&num_current_edge);
        let score_edge = CountMinSketch::with_layout_of(&num_current_edge);
        let num_current_source = CountMinSketch::new(num_rows, num_columns, rng);
        let num_total_source = CountMinSketch::with_layout_of(&num_current_source);
        let score_source = CountMinSketch::with_layout_of(&num_current_source);
        let num_current_destination = CountMinSketch::new(num_rows, num_columns, rng);
        let num_total_destination = CountMinSketch::with_layout_of(&num_current_destination);
        let score_destination = CountMinSketch::with_layout_of(&num_current_destination);
        Self {
            num_rows,
            num_columns,
            threshold,
            timestamp: 1,
            factor,
            timestamp_reciprocal: 0.0,
            index_edge: vec![0; num_rows],
            index_source: vec![0; num_rows],
            index_destination: vec![0; num_rows],
            num_current_edge,
            num_total_edge,
            score_edge,
            num_current_source,
            num_total_source,
            score_source,
            num_current_destination,
            num_total_destination,
            score_destination,
            should_merge: vec![false; num_rows * num_columns],
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

    /// Returns the tick-boundary decay factor.
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Returns the score threshold separating innocent from suspect cells.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Folds innocent cells of `current` into `total`; suspect cells are
    /// extrapolated by the per-tick rate instead. Runs before the decay.
    fn conditional_merge(
        should_merge: &mut [bool],
        threshold: f64,
        timestamp_reciprocal: f64,
        current: &CountMinSketch,
        total: &mut CountMinSketch,
        score: &CountMinSketch,
    ) {
        for (flag, &cell) in should_merge.iter_mut().zip(score.cells()) {
            *flag = cell < threshold;
        }
        let current = current.cells();
        for (i, cell) in total.cells_mut().iter_mut().enumerate() {
            *cell += if should_merge[i] {
                current[i]
            } else {
                *cell * timestamp_reciprocal
            };
        }
    }

    /// Scores one directed edge at `timestamp`, updating the statistics.
    ///
    /// Returns the maximum surprise across the edge, source, and
    /// destination statistics; the per-cell score sketches retain the
    /// values assigned here until the cells are scored again.
    pub fn observe(&mut self, source: u64, destination: u64, timestamp: u64) -> f64 {
        if timestamp > self.timestamp {
            Self::conditional_merge(
                &mut self.should_merge,
                self.threshold,
                self.timestamp_reciprocal,
                &self.num_current_edge,
                &mut self.num_total_edge,
                &self.score_edge,
            );
            Self::conditional_merge(
                &mut self.should_merge,
                self.threshold,
                self.timestamp_reciprocal,
                &self.num_current_source,
                &mut self.num_total_source,
                &self.score_source,
            );
            Self::conditional_merge(
                &mut self.should_merge,
                self.threshold,
                self.timestamp_reciprocal,
                &self.num_current_destination,
                &mut self.num_total_destination,
                &self.score_destination,
            );
            self.num_current_edge.scale(self.factor);
            self.num_current_source.scale(self.factor);
            self.num_current_destination.scale(self.factor);
            // Rate per tick seen so far; consumed by the NEXT transition.
            self.timestamp_reciprocal = 1.0 / (timestamp - 1) as f64;
            self.timestamp = timestamp;
        }

        self.num_current_edge
            .hash_into(&mut self.index_edge, source, destination);
        self.num_current_edge.add(&self.index_edge, 1.0);
        self.num_current_source
            .hash_into(&mut self.index_source, source, 0);
        self.num_current_source.add(&self.index_source, 1.0);
        self.num_current_destination
            .hash_into(&mut self.index_destination, destination, 0);
        self.num_current_destination.add(&self.index_destination, 1.0);

        let edge_score = self.score_edge.assign(
            &self.index_edge,
            chi_squared_filtered(
                self.num_current_edge.query(&self.index_edge),
                self.num_total_edge.query(&self.index_edge),
                timestamp,
            ),
        );
        let source_score = self.score_source.assign(
            &self.index_source,
            chi_squared_filtered(
                self.num_current_source.query(&self.index_source),
                self.num_total_source.query(&self.index_source),
                timestamp,
            ),
        );
        let destination_score = self.score_destination.assign(
            &self.index_destination,
            chi_squared_filtered(
                self.num_current_destination.query(&self.index_destination),
                self.num_total_destination.query(&self.index_destination),
                timestamp,
            ),
        );
        edge_score.max(source_score).max(destination_score)
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
