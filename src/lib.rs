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

//! Sketch-based anomaly scoring for streams of time-stamped directed edges.
//!
//! Each arriving edge `(source, destination, timestamp)` receives a
//! non-negative score measuring how surprising it is against the history
//! accumulated at the same granularity; higher means more anomalous. The
//! scorers run in constant memory and constant time per edge on top of
//! Count-Min sketches with shared hash layouts.
//!
//! Three variants trade sensitivity against robustness:
//!
//! - [`normal::NormalCore`] tracks edge counts only and clears its
//!   current-tick sketch at every tick boundary.
//! - [`relational::RelationalCore`] adds per-source and per-destination
//!   activity and decays the current sketches instead of clearing them.
//! - [`filtering::FilteringCore`] additionally withholds cells whose last
//!   score crossed a threshold from the long-term baseline, extrapolating
//!   their history instead.
//!
//! Edges must arrive in non-decreasing timestamp order, with timestamps
//! starting at 1. Cores serialize to a compact binary form and resume
//! scoring bit-for-bit identically after a round-trip.
//!
//! # Usage
//!
//! ```rust
//! use edgesketch::filtering::FilteringCore;
//!
//! let mut core = FilteringCore::new(2, 1024, 1e3).unwrap();
//!
//! core.observe_str("10.0.0.1", "10.0.0.2", 1);
//! let score = core.observe_str("10.0.0.1", "10.0.0.2", 2);
//! assert!(score.is_finite() && score >= 0.0);
//! ```

mod codec;

pub mod common;
pub mod countmin;
pub mod error;
pub mod filtering;
pub mod hash;
pub mod normal;
pub mod relational;
