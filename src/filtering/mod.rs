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

//! Anomaly scoring with score-gated history.
//!
//! The filtering core separates "learning" from "counting": within a tick
//! only the current sketches grow, and at the next tick boundary each cell
//! is folded into the long-term totals only if its latest score stayed
//! below the threshold. Cells that looked anomalous instead have their
//! totals extrapolated by the observed per-tick rate, so an attack does
//! not poison the baseline it is being measured against.
//!
//! # Usage
//!
//! ```rust
//! use edgesketch::filtering::FilteringCore;
//!
//! let mut core = FilteringCore::new(2, 1024, 1e3).unwrap();
//! assert_eq!(core.observe(1, 2, 1), 0.0);
//! assert!(core.observe(1, 2, 2) >= 0.0);
//! ```

pub(crate) mod serialization;

mod core;
pub use self::core::FilteringCore;
pub use self::core::DEFAULT_FACTOR;
