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

//! Edge and node anomaly scoring with temporal decay.
//!
//! The relational core keeps three statistics: edge counts and the
//! activity of each source and destination node. Instead of clearing the
//! current-tick sketches at a tick boundary, it multiplies them by a decay
//! factor in (0, 1], so a burst spanning consecutive ticks stays salient.
//! The reported score is the maximum across the three statistics.
//!
//! # Usage
//!
//! ```rust
//! use edgesketch::relational::RelationalCore;
//!
//! let mut core = RelationalCore::new(2, 1024).unwrap();
//! assert_eq!(core.observe(1, 2, 1), 0.0);
//! assert!(core.observe(1, 2, 2) > 0.0);
//! ```

pub(crate) mod serialization;

mod core;
pub use self::core::RelationalCore;
pub use self::core::DEFAULT_FACTOR;
