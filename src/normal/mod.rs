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

//! Edge-count anomaly scoring.
//!
//! The normal core tracks one statistic per edge: how often it occurred in
//! the current tick versus over the whole stream. The current-tick sketch
//! is cleared at every tick boundary.
//!
//! # Usage
//!
//! ```rust
//! use edgesketch::normal::NormalCore;
//!
//! let mut core = NormalCore::new(2, 1024).unwrap();
//! assert_eq!(core.observe(1, 2, 1), 0.0);
//!
//! // A burst of the same edge in a later tick scores high.
//! let mut score = 0.0;
//! for _ in 0..10 {
//!     score = core.observe(1, 2, 2);
//! }
//! assert!(score > 1.0);
//! ```

pub(crate) mod serialization;

mod core;
pub use self::core::NormalCore;
