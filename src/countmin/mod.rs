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

//! Count-Min sketch with real-valued cells for the scoring cores.
//!
//! Unlike a classic integer Count-Min sketch, cells are `f64` so that tick
//! decay can scale them fractionally. Keys are one or two `u64`s; hashing
//! produces flat per-row offsets that callers precompute once and reuse
//! across the sketches of one core.
//!
//! # Usage
//!
//! ```rust
//! use edgesketch::common::XorShift64;
//! use edgesketch::countmin::CountMinSketch;
//!
//! let mut rng = XorShift64::seeded(42);
//! let mut sketch = CountMinSketch::new(4, 512, &mut rng);
//!
//! let mut index = vec![0usize; 4];
//! sketch.hash_into(&mut index, 7, 13);
//! sketch.add(&index, 1.0);
//!
//! assert!(sketch.query(&index) >= 1.0);
//! ```

pub(crate) mod serialization;

mod sketch;
pub use self::sketch::CountMinSketch;
