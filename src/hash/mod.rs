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

//! Stable hashing of textual identifiers.
//!
//! Streams often name endpoints with strings (hostnames, account ids). The
//! scoring cores consume `u64` keys, so string identifiers are folded with
//! djb2 over their UTF-8 bytes. The result is stable across processes and
//! platforms, which keeps persisted cores meaningful for restreamed input.

/// Folds a string identifier into the unsigned key domain using djb2.
///
/// # Examples
///
/// ```rust
/// use edgesketch::hash::djb2;
///
/// assert_eq!(djb2(""), 5381);
/// assert_eq!(djb2("a"), djb2("a"));
/// ```
pub fn djb2(key: &str) -> u64 {
    let mut hash: u64 = 5381;
    for byte in key.bytes() {
        hash = hash.wrapping_mul(33).wrapping_add(u64::from(byte));
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        assert_eq!(djb2(""), 5381);
        assert_eq!(djb2("a"), 177670);
        assert_eq!(djb2("ab"), 5863208);
        assert_eq!(djb2("abc"), 193485963);
    }

    #[test]
    fn test_deterministic_across_calls() {
        let first = djb2("10.0.0.1");
        for _ in 0..8 {
            assert_eq!(djb2("10.0.0.1"), first);
        }
    }

    #[test]
    fn test_order_sensitive() {
        assert_ne!(djb2("ab"), djb2("ba"));
    }
}
