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

use edgesketch::error::ErrorKind;
use edgesketch::hash::djb2;
use edgesketch::normal::NormalCore;
use googletest::assert_that;
use googletest::prelude::near;

const NUMERIC_NOISE_TOLERANCE: f64 = 1e-9;

#[test]
fn test_cold_start_scores_zero() {
    let mut core = NormalCore::new(2, 8).unwrap();
    assert_eq!(core.observe(1, 2, 1), 0.0);
}

#[test]
fn test_first_tick_always_scores_zero() {
    let mut core = NormalCore::new(2, 8).unwrap();
    for _ in 0..5 {
        assert_eq!(core.observe(1, 2, 1), 0.0);
    }
}

#[test]
fn test_bursty_second_tick_score() {
    let mut core = NormalCore::new(2, 8).unwrap();
    core.observe(1, 2, 1);
    let mut score = 0.0;
    for _ in 0..10 {
        score = core.observe(1, 2, 2);
    }
    // current 10, total 11, t 2: ((10 - 11/2) * 2)^2 / (11 * 1) = 81/11.
    assert_that!(score, near(81.0 / 11.0, NUMERIC_NOISE_TOLERANCE));
}

#[test]
fn test_repeat_of_tick_rate_scores_zero() {
    let mut core = NormalCore::new(2, 8).unwrap();
    core.observe(1, 2, 1);
    // One occurrence per tick matches the historical mean exactly.
    let score = core.observe(1, 2, 2);
    assert_that!(score, near(0.0, NUMERIC_NOISE_TOLERANCE));
}

#[test]
fn test_scores_are_nonnegative_and_finite() {
    let mut core = NormalCore::new(2, 32).unwrap();
    let mut timestamp = 1;
    for i in 0..500u64 {
        if i % 7 == 0 {
            timestamp += 1;
        }
        let score = core.observe(i % 13, i % 5, timestamp);
        assert!(score.is_finite());
        assert!(score >= 0.0);
    }
}

#[test]
fn test_string_observe_matches_integer_observe() {
    let mut by_name = NormalCore::new(2, 64).unwrap();
    let mut by_key = NormalCore::new(2, 64).unwrap();
    let edges = [("alice", "bob"), ("alice", "carol"), ("bob", "alice")];
    for (tick, (source, destination)) in edges.iter().enumerate() {
        let timestamp = tick as u64 + 1;
        let named = by_name.observe_str(source, destination, timestamp);
        let keyed = by_key.observe(djb2(source), djb2(destination), timestamp);
        assert_eq!(named, keyed);
    }
}

#[test]
fn test_out_of_order_timestamp_is_accepted_without_rollback() {
    let mut core = NormalCore::new(2, 8).unwrap();
    core.observe(1, 2, 1);
    let ahead = core.observe(1, 2, 3);
    assert_that!(ahead, near(0.25, NUMERIC_NOISE_TOLERANCE));
    assert_eq!(core.timestamp(), 3);

    // The late edge still counts and is scored at its own timestamp.
    let late = core.observe(1, 2, 2);
    assert_that!(late, near(1.0 / 3.0, NUMERIC_NOISE_TOLERANCE));
    assert_eq!(core.timestamp(), 3);
}

#[test]
fn test_same_seed_cores_score_identically() {
    let mut left = NormalCore::with_seed(2, 16, 77).unwrap();
    let mut right = NormalCore::with_seed(2, 16, 77).unwrap();
    let mut timestamp = 1;
    for i in 0..100u64 {
        if i % 9 == 0 {
            timestamp += 1;
        }
        assert_eq!(
            left.observe(i % 6, i % 11, timestamp),
            right.observe(i % 6, i % 11, timestamp)
        );
    }
}

#[test]
fn test_zero_dimensions_are_rejected() {
    let err = NormalCore::new(0, 8).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    let err = NormalCore::new(2, 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
}

#[test]
fn test_shape_accessors() {
    let core = NormalCore::new(3, 16).unwrap();
    assert_eq!(core.num_rows(), 3);
    assert_eq!(core.num_columns(), 16);
    assert_eq!(core.timestamp(), 1);
}
