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

//! Anomaly score functions shared by the scoring cores.
//!
//! Both functions compare the current-tick estimate `current` against the
//! cumulative estimate `total` at tick `timestamp` and return a chi-squared
//! style surprise statistic. They differ in which ticks the totals cover:
//! the plain form expects totals that include the current tick, the
//! filtered form expects totals fed only at tick transitions.

/// Surprise of `current` against the per-tick mean of `total`.
///
/// Returns 0 when no history exists (`total == 0`) or when everything seen
/// so far belongs to the first tick (`timestamp == 1`).
pub(crate) fn chi_squared(current: f64, total: f64, timestamp: u64) -> f64 {
    let t = timestamp as f64;
    if total == 0.0 || t <= 1.0 {
        return 0.0;
    }
    let deviation = (current - total / t) * t;
    deviation * deviation / (total * (t - 1.0))
}

/// Variant used by the filtering core, whose totals are fed only at tick
/// transitions and therefore exclude the current tick's mass.
///
/// `timestamp == 1` implies `total == 0` under that feeding rule; the extra
/// guard keeps the function total over loaded state.
pub(crate) fn chi_squared_filtered(current: f64, total: f64, timestamp: u64) -> f64 {
    let t = timestamp as f64;
    if total == 0.0 || t <= 1.0 {
        return 0.0;
    }
    let deviation = current + total - current * t;
    deviation * deviation / (total * (t - 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_without_history() {
        assert_eq!(chi_squared(5.0, 0.0, 3), 0.0);
        assert_eq!(chi_squared_filtered(5.0, 0.0, 3), 0.0);
    }

    #[test]
    fn test_zero_on_first_tick() {
        assert_eq!(chi_squared(7.0, 7.0, 1), 0.0);
        assert_eq!(chi_squared_filtered(7.0, 7.0, 1), 0.0);
    }

    #[test]
    fn test_burst_value() {
        // current 10 of total 11 at tick 2: ((10 - 11/2) * 2)^2 / (11 * 1).
        let score = chi_squared(10.0, 11.0, 2);
        assert!((score - 81.0 / 11.0).abs() < 1e-12);
    }

    #[test]
    fn test_filtered_form_differs_from_plain_form() {
        // The filtered form expects total/(t-1) per tick, not total/t.
        let plain = chi_squared(1.5, 1.0, 2);
        let filtered = chi_squared_filtered(1.5, 1.0, 2);
        assert!((plain - 4.0).abs() < 1e-12);
        assert!((filtered - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_uniform_stream_scores_zero() {
        // One observation per tick, totals growing in lockstep.
        for t in 2..10u64 {
            assert_eq!(chi_squared(1.0, t as f64, t), 0.0);
        }
    }
}
