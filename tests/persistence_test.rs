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
use edgesketch::filtering::FilteringCore;
use edgesketch::normal::NormalCore;
use edgesketch::relational::RelationalCore;
use googletest::assert_that;
use googletest::prelude::contains_substring;

fn warmup_stream() -> Vec<(u64, u64, u64)> {
    let mut stream = Vec::new();
    for i in 0..10u64 {
        stream.push((i % 4, i % 3 + 10, i / 3 + 1));
    }
    stream
}

fn continuation_stream() -> Vec<(u64, u64, u64)> {
    let mut stream = Vec::new();
    for i in 0..10u64 {
        stream.push((i % 5, i % 2 + 10, i / 2 + 4));
    }
    stream
}

#[test]
fn test_normal_round_trip_continues_identically() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("normal.bin");

    let mut original = NormalCore::new(2, 32).unwrap();
    for (source, destination, timestamp) in warmup_stream() {
        original.observe(source, destination, timestamp);
    }
    original.dump(&path).unwrap();
    let mut reloaded = NormalCore::load(&path).unwrap();

    for (source, destination, timestamp) in continuation_stream() {
        assert_eq!(
            original.observe(source, destination, timestamp),
            reloaded.observe(source, destination, timestamp)
        );
    }
}

#[test]
fn test_relational_round_trip_continues_identically() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("relational.bin");

    let mut original = RelationalCore::with_factor(2, 32, 0.8).unwrap();
    for (source, destination, timestamp) in warmup_stream() {
        original.observe(source, destination, timestamp);
    }
    original.dump(&path).unwrap();
    let mut reloaded = RelationalCore::load(&path).unwrap();
    assert_eq!(reloaded.factor(), 0.8);
    assert_eq!(reloaded.timestamp(), original.timestamp());

    for (source, destination, timestamp) in continuation_stream() {
        assert_eq!(
            original.observe(source, destination, timestamp),
            reloaded.observe(source, destination, timestamp)
        );
    }
}

#[test]
fn test_filtering_round_trip_continues_identically() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("filtering.bin");

    let mut original = FilteringCore::new(2, 32, 0.5).unwrap();
    for (source, destination, timestamp) in warmup_stream() {
        original.observe(source, destination, timestamp);
    }
    original.dump(&path).unwrap();
    let mut reloaded = FilteringCore::load(&path).unwrap();
    assert_eq!(reloaded.threshold(), 0.5);

    for (source, destination, timestamp) in continuation_stream() {
        assert_eq!(
            original.observe(source, destination, timestamp),
            reloaded.observe(source, destination, timestamp)
        );
    }
}

#[test]
fn test_serialized_bytes_round_trip_bit_exact() {
    let mut normal = NormalCore::new(2, 16).unwrap();
    let mut relational = RelationalCore::new(2, 16).unwrap();
    let mut filtering = FilteringCore::new(2, 16, 2.0).unwrap();
    for (source, destination, timestamp) in warmup_stream() {
        normal.observe(source, destination, timestamp);
        relational.observe(source, destination, timestamp);
        filtering.observe(source, destination, timestamp);
    }

    let bytes = normal.serialize();
    assert_eq!(NormalCore::deserialize(&bytes).unwrap().serialize(), bytes);
    let bytes = relational.serialize();
    assert_eq!(RelationalCore::deserialize(&bytes).unwrap().serialize(), bytes);
    let bytes = filtering.serialize();
    assert_eq!(FilteringCore::deserialize(&bytes).unwrap().serialize(), bytes);
}

#[test]
fn test_deserialize_rejects_other_core_family() {
    let relational = RelationalCore::new(2, 8).unwrap();
    let err = NormalCore::deserialize(&relational.serialize()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedDeserializeData);
    assert_that!(err.message(), contains_substring("invalid family"));
}

#[test]
fn test_deserialize_rejects_truncated_buffer() {
    let core = FilteringCore::new(2, 8, 1.0).unwrap();
    let bytes = core.serialize();
    let err = FilteringCore::deserialize(&bytes[..bytes.len() - 8]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedDeserializeData);
}

#[test]
fn test_deserialize_rejects_unknown_version() {
    let core = NormalCore::new(2, 8).unwrap();
    let mut bytes = core.serialize();
    bytes[0] = 9;
    let err = NormalCore::deserialize(&bytes).unwrap_err();
    assert_that!(err.message(), contains_substring("unsupported serial version"));
}

#[test]
fn test_deserialize_rejects_corrupt_factor() {
    let core = RelationalCore::new(2, 8).unwrap();
    let mut bytes = core.serialize();
    // The factor f64 sits after version, family, dims, and timestamp.
    let offset = 1 + 1 + 4 + 4 + 8;
    bytes[offset..offset + 8].copy_from_slice(&2.5f64.to_le_bytes());
    let err = RelationalCore::deserialize(&bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedDeserializeData);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = NormalCore::load(dir.path().join("missing.bin")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn test_empty_input_is_rejected() {
    assert!(NormalCore::deserialize(&[]).is_err());
    assert!(RelationalCore::deserialize(&[]).is_err());
    assert!(FilteringCore::deserialize(&[]).is_err());
}
