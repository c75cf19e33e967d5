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

use edgesketch::common::XorShift64;
use edgesketch::countmin::CountMinSketch;
use edgesketch::error::ErrorKind;
use googletest::assert_that;
use googletest::prelude::contains_substring;

const NUM_ROWS: usize = 4;
const NUM_COLUMNS: usize = 64;

fn sketch_with_seed(seed: u64) -> CountMinSketch {
    let mut rng = XorShift64::seeded(seed);
    CountMinSketch::new(NUM_ROWS, NUM_COLUMNS, &mut rng)
}

#[test]
fn test_shape_accessors() {
    let sketch = sketch_with_seed(1);
    assert_eq!(sketch.num_rows(), NUM_ROWS);
    assert_eq!(sketch.num_columns(), NUM_COLUMNS);
    assert_eq!(sketch.num_cells(), NUM_ROWS * NUM_COLUMNS);
}

#[test]
#[should_panic(expected = "num_rows must be at least 1")]
fn test_zero_rows_panics() {
    let mut rng = XorShift64::seeded(1);
    CountMinSketch::new(0, 8, &mut rng);
}

#[test]
#[should_panic(expected = "num_columns must be at least 1")]
fn test_zero_columns_panics() {
    let mut rng = XorShift64::seeded(1);
    CountMinSketch::new(2, 0, &mut rng);
}

#[test]
fn test_hash_offsets_stay_in_row_ranges() {
    let sketch = sketch_with_seed(7);
    let mut index = vec![0usize; NUM_ROWS];
    for key in 0..1000u64 {
        sketch.hash_into(&mut index, key, key.wrapping_mul(31));
        for (row, &offset) in index.iter().enumerate() {
            assert!(offset >= row * NUM_COLUMNS);
            assert!(offset < (row + 1) * NUM_COLUMNS);
        }
    }
}

#[test]
fn test_hash_is_deterministic() {
    let sketch = sketch_with_seed(7);
    let mut first = vec![0usize; NUM_ROWS];
    let mut second = vec![0usize; NUM_ROWS];
    sketch.hash_into(&mut first, 42, 99);
    sketch.hash_into(&mut second, 42, 99);
    assert_eq!(first, second);
}

#[test]
fn test_layout_sharing_hashes_identically() {
    let original = sketch_with_seed(11);
    let copy = CountMinSketch::with_layout_of(&original);
    let mut index_original = vec![0usize; NUM_ROWS];
    let mut index_copy = vec![0usize; NUM_ROWS];
    for key in 0..256u64 {
        original.hash_into(&mut index_original, key, key + 1);
        copy.hash_into(&mut index_copy, key, key + 1);
        assert_eq!(index_original, index_copy);
    }
}

#[test]
fn test_query_never_underestimates() {
    let mut sketch = sketch_with_seed(3);
    let mut index = vec![0usize; NUM_ROWS];
    // Key k occurs k % 7 + 1 times.
    for key in 0..100u64 {
        let count = key % 7 + 1;
        sketch.hash_into(&mut index, key, 0);
        for _ in 0..count {
            sketch.add(&index, 1.0);
        }
    }
    for key in 0..100u64 {
        let count = (key % 7 + 1) as f64;
        sketch.hash_into(&mut index, key, 0);
        assert!(sketch.query(&index) >= count);
    }
}

#[test]
fn test_assign_overwrites_referenced_cells() {
    let mut sketch = sketch_with_seed(5);
    let mut index = vec![0usize; NUM_ROWS];
    sketch.hash_into(&mut index, 17, 23);
    sketch.add(&index, 4.0);
    let assigned = sketch.assign(&index, 0.25);
    assert_eq!(assigned, 0.25);
    assert_eq!(sketch.query(&index), 0.25);
}

#[test]
fn test_fill_and_scale() {
    let mut sketch = sketch_with_seed(9);
    let mut index = vec![0usize; NUM_ROWS];
    sketch.hash_into(&mut index, 8, 0);
    sketch.add(&index, 6.0);
    sketch.scale(0.5);
    assert_eq!(sketch.query(&index), 3.0);
    sketch.fill(0.0);
    assert_eq!(sketch.query(&index), 0.0);
}

#[test]
fn test_serialize_round_trip_is_bit_exact() {
    let mut sketch = sketch_with_seed(13);
    let mut index = vec![0usize; NUM_ROWS];
    for key in 0..50u64 {
        sketch.hash_into(&mut index, key, key);
        sketch.add(&index, 1.0);
    }
    sketch.scale(0.3);

    let bytes = sketch.serialize();
    let decoded = CountMinSketch::deserialize(&bytes).unwrap();
    assert_eq!(decoded.serialize(), bytes);

    let mut decoded_index = vec![0usize; NUM_ROWS];
    for key in 0..50u64 {
        sketch.hash_into(&mut index, key, key);
        decoded.hash_into(&mut decoded_index, key, key);
        assert_eq!(index, decoded_index);
        assert_eq!(decoded.query(&decoded_index), sketch.query(&index));
    }
}

#[test]
fn test_deserialize_rejects_truncated_input() {
    let sketch = sketch_with_seed(13);
    let bytes = sketch.serialize();
    let err = CountMinSketch::deserialize(&bytes[..bytes.len() - 4]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedDeserializeData);
}

#[test]
fn test_deserialize_rejects_wrong_version() {
    let sketch = sketch_with_seed(13);
    let mut bytes = sketch.serialize();
    bytes[0] = 99;
    let err = CountMinSketch::deserialize(&bytes).unwrap_err();
    assert_that!(err.message(), contains_substring("unsupported serial version"));
}

#[test]
fn test_deserialize_rejects_empty_input() {
    let err = CountMinSketch::deserialize(&[]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedDeserializeData);
}

#[test]
fn test_dump_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sketch.bin");

    let mut sketch = sketch_with_seed(21);
    let mut index = vec![0usize; NUM_ROWS];
    sketch.hash_into(&mut index, 5, 6);
    sketch.add(&index, 2.0);

    sketch.dump(&path).unwrap();
    let loaded = CountMinSketch::load(&path).unwrap();
    assert_eq!(loaded.serialize(), sketch.serialize());
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = CountMinSketch::load(dir.path().join("absent.bin")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}
