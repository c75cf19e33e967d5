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

//! Construction checks and snapshot file IO shared by the scoring cores.

use std::fs;
use std::path::Path;

use crate::error::Error;
use crate::error::ErrorKind;

pub(crate) fn check_dimensions(num_rows: usize, num_columns: usize) -> Result<(), Error> {
    if num_rows == 0 || num_columns == 0 {
        return Err(Error::config("dimensions must be at least 1")
            .with_context("num_rows", num_rows)
            .with_context("num_columns", num_columns));
    }
    Ok(())
}

pub(crate) fn check_factor(factor: f64) -> Result<(), Error> {
    if !factor.is_finite() || factor <= 0.0 || factor > 1.0 {
        return Err(
            Error::config("factor must lie in (0, 1]").with_context("factor", factor)
        );
    }
    Ok(())
}

pub(crate) fn check_threshold(threshold: f64) -> Result<(), Error> {
    if !threshold.is_finite() || threshold <= 0.0 {
        return Err(
            Error::config("threshold must be positive").with_context("threshold", threshold)
        );
    }
    Ok(())
}

pub(crate) fn write_snapshot(path: &Path, bytes: &[u8]) -> Result<(), Error> {
    fs::write(path, bytes).map_err(|err| {
        Error::new(ErrorKind::Io, "failed to write core snapshot")
            .with_context("path", path.display())
            .set_source(err)
    })
}

pub(crate) fn read_snapshot(path: &Path) -> Result<Vec<u8>, Error> {
    fs::read(path).map_err(|err| {
        Error::new(ErrorKind::Io, "failed to read core snapshot")
            .with_context("path", path.display())
            .set_source(err)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_checks() {
        assert!(check_dimensions(1, 1).is_ok());
        assert!(check_dimensions(0, 8).is_err());
        assert!(check_dimensions(2, 0).is_err());
    }

    #[test]
    fn test_factor_bounds() {
        assert!(check_factor(0.5).is_ok());
        assert!(check_factor(1.0).is_ok());
        assert!(check_factor(0.0).is_err());
        assert!(check_factor(1.5).is_err());
        assert!(check_factor(f64::NAN).is_err());
    }

    #[test]
    fn test_threshold_bounds() {
        assert!(check_threshold(1e-6).is_ok());
        assert!(check_threshold(0.0).is_err());
        assert!(check_threshold(-1.0).is_err());
        assert!(check_threshold(f64::INFINITY).is_err());
    }
}
