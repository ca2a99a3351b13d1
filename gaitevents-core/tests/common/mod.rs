//! Common test utilities for integration tests
//!
//! This module provides:
//! - A synthetic dual-foot gait generator with known event locations
//! - Assertion helpers for stride tables

#![allow(dead_code)]

pub mod generators;

use gaitevents_core::StrideTable;

/// Every populated index of every stride strictly increases, and strides
/// follow each other without overlap
pub fn assert_well_formed(table: &StrideTable) {
    for stride in table.iter() {
        assert!(
            stride.is_strictly_increasing(),
            "stride out of order: {:?}",
            stride.indices()
        );
        assert_eq!(stride.indices().len(), table.row_count());
    }
    for pair in table.strides().windows(2) {
        assert!(pair[0].last() < pair[1].first(), "strides overlap: {:?}", pair);
    }
}

/// `actual` within `tolerance` samples of `expected`
pub fn assert_near(actual: usize, expected: usize, tolerance: usize) {
    assert!(
        actual.abs_diff(expected) <= tolerance,
        "index {} not within {} of {}",
        actual,
        tolerance,
        expected
    );
}
