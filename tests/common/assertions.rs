//! Test assertion helpers
//!
//! Provides utilities for robust test assertions on floating-point
//! percentages and on the artifacts a pass leaves behind.

use std::path::{Path, PathBuf};

/// Assert that two floating-point values are approximately equal
///
/// Use this instead of `assert_eq!` for f64/f32 comparisons to avoid
/// floating-point precision issues.
#[allow(dead_code)]
pub fn assert_approx_eq(actual: f64, expected: f64, epsilon: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff < epsilon,
        "Float values not approximately equal:\n  actual: {}\n  expected: {}\n  diff: {} (epsilon: {})",
        actual, expected, diff, epsilon
    );
}

/// Every file under `root` whose name contains `.min.`, sorted
#[allow(dead_code)]
pub fn artifacts_under(root: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in std::fs::read_dir(&dir).expect("readable test dir") {
            let path = entry.expect("readable entry").path();
            if path.is_dir() {
                pending.push(path);
            } else if path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.contains(".min."))
            {
                found.push(path);
            }
        }
    }
    found.sort();
    found
}

/// Assert that no artifact is left under `root`
#[allow(dead_code)]
pub fn assert_no_artifacts(root: &Path) {
    let left = artifacts_under(root);
    assert!(left.is_empty(), "artifacts left behind: {:?}", left);
}
