//! Size metrics for before/after comparison

use serde::Serialize;

/// Byte counts before and after minification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SizeMetrics {
    /// Size of the source (bytes)
    pub before_bytes: u64,
    /// Size of the artifact (bytes)
    pub after_bytes: u64,
}

impl SizeMetrics {
    /// Metrics for a source and its minified text.
    pub fn of(source: &str, minified: &str) -> Self {
        Self {
            before_bytes: source.len() as u64,
            after_bytes: minified.len() as u64,
        }
    }

    /// Calculate size reduction in bytes
    pub fn reduction_bytes(&self) -> i64 {
        self.before_bytes as i64 - self.after_bytes as i64
    }

    /// Calculate size reduction as percentage
    pub fn reduction_percent(&self) -> f64 {
        if self.before_bytes == 0 {
            return 0.0;
        }
        (self.reduction_bytes() as f64 / self.before_bytes as f64) * 100.0
    }
}

impl std::ops::AddAssign for SizeMetrics {
    fn add_assign(&mut self, other: Self) {
        self.before_bytes += other.before_bytes;
        self.after_bytes += other.after_bytes;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduction() {
        let metrics = SizeMetrics::of("a  =  1 # x\n", "a = 1\n");
        assert_eq!(metrics.before_bytes, 12);
        assert_eq!(metrics.after_bytes, 6);
        assert_eq!(metrics.reduction_bytes(), 6);
        assert!((metrics.reduction_percent() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_source_has_zero_percent() {
        assert_eq!(SizeMetrics::default().reduction_percent(), 0.0);
    }

    #[test]
    fn test_add_assign_sums_both_sides() {
        let mut total = SizeMetrics::default();
        total += SizeMetrics::of("abcd", "ab");
        total += SizeMetrics::of("xyz", "xyz");
        assert_eq!(total.before_bytes, 7);
        assert_eq!(total.after_bytes, 5);
    }
}
