use crate::traits::ColorMetric;

/// Sum of absolute RGB channel differences.
///
/// Coarse but fast and deterministic, and tolerant of small lighting
/// gradients. This is the default metric for both fill modes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManhattanMetric;

impl ColorMetric for ManhattanMetric {
    fn distance(&self, a: [u8; 3], b: [u8; 3]) -> u32 {
        let dr = (a[0] as i32 - b[0] as i32).unsigned_abs();
        let dg = (a[1] as i32 - b[1] as i32).unsigned_abs();
        let db = (a[2] as i32 - b[2] as i32).unsigned_abs();
        dr + dg + db
    }
}

/// Euclidean RGB distance, truncated to an integer. Tighter than Manhattan
/// at the same tolerance.
#[derive(Debug, Clone, Copy, Default)]
pub struct EuclideanMetric;

impl ColorMetric for EuclideanMetric {
    fn distance(&self, a: [u8; 3], b: [u8; 3]) -> u32 {
        let dr = a[0] as f32 - b[0] as f32;
        let dg = a[1] as f32 - b[1] as f32;
        let db = a[2] as f32 - b[2] as f32;
        (dr * dr + dg * dg + db * db).sqrt() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manhattan_sums_channel_differences() {
        let metric = ManhattanMetric;
        assert_eq!(metric.distance([10, 20, 30], [15, 10, 30]), 15);
        assert_eq!(metric.distance([0, 0, 0], [0, 0, 0]), 0);
        assert_eq!(metric.distance([255, 0, 0], [0, 0, 255]), 510);
    }

    #[test]
    fn test_euclidean_never_exceeds_manhattan() {
        let pairs = [
            ([10u8, 20, 30], [200u8, 100, 5]),
            ([0, 0, 0], [255, 255, 255]),
            ([128, 128, 128], [128, 140, 128]),
        ];
        for (a, b) in pairs {
            assert!(EuclideanMetric.distance(a, b) <= ManhattanMetric.distance(a, b));
        }
    }
}
