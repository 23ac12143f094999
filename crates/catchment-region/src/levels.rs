//! Level bucketing
//!
//! Groups pixel indices by intensity into ascending buckets. Within a
//! bucket pixels keep raster (row-major) order, which fixes the order in
//! which the level-ordered engines mask and seed the frontier.

use std::ops::Range;

/// Largest `max_level` partitioned with a counting sort; above this the
/// bucketing falls back to a stable sort of pixel indices.
pub const COUNTING_SORT_LIMIT: i32 = 65_535;

/// Pixel indices grouped by intensity, lowest level first
#[derive(Debug, Clone)]
pub struct LevelBuckets {
    /// Pixel indices sorted by (intensity, raster index)
    order: Vec<usize>,
    /// Non-empty levels with their span in `order`
    levels: Vec<(i32, Range<usize>)>,
}

impl LevelBuckets {
    /// Partition `values` (validated non-negative) into level buckets.
    pub fn new(values: &[i32]) -> Self {
        let max_level = values.iter().copied().max().unwrap_or(0);
        let order = if max_level <= COUNTING_SORT_LIMIT {
            counting_order(values, max_level as usize)
        } else {
            let mut order: Vec<usize> = (0..values.len()).collect();
            // Stable, so equal intensities keep raster order
            order.sort_by_key(|&i| values[i]);
            order
        };

        let mut levels = Vec::new();
        let mut start = 0;
        while start < order.len() {
            let level = values[order[start]];
            let mut end = start + 1;
            while end < order.len() && values[order[end]] == level {
                end += 1;
            }
            levels.push((level, start..end));
            start = end;
        }

        Self { order, levels }
    }

    /// Number of non-empty levels
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// True when there are no pixels at all
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Highest non-empty level
    pub fn max_level(&self) -> Option<i32> {
        self.levels.last().map(|(l, _)| *l)
    }

    /// Iterate `(level, pixels)` in ascending level order
    pub fn iter(&self) -> impl Iterator<Item = (i32, &[usize])> + '_ {
        self.levels
            .iter()
            .map(|(level, span)| (*level, &self.order[span.clone()]))
    }
}

/// Counting sort of pixel indices into `max_level + 1` buckets.
fn counting_order(values: &[i32], max_level: usize) -> Vec<usize> {
    let mut starts = vec![0usize; max_level + 2];
    for &v in values {
        starts[v as usize + 1] += 1;
    }
    for l in 1..starts.len() {
        starts[l] += starts[l - 1];
    }

    let mut order = vec![0usize; values.len()];
    for (i, &v) in values.iter().enumerate() {
        let slot = &mut starts[v as usize];
        order[*slot] = i;
        *slot += 1;
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buckets_ascending_raster_order() {
        // 2x3 grid
        let values = [2, 0, 2, 1, 0, 2];
        let buckets = LevelBuckets::new(&values);
        let levels: Vec<(i32, Vec<usize>)> =
            buckets.iter().map(|(l, p)| (l, p.to_vec())).collect();
        assert_eq!(
            levels,
            vec![(0, vec![1, 4]), (1, vec![3]), (2, vec![0, 2, 5])]
        );
        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets.max_level(), Some(2));
    }

    #[test]
    fn test_empty_levels_are_skipped() {
        let values = [7, 0, 7];
        let buckets = LevelBuckets::new(&values);
        let levels: Vec<i32> = buckets.iter().map(|(l, _)| l).collect();
        assert_eq!(levels, vec![0, 7]);
    }

    #[test]
    fn test_large_range_matches_counting_sort() {
        let values = [COUNTING_SORT_LIMIT + 10, 3, 3, i32::MAX, 0];
        let buckets = LevelBuckets::new(&values);
        let levels: Vec<(i32, Vec<usize>)> =
            buckets.iter().map(|(l, p)| (l, p.to_vec())).collect();
        assert_eq!(
            levels,
            vec![
                (0, vec![4]),
                (3, vec![1, 2]),
                (COUNTING_SORT_LIMIT + 10, vec![0]),
                (i32::MAX, vec![3]),
            ]
        );
    }

    #[test]
    fn test_flat_values_single_bucket() {
        let values = [5; 9];
        let buckets = LevelBuckets::new(&values);
        assert_eq!(buckets.len(), 1);
        let (level, pixels) = buckets.iter().next().unwrap();
        assert_eq!(level, 5);
        assert_eq!(pixels, &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
    }
}
