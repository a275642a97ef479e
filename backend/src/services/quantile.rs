//! Equal-frequency (quantile) bucketing.
//!
//! Cut points are the linearly interpolated sample quantiles at `k/N`,
//! buckets are right-closed and the lowest edge is included. Assignment is
//! done on sorted ranks with integer arithmetic so identical input always
//! yields identical codes, and tied values always share a bucket.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Bucket codes for every input value plus the interpolated cut points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantileBins {
    /// `N + 1` ascending edges, empty when there is no data.
    pub edges: Vec<f64>,
    /// Bucket index per input value, in input order.
    pub codes: Vec<usize>,
}

/// Partition `values` into `buckets` equal-frequency groups.
///
/// Never fails: with no values, one value or zero buckets every code is 0.
pub fn qcut(values: &[f64], buckets: usize) -> QuantileBins {
    let m = values.len();
    if m == 0 || buckets == 0 {
        return QuantileBins {
            edges: Vec::new(),
            codes: vec![0; m],
        };
    }

    let mut order: Vec<usize> = (0..m).collect();
    order.sort_by(|&a, &b| compare(values[a], values[b]).then(a.cmp(&b)));
    let sorted: Vec<f64> = order.iter().map(|&i| values[i]).collect();

    let mut codes = vec![0; m];
    let mut group_start = 0;
    for (rank, &index) in order.iter().enumerate() {
        if rank > 0 && compare(sorted[rank], sorted[rank - 1]) != Ordering::Equal {
            group_start = rank;
        }
        codes[index] = bucket_for_rank(group_start, m, buckets);
    }

    let edges = (0..=buckets)
        .map(|k| interpolate(&sorted, k as f64 * (m - 1) as f64 / buckets as f64))
        .collect();

    QuantileBins { edges, codes }
}

/// Smallest bucket `j` whose upper cut position `(j + 1)(m - 1)/n` reaches
/// `rank`, the first sorted position of a value's tie group.
fn bucket_for_rank(rank: usize, m: usize, buckets: usize) -> usize {
    if m <= 1 {
        return 0;
    }
    let denom = m - 1;
    let ceil = (rank * buckets + denom - 1) / denom;
    ceil.saturating_sub(1).min(buckets - 1)
}

fn interpolate(sorted: &[f64], position: f64) -> f64 {
    let lo = position.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    let frac = position - lo as f64;
    if frac == 0.0 {
        sorted[lo]
    } else {
        sorted[lo] + (sorted[hi] - sorted[lo]) * frac
    }
}

fn compare(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seven_values_three_buckets() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        let bins = qcut(&values, 3);

        assert_eq!(bins.codes, vec![0, 0, 0, 1, 1, 2, 2]);
        assert_eq!(bins.edges, vec![1.0, 3.0, 5.0, 7.0]);
    }

    #[test]
    fn test_codes_follow_input_order() {
        let values = [7.0, 1.0, 4.0, 2.0];
        let bins = qcut(&values, 2);

        assert_eq!(bins.codes, vec![1, 0, 1, 0]);
    }

    #[test]
    fn test_interpolated_edges() {
        let values = [0.0, 10.0, 20.0, 30.0, 40.0, 50.0];
        let bins = qcut(&values, 4);

        assert_eq!(bins.edges, vec![0.0, 12.5, 25.0, 37.5, 50.0]);
        assert_eq!(bins.codes, vec![0, 0, 1, 2, 3, 3]);
    }

    #[test]
    fn test_ties_share_a_bucket() {
        let values = [1.0, 1.0, 1.0, 1.0, 2.0, 3.0];
        let bins = qcut(&values, 3);

        assert!(bins.codes[..4].iter().all(|&c| c == 0));
    }

    #[test]
    fn test_constant_column_is_single_bucket() {
        let bins = qcut(&[5.0; 10], 6);
        assert!(bins.codes.iter().all(|&c| c == 0));
        assert_eq!(bins.edges, vec![5.0; 7]);
    }

    #[test]
    fn test_empty_input() {
        let bins = qcut(&[], 6);
        assert!(bins.codes.is_empty());
        assert!(bins.edges.is_empty());
    }

    #[test]
    fn test_single_value() {
        let bins = qcut(&[3.0], 11);
        assert_eq!(bins.codes, vec![0]);
    }

    #[test]
    fn test_zero_buckets() {
        let bins = qcut(&[1.0, 2.0], 0);
        assert_eq!(bins.codes, vec![0, 0]);
    }

    #[test]
    fn test_top_value_lands_in_last_bucket() {
        let values: Vec<f64> = (0..100).map(|i| i as f64).collect();
        let bins = qcut(&values, 11);
        assert_eq!(bins.codes[99], 10);
        assert_eq!(bins.codes[0], 0);
    }
}
