use proptest::prelude::*;

use mvmapper::services::qcut;

fn distinct_values() -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::hash_set(-100_000i32..100_000, 11..300)
        .prop_map(|set| set.into_iter().map(|v| v as f64 / 10.0).collect())
}

proptest! {
    #[test]
    fn bucket_sizes_differ_by_at_most_one(values in distinct_values(), buckets in 1usize..=11) {
        let bins = qcut(&values, buckets);
        let mut sizes = vec![0usize; buckets];
        for &code in &bins.codes {
            sizes[code] += 1;
        }

        let max = *sizes.iter().max().unwrap();
        let min = *sizes.iter().min().unwrap();
        prop_assert!(max - min <= 1, "sizes {:?}", sizes);
        prop_assert_eq!(sizes.iter().sum::<usize>(), values.len());
    }

    #[test]
    fn codes_are_monotone_in_value(values in proptest::collection::vec(-50i32..50, 1..200), buckets in 1usize..=11) {
        let values: Vec<f64> = values.into_iter().map(f64::from).collect();
        let bins = qcut(&values, buckets);

        for i in 0..values.len() {
            prop_assert!(bins.codes[i] < buckets);
            for j in 0..values.len() {
                if values[i] < values[j] {
                    prop_assert!(bins.codes[i] <= bins.codes[j]);
                }
                if values[i] == values[j] {
                    prop_assert_eq!(bins.codes[i], bins.codes[j]);
                }
            }
        }
    }

    #[test]
    fn edges_are_ascending_and_span_data(values in distinct_values(), buckets in 1usize..=11) {
        let bins = qcut(&values, buckets);
        prop_assert_eq!(bins.edges.len(), buckets + 1);
        for pair in bins.edges.windows(2) {
            prop_assert!(pair[0] <= pair[1]);
        }
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        prop_assert_eq!(bins.edges[0], min);
        prop_assert_eq!(bins.edges[buckets], max);
    }

    #[test]
    fn bucketing_is_deterministic(values in proptest::collection::vec(-1.0e6f64..1.0e6, 0..200)) {
        prop_assert_eq!(qcut(&values, 6), qcut(&values, 6));
    }
}

#[test]
fn empty_and_single_value_inputs() {
    let bins = qcut(&[], 6);
    assert!(bins.codes.is_empty());

    let bins = qcut(&[3.5], 6);
    assert_eq!(bins.codes, vec![0]);

    let bins = qcut(&[2.0; 10], 11);
    assert!(bins.codes.iter().all(|&c| c == 0));
}
