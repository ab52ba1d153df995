use crate::dataset::Dataset;
use crate::math::entropy_from_counts;

/// The best binary split found for a row subset.
///
/// # Fields
///
/// - `feature_index` - Column the split tests
/// - `threshold` - Midpoint threshold; rows with values `<=` it go left, `>` goes right
/// - `information_gain` - Parent entropy minus the weighted entropy of the two partitions, in bits
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitCandidate {
    pub feature_index: usize,
    pub threshold: f64,
    pub information_gain: f64,
}

/// Finds the best threshold split of a row subset on a single feature.
///
/// Rows are sorted by the feature value and every midpoint between consecutive
/// distinct values is evaluated. The candidate with the highest information
/// gain wins; among equal gains the lowest threshold is kept, because the sweep
/// runs in ascending value order and only a strictly greater gain replaces the
/// incumbent.
///
/// # Parameters
///
/// - `dataset` - Backing dataset
/// - `indices` - Row subset to split
/// - `feature_index` - Feature column to evaluate
///
/// # Returns
///
/// * `Option<(f64, f64)>` - The `(threshold, information_gain)` of the best
///   candidate, or `None` when all subset values of the feature are identical
pub fn best_split_for_feature(
    dataset: &Dataset,
    indices: &[usize],
    feature_index: usize,
) -> Option<(f64, f64)> {
    let n = indices.len();
    if n < 2 {
        return None;
    }

    let mut order: Vec<usize> = indices.to_vec();
    order.sort_by(|&a, &b| {
        dataset
            .feature(a, feature_index)
            .partial_cmp(&dataset.feature(b, feature_index))
            .unwrap()
    });

    let parent_counts = dataset.class_counts(indices);
    let parent_entropy = entropy_from_counts(&parent_counts);
    let total = n as f64;

    // Sweep rows from the right partition into the left one, evaluating each
    // boundary between distinct values as a candidate threshold.
    let mut left_counts = vec![0.0; parent_counts.len()];
    let mut right_counts = parent_counts;
    let mut best: Option<(f64, f64)> = None;

    for i in 0..n - 1 {
        let class = dataset.label_code(order[i]);
        left_counts[class] += 1.0;
        right_counts[class] -= 1.0;

        let value = dataset.feature(order[i], feature_index);
        let next_value = dataset.feature(order[i + 1], feature_index);
        if next_value <= value {
            continue;
        }

        let threshold = (value + next_value) / 2.0;
        let n_left = (i + 1) as f64;
        let n_right = total - n_left;
        let weighted = (n_left / total) * entropy_from_counts(&left_counts)
            + (n_right / total) * entropy_from_counts(&right_counts);
        let gain = parent_entropy - weighted;

        if best.is_none_or(|(_, best_gain)| gain > best_gain) {
            best = Some((threshold, gain));
        }
    }

    best
}

/// Finds the globally best split of a row subset across all features.
///
/// Features are scanned in ascending index order and only a strictly greater
/// gain replaces the incumbent, so ties resolve to the lowest feature index
/// and, within a feature, the lowest threshold. This makes induction fully
/// deterministic for a given dataset and subset.
///
/// # Parameters
///
/// - `dataset` - Backing dataset
/// - `indices` - Row subset to split
///
/// # Returns
///
/// * `Option<SplitCandidate>` - The winning split, or `None` when no feature
///   admits a valid split (every feature is constant over the subset)
pub fn best_split(dataset: &Dataset, indices: &[usize]) -> Option<SplitCandidate> {
    let mut best: Option<SplitCandidate> = None;

    for feature_index in 0..dataset.n_features() {
        if let Some((threshold, information_gain)) =
            best_split_for_feature(dataset, indices, feature_index)
        {
            if best.is_none_or(|b| information_gain > b.information_gain) {
                best = Some(SplitCandidate {
                    feature_index,
                    threshold,
                    information_gain,
                });
            }
        }
    }

    best
}
