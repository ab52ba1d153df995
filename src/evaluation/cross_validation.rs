use crate::dataset::Dataset;
use crate::error::ModelError;
use crate::evaluation::metrics::{ConfusionCounts, FoldMetrics};
use crate::tree::{TreeBuilder, TreeParams};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// The outcome of a k-fold cross-validation run.
///
/// # Fields
///
/// - `fold_metrics` - One [`FoldMetrics`] per fold, in fold order
/// - `aggregate` - Arithmetic mean of each metric across all folds
#[derive(Debug, Clone, PartialEq)]
pub struct CrossValidationReport {
    pub fold_metrics: Vec<FoldMetrics>,
    pub aggregate: FoldMetrics,
}

/// Produces the deterministic pseudo-random permutation of `0..n` used to
/// shuffle rows before folding.
///
/// The permutation depends only on `seed`, so the same seed yields an
/// identical row ordering on every run and platform.
pub fn permuted_indices(n: usize, seed: u64) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);
    indices
}

/// Splits a permuted index sequence into `k` contiguous folds.
///
/// Fold sizes differ by at most one row; the first `n % k` folds take the
/// extra row. No stratification by class is applied. The returned slices
/// partition the input: together they cover every index exactly once.
///
/// # Parameters
///
/// - `indices` - Permuted row indices
/// - `k` - Number of folds; must be between 1 and `indices.len()`
pub fn fold_partitions(indices: &[usize], k: usize) -> Vec<&[usize]> {
    let n = indices.len();
    let base = n / k;
    let extra = n % k;

    let mut folds = Vec::with_capacity(k);
    let mut start = 0;
    for fold in 0..k {
        let len = base + usize::from(fold < extra);
        folds.push(&indices[start..start + len]);
        start += len;
    }
    folds
}

/// Evaluates tree induction with stratification-free k-fold cross-validation.
///
/// Row indices are permuted with the seeded generator, partitioned into `k`
/// near-equal contiguous folds, and each fold in turn serves as the test set
/// for a tree trained on the union of the others. Every test row is classified
/// and accumulated into a per-fold confusion matrix, from which accuracy and
/// weighted precision/recall are derived; the aggregate is the per-metric mean
/// over folds. A failure in any fold aborts the whole call, since the
/// aggregate assumes exactly `k` contributing folds.
///
/// # Parameters
///
/// - `dataset` - Data to evaluate on
/// - `k` - Number of folds; at least 2 and at most the number of rows
/// - `seed` - Seed of the shuffling permutation; equal seeds give bit-identical reports
/// - `params` - Tree hyperparameters used for every fold
///
/// # Returns
///
/// - `Ok(CrossValidationReport)` - Per-fold and aggregate metrics
/// - `Err(ModelError::ConfigurationError)` - If `k` or the hyperparameters are out of range
///
/// # Example
/// ```rust
/// use croprec::dataset::Dataset;
/// use croprec::evaluation::cross_validate;
/// use croprec::tree::TreeParams;
/// use ndarray::Array2;
///
/// let mut rows = Vec::new();
/// let mut labels = Vec::new();
/// for i in 0..10 {
///     rows.extend_from_slice(&[85.0 + i as f64, 50.0, 40.0, 22.0, 81.0, 6.5, 210.0 + i as f64]);
///     labels.push("rice");
///     rows.extend_from_slice(&[65.0 + i as f64, 55.0, 20.0, 24.0, 62.0, 6.2, 80.0 + i as f64]);
///     labels.push("maize");
/// }
/// let features = Array2::from_shape_vec((20, 7), rows).unwrap();
/// let dataset = Dataset::new(features, &labels).unwrap();
///
/// let report = cross_validate(&dataset, 5, 1, &TreeParams::default()).unwrap();
/// assert_eq!(report.fold_metrics.len(), 5);
/// ```
pub fn cross_validate(
    dataset: &Dataset,
    k: usize,
    seed: u64,
    params: &TreeParams,
) -> Result<CrossValidationReport, ModelError> {
    params.validate()?;

    if k < 2 {
        return Err(ModelError::ConfigurationError(format!(
            "cross-validation requires at least 2 folds, got {}",
            k
        )));
    }

    if k > dataset.n_rows() {
        return Err(ModelError::ConfigurationError(format!(
            "cannot split {} rows into {} folds",
            dataset.n_rows(),
            k
        )));
    }

    let permuted = permuted_indices(dataset.n_rows(), seed);
    let folds = fold_partitions(&permuted, k);
    let builder = TreeBuilder::new(dataset, *params);

    let mut fold_metrics = Vec::with_capacity(k);
    for fold in 0..k {
        let test = folds[fold];
        let train: Vec<usize> = folds
            .iter()
            .enumerate()
            .filter(|&(other, _)| other != fold)
            .flat_map(|(_, slice)| slice.iter().copied())
            .collect();

        let tree = builder.build(&train)?;

        let mut counts = ConfusionCounts::new(dataset.n_classes());
        for &row in test {
            let predicted = tree.classify_view(dataset.row(row));
            counts.record(dataset.label_code(row), predicted);
        }
        fold_metrics.push(counts.fold_metrics());
    }

    let k_f = k as f64;
    let aggregate = FoldMetrics {
        accuracy: fold_metrics.iter().map(|m| m.accuracy).sum::<f64>() / k_f,
        weighted_precision: fold_metrics
            .iter()
            .map(|m| m.weighted_precision)
            .sum::<f64>()
            / k_f,
        weighted_recall: fold_metrics.iter().map(|m| m.weighted_recall).sum::<f64>() / k_f,
    };

    Ok(CrossValidationReport {
        fold_metrics,
        aggregate,
    })
}
