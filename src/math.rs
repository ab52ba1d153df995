use statrs::distribution::{ContinuousCDF, Normal};

/// Calculates the base-2 entropy of a label distribution given as per-class counts.
///
/// Classes with a zero count contribute nothing to the sum (by the convention
/// 0 * log2(0) = 0), so the result is always finite and non-negative.
///
/// # Parameters
///
/// * `counts` - Number of samples observed for each class
///
/// # Examples
/// ```rust
/// use croprec::math::entropy_from_counts;
///
/// // A 50/50 two-class split carries exactly one bit of entropy
/// let ent = entropy_from_counts(&[5.0, 5.0]);
/// assert!((ent - 1.0).abs() < 1e-12);
///
/// // A pure subset carries none
/// assert_eq!(entropy_from_counts(&[8.0, 0.0]), 0.0);
/// ```
///
/// # Returns
///
/// * `f64` - Entropy in bits (returns 0.0 when the counts are empty or all zero)
pub fn entropy_from_counts(counts: &[f64]) -> f64 {
    let total: f64 = counts.iter().sum();
    if total <= 0.0 {
        return 0.0;
    }

    let mut entropy = 0.0;
    for &count in counts {
        if count > 0.0 {
            let p = count / total;
            entropy -= p * p.log2();
        }
    }

    entropy
}

/// Computes the number of errors to add to an observed error count to obtain a
/// pessimistic estimate, using the upper confidence bound on the binomial error rate.
///
/// This is the C4.5 error-based pruning estimate: a leaf that misclassifies `e`
/// of its `n` training rows is charged `e + pessimistic_added_errors(n, e, cf)`
/// errors, where the addition is the distance from the observed error rate to
/// the upper limit of its confidence interval at level `cf`. A lower confidence
/// factor widens the interval and therefore penalizes small, specific subtrees
/// more heavily than large aggregated leaves.
///
/// The piecewise cases follow the standard formulation: for `e == 0` the bound
/// is `n * (1 - cf^(1/n))`; for `0 < e < 1` the result interpolates linearly
/// between the `e == 0` and `e == 1` values; when `e + 0.5 >= n` the estimate
/// saturates at `n - e`; otherwise the normal approximation with
/// `z = inverse_cdf(1 - cf)` over the continuity-corrected rate `(e + 0.5) / n`
/// is used. Confidence factors above 0.5 add nothing.
///
/// # Parameters
///
/// - `n` - Number of training rows reaching the node (must be positive)
/// - `e` - Number of those rows the node misclassifies
/// - `cf` - Confidence factor in (0, 1); lower values produce larger additions
///
/// # Returns
///
/// * `f64` - The non-negative number of errors to add to `e`
pub fn pessimistic_added_errors(n: f64, e: f64, cf: f64) -> f64 {
    if n <= 0.0 || cf > 0.5 {
        return 0.0;
    }

    if e < 1.0 {
        let base = n * (1.0 - cf.powf(1.0 / n));
        if e == 0.0 {
            return base;
        }
        return base + e * (pessimistic_added_errors(n, 1.0, cf) - base);
    }

    if e + 0.5 >= n {
        return (n - e).max(0.0);
    }

    let z = Normal::new(0.0, 1.0).unwrap().inverse_cdf(1.0 - cf);
    let f = (e + 0.5) / n;
    let r = (f + z * z / (2.0 * n) + z * (f / n - f * f / n + z * z / (4.0 * n * n)).sqrt())
        / (1.0 + z * z / n);

    (r * n - e).max(0.0)
}
