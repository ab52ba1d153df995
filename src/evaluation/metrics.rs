use ndarray::prelude::*;

/// Quality metrics of one evaluated fold, or the mean over all folds.
///
/// # Fields
///
/// - `accuracy` - Correctly classified share of the test rows, as a percentage
/// - `weighted_precision` - Per-class precision weighted by each class's share of the test rows; classes whose precision is undefined (no predicted instances) are left out of the sum
/// - `weighted_recall` - Per-class recall weighted the same way; classes with no actual instances are left out
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoldMetrics {
    pub accuracy: f64,
    pub weighted_precision: f64,
    pub weighted_recall: f64,
}

/// A multi-class confusion matrix accumulated over true/predicted class pairs.
///
/// Rows index the actual class, columns the predicted class. Precision and
/// recall of a class are `None` when their denominator is zero, matching the
/// convention that undefined metrics are excluded from weighted averages
/// rather than treated as 0.
///
/// # Example
/// ```rust
/// use croprec::evaluation::ConfusionCounts;
///
/// let mut counts = ConfusionCounts::new(2);
/// counts.record(0, 0);
/// counts.record(0, 1);
/// counts.record(1, 1);
/// counts.record(1, 1);
///
/// assert_eq!(counts.total(), 4.0);
/// assert_eq!(counts.accuracy(), 75.0);
/// assert_eq!(counts.precision(0), Some(1.0));
/// assert_eq!(counts.recall(0), Some(0.5));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConfusionCounts {
    matrix: Array2<f64>,
}

impl ConfusionCounts {
    /// Creates an empty confusion matrix over `n_classes` classes.
    pub fn new(n_classes: usize) -> Self {
        Self {
            matrix: Array2::zeros((n_classes, n_classes)),
        }
    }

    /// Records one classified test row.
    ///
    /// # Parameters
    ///
    /// - `actual` - True class code of the row
    /// - `predicted` - Class code the model assigned
    pub fn record(&mut self, actual: usize, predicted: usize) {
        self.matrix[[actual, predicted]] += 1.0;
    }

    /// Gets the number of classes the matrix covers.
    pub fn n_classes(&self) -> usize {
        self.matrix.nrows()
    }

    /// Total number of recorded rows.
    pub fn total(&self) -> f64 {
        self.matrix.sum()
    }

    /// Number of correctly classified rows (the matrix diagonal).
    pub fn correct(&self) -> f64 {
        self.matrix.diag().sum()
    }

    /// Number of rows whose actual class is `class`.
    pub fn actual_count(&self, class: usize) -> f64 {
        self.matrix.row(class).sum()
    }

    /// Number of rows the model assigned to `class`.
    pub fn predicted_count(&self, class: usize) -> f64 {
        self.matrix.column(class).sum()
    }

    /// Accuracy as a percentage of recorded rows.
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0.0 {
            return 0.0;
        }
        self.correct() / total * 100.0
    }

    /// Precision of a class: true positives over predicted positives.
    ///
    /// # Returns
    ///
    /// * `Option<f64>` - `None` when the model never predicted the class
    pub fn precision(&self, class: usize) -> Option<f64> {
        let predicted = self.predicted_count(class);
        if predicted == 0.0 {
            return None;
        }
        Some(self.matrix[[class, class]] / predicted)
    }

    /// Recall of a class: true positives over actual positives.
    ///
    /// # Returns
    ///
    /// * `Option<f64>` - `None` when the class never occurs in the test rows
    pub fn recall(&self, class: usize) -> Option<f64> {
        let actual = self.actual_count(class);
        if actual == 0.0 {
            return None;
        }
        Some(self.matrix[[class, class]] / actual)
    }

    /// Derives the fold metrics from the accumulated counts.
    ///
    /// Weighted precision and recall sum each defined per-class metric scaled
    /// by the class's share of the recorded rows; undefined metrics are
    /// skipped.
    pub fn fold_metrics(&self) -> FoldMetrics {
        let total = self.total();
        let mut weighted_precision = 0.0;
        let mut weighted_recall = 0.0;

        if total > 0.0 {
            for class in 0..self.n_classes() {
                let weight = self.actual_count(class) / total;
                if let Some(precision) = self.precision(class) {
                    weighted_precision += weight * precision;
                }
                if let Some(recall) = self.recall(class) {
                    weighted_recall += weight * recall;
                }
            }
        }

        FoldMetrics {
            accuracy: self.accuracy(),
            weighted_precision,
            weighted_recall,
        }
    }
}
