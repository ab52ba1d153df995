use crate::error::ModelError;
use ahash::AHashMap;
use ndarray::prelude::*;

/// Names of the agronomic measurements, in column order.
pub const FEATURE_NAMES: [&str; 7] = [
    "N",
    "P",
    "K",
    "temperature",
    "humidity",
    "ph",
    "rainfall",
];

/// Number of feature columns every row must carry.
pub const NUM_FEATURES: usize = FEATURE_NAMES.len();

/// Physically plausible `(min, max)` value range for each feature column.
///
/// Presentation layers should reject out-of-range inputs with
/// [`validate_feature_vector`] before handing a vector to the core.
pub const FEATURE_BOUNDS: [(f64, f64); NUM_FEATURES] = [
    (0.0, 200.0), // N, mg/kg
    (0.0, 150.0), // P, mg/kg
    (0.0, 100.0), // K, mg/kg
    (0.0, 50.0),  // temperature, Celsius
    (0.0, 100.0), // humidity, %
    (0.0, 14.0),  // ph
    (0.0, 500.0), // rainfall, mm
];

/// Checks that a feature vector has the expected arity and that every value is
/// finite and inside its plausible physical range.
///
/// # Parameters
///
/// * `features` - Candidate feature vector in [`FEATURE_NAMES`] column order
///
/// # Returns
///
/// - `Ok(())` - If the vector is acceptable
/// - `Err(ModelError::DataError)` - If the arity is wrong or any value is non-finite or out of range
///
/// # Examples
/// ```rust
/// use croprec::dataset::validate_feature_vector;
///
/// assert!(validate_feature_vector(&[90.0, 42.0, 43.0, 21.0, 82.0, 6.5, 203.0]).is_ok());
/// assert!(validate_feature_vector(&[90.0, 42.0, 43.0, 21.0, 82.0, 15.2, 203.0]).is_err());
/// ```
pub fn validate_feature_vector(features: &[f64]) -> Result<(), ModelError> {
    if features.len() != NUM_FEATURES {
        return Err(ModelError::DataError(format!(
            "Feature vector has {} values, expected {}",
            features.len(),
            NUM_FEATURES
        )));
    }

    for (i, &value) in features.iter().enumerate() {
        if !value.is_finite() {
            return Err(ModelError::DataError(format!(
                "Feature '{}' is not a finite number",
                FEATURE_NAMES[i]
            )));
        }
        let (min, max) = FEATURE_BOUNDS[i];
        if value < min || value > max {
            return Err(ModelError::DataError(format!(
                "Feature '{}' value {} is outside the valid range [{}-{}]",
                FEATURE_NAMES[i], value, min, max
            )));
        }
    }

    Ok(())
}

/// An immutable table of agronomic measurements with one categorical crop label per row.
///
/// The feature matrix holds one sample per row and exactly [`NUM_FEATURES`]
/// columns. Labels are interned into a vocabulary in first-seen order, so every
/// row stores a stable integer class code and all subsets derived from the same
/// dataset agree on the code assignment. Subsets (folds, train/test splits) are
/// plain `&[usize]` index slices over the backing arrays, never copies.
///
/// # Fields
///
/// - `features` - Feature matrix with shape (n_rows, [`NUM_FEATURES`])
/// - `labels` - Class code of each row, indexing into the vocabulary
/// - `vocabulary` - Distinct label strings in first-seen order
///
/// # Example
/// ```rust
/// use croprec::dataset::Dataset;
/// use ndarray::array;
///
/// let features = array![
///     [90.0, 42.0, 43.0, 21.0, 82.0, 6.5, 203.0],
///     [85.0, 58.0, 41.0, 22.0, 80.0, 7.0, 227.0],
///     [60.0, 55.0, 44.0, 23.0, 63.0, 5.7, 88.0],
/// ];
/// let dataset = Dataset::new(features, &["rice", "rice", "maize"]).unwrap();
///
/// assert_eq!(dataset.n_rows(), 3);
/// assert_eq!(dataset.get_vocabulary(), &["rice".to_string(), "maize".to_string()]);
/// assert_eq!(dataset.label_code(2), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Dataset {
    features: Array2<f64>,
    labels: Vec<usize>,
    vocabulary: Vec<String>,
}

impl Dataset {
    /// Creates a dataset from a feature matrix and one raw label string per row.
    ///
    /// Labels are deduplicated into the vocabulary in first-seen order and each
    /// row is assigned the matching class code.
    ///
    /// # Parameters
    ///
    /// - `features` - Feature matrix with shape (n_rows, [`NUM_FEATURES`])
    /// - `labels` - Raw label of each row; length must equal the number of rows
    ///
    /// # Returns
    ///
    /// - `Ok(Dataset)` - If the inputs are consistent
    /// - `Err(ModelError::DataError)` - If the dataset is empty, the feature arity is wrong, the label count does not match, or any feature value is NaN or infinite
    pub fn new<S: AsRef<str>>(features: Array2<f64>, labels: &[S]) -> Result<Self, ModelError> {
        if features.nrows() == 0 {
            return Err(ModelError::DataError("dataset is empty".to_string()));
        }

        if features.ncols() != NUM_FEATURES {
            return Err(ModelError::DataError(format!(
                "Rows have {} feature columns, expected {}",
                features.ncols(),
                NUM_FEATURES
            )));
        }

        if labels.len() != features.nrows() {
            return Err(ModelError::DataError(format!(
                "Feature matrix has {} rows but {} labels were provided",
                features.nrows(),
                labels.len()
            )));
        }

        for (i, row) in features.outer_iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                if !value.is_finite() {
                    return Err(ModelError::DataError(format!(
                        "Feature value at row {} column {} is NaN or infinite",
                        i, j
                    )));
                }
            }
        }

        // Intern label strings into stable class codes, first-seen order
        let mut codes: AHashMap<&str, usize> = AHashMap::with_capacity(16);
        let mut vocabulary = Vec::new();
        let mut encoded = Vec::with_capacity(labels.len());
        for label in labels {
            let label = label.as_ref();
            let code = *codes.entry(label).or_insert_with(|| {
                vocabulary.push(label.to_string());
                vocabulary.len() - 1
            });
            encoded.push(code);
        }

        Ok(Self {
            features,
            labels: encoded,
            vocabulary,
        })
    }

    get_field_as_ref!(get_vocabulary, vocabulary, &[String]);

    /// Gets the number of rows in the dataset.
    pub fn n_rows(&self) -> usize {
        self.features.nrows()
    }

    /// Gets the number of feature columns (always [`NUM_FEATURES`]).
    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    /// Gets the number of distinct classes in the label vocabulary.
    pub fn n_classes(&self) -> usize {
        self.vocabulary.len()
    }

    /// Gets the class code of a row.
    pub fn label_code(&self, row: usize) -> usize {
        self.labels[row]
    }

    /// Gets a single feature value.
    pub fn feature(&self, row: usize, column: usize) -> f64 {
        self.features[[row, column]]
    }

    /// Gets the feature vector of a row as a view into the backing matrix.
    pub fn row(&self, row: usize) -> ArrayView1<'_, f64> {
        self.features.row(row)
    }

    /// Returns the index of every row, the subset representing the whole dataset.
    pub fn all_indices(&self) -> Vec<usize> {
        (0..self.n_rows()).collect()
    }

    /// Counts how many rows of a subset belong to each class.
    ///
    /// # Parameters
    ///
    /// * `indices` - Row-index subset to count over
    ///
    /// # Returns
    ///
    /// * `Vec<f64>` - Per-class counts, length equal to the vocabulary size
    pub fn class_counts(&self, indices: &[usize]) -> Vec<f64> {
        let mut counts = vec![0.0; self.n_classes()];
        for &row in indices {
            counts[self.labels[row]] += 1.0;
        }
        counts
    }
}
