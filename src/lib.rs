pub use error::ModelError;

/// A macro that generates a getter method for any field.
///
/// This macro creates a public getter method that returns the value
/// of the specified field. The generated method includes appropriate documentation
/// describing the field being accessed.
///
/// # Parameters
///
/// - `$method_name` - The name of the getter method (e.g., get_params)
/// - `$field_name` - The name of the field to access (e.g., params)
/// - `$return_type` - The return type of the getter method
macro_rules! get_field {
    ($method_name:ident, $field_name:ident, $return_type:ty) => {
        #[doc = concat!("Gets the `", stringify!($field_name), "` field.\n\n")]
        #[doc = "# Returns\n\n"]
        #[doc = concat!("* `", stringify!($return_type), "` - The value of the `", stringify!($field_name), "` field")]
        pub fn $method_name(&self) -> $return_type {
            self.$field_name
        }
    };
}

/// A macro that generates a public getter method returning a reference to a field.
///
/// This macro creates a method that provides immutable reference access to a private field
/// in a struct, following the Rust convention of getter methods.
///
/// # Parameters
///
/// - `$method_name` - The identifier for the generated getter method name
/// - `$field_name` - The identifier of the struct field to access
/// - `$return_type` - The type expression for the return value (typically a reference type like `&Type`)
macro_rules! get_field_as_ref {
    ($method_name:ident, $field_name:ident, $return_type:ty) => {
        #[doc = concat!("Gets the `", stringify!($field_name), "` field.\n\n")]
        #[doc = "# Returns\n\n"]
        #[doc = concat!("* `", stringify!($return_type), "` - The value of the `", stringify!($field_name), "` field as a reference")]
        pub fn $method_name(&self) -> $return_type {
            self.$field_name.as_ref()
        }
    };
}

/// Module `dataset` holds the immutable typed table the whole engine works on.
///
/// A [`dataset::Dataset`] pairs a numeric feature matrix (one row per soil
/// sample, columns named by [`dataset::FEATURE_NAMES`]) with a categorical
/// crop label per row. Label strings are interned into a stable vocabulary in
/// first-seen order, so class codes agree across every subset derived from the
/// same dataset. Folds and train/test splits are index slices over the backing
/// arrays rather than copies.
///
/// The module also carries the physical plausibility bounds of each feature
/// ([`dataset::FEATURE_BOUNDS`]) and [`dataset::validate_feature_vector`] for
/// presentation layers that need to range-police user input before querying
/// the core.
///
/// # Example
/// ```rust
/// use croprec::dataset::Dataset;
/// use ndarray::array;
///
/// let features = array![
///     [90.0, 42.0, 43.0, 21.0, 82.0, 6.5, 203.0],
///     [60.0, 55.0, 44.0, 23.0, 63.0, 5.7, 88.0],
/// ];
/// let dataset = Dataset::new(features, &["rice", "maize"]).unwrap();
/// assert_eq!(dataset.n_classes(), 2);
/// ```
pub mod dataset;

/// Module `error` defines the crate-wide error type.
pub mod error;

/// Module `evaluation` measures model quality with k-fold cross-validation.
///
/// [`evaluation::cross_validate`] shuffles the dataset with a seeded
/// generator, partitions it into near-equal contiguous folds, trains one tree
/// per fold on the remaining rows, and reports per-fold and aggregate
/// accuracy plus instance-weighted precision and recall derived from a
/// multi-class [`evaluation::ConfusionCounts`]. Equal seeds give bit-identical
/// reports.
///
/// # Example
/// ```rust
/// use croprec::prelude::*;
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
/// let dataset = Dataset::new(Array2::from_shape_vec((20, 7), rows).unwrap(), &labels).unwrap();
///
/// let report = cross_validate(&dataset, 5, 1, &TreeParams::default()).unwrap();
/// assert_eq!(report.fold_metrics.len(), 5);
/// ```
pub mod evaluation;

/// Module `math` contains the statistical primitives behind induction and pruning.
///
/// # Core Functions
///
/// - `entropy_from_counts` - Base-2 entropy of a label distribution, the impurity measure behind information-gain splitting
/// - `pessimistic_added_errors` - Upper confidence bound on a node's binomial error rate, the C4.5 error-based pruning estimate
pub mod math;

/// A convenience module that re-exports the most commonly used types and
/// functions of the crate, enabling quick access with a single `use` statement.
pub mod prelude;

/// Module `recommend` turns a trained tree into a crop recommendation service.
///
/// A [`recommend::CropRecommender`] couples a production tree (trained on the
/// full dataset) with the label vocabulary and answers feature-vector queries
/// with a [`recommend::Recommendation`]: the crop label, the confidence the
/// leaf assigns to it, and the full class-probability distribution.
pub mod recommend;

/// Module `tree` implements decision-tree induction, pruning, and inference.
///
/// # Components
///
/// - [`tree::split`] - Best binary-threshold search: sorts a row subset by a feature, evaluates every midpoint between distinct values, and picks the candidate with maximal information gain under deterministic tie-breaking (lowest feature index, then lowest threshold)
/// - [`tree::builder`] - Recursive growth with the stopping rules (subset too small, label-pure, no valid split, undersized partition) followed by a post-order pessimistic-error pruning pass controlled by the confidence factor
/// - [`tree::model`] - The immutable [`tree::DecisionTree`]: single and parallel batch classification, class-probability distributions, structural introspection, ASCII rendering, and a flat graph export for external visualizers
///
/// # Example
/// ```rust
/// use croprec::prelude::*;
/// use ndarray::array;
///
/// let features = array![
///     [90.0, 42.0, 43.0, 21.0, 82.0, 6.5, 203.0],
///     [85.0, 58.0, 41.0, 22.0, 80.0, 7.0, 227.0],
///     [80.0, 48.0, 40.0, 23.0, 83.0, 6.8, 251.0],
///     [60.0, 55.0, 44.0, 23.0, 63.0, 5.7, 88.0],
///     [71.0, 54.0, 16.0, 22.0, 63.0, 6.3, 84.0],
///     [78.0, 42.0, 42.0, 20.0, 62.0, 6.9, 80.0],
/// ];
/// let labels = ["rice", "rice", "rice", "maize", "maize", "maize"];
/// let dataset = Dataset::new(features, &labels).unwrap();
///
/// let tree = train_final_model(&dataset, TreeParams::default()).unwrap();
/// assert_eq!(tree.get_n_classes(), 2);
/// ```
pub mod tree;
