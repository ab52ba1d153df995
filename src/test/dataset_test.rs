use super::*;

#[test]
fn test_vocabulary_first_seen_order() {
    let dataset = crop_dataset();

    assert_eq!(dataset.n_rows(), 30);
    assert_eq!(dataset.n_features(), NUM_FEATURES);
    assert_eq!(dataset.n_classes(), 3);
    assert_eq!(
        dataset.get_vocabulary(),
        &[
            "rice".to_string(),
            "maize".to_string(),
            "chickpea".to_string()
        ]
    );

    // Codes follow first-seen order and stay consistent per row
    assert_eq!(dataset.label_code(0), 0);
    assert_eq!(dataset.label_code(10), 1);
    assert_eq!(dataset.label_code(29), 2);
}

#[test]
fn test_repeated_labels_share_codes() {
    let features = array![
        [90.0, 42.0, 43.0, 21.0, 82.0, 6.5, 203.0],
        [60.0, 55.0, 44.0, 23.0, 63.0, 5.7, 88.0],
        [91.0, 44.0, 42.0, 20.0, 81.0, 6.4, 210.0],
    ];
    let dataset = Dataset::new(features, &["rice", "maize", "rice"]).unwrap();

    assert_eq!(dataset.n_classes(), 2);
    assert_eq!(dataset.label_code(0), dataset.label_code(2));
}

#[test]
fn test_empty_dataset_rejected() {
    let features = Array2::<f64>::zeros((0, NUM_FEATURES));
    let labels: [&str; 0] = [];

    let err = Dataset::new(features, &labels).unwrap_err();
    assert_eq!(err, ModelError::DataError("dataset is empty".to_string()));
}

#[test]
fn test_wrong_arity_rejected() {
    let features = array![[1.0, 2.0, 3.0]];
    assert!(matches!(
        Dataset::new(features, &["rice"]),
        Err(ModelError::DataError(_))
    ));
}

#[test]
fn test_label_count_mismatch_rejected() {
    let features = Array2::<f64>::zeros((3, NUM_FEATURES));
    assert!(matches!(
        Dataset::new(features, &["rice", "maize"]),
        Err(ModelError::DataError(_))
    ));
}

#[test]
fn test_non_finite_feature_rejected() {
    let mut features = Array2::<f64>::zeros((2, NUM_FEATURES));
    features[[1, 3]] = f64::NAN;
    assert!(matches!(
        Dataset::new(features, &["rice", "maize"]),
        Err(ModelError::DataError(_))
    ));
}

#[test]
fn test_class_counts_over_subset() {
    let dataset = crop_dataset();

    assert_eq!(dataset.class_counts(&dataset.all_indices()), vec![
        10.0, 10.0, 10.0
    ]);
    // First two rice rows plus one chickpea row
    assert_eq!(dataset.class_counts(&[0, 1, 25]), vec![2.0, 0.0, 1.0]);
    assert_eq!(dataset.class_counts(&[]), vec![0.0, 0.0, 0.0]);
}

#[test]
fn test_validate_feature_vector() {
    assert!(validate_feature_vector(&[90.0, 42.0, 43.0, 21.0, 82.0, 6.5, 203.0]).is_ok());

    // Boundary values are accepted
    assert!(validate_feature_vector(&[0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]).is_ok());
    assert!(validate_feature_vector(&[200.0, 150.0, 100.0, 50.0, 100.0, 14.0, 500.0]).is_ok());

    // Out-of-range pH
    assert!(matches!(
        validate_feature_vector(&[90.0, 42.0, 43.0, 21.0, 82.0, 15.2, 203.0]),
        Err(ModelError::DataError(_))
    ));
    // Negative nitrogen
    assert!(matches!(
        validate_feature_vector(&[-1.0, 42.0, 43.0, 21.0, 82.0, 6.5, 203.0]),
        Err(ModelError::DataError(_))
    ));
    // Wrong arity
    assert!(matches!(
        validate_feature_vector(&[90.0, 42.0]),
        Err(ModelError::DataError(_))
    ));
    // NaN
    assert!(matches!(
        validate_feature_vector(&[f64::NAN, 42.0, 43.0, 21.0, 82.0, 6.5, 203.0]),
        Err(ModelError::DataError(_))
    ));
}
