use super::*;
use approx::assert_abs_diff_eq;

#[test]
fn test_fit_and_recommend() {
    let dataset = crop_dataset();
    let recommender = CropRecommender::fit(&dataset, TreeParams::default()).unwrap();

    let result = recommender
        .recommend(&[85.0, 45.0, 40.0, 22.0, 81.0, 6.5, 210.0])
        .unwrap();
    assert_eq!(result.label, "rice");
    assert_abs_diff_eq!(result.confidence, 1.0, epsilon = 1e-9);
    assert_eq!(result.distribution.len(), 3);
    assert_abs_diff_eq!(result.distribution.iter().sum::<f64>(), 1.0, epsilon = 1e-9);

    let result = recommender
        .recommend(&[45.0, 65.0, 75.0, 18.0, 17.0, 7.2, 75.0])
        .unwrap();
    assert_eq!(result.label, "chickpea");
}

#[test]
fn test_confidence_matches_distribution_entry() {
    let dataset = crop_dataset();
    let recommender = CropRecommender::fit(&dataset, TreeParams::default()).unwrap();

    let result = recommender
        .recommend(&[65.0, 50.0, 20.0, 24.0, 63.0, 6.0, 85.0])
        .unwrap();
    let code = recommender
        .get_vocabulary()
        .iter()
        .position(|label| *label == result.label)
        .unwrap();
    assert_eq!(result.confidence, result.distribution[code]);
}

#[test]
fn test_vocabulary_travels_with_the_model() {
    let dataset = crop_dataset();
    let recommender = CropRecommender::fit(&dataset, TreeParams::default()).unwrap();

    assert_eq!(recommender.get_vocabulary(), dataset.get_vocabulary());
    assert_eq!(recommender.get_tree().get_n_classes(), 3);
}

#[test]
fn test_mismatched_vocabulary_is_rejected() {
    let dataset = crop_dataset();
    let tree = train_final_model(&dataset, TreeParams::default()).unwrap();

    let err = CropRecommender::new(tree, vec!["rice".to_string()]).unwrap_err();
    assert!(matches!(err, ModelError::ConfigurationError(_)));
}

#[test]
fn test_recommend_rejects_wrong_arity() {
    let dataset = crop_dataset();
    let recommender = CropRecommender::fit(&dataset, TreeParams::default()).unwrap();

    assert!(matches!(
        recommender.recommend(&[1.0, 2.0, 3.0]),
        Err(ModelError::DataError(_))
    ));
}
