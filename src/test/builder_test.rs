use super::*;
use approx::assert_abs_diff_eq;

#[test]
fn test_separable_data_builds_a_single_split() {
    let dataset = separable_dataset();
    let tree = train_final_model(&dataset, TreeParams::default()).unwrap();

    assert_eq!(tree.n_internal_nodes(), 1);
    assert_eq!(tree.n_leaves(), 2);
    assert_eq!(tree.depth(), 1);

    match tree.get_root() {
        Node::Internal {
            feature_index,
            threshold,
            left,
            right,
        } => {
            assert_eq!(*feature_index, 0);
            assert_abs_diff_eq!(*threshold, 5.0, epsilon = 1e-12);
            assert!(matches!(**left, Node::Leaf { class: 0, .. }));
            assert!(matches!(**right, Node::Leaf { class: 1, .. }));
        }
        Node::Leaf { .. } => panic!("expected an internal root"),
    }

    // Both leaves are pure, so classification is fully confident
    let a = [3.0, 50.0, 40.0, 20.0, 65.0, 6.5, 100.0];
    let b = [7.0, 50.0, 40.0, 20.0, 65.0, 6.5, 100.0];
    assert_eq!(tree.classify(&a).unwrap(), 0);
    assert_eq!(tree.classify(&b).unwrap(), 1);
    assert_abs_diff_eq!(tree.distribution(&a).unwrap()[0], 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(tree.distribution(&b).unwrap()[1], 1.0, epsilon = 1e-12);
}

#[test]
fn test_single_class_dataset_builds_one_leaf() {
    let features = Array2::from_shape_fn((8, NUM_FEATURES), |(i, j)| (i * 7 + j) as f64);
    let labels = vec!["rice"; 8];

    for params in [
        TreeParams::default(),
        TreeParams {
            confidence_factor: 0.1,
            min_instances_per_leaf: 1,
        },
        TreeParams {
            confidence_factor: 0.9,
            min_instances_per_leaf: 5,
        },
    ] {
        let dataset = Dataset::new(features.clone(), &labels).unwrap();
        let tree = train_final_model(&dataset, params).unwrap();

        assert_eq!(tree.n_leaves(), 1);
        assert_eq!(tree.n_internal_nodes(), 0);
        assert_eq!(tree.get_root(), &Node::Leaf {
            class: 0,
            distribution: vec![1.0],
        });
    }
}

#[test]
fn test_every_leaf_holds_at_least_min_instances() {
    let dataset = crop_dataset();
    let params = TreeParams {
        confidence_factor: 0.25,
        min_instances_per_leaf: 3,
    };
    let tree = train_final_model(&dataset, params).unwrap();

    // Route every training row to its leaf and count arrivals
    let graph = tree.graph();
    let mut arrivals = vec![0usize; graph.len()];
    for row in 0..dataset.n_rows() {
        arrivals[graph_leaf_id(&graph, dataset.row(row))] += 1;
    }

    for node in &graph {
        if node.class.is_some() {
            assert!(
                arrivals[node.id] >= params.min_instances_per_leaf,
                "leaf {} holds only {} rows",
                node.id,
                arrivals[node.id]
            );
        }
    }
}

#[test]
fn test_leaf_distributions_sum_to_one() {
    let dataset = crop_dataset();
    let tree = train_final_model(&dataset, TreeParams::default()).unwrap();

    fn walk(node: &Node) {
        match node {
            Node::Leaf { distribution, .. } => {
                assert!(distribution.iter().all(|&p| p >= 0.0));
                let sum: f64 = distribution.iter().sum();
                assert!((sum - 1.0).abs() < 1e-9);
            }
            Node::Internal { left, right, .. } => {
                walk(left);
                walk(right);
            }
        }
    }
    walk(tree.get_root());
}

#[test]
fn test_empty_subset_is_an_invariant_violation() {
    let dataset = separable_dataset();
    let builder = TreeBuilder::new(&dataset, TreeParams::default());

    assert!(matches!(
        builder.build(&[]),
        Err(ModelError::InvariantViolation(_))
    ));
}

#[test]
fn test_invalid_params_are_rejected_before_building() {
    let dataset = separable_dataset();

    for confidence_factor in [0.0, 1.0, -0.2, 1.7] {
        let params = TreeParams {
            confidence_factor,
            min_instances_per_leaf: 2,
        };
        assert!(matches!(
            train_final_model(&dataset, params),
            Err(ModelError::ConfigurationError(_))
        ));
    }

    let params = TreeParams {
        confidence_factor: 0.25,
        min_instances_per_leaf: 0,
    };
    assert!(matches!(
        train_final_model(&dataset, params),
        Err(ModelError::ConfigurationError(_))
    ));
}

/// Two noisy clusters on feature 0: a few mislabeled rows force extra splits
/// that stricter pruning should collapse.
fn noisy_dataset() -> Dataset {
    let mut rows = Vec::new();
    let mut labels = Vec::new();
    for i in 0..20 {
        rows.extend_from_slice(&[i as f64, 50.0, 40.0, 20.0, 65.0, 6.5, 100.0]);
        labels.push(if i < 10 { "A" } else { "B" });
    }
    // Noise rows inside each cluster
    for &(value, label) in &[(2.5, "B"), (5.5, "B"), (13.5, "A"), (16.5, "A")] {
        rows.extend_from_slice(&[value, 50.0, 40.0, 20.0, 65.0, 6.5, 100.0]);
        labels.push(label);
    }
    Dataset::new(Array2::from_shape_vec((24, 7), rows).unwrap(), &labels).unwrap()
}

#[test]
fn test_lower_confidence_factor_never_grows_the_tree() {
    let dataset = noisy_dataset();

    let mut previous = usize::MAX;
    for confidence_factor in [0.45, 0.25, 0.05] {
        let params = TreeParams {
            confidence_factor,
            min_instances_per_leaf: 1,
        };
        let tree = train_final_model(&dataset, params).unwrap();
        let internal = tree.n_internal_nodes();

        assert!(
            internal <= previous,
            "cf {} grew the tree to {} internal nodes",
            confidence_factor,
            internal
        );
        previous = internal;
    }
}

#[test]
fn test_pruning_collapses_an_uninformative_split() {
    // One stray label in 12 rows: isolating it survives growth with a leaf
    // minimum of 1 but cannot justify itself under pessimistic pruning.
    let mut rows = Vec::new();
    let mut labels = Vec::new();
    for i in 0..12 {
        rows.extend_from_slice(&[i as f64, 50.0, 40.0, 20.0, 65.0, 6.5, 100.0]);
        labels.push(if i == 5 { "B" } else { "A" });
    }
    let dataset = Dataset::new(Array2::from_shape_vec((12, 7), rows).unwrap(), &labels).unwrap();

    let strict = TreeParams {
        confidence_factor: 0.01,
        min_instances_per_leaf: 1,
    };
    let tree = train_final_model(&dataset, strict).unwrap();

    assert_eq!(tree.n_internal_nodes(), 0);
    let distribution = tree
        .distribution(&[5.0, 50.0, 40.0, 20.0, 65.0, 6.5, 100.0])
        .unwrap();
    assert_abs_diff_eq!(distribution[0], 11.0 / 12.0, epsilon = 1e-12);
}
