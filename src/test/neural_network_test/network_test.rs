use super::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Half squared error, whose gradient is exactly `output - target` for an identity output.
fn half_squared_error(network: &Network, input: ArrayView1<f32>, target: ArrayView1<f32>) -> f32 {
    let trace = network.forward(input).unwrap();
    let diff = trace.output() - &target;
    0.5 * diff.dot(&diff)
}

#[test]
fn forward_trace_shape_test() {
    let network = Network::new(&regression_config(vec![3, 5, 4, 2], 1)).unwrap();
    let trace = network.forward(array![0.1, -0.2, 0.3].view()).unwrap();

    assert_eq!(trace.outputs().len(), 4);
    assert_eq!(trace.pre_activations().len(), 3);
    assert_eq!(trace.input(), &array![0.1, -0.2, 0.3]);
    assert_eq!(trace.outputs()[1].len(), 5);
    assert_eq!(trace.outputs()[2].len(), 4);
    assert_eq!(trace.output().len(), 2);

    // hidden layers hold the activation of their pre-activation
    let expected = trace.pre_activations()[0].mapv(f32::tanh);
    for (a, e) in trace.outputs()[1].iter().zip(expected.iter()) {
        assert_abs_diff_eq!(*a, *e);
    }
    // identity output on the final layer of a regression network
    assert_eq!(trace.output(), &trace.pre_activations()[2]);
}

#[test]
fn classification_final_layer_uses_hidden_activation_test() {
    let network = Network::new(&classification_config(vec![2, 3, 3], 4)).unwrap();
    let trace = network.forward(array![0.4, -0.6].view()).unwrap();

    let expected = Activation::Sigmoid.apply(trace.pre_activations()[1].view());
    assert_eq!(trace.output(), &expected);

    // the output function only runs when presenting
    let scores = network.output_scores(array![0.4, -0.6].view()).unwrap();
    assert_abs_diff_eq!(scores.sum(), 1.0, epsilon = 1e-6);
}

#[test]
fn forward_is_pure_test() {
    let network = Network::new(&regression_config(vec![2, 4, 1], 9)).unwrap();
    let before = network.parameters().clone();

    let first = network.forward(array![0.3, 0.7].view()).unwrap();
    let second = network.forward(array![0.3, 0.7].view()).unwrap();

    assert_eq!(first, second);
    assert_eq!(network.parameters(), &before);
    assert_eq!(network.generation(), 0);
}

#[test]
fn single_weight_update_test() {
    // one weight, no bias: output = w * x
    let config = NetworkConfig::new(vec![1, 1])
        .with_activation(Activation::Identity)
        .with_output_function(OutputFunction::Identity)
        .with_problem_type(ProblemType::Regression)
        .with_learning_rate(0.5)
        .with_bias(false);
    let parameters = Parameters::from_weights(vec![array![[1.0]]], None).unwrap();
    let mut network = Network::from_parameters(&config, parameters).unwrap();

    let trace = network.forward(array![2.0].view()).unwrap();
    assert_eq!(trace.output(), &array![2.0]);

    // delta = 2 - 1, gradient = 2 * 1, w = 1 - 0.5 * 2
    network.backpropagate(&trace, array![1.0].view()).unwrap();
    assert_abs_diff_eq!(network.parameters().weights()[0][[0, 0]], 0.0);
    assert_eq!(network.generation(), 1);
}

#[test]
fn bias_update_test() {
    let config = NetworkConfig::new(vec![1, 1])
        .with_activation(Activation::Identity)
        .with_learning_rate(0.25);
    let parameters =
        Parameters::from_weights(vec![array![[1.0]]], Some(vec![array![0.5]])).unwrap();
    let mut network = Network::from_parameters(&config, parameters).unwrap();

    // output = 1 * 1 + 0.5 = 1.5, delta = 1.5 - 0.5 = 1
    let trace = network.forward(array![1.0].view()).unwrap();
    assert_abs_diff_eq!(trace.output()[0], 1.5);
    network.backpropagate(&trace, array![0.5].view()).unwrap();

    let parameters = network.parameters();
    assert_abs_diff_eq!(parameters.weights()[0][[0, 0]], 0.75);
    assert_abs_diff_eq!(parameters.biases().unwrap()[0][0], 0.25);
}

#[test]
fn gradients_match_finite_differences_test() {
    let config = regression_config(vec![2, 3, 2], 7);
    let network = Network::new(&config).unwrap();
    let input = array![0.6, -0.4];
    let target = array![0.25, -0.5];

    let trace = network.forward(input.view()).unwrap();
    let gradients = network.compute_gradients(&trace, target.view()).unwrap();

    let eps = 1e-2f32;
    let weights = network.parameters().weights().to_vec();
    let biases = network.parameters().biases().unwrap().to_vec();

    for (layer, w) in weights.iter().enumerate() {
        for ((row, col), _) in w.indexed_iter() {
            let loss_at = |delta: f32| {
                let mut shifted = weights.clone();
                shifted[layer][[row, col]] += delta;
                let parameters =
                    Parameters::from_weights(shifted, Some(biases.clone())).unwrap();
                let nudged = Network::from_parameters(&config, parameters).unwrap();
                half_squared_error(&nudged, input.view(), target.view())
            };
            let numeric = (loss_at(eps) - loss_at(-eps)) / (2.0 * eps);
            assert_abs_diff_eq!(
                gradients.weights[layer][[row, col]],
                numeric,
                epsilon = 1e-3
            );
        }
    }

    let bias_gradients = gradients.biases.as_ref().unwrap();
    for (layer, b) in biases.iter().enumerate() {
        for index in 0..b.len() {
            let loss_at = |delta: f32| {
                let mut shifted = biases.clone();
                shifted[layer][index] += delta;
                let parameters =
                    Parameters::from_weights(weights.clone(), Some(shifted)).unwrap();
                let nudged = Network::from_parameters(&config, parameters).unwrap();
                half_squared_error(&nudged, input.view(), target.view())
            };
            let numeric = (loss_at(eps) - loss_at(-eps)) / (2.0 * eps);
            assert_abs_diff_eq!(bias_gradients[layer][index], numeric, epsilon = 1e-3);
        }
    }
}

#[test]
fn compute_gradients_does_not_update_test() {
    let network = Network::new(&regression_config(vec![2, 3, 1], 2)).unwrap();
    let before = network.parameters().clone();

    let trace = network.forward(array![1.0, 1.0].view()).unwrap();
    let gradients = network.compute_gradients(&trace, array![0.0].view()).unwrap();

    assert_eq!(network.parameters(), &before);
    assert_eq!(gradients.weights[0].dim(), (2, 3));
    assert_eq!(gradients.weights[1].dim(), (3, 1));
}

#[test]
fn target_width_mismatch_test() {
    let mut network = Network::new(&regression_config(vec![3, 2], 1)).unwrap();
    let before = network.parameters().clone();
    let trace = network.forward(array![1.0, 2.0, 3.0].view()).unwrap();

    let result = network.backpropagate(&trace, array![1.0, 2.0, 3.0].view());
    assert_eq!(
        result,
        Err(ModelError::DimensionMismatch {
            context: "backpropagation target",
            expected: 2,
            actual: 3,
        })
    );
    assert_eq!(network.parameters(), &before);
}

#[test]
fn input_width_mismatch_test() {
    let network = Network::new(&regression_config(vec![3, 2], 1)).unwrap();

    assert!(matches!(
        network.forward(array![1.0, 2.0].view()),
        Err(ModelError::DimensionMismatch { expected: 3, actual: 2, .. })
    ));
    assert!(network.predict(array![1.0].view()).is_err());
}

#[test]
fn stale_trace_is_rejected_test() {
    let mut network = Network::new(&regression_config(vec![2, 2, 1], 5)).unwrap();
    let trace = network.forward(array![0.5, 0.5].view()).unwrap();

    network.backpropagate(&trace, array![1.0].view()).unwrap();
    let after_first = network.parameters().clone();

    let result = network.backpropagate(&trace, array![1.0].view());
    assert!(matches!(result, Err(ModelError::ProcessingError(_))));
    assert_eq!(network.parameters(), &after_first);

    // a fresh trace is accepted again
    let trace = network.forward(array![0.5, 0.5].view()).unwrap();
    assert!(network.backpropagate(&trace, array![1.0].view()).is_ok());
}

#[test]
fn trace_from_another_network_is_rejected_test() {
    let config = regression_config(vec![2, 3, 1], 5);
    let mut network = Network::new(&config).unwrap();
    let twin = Network::new(&config).unwrap();
    let copy = network.clone();
    let before = network.parameters().clone();

    // same parameters and generation, different owner
    let foreign = twin.forward(array![0.5, 0.5].view()).unwrap();
    assert!(matches!(
        network.backpropagate(&foreign, array![1.0].view()),
        Err(ModelError::ProcessingError(_))
    ));

    let from_copy = copy.forward(array![0.5, 0.5].view()).unwrap();
    assert!(matches!(
        network.compute_gradients(&from_copy, array![1.0].view()),
        Err(ModelError::ProcessingError(_))
    ));
    assert_eq!(network.parameters(), &before);
    assert_eq!(network.generation(), 0);
}

#[test]
fn progress_cadence_does_not_change_training_test() {
    let config = regression_config(vec![1, 4, 1], 21).with_epochs(3);
    let dataset = Dataset::new(vec![
        Sample::new(array![-0.5], array![0.25]),
        Sample::new(array![0.0], array![0.0]),
        Sample::new(array![0.5], array![0.25]),
        Sample::new(array![1.0], array![1.0]),
    ]);

    let mut quiet = Network::new(&config).unwrap();
    let mut reported = Network::new(&config).unwrap();
    quiet.train(&dataset, None).unwrap();
    reported.train(&dataset, Some(7)).unwrap();

    assert_eq!(quiet.parameters(), reported.parameters());
    assert_eq!(
        quiet.test(&dataset, None).unwrap(),
        reported.test(&dataset, Some(7)).unwrap()
    );
}

#[test]
fn regression_single_sample_overfit_test() {
    let mut network = Network::new(&regression_config(vec![2, 4, 1], 13)).unwrap();
    let sample = Sample::new(array![0.5, -0.3], array![0.7]);

    for _ in 0..500 {
        network.train_sample(&sample).unwrap();
    }

    let prediction = network.predict(sample.input()).unwrap();
    let value = prediction.values().unwrap()[0];
    assert!((value - 0.7).powi(2) < 1e-3);
}

#[test]
fn classification_single_sample_overfit_test() {
    let mut network = Network::new(&classification_config(vec![2, 4, 3], 21)).unwrap();
    let sample = Sample::from_class(array![0.2, 0.9], 2, 3).unwrap();

    for _ in 0..500 {
        network.train_sample(&sample).unwrap();
    }

    assert_eq!(network.predict(sample.input()).unwrap(), Prediction::Class(2));
}

#[test]
fn train_honours_configured_epochs_test() {
    let config = regression_config(vec![1, 2, 1], 3).with_epochs(4);
    let mut network = Network::new(&config).unwrap();
    let dataset = Dataset::new(vec![
        Sample::new(array![0.0], array![0.0]),
        Sample::new(array![1.0], array![1.0]),
        Sample::new(array![2.0], array![0.5]),
    ]);

    network.train(&dataset, Some(25)).unwrap();
    assert_eq!(network.generation(), 12);
}

#[test]
fn train_rejects_bad_input_before_updating_test() {
    let mut network = Network::new(&regression_config(vec![2, 1], 3)).unwrap();
    let before = network.parameters().clone();
    let dataset = Dataset::new(vec![
        Sample::new(array![0.0, 1.0], array![0.0]),
        Sample::new(array![1.0], array![1.0]),
    ]);

    assert!(matches!(
        network.train(&dataset, None),
        Err(ModelError::DimensionMismatch { .. })
    ));
    assert_eq!(network.parameters(), &before);

    let good = Dataset::new(vec![Sample::new(array![0.0, 1.0], array![0.0])]);
    assert!(matches!(
        network.train(&good, Some(0)),
        Err(ModelError::InputValidationError(_))
    ));
    assert!(network.train(&good, Some(101)).is_err());
}

#[test]
fn empty_dataset_test() {
    let mut network = Network::new(&regression_config(vec![2, 3, 1], 8)).unwrap();
    let before = network.parameters().clone();
    let empty = Dataset::default();

    network.train(&empty, None).unwrap();
    assert_eq!(network.parameters(), &before);
    assert_eq!(network.generation(), 0);

    assert_eq!(network.test(&empty, Some(10)).unwrap(), Evaluation::empty());
}

#[test]
fn test_does_not_mutate_test() {
    let network = Network::new(&classification_config(vec![2, 5, 3], 17)).unwrap();
    let dataset = three_class_dataset();
    let input = array![0.3, 0.1];

    let before = network.predict(input.view()).unwrap();
    let parameters = network.parameters().clone();
    network.test(&dataset, Some(50)).unwrap();

    assert_eq!(network.predict(input.view()).unwrap(), before);
    assert_eq!(network.parameters(), &parameters);
    assert_eq!(network.generation(), 0);
}

#[test]
fn classification_score_ignores_order_test() {
    let mut network = Network::new(&classification_config(vec![2, 5, 3], 17)).unwrap();
    let mut dataset = three_class_dataset();
    network.train(&dataset, None).unwrap();

    let evaluation = network.test(&dataset, None).unwrap();
    assert_eq!(evaluation.predictions.len(), dataset.len());

    dataset.shuffle(&mut StdRng::seed_from_u64(99));
    let shuffled = network.test(&dataset, None).unwrap();

    assert_eq!(evaluation.score, shuffled.score);
    let score = evaluation.score.unwrap();
    assert!((0.0..=1.0).contains(&score));
}

#[test]
fn classification_learns_clusters_test() {
    let config = classification_config(vec![2, 6, 3], 31).with_epochs(400);
    let mut network = Network::new(&config).unwrap();
    let dataset = three_class_dataset();

    network.train(&dataset, None).unwrap();
    let evaluation = network.test(&dataset, None).unwrap();

    // the outer clusters are linearly separable from the rest
    assert!(evaluation.score.unwrap() >= 0.6);
    for prediction in &evaluation.predictions {
        assert!(prediction.class().unwrap() < 3);
    }
}

#[test]
fn regression_score_test() {
    let config = NetworkConfig::new(vec![1, 1])
        .with_activation(Activation::Identity)
        .with_bias(false);
    let parameters = Parameters::from_weights(vec![array![[1.0]]], None).unwrap();
    let network = Network::from_parameters(&config, parameters).unwrap();

    // perfect fit
    let exact = Dataset::new(vec![
        Sample::new(array![1.0], array![1.0]),
        Sample::new(array![2.0], array![2.0]),
        Sample::new(array![3.0], array![3.0]),
    ]);
    let evaluation = network.test(&exact, None).unwrap();
    assert_abs_diff_eq!(evaluation.score.unwrap(), 1.0);
    assert_abs_diff_eq!(evaluation.loss.unwrap(), 0.0);
    assert_eq!(
        evaluation.predictions[1],
        Prediction::Values(array![2.0])
    );

    // constant targets have no R²
    let constant = Dataset::new(vec![
        Sample::new(array![1.0], array![2.0]),
        Sample::new(array![3.0], array![2.0]),
    ]);
    assert_eq!(network.test(&constant, None).unwrap().score, None);
}

#[test]
fn classification_target_without_class_test() {
    let network = Network::new(&classification_config(vec![2, 3], 1)).unwrap();
    let dataset = Dataset::new(vec![Sample::new(array![0.0, 1.0], array![0.0, 0.0, 0.0])]);

    assert!(matches!(
        network.test(&dataset, None),
        Err(ModelError::InputValidationError(_))
    ));
}

#[test]
fn plot_series_test() {
    let config = NetworkConfig::new(vec![1, 1])
        .with_activation(Activation::Identity)
        .with_bias(false);
    let parameters = Parameters::from_weights(vec![array![[2.0]]], None).unwrap();
    let network = Network::from_parameters(&config, parameters).unwrap();
    let dataset = Dataset::new(vec![
        Sample::new(array![1.0], array![1.5]),
        Sample::new(array![-1.0], array![-2.0]),
    ]);

    let evaluation = network.test(&dataset, None).unwrap();
    let series = evaluation.plot_series(&dataset).unwrap();

    assert_eq!(series.targets, vec![(1.0, 1.5), (-1.0, -2.0)]);
    assert_eq!(series.predictions, vec![(1.0, 2.0), (-1.0, -2.0)]);

    let shorter = Dataset::new(vec![Sample::new(array![1.0], array![1.5])]);
    assert!(evaluation.plot_series(&shorter).is_err());
}

#[test]
fn classification_plot_series_uses_class_indices_test() {
    let network = Network::new(&classification_config(vec![2, 3, 3], 2)).unwrap();
    let dataset = three_class_dataset();

    let evaluation = network.test(&dataset, None).unwrap();
    let series = evaluation.plot_series(&dataset).unwrap();

    let target_classes: Vec<f32> = series.targets.iter().map(|&(_, y)| y).collect();
    assert_eq!(target_classes, vec![0.0, 0.0, 1.0, 1.0, 2.0, 2.0]);
    assert_eq!(series.targets[4].0, 1.0);
}

#[test]
fn from_parameters_mismatch_test() {
    let parameters = Parameters::initialize(&[2, 3, 1], true, 1).unwrap();

    let wrong_widths = regression_config(vec![2, 4, 1], 1);
    assert!(matches!(
        Network::from_parameters(&wrong_widths, parameters.clone()),
        Err(ModelError::DimensionMismatch { .. })
    ));

    let wrong_bias = regression_config(vec![2, 3, 1], 1).with_bias(false);
    assert!(matches!(
        Network::from_parameters(&wrong_bias, parameters),
        Err(ModelError::InputValidationError(_))
    ));
}

#[test]
fn invalid_config_test() {
    assert!(Network::new(&NetworkConfig::new(vec![3])).is_err());
    assert!(Network::new(&NetworkConfig::new(vec![3, 0, 1])).is_err());
    assert!(Network::new(&NetworkConfig::new(vec![3, 1]).with_learning_rate(0.0)).is_err());
    assert!(Network::new(&NetworkConfig::new(vec![3, 1]).with_learning_rate(f32::NAN)).is_err());
    assert!(Network::new(&NetworkConfig::new(vec![3, 1]).with_epochs(0)).is_err());
}

#[test]
fn clone_keeps_parameters_test() {
    let mut network = Network::new(&regression_config(vec![2, 3, 1], 4)).unwrap();
    let sample = Sample::new(array![0.1, 0.2], array![0.3]);
    network.train_sample(&sample).unwrap();

    let copy = network.clone();
    assert_eq!(copy.parameters(), network.parameters());
    assert_eq!(copy.generation(), network.generation());
    assert_eq!(
        copy.predict(sample.input()).unwrap(),
        network.predict(sample.input()).unwrap()
    );
}

#[test]
fn summary_test() {
    let network = Network::new(&classification_config(vec![4, 8, 3], 1)).unwrap();
    network.summary();
    assert_eq!(network.parameters().param_count(), 4 * 8 + 8 + 8 * 3 + 3);
}
