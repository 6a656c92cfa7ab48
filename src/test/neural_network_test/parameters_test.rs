use super::*;

#[test]
fn initialize_shapes_test() {
    let parameters = Parameters::initialize(&[3, 5, 2], true, 42).unwrap();

    assert_eq!(parameters.weights().len(), 2);
    assert_eq!(parameters.weights()[0].dim(), (3, 5));
    assert_eq!(parameters.weights()[1].dim(), (5, 2));
    let biases = parameters.biases().unwrap();
    assert_eq!(biases[0].len(), 5);
    assert_eq!(biases[1].len(), 2);

    assert_eq!(parameters.layer_widths(), vec![3, 5, 2]);
    assert_eq!(parameters.param_count(), 15 + 5 + 10 + 2);
    assert_eq!(parameters.layer_param_count(0), Some(20));
    assert_eq!(parameters.layer_param_count(1), Some(12));
    assert_eq!(parameters.layer_param_count(2), None);
}

#[test]
fn initialize_without_bias_test() {
    let parameters = Parameters::initialize(&[3, 5, 2], false, 42).unwrap();

    assert!(!parameters.has_bias());
    assert!(parameters.biases().is_none());
    assert_eq!(parameters.param_count(), 25);
    assert_eq!(parameters.layer_param_count(1), Some(10));
    assert_eq!(parameters.layer_param_count(5), None);
}

#[test]
fn initialize_is_deterministic_test() {
    let first = Parameters::initialize(&[4, 6, 3], true, 141).unwrap();
    let second = Parameters::initialize(&[4, 6, 3], true, 141).unwrap();
    let other = Parameters::initialize(&[4, 6, 3], true, 142).unwrap();

    assert_eq!(first, second);
    assert_ne!(first, other);
}

#[test]
fn initialize_scale_test() {
    // entries are N(0, 1) / sqrt(fan_in), so the standard deviation is 1 / 20 here
    let parameters = Parameters::initialize(&[400, 50], false, 7).unwrap();
    let w = &parameters.weights()[0];

    let n = w.len() as f32;
    let mean = w.sum() / n;
    let variance = w.mapv(|v| (v - mean).powi(2)).sum() / n;

    assert_abs_diff_eq!(mean, 0.0, epsilon = 0.005);
    assert_abs_diff_eq!(variance.sqrt(), 0.05, epsilon = 0.005);
}

#[test]
fn initialize_invalid_layers_test() {
    assert!(matches!(
        Parameters::initialize(&[3], true, 0),
        Err(ModelError::InputValidationError(_))
    ));
    assert!(matches!(
        Parameters::initialize(&[3, 0], true, 0),
        Err(ModelError::InputValidationError(_))
    ));
    assert!(Parameters::initialize(&[], false, 0).is_err());
}

#[test]
fn from_weights_test() {
    let parameters = Parameters::from_weights(
        vec![Array2::ones((2, 3)), Array2::ones((3, 1))],
        Some(vec![Array1::zeros(3), Array1::zeros(1)]),
    )
    .unwrap();
    assert_eq!(parameters.layer_widths(), vec![2, 3, 1]);

    // shapes do not chain
    assert!(matches!(
        Parameters::from_weights(vec![Array2::ones((2, 3)), Array2::ones((4, 1))], None),
        Err(ModelError::DimensionMismatch { expected: 3, actual: 4, .. })
    ));
    // bias vector of the wrong length
    assert!(
        Parameters::from_weights(vec![Array2::ones((2, 3))], Some(vec![Array1::zeros(2)]))
            .is_err()
    );
    // one bias vector per matrix
    assert!(
        Parameters::from_weights(
            vec![Array2::ones((2, 3)), Array2::ones((3, 1))],
            Some(vec![Array1::zeros(3)])
        )
        .is_err()
    );
    assert!(Parameters::from_weights(Vec::new(), None).is_err());
}

#[test]
fn network_config_test() {
    let config = NetworkConfig::default();
    assert_eq!(config.layers, vec![1, 32, 16, 1]);
    assert_eq!(config.seed, 141);
    assert!(config.bias);
    assert!(config.validate().is_ok());

    let config: NetworkConfig =
        serde_json::from_str(r#"{ "layers": [2, 3], "activation": "relu", "bias": false }"#)
            .unwrap();
    assert_eq!(config.activation, Activation::ReLU);
    assert!(!config.bias);
    assert_eq!(config.learning_rate, NetworkConfig::default().learning_rate);

    let network = Network::new(&config).unwrap();
    assert!(!network.parameters().has_bias());
}
