use super::*;

#[test]
fn sgd_new_test() {
    assert!(SGD::new(0.01).is_ok());
    assert_abs_diff_eq!(SGD::new(0.01).unwrap().learning_rate(), 0.01);

    assert!(SGD::new(0.0).is_err());
    assert!(SGD::new(-0.1).is_err());
    assert!(SGD::new(f32::NAN).is_err());
    assert!(SGD::new(f32::INFINITY).is_err());
}

#[test]
fn sgd_update_test() {
    let sgd = SGD::new(0.1).unwrap();
    let mut parameters = Parameters::from_weights(
        vec![array![[1.0, 2.0], [3.0, 4.0]]],
        Some(vec![array![0.5, -0.5]]),
    )
    .unwrap();
    let gradients = Gradients {
        weights: vec![array![[1.0, 0.0], [0.0, -1.0]]],
        biases: Some(vec![array![2.0, 2.0]]),
    };

    sgd.update_parameters(&mut parameters, &gradients).unwrap();

    let w = &parameters.weights()[0];
    assert_abs_diff_eq!(w[[0, 0]], 0.9, epsilon = 1e-6);
    assert_abs_diff_eq!(w[[0, 1]], 2.0);
    assert_abs_diff_eq!(w[[1, 1]], 4.1, epsilon = 1e-6);
    let b = &parameters.biases().unwrap()[0];
    assert_abs_diff_eq!(b[0], 0.3, epsilon = 1e-6);
    assert_abs_diff_eq!(b[1], -0.7, epsilon = 1e-6);
}

#[test]
fn sgd_rejects_mismatched_gradients_test() {
    let sgd = SGD::new(0.1).unwrap();
    let mut parameters = Parameters::initialize(&[2, 3, 1], true, 0).unwrap();
    let before = parameters.clone();

    let wrong_shape = Gradients {
        weights: vec![Array2::zeros((2, 3)), Array2::zeros((3, 2))],
        biases: Some(vec![Array1::zeros(3), Array1::zeros(1)]),
    };
    assert!(matches!(
        sgd.update_parameters(&mut parameters, &wrong_shape),
        Err(ModelError::DimensionMismatch { .. })
    ));

    let missing_bias = Gradients {
        weights: vec![Array2::zeros((2, 3)), Array2::zeros((3, 1))],
        biases: None,
    };
    assert!(sgd.update_parameters(&mut parameters, &missing_bias).is_err());

    let too_few = Gradients {
        weights: vec![Array2::zeros((2, 3))],
        biases: Some(vec![Array1::zeros(3)]),
    };
    assert!(sgd.update_parameters(&mut parameters, &too_few).is_err());

    assert_eq!(parameters, before);
}

#[test]
fn apply_gradients_test() {
    let mut network = Network::new(&regression_config(vec![2, 2, 1], 6)).unwrap();
    let before = network.parameters().clone();
    let trace = network.forward(array![1.0, -1.0].view()).unwrap();
    let gradients = network.compute_gradients(&trace, array![0.5].view()).unwrap();

    network.apply_gradients(&gradients).unwrap();

    let lr = network.config().learning_rate;
    let expected = &before.weights()[1] - &(&gradients.weights[1] * lr);
    for (a, e) in network.parameters().weights()[1].iter().zip(expected.iter()) {
        assert_abs_diff_eq!(*a, *e, epsilon = 1e-6);
    }
    assert_eq!(network.generation(), 1);
}
