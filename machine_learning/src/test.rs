#![cfg(test)]

use crate::{
    ClassifierSpec, MlpClassifier, Solver,
    arch::activations::Activation,
    data::{make_moons, train_test_split},
    metrics::accuracy,
};

fn fit_and_score(spec: ClassifierSpec) -> (f32, Vec<f32>) {
    let dataset = make_moons(300, 0.2, 42).unwrap();
    let (train, test) = train_test_split(&dataset, 0.3, 42).unwrap();

    let mut classifier = MlpClassifier::new(spec).unwrap();
    classifier.fit(&train).unwrap();

    let y_pred = classifier.predict(test.x()).unwrap();
    let score = accuracy(test.labels(), y_pred.view()).unwrap();
    (score, classifier.loss_curve().to_vec())
}

#[test]
fn test_moons_convergence_with_every_activation() {
    for activation in [Activation::Relu, Activation::Tanh, Activation::Logistic] {
        let spec = ClassifierSpec::new(&[10, 10], activation, 42)
            .with_max_iter(2000)
            .with_solver(Solver::Adam {
                learning_rate: 1e-2,
                beta1: 0.9,
                beta2: 0.999,
                epsilon: 1e-8,
            });

        let (score, loss_curve) = fit_and_score(spec);

        assert!(score > 0.8, "{activation}: accuracy {score}");
        assert!(loss_curve.last().unwrap() < &loss_curve[0]);
    }
}

#[test]
fn test_sgd_with_momentum_learns() {
    let spec = ClassifierSpec::new(&[10], Activation::Tanh, 7)
        .with_max_iter(1000)
        .with_solver(Solver::Sgd {
            learning_rate: 0.1,
            momentum: 0.9,
            nesterov: true,
        });

    let (score, loss_curve) = fit_and_score(spec);

    assert!(score > 0.8, "accuracy {score}");
    assert!(loss_curve.iter().all(|loss| loss.is_finite()));
}

#[test]
fn test_same_seed_same_run() {
    let spec = ClassifierSpec::new(&[3, 5], Activation::Logistic, 42).with_max_iter(300);

    let (score_a, curve_a) = fit_and_score(spec.clone());
    let (score_b, curve_b) = fit_and_score(spec);

    assert_eq!(score_a, score_b);
    assert_eq!(curve_a, curve_b);
}
