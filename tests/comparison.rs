use machine_learning::arch::activations::Activation;
use moons_mlp::{CONFIGURATIONS, ExperimentConfig, ResultsTable, experiment};

fn config() -> ExperimentConfig {
    ExperimentConfig {
        plot: false,
        ..ExperimentConfig::default()
    }
}

#[test]
fn compares_every_configuration() {
    let comparison = experiment::run(&config(), &CONFIGURATIONS).unwrap();

    assert_eq!(comparison.results.len(), 9);
    for (result, configuration) in comparison.results.iter().zip(&CONFIGURATIONS) {
        assert_eq!(&result.configuration, configuration);
        assert!((0.0..=1.0).contains(&result.accuracy), "{result:?}");
        assert!(result.n_iter >= 1 && result.n_iter <= 1000);
        assert!(result.final_loss.is_finite());
    }

    let table = ResultsTable::new(&comparison.results).to_string();
    assert_eq!(table.lines().count(), 10);
    assert!(table.lines().next().unwrap().ends_with("accuracy"));
}

#[test]
fn last_model_is_the_last_configuration() {
    let comparison = experiment::run(&config(), &CONFIGURATIONS).unwrap();

    let spec = comparison.last_model.spec();
    assert_eq!(spec.hidden_layer_sizes, [3, 10]);
    assert_eq!(spec.activation, Activation::Logistic);

    let last = comparison.last_result().unwrap();
    assert_eq!(comparison.last_model.loss_curve(), last.loss_curve.as_slice());
}

#[test]
fn reruns_are_reproducible() {
    let first = experiment::run(&config(), &CONFIGURATIONS[..1]).unwrap();
    let second = experiment::run(&config(), &CONFIGURATIONS[..1]).unwrap();

    assert_eq!(first.results, second.results);
}

#[test]
fn first_configuration_accuracy_is_pinned() {
    let comparison = experiment::run(&config(), &CONFIGURATIONS[..1]).unwrap();
    let result = &comparison.results[0];

    assert_eq!(result.configuration.to_string(), "(3,) relu");
    // Pinned from a run with the default settings (seed 42): 79 of the 90 test samples.
    assert_eq!(result.accuracy, 79. / 90.);
}
