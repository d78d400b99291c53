use anyhow::{Context, Result, bail};
use log::info;
use machine_learning::{
    ClassifierSpec, MlpClassifier,
    data::{make_moons, train_test_split},
    metrics::accuracy,
};

use crate::{config::ExperimentConfig, configurations::Configuration};

/// The outcome of fitting and scoring a single configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialResult {
    pub configuration: Configuration,
    /// The test set accuracy, within `[0, 1]`.
    pub accuracy: f32,
    /// The amount of epochs run.
    pub n_iter: usize,
    pub converged: bool,
    pub final_loss: f32,
    pub loss_curve: Vec<f32>,
}

/// Every configuration's result, in order, and the last fitted classifier.
pub struct Comparison {
    pub results: Vec<TrialResult>,
    pub last_model: MlpClassifier,
}

impl Comparison {
    /// The result of the last configuration, the one `last_model` was fitted for.
    pub fn last_result(&self) -> Option<&TrialResult> {
        self.results.last()
    }
}

/// Runs the whole comparison: generates the moons, splits them and fits one classifier per
/// configuration, scoring each on the test split.
///
/// # Errors
/// Returns an error if `configurations` is empty or any step fails.
pub fn run(config: &ExperimentConfig, configurations: &[Configuration]) -> Result<Comparison> {
    if configurations.is_empty() {
        bail!("there are no configurations to compare");
    }

    let dataset = make_moons(config.n_samples, config.noise, config.seed)
        .context("failed to generate the moons")?;
    info!("generated {} samples with noise {}", dataset.len(), config.noise);

    let (train, test) = train_test_split(&dataset, config.test_fraction, config.seed)
        .context("failed to split the dataset")?;
    info!("split into {} train and {} test samples", train.len(), test.len());

    let mut results = Vec::with_capacity(configurations.len());
    let mut last_model = None;

    for &configuration in configurations {
        info!("fitting {configuration}");

        let spec = ClassifierSpec::new(
            configuration.hidden_layer_sizes,
            configuration.activation,
            config.seed,
        )
        .with_max_iter(config.max_iter);

        let mut classifier = MlpClassifier::new(spec)?;
        let report = classifier
            .fit(&train)
            .with_context(|| format!("failed to fit {configuration}"))?
            .clone();

        let y_pred = classifier.predict(test.x())?;
        let accuracy = accuracy(test.labels(), y_pred.view())?;

        let final_loss = report.final_loss().unwrap_or(f32::NAN);
        info!(
            "{configuration}: {} epochs, final loss {final_loss:.6}, accuracy {accuracy:.6}",
            report.n_iter()
        );

        results.push(TrialResult {
            configuration,
            accuracy,
            n_iter: report.n_iter(),
            converged: report.converged,
            final_loss,
            loss_curve: report.loss_curve,
        });
        last_model = Some(classifier);
    }

    let last_model = last_model.context("no classifier was fitted")?;
    Ok(Comparison {
        results,
        last_model,
    })
}

#[cfg(test)]
mod tests {
    use machine_learning::arch::activations::Activation;

    use super::*;

    fn quick_config() -> ExperimentConfig {
        ExperimentConfig {
            n_samples: 60,
            max_iter: 20,
            plot: false,
            ..ExperimentConfig::default()
        }
    }

    #[test]
    fn no_configurations_is_an_error() {
        assert!(run(&quick_config(), &[]).is_err());
    }

    #[test]
    fn one_result_per_configuration() {
        let configurations = [
            Configuration::new(&[3], Activation::Relu),
            Configuration::new(&[4], Activation::Tanh),
        ];

        let comparison = run(&quick_config(), &configurations).unwrap();

        assert_eq!(comparison.results.len(), 2);
        for (result, configuration) in comparison.results.iter().zip(&configurations) {
            assert_eq!(&result.configuration, configuration);
            assert!((0.0..=1.0).contains(&result.accuracy));
            assert_eq!(result.loss_curve.len(), result.n_iter);
            assert!(result.n_iter <= 20);
        }

        assert_eq!(comparison.last_model.spec().hidden_layer_sizes, [4]);
    }

    #[test]
    fn invalid_settings_are_reported() {
        let config = ExperimentConfig {
            test_fraction: 1.5,
            ..quick_config()
        };
        let configurations = [Configuration::new(&[3], Activation::Relu)];

        assert!(run(&config, &configurations).is_err());
    }
}
