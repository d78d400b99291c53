use std::num::NonZeroUsize;

use log::debug;
use ndarray::{Array1, ArrayView2};

use crate::{
    MlErr, Result,
    arch::{
        Sequential,
        activations::{Activation, logistic},
        layers::Layer,
    },
    data::Dataset,
    training::{FitReport, TrainerBuilder},
};

/// The optimization algorithm used to fit a classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Solver {
    Adam {
        learning_rate: f32,
        beta1: f32,
        beta2: f32,
        epsilon: f32,
    },
    /// Mini-batch SGD. `nesterov: false` gives classical momentum.
    Sgd {
        learning_rate: f32,
        momentum: f32,
        nesterov: bool,
    },
}

impl Default for Solver {
    fn default() -> Self {
        Solver::Adam {
            learning_rate: 1e-3,
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-8,
        }
    }
}

/// The hyperparameters of an `MlpClassifier`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierSpec {
    /// The amount of units of every hidden layer, in order.
    pub hidden_layer_sizes: Vec<usize>,
    pub activation: Activation,
    pub solver: Solver,
    /// The strength of the L2 penalty on the weights.
    pub alpha: f32,
    /// `None` uses `min(200, n_samples)`.
    pub batch_size: Option<NonZeroUsize>,
    /// The maximum amount of epochs.
    pub max_iter: usize,
    pub tol: f32,
    pub n_iter_no_change: usize,
    pub shuffle: bool,
    /// The seed of both the initial parameters and the shuffling.
    pub seed: u64,
}

impl ClassifierSpec {
    /// Creates a new `ClassifierSpec` with the default value for every other hyperparameter.
    ///
    /// # Arguments
    /// * `hidden_layer_sizes` - The amount of units of every hidden layer.
    /// * `activation` - The activation of the hidden layers.
    /// * `seed` - The seed of both the initial parameters and the shuffling.
    pub fn new(hidden_layer_sizes: &[usize], activation: Activation, seed: u64) -> Self {
        Self {
            hidden_layer_sizes: hidden_layer_sizes.to_vec(),
            activation,
            solver: Solver::default(),
            alpha: 1e-4,
            batch_size: None,
            max_iter: 200,
            tol: 1e-4,
            n_iter_no_change: 10,
            shuffle: true,
            seed,
        }
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn with_solver(mut self, solver: Solver) -> Self {
        self.solver = solver;
        self
    }

    /// The `(inputs, outputs)` of every layer, the single logistic output unit included.
    pub fn layer_dims(&self, n_features: usize) -> Vec<(usize, usize)> {
        let mut dims = Vec::with_capacity(self.hidden_layer_sizes.len() + 1);
        let mut fan_in = n_features;

        for &size in self.hidden_layer_sizes.iter().chain(&[1]) {
            dims.push((fan_in, size));
            fan_in = size;
        }

        dims
    }

    /// Builds the network: hidden layers with the configured activation and a linear output
    /// unit, the logistic function being applied by the loss and by `predict_proba`.
    fn model(&self, n_features: usize) -> Sequential {
        let act_fn = self.activation.act_fn();
        let dims = self.layer_dims(n_features);
        let last = dims.len() - 1;

        Sequential::new(dims.into_iter().enumerate().map(|(i, dim)| {
            let act_fn = if i == last { None } else { Some(act_fn) };
            Layer::dense(dim, act_fn)
        }))
    }

    fn validate(&self) -> Result<()> {
        if self.hidden_layer_sizes.is_empty() || self.hidden_layer_sizes.contains(&0) {
            return Err(MlErr::invalid(
                "hidden layer sizes",
                format!(
                    "{:?} must hold at least one layer and every layer at least one unit",
                    self.hidden_layer_sizes
                ),
            ));
        }

        if self.max_iter == 0 {
            return Err(MlErr::invalid("max_iter", "at least one epoch is needed"));
        }

        if !(self.alpha >= 0. && self.alpha.is_finite()) {
            return Err(MlErr::invalid("alpha", format!("{} is not >= 0", self.alpha)));
        }

        if !(self.tol >= 0. && self.tol.is_finite()) {
            return Err(MlErr::invalid("tol", format!("{} is not >= 0", self.tol)));
        }

        let learning_rate = match self.solver {
            Solver::Adam {
                learning_rate,
                beta1,
                beta2,
                epsilon,
            } => {
                let in_unit = |beta: f32| (0. ..1.).contains(&beta);
                if !in_unit(beta1) || !in_unit(beta2) || epsilon <= 0. {
                    return Err(MlErr::invalid(
                        "solver",
                        "betas must be in [0, 1) and epsilon positive",
                    ));
                }
                learning_rate
            }
            Solver::Sgd {
                learning_rate,
                momentum,
                ..
            } => {
                if !(0. ..=1.).contains(&momentum) {
                    return Err(MlErr::invalid("solver", "momentum must be in [0, 1]"));
                }
                learning_rate
            }
        };

        if !(learning_rate > 0. && learning_rate.is_finite()) {
            return Err(MlErr::invalid(
                "learning rate",
                format!("{learning_rate} is not positive"),
            ));
        }

        Ok(())
    }
}

/// A trained network and its parameters.
struct Fitted {
    model: Sequential,
    params: Vec<f32>,
    report: FitReport,
}

/// A multilayer perceptron binary classifier trained with the log-loss.
pub struct MlpClassifier {
    spec: ClassifierSpec,
    fitted: Option<Fitted>,
}

impl MlpClassifier {
    /// Creates a new, unfitted, `MlpClassifier`.
    ///
    /// # Errors
    /// Returns an error if a hyperparameter is out of range.
    pub fn new(spec: ClassifierSpec) -> Result<Self> {
        spec.validate()?;
        Ok(Self { spec, fitted: None })
    }

    pub fn spec(&self) -> &ClassifierSpec {
        &self.spec
    }

    /// Fits the classifier to the dataset, replacing any previous fit.
    ///
    /// # Arguments
    /// * `dataset` - The training samples, labeled `0` or `1`.
    ///
    /// # Returns
    /// The summary of the training, or an error if the labels are not binary or the training
    /// fails.
    pub fn fit(&mut self, dataset: &Dataset) -> Result<&FitReport> {
        if let Some(label) = dataset.labels().iter().find(|&&l| l != 0. && l != 1.) {
            return Err(MlErr::invalid(
                "labels",
                format!("found {label}, only 0 and 1 are supported"),
            ));
        }

        let model = self.spec.model(dataset.x_size());
        let (mut trainer, mut params) =
            TrainerBuilder::new().build(&self.spec, model.clone(), dataset.clone())?;

        debug!("fitting {} parameters on {} samples", params.len(), dataset.len());
        let report = trainer.train(&mut params)?;

        let fitted = self.fitted.insert(Fitted {
            model,
            params,
            report,
        });
        Ok(&fitted.report)
    }

    /// The probability of every sample being of class `1`.
    ///
    /// # Errors
    /// Returns an error if the classifier isn't fitted or `x` has the wrong amount of features.
    pub fn predict_proba(&self, x: ArrayView2<f32>) -> Result<Array1<f32>> {
        let fitted = self.fitted.as_ref().ok_or(MlErr::NotFitted)?;

        let mut model = fitted.model.clone();
        let logits = model.forward(&fitted.params, x)?;
        Ok(logits.column(0).mapv(logistic))
    }

    /// The predicted class of every sample, `1` when its probability is over one half.
    ///
    /// # Errors
    /// Returns an error if the classifier isn't fitted or `x` has the wrong amount of features.
    pub fn predict(&self, x: ArrayView2<f32>) -> Result<Array1<f32>> {
        let proba = self.predict_proba(x)?;
        Ok(proba.mapv(|p| if p > 0.5 { 1. } else { 0. }))
    }

    /// The loss of every training epoch, empty until fitted.
    pub fn loss_curve(&self) -> &[f32] {
        self.fitted
            .as_ref()
            .map(|fitted| fitted.report.loss_curve.as_slice())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;
    use crate::data::{make_moons, train_test_split};
    use crate::metrics::accuracy;

    #[test]
    fn layer_dims_end_in_one_output() {
        let spec = ClassifierSpec::new(&[3, 10], Activation::Relu, 0);
        assert_eq!(spec.layer_dims(2), [(2, 3), (3, 10), (10, 1)]);
    }

    #[test]
    fn rejects_invalid_specs() {
        let empty = ClassifierSpec::new(&[], Activation::Relu, 0);
        assert!(MlpClassifier::new(empty).is_err());

        let zero_units = ClassifierSpec::new(&[3, 0], Activation::Tanh, 0);
        assert!(MlpClassifier::new(zero_units).is_err());

        let no_epochs = ClassifierSpec::new(&[3], Activation::Tanh, 0).with_max_iter(0);
        assert!(MlpClassifier::new(no_epochs).is_err());

        let bad_solver = Solver::Sgd {
            learning_rate: -1.,
            momentum: 0.9,
            nesterov: true,
        };
        let spec = ClassifierSpec::new(&[3], Activation::Tanh, 0).with_solver(bad_solver);
        assert!(MlpClassifier::new(spec).is_err());
    }

    #[test]
    fn predicting_before_fitting_fails() {
        let spec = ClassifierSpec::new(&[3], Activation::Relu, 0);
        let classifier = MlpClassifier::new(spec).unwrap();
        let x = array![[0.0, 0.0]];

        assert!(matches!(classifier.predict(x.view()), Err(MlErr::NotFitted)));
        assert!(classifier.loss_curve().is_empty());
    }

    #[test]
    fn rejects_non_binary_labels() {
        let x = array![[0.0, 1.0], [1.0, 0.0]];
        let dataset = Dataset::from_labels(x, array![0.0, 2.0]).unwrap();
        let mut classifier =
            MlpClassifier::new(ClassifierSpec::new(&[3], Activation::Relu, 0)).unwrap();

        assert!(classifier.fit(&dataset).is_err());
    }

    #[test]
    fn fit_is_reproducible() {
        let dataset = make_moons(100, 0.1, 5).unwrap();
        let spec = ClassifierSpec::new(&[3], Activation::Tanh, 9).with_max_iter(50);

        let mut a = MlpClassifier::new(spec.clone()).unwrap();
        let mut b = MlpClassifier::new(spec).unwrap();
        a.fit(&dataset).unwrap();
        b.fit(&dataset).unwrap();

        assert_eq!(a.loss_curve(), b.loss_curve());
        assert_eq!(
            a.predict_proba(dataset.x()).unwrap(),
            b.predict_proba(dataset.x()).unwrap()
        );
    }

    #[test]
    fn learns_the_moons() {
        let dataset = make_moons(300, 0.1, 42).unwrap();
        let (train, test) = train_test_split(&dataset, 0.3, 42).unwrap();

        let spec = ClassifierSpec::new(&[10, 10], Activation::Tanh, 42)
            .with_max_iter(1000)
            .with_solver(Solver::Adam {
                learning_rate: 1e-2,
                beta1: 0.9,
                beta2: 0.999,
                epsilon: 1e-8,
            });
        let mut classifier = MlpClassifier::new(spec).unwrap();
        let report = classifier.fit(&train).unwrap().clone();

        assert!(report.n_iter() <= 1000);
        assert_eq!(report.loss_curve.len(), classifier.loss_curve().len());
        assert!(report.final_loss().unwrap() < report.loss_curve[0]);

        let y_pred = classifier.predict(test.x()).unwrap();
        assert!(y_pred.iter().all(|&p| p == 0. || p == 1.));

        let score = accuracy(test.labels(), y_pred.view()).unwrap();
        assert!(score > 0.9, "accuracy {score}");
    }
}
