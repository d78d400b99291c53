use std::{cell::RefCell, num::NonZeroUsize, rc::Rc};

use log::warn;
use rand::{SeedableRng, rngs::StdRng};

use super::{ModelTrainer, Trainer, TrainingParams};
use crate::{
    MlErr, Result,
    arch::{Model, Sequential, loss::LogLoss},
    classifier::{ClassifierSpec, Solver},
    data::Dataset,
    initialization::{ChainedParamGen, ParamGen, RandParamGen},
    optimization::{Adam, GradientDescent, Optimizer},
};

/// The batch size used when a `ClassifierSpec` leaves it unset, capped by the amount of samples.
const DEFAULT_BATCH_SIZE: NonZeroUsize = NonZeroUsize::new(200).unwrap();

/// Builds `Trainer`s out of a `ClassifierSpec`.
#[derive(Default)]
pub struct TrainerBuilder;

impl TrainerBuilder {
    /// Creates a new `TrainerBuilder`.
    pub fn new() -> Self {
        Self
    }

    /// Builds a new `Trainer` following `spec`, along with the model's initial parameters.
    ///
    /// Both the parameters and the trainer's shuffling are drawn from a single random stream
    /// seeded with `spec.seed`.
    ///
    /// # Arguments
    /// * `spec` - The hyperparameters of the classifier being trained.
    /// * `model` - The model to train, built from the same spec.
    /// * `dataset` - The training samples.
    ///
    /// # Returns
    /// The trainer and the initial parameters, or an error if the initialization fails.
    pub fn build(
        &self,
        spec: &ClassifierSpec,
        model: Sequential,
        dataset: Dataset,
    ) -> Result<(Box<dyn Trainer>, Vec<f32>)> {
        let rng = Rc::new(RefCell::new(StdRng::seed_from_u64(spec.seed)));
        let params = self.resolve_params(spec, &model, dataset.x_size(), rng.clone())?;

        // The shuffling continues the stream right where the initialization left it.
        let rng = rng.borrow().clone();

        let trainer = self.resolve_optimizer(spec, model, dataset, rng);
        Ok((trainer, params))
    }

    fn resolve_params(
        &self,
        spec: &ClassifierSpec,
        model: &Sequential,
        n_features: usize,
        rng: Rc<RefCell<StdRng>>,
    ) -> Result<Vec<f32>> {
        let layer_dims = spec.layer_dims(n_features);
        // The bound follows the hidden activation on every layer, the output one included.
        let factor = spec.activation.init_factor();

        let mut param_gens: Vec<Box<dyn ParamGen>> = Vec::with_capacity(layer_dims.len());
        for &(fan_in, fan_out) in &layer_dims {
            let limit = (fan_in + 1) * fan_out;
            let param_gen =
                RandParamGen::glorot_uniform(rng.clone(), limit, fan_in, fan_out, factor)?;
            param_gens.push(Box::new(param_gen));
        }

        let size = model.size();
        let params = ChainedParamGen::new(param_gens)
            .sample(size)
            .unwrap_or_default();

        if params.len() != size {
            return Err(MlErr::SizeMismatch {
                a: "initial parameters",
                b: "model size",
                got: params.len(),
                expected: size,
            });
        }

        Ok(params)
    }

    fn resolve_optimizer(
        &self,
        spec: &ClassifierSpec,
        model: Sequential,
        dataset: Dataset,
        rng: StdRng,
    ) -> Box<dyn Trainer> {
        let size = model.size();

        match spec.solver {
            Solver::Adam {
                learning_rate,
                beta1,
                beta2,
                epsilon,
            } => {
                let optimizer = Adam::new(size, learning_rate, beta1, beta2, epsilon);
                self.terminate_build(spec, model, optimizer, dataset, rng)
            }
            Solver::Sgd {
                learning_rate,
                momentum,
                nesterov,
            } => {
                let optimizer = GradientDescent::new(size, learning_rate, momentum, nesterov);
                self.terminate_build(spec, model, optimizer, dataset, rng)
            }
        }
    }

    fn terminate_build<O>(
        &self,
        spec: &ClassifierSpec,
        model: Sequential,
        optimizer: O,
        dataset: Dataset,
        rng: StdRng,
    ) -> Box<dyn Trainer>
    where
        O: Optimizer + 'static,
    {
        let params = TrainingParams {
            max_iter: spec.max_iter,
            batch_size: self.resolve_batch_size(spec.batch_size, dataset.len()),
            alpha: spec.alpha,
            tol: spec.tol,
            n_iter_no_change: spec.n_iter_no_change,
            shuffle: spec.shuffle,
        };

        let trainer = ModelTrainer::new(model, optimizer, dataset, LogLoss, params, rng);
        Box::new(trainer)
    }

    fn resolve_batch_size(
        &self,
        batch_size: Option<NonZeroUsize>,
        n_samples: usize,
    ) -> NonZeroUsize {
        let all = NonZeroUsize::new(n_samples).unwrap_or(NonZeroUsize::MIN);

        match batch_size {
            None => all.min(DEFAULT_BATCH_SIZE),
            Some(batch_size) if batch_size > all => {
                warn!("batch size {batch_size} exceeds the {n_samples} samples, clipping it");
                all
            }
            Some(batch_size) => batch_size,
        }
    }
}
