use std::num::NonZeroUsize;

use log::{debug, trace, warn};
use rand::Rng;

use super::{FitReport, Trainer};
use crate::{
    Result,
    arch::{Model, loss::LossFn},
    data::Dataset,
    optimization::Optimizer,
};

/// The knobs of a training run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingParams {
    /// The maximum amount of epochs.
    pub max_iter: usize,
    pub batch_size: NonZeroUsize,
    /// The strength of the L2 penalty on the weights.
    pub alpha: f32,
    /// The minimum improvement of the epoch loss that counts as progress.
    pub tol: f32,
    /// The amount of epochs without progress tolerated before stopping.
    pub n_iter_no_change: usize,
    /// Whether to shuffle the samples before every epoch.
    pub shuffle: bool,
}

/// A model `Trainer`. Contains the relevant components needed for training a model,
/// including the model itself.
pub struct ModelTrainer<M, O, L, R>
where
    M: Model,
    O: Optimizer,
    L: LossFn,
    R: Rng,
{
    optimizer: O,
    dataset: Dataset,
    loss_fn: L,
    model: M,

    params: TrainingParams,
    rng: R,
}

impl<M, O, L, R> ModelTrainer<M, O, L, R>
where
    M: Model,
    O: Optimizer,
    L: LossFn,
    R: Rng,
{
    /// Returns a new `ModelTrainer`.
    ///
    /// # Arguments
    /// * `model` - The model that will be trained.
    /// * `optimizer` - The optimizer that updates the parameters after every batch.
    /// * `dataset` - The dataset the model will be trained with.
    /// * `loss_fn` - Measures the difference between the model's output and the expected one.
    /// * `params` - The knobs of the training run.
    /// * `rng` - A random number generator, used for shuffling.
    pub fn new(
        model: M,
        optimizer: O,
        dataset: Dataset,
        loss_fn: L,
        params: TrainingParams,
        rng: R,
    ) -> Self {
        Self {
            model,
            optimizer,
            dataset,
            loss_fn,
            params,
            rng,
        }
    }

    /// Trains the model one epoch at a time.
    ///
    /// After every epoch the loss is compared against the best one seen so far: an epoch that
    /// doesn't beat it by at least `tol` counts as one without progress, any other resets the
    /// count. Once the count exceeds `n_iter_no_change` the run is over and has converged.
    ///
    /// Running out of epochs is not an error: a warning is logged and `params` is left holding
    /// the parameters of the epoch with the lowest loss.
    ///
    /// # Arguments
    /// * `params` - The model's initial parameters, left holding the trained ones.
    ///
    /// # Returns
    /// The summary of the run, or an error if the parameters don't fit the model.
    pub fn train(&mut self, params: &mut [f32]) -> Result<FitReport> {
        let TrainingParams {
            max_iter,
            batch_size,
            alpha,
            tol,
            n_iter_no_change,
            shuffle,
        } = self.params;

        let mut grad = vec![0.0; params.len()];
        let mut loss_curve = Vec::with_capacity(max_iter);
        let mut best_loss = f32::INFINITY;
        let mut best_params = params.to_vec();
        let mut no_improvement = 0;
        let mut converged = false;

        for epoch in 0..max_iter {
            if shuffle {
                self.dataset.shuffle(&mut self.rng);
            }

            let batches = self.dataset.batches(batch_size);
            let loss = self.model.backprop(
                params,
                &mut grad,
                &mut self.optimizer,
                &self.loss_fn,
                alpha,
                batches,
            )?;

            trace!(epoch = epoch, loss = loss; "epoch finished");
            loss_curve.push(loss);

            if loss > best_loss - tol {
                no_improvement += 1;
            } else {
                no_improvement = 0;
            }

            if loss < best_loss {
                best_loss = loss;
                best_params.copy_from_slice(params);
            }

            if no_improvement > n_iter_no_change {
                debug!(
                    "loss did not improve more than tol={tol} for {} consecutive epochs, stopping",
                    n_iter_no_change + 1
                );
                converged = true;
                break;
            }
        }

        if !converged {
            warn!("reached max_iter={max_iter} without converging, keeping the best parameters");
            params.copy_from_slice(&best_params);
        }

        Ok(FitReport {
            loss_curve,
            best_loss,
            converged,
        })
    }
}

impl<M, O, L, R> Trainer for ModelTrainer<M, O, L, R>
where
    M: Model,
    O: Optimizer,
    L: LossFn,
    R: Rng,
{
    fn train(&mut self, params: &mut [f32]) -> Result<FitReport> {
        self.train(params)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{Array2, ArrayView2};
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::{arch::loss::LogLoss, optimization::GradientDescent};

    /// A model whose epoch losses are given up front. It writes the epoch number into its single
    /// parameter so tests can tell which epoch's parameters survived.
    struct Scripted {
        losses: Vec<f32>,
        epoch: usize,
    }

    impl Model for Scripted {
        fn size(&self) -> usize {
            1
        }

        fn backprop<'a, O, L, I>(
            &mut self,
            params: &mut [f32],
            _grad: &mut [f32],
            _optimizer: &mut O,
            _loss_fn: &L,
            _alpha: f32,
            _batches: I,
        ) -> Result<f32>
        where
            O: Optimizer,
            L: LossFn,
            I: Iterator<Item = (ArrayView2<'a, f32>, ArrayView2<'a, f32>)>,
        {
            let loss = self.losses[self.epoch.min(self.losses.len() - 1)];
            params[0] = self.epoch as f32;
            self.epoch += 1;
            Ok(loss)
        }
    }

    fn trainer(
        losses: Vec<f32>,
        max_iter: usize,
    ) -> ModelTrainer<Scripted, GradientDescent, LogLoss, StdRng> {
        let dataset = Dataset::new(Array2::zeros((4, 2)), Array2::zeros((4, 1))).unwrap();
        let params = TrainingParams {
            max_iter,
            batch_size: NonZeroUsize::new(2).unwrap(),
            alpha: 0.,
            tol: 1e-4,
            n_iter_no_change: 2,
            shuffle: true,
        };

        ModelTrainer::new(
            Scripted { losses, epoch: 0 },
            GradientDescent::new(1, 0.1, 0., false),
            dataset,
            LogLoss,
            params,
            StdRng::seed_from_u64(0),
        )
    }

    #[test]
    fn stops_after_enough_epochs_without_progress() {
        // Epoch 2 is the best one but beats epoch 1 by less than `tol`, so epochs 2, 3 and 4
        // all count as epochs without progress.
        let mut trainer = trainer(vec![1.0, 0.5, 0.49995, 0.6, 0.5, 0.1], 100);
        let mut params = [0.0];

        let report = trainer.train(&mut params).unwrap();

        assert!(report.converged);
        assert_eq!(report.n_iter(), 5);
        assert_eq!(report.best_loss, 0.49995);
        assert_eq!(params, [4.0]);
    }

    #[test]
    fn progress_resets_the_count() {
        let mut trainer = trainer(vec![1.0, 1.0, 1.0, 0.5, 0.5, 0.5, 0.5], 100);
        let mut params = [0.0];

        let report = trainer.train(&mut params).unwrap();

        assert!(report.converged);
        assert_eq!(report.n_iter(), 7);
    }

    #[test]
    fn running_out_of_epochs_keeps_the_best_parameters() {
        let mut trainer = trainer(vec![1.0, 0.2, 0.9, 0.8, 0.7], 4);
        let mut params = [0.0];

        let report = trainer.train(&mut params).unwrap();

        assert!(!report.converged);
        assert_eq!(report.loss_curve, [1.0, 0.2, 0.9, 0.8]);
        assert_eq!(report.best_loss, 0.2);
        assert_eq!(params, [1.0]);
    }
}
