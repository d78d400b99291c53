use ndarray::ArrayView2;

use super::{Model, layers::Layer, loss::LossFn};
use crate::{MlErr, Result, optimization::Optimizer};

/// A sequential model: information flows forward when computing an output and backward when
/// computing the *deltas* of its layers.
///
/// The model owns no parameters, every pass receives them as one flat slice holding each layer's
/// parameters one after the other.
#[derive(Clone)]
pub struct Sequential {
    layers: Vec<Layer>,
}

impl Sequential {
    /// Creates a new `Sequential`.
    ///
    /// # Arguments
    /// * `layers` - The layers the sequential is composed of.
    ///
    /// # Returns
    /// A new `Sequential` instance.
    pub fn new<I>(layers: I) -> Self
    where
        I: IntoIterator<Item = Layer>,
    {
        Self {
            layers: layers.into_iter().collect(),
        }
    }

    /// Makes a forward pass through the network.
    ///
    /// # Arguments
    /// * `params` - The model's parameters.
    /// * `x` - The input data.
    ///
    /// # Returns
    /// The prediction for the given input or an error if occurred.
    pub fn forward<'x>(
        &'x mut self,
        params: &[f32],
        mut x: ArrayView2<'x, f32>,
    ) -> Result<ArrayView2<'x, f32>> {
        self.check_size("parameters", params.len())?;

        let mut rest = params;
        for layer in self.layers.iter_mut() {
            let (layer_params, tail) = rest.split_at(layer.size());
            rest = tail;

            x = layer.forward(layer_params, x)?;
        }

        Ok(x)
    }

    fn check_size(&self, what: &'static str, len: usize) -> Result<()> {
        let size = self.size();
        if len != size {
            return Err(MlErr::SizeMismatch {
                a: what,
                b: "model size",
                got: len,
                expected: size,
            });
        }

        Ok(())
    }
}

impl Model for Sequential {
    fn size(&self) -> usize {
        self.layers.iter().map(|layer| layer.size()).sum()
    }

    // NOTE: the epoch loss is the sum of the batch losses weighted by their sizes and divided by
    // the amount of samples, so a short trailing batch doesn't weigh as much as a full one. Each
    // batch loss is measured before its update is applied.
    fn backprop<'a, O, L, I>(
        &mut self,
        params: &mut [f32],
        grad: &mut [f32],
        optimizer: &mut O,
        loss_fn: &L,
        alpha: f32,
        batches: I,
    ) -> Result<f32>
    where
        O: Optimizer,
        L: LossFn,
        I: Iterator<Item = (ArrayView2<'a, f32>, ArrayView2<'a, f32>)>,
    {
        self.check_size("parameters", params.len())?;
        self.check_size("gradient", grad.len())?;

        let mut total_loss = 0.0;
        let mut total_samples = 0;

        for (x, y) in batches {
            let n = x.nrows();
            if n == 0 {
                continue;
            }

            grad.fill(0.0);

            let y_pred = self.forward(params, x)?;
            let loss = loss_fn.loss(y_pred, y);
            let mut d_last = loss_fn.loss_prime(y_pred, y);
            let mut d = d_last.view_mut();

            let mut end = params.len();
            for layer in self.layers.iter_mut().rev() {
                let start = end - layer.size();
                d = layer.backward(&params[start..end], &mut grad[start..end], d)?;
                end = start;
            }

            let coef = alpha / n as f32;
            let mut sq_norm = 0.0;
            let mut start = 0;
            for layer in &self.layers {
                let end = start + layer.size();
                sq_norm += layer.regularize(&params[start..end], &mut grad[start..end], coef)?;
                start = end;
            }

            let batch_loss = loss + 0.5 * coef * sq_norm;
            total_loss += batch_loss * n as f32;
            total_samples += n;

            optimizer.update_params(grad, params)?;
        }

        if total_samples == 0 {
            return Err(MlErr::EmptyDataset);
        }

        Ok(total_loss / total_samples as f32)
    }
}
