use super::Optimizer;
use crate::{MlErr, Result};

/// Gradient descent optimization algorithm with optional classical or Nesterov momentum.
pub struct GradientDescent {
    learning_rate: f32,
    momentum: f32,
    nesterov: bool,
    velocity: Box<[f32]>,
}

impl GradientDescent {
    /// Returns a new `GradientDescent`.
    ///
    /// # Arguments
    /// * `len` - The amount of parameters this instance should hold.
    /// * `learning_rate` - The *length* of the steps taken on `update_params`.
    /// * `momentum` - The fraction of the previous step carried into the next one, `0` disables it.
    /// * `nesterov` - Whether to take the step from the look-ahead position of the velocity.
    pub fn new(len: usize, learning_rate: f32, momentum: f32, nesterov: bool) -> Self {
        Self {
            learning_rate,
            momentum,
            nesterov,
            velocity: vec![0.; len].into_boxed_slice(),
        }
    }
}

impl Optimizer for GradientDescent {
    /// Updates the parameters according to the algorithm's learning rule, that is, making a step in
    /// the opposite direction of the gradient, with a length of `learning_rate`, plus the
    /// `momentum` share of the previous step. With `nesterov` the step is `momentum * v - lr * g`
    /// using the already updated velocity `v`.
    ///
    /// # Arguments
    /// * `grad` - The gradient used for taking the step.
    /// * `params` - The parameters that are going to be modified.
    fn update_params(&mut self, grad: &[f32], params: &mut [f32]) -> Result<()> {
        if grad.len() != params.len() || grad.len() != self.velocity.len() {
            return Err(MlErr::SizeMismatch {
                a: "gradient",
                b: "optimizer state",
                got: grad.len(),
                expected: self.velocity.len(),
            });
        }

        let lr = self.learning_rate;
        let momentum = self.momentum;
        let nesterov = self.nesterov;

        params
            .iter_mut()
            .zip(grad)
            .zip(self.velocity.iter_mut())
            .for_each(|((w, g), v)| {
                *v = momentum * *v - lr * g;
                *w += if nesterov { momentum * *v - lr * g } else { *v };
            });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_step() {
        let mut optimizer = GradientDescent::new(2, 0.5, 0., false);
        let mut params = [1.0, 1.0];

        optimizer.update_params(&[2.0, -2.0], &mut params).unwrap();
        assert_eq!(params, [0.0, 2.0]);
    }

    #[test]
    fn momentum_accumulates() {
        let mut optimizer = GradientDescent::new(1, 1.0, 0.5, false);
        let mut params = [0.0];

        optimizer.update_params(&[1.0], &mut params).unwrap();
        assert_eq!(params, [-1.0]);

        optimizer.update_params(&[1.0], &mut params).unwrap();
        assert_eq!(params, [-2.5]);
    }

    #[test]
    fn nesterov_looks_ahead() {
        let mut optimizer = GradientDescent::new(1, 1.0, 0.5, true);
        let mut params = [0.0];

        optimizer.update_params(&[1.0], &mut params).unwrap();
        assert_eq!(params, [-1.5]);

        optimizer.update_params(&[1.0], &mut params).unwrap();
        assert_eq!(params, [-3.25]);
    }

    #[test]
    fn nesterov_without_momentum_is_plain() {
        let mut plain = GradientDescent::new(2, 0.5, 0., false);
        let mut nesterov = GradientDescent::new(2, 0.5, 0., true);
        let mut a = [1.0, -1.0];
        let mut b = a;

        for grad in [[2.0, -2.0], [0.5, 1.0]] {
            plain.update_params(&grad, &mut a).unwrap();
            nesterov.update_params(&grad, &mut b).unwrap();
        }
        assert_eq!(a, b);
    }
}
