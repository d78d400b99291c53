use ndarray::{Array2, ArrayView2, Zip};

use super::LossFn;
use crate::arch::activations::logistic;

/// Binary cross-entropy computed from the logits of a logistic output unit.
///
/// The model's last layer stays linear and this loss applies the logistic function itself, which
/// keeps both the loss and its derivative finite for saturated outputs.
#[derive(Default, Clone, Copy)]
pub struct LogLoss;

impl LossFn for LogLoss {
    fn loss(&self, y_pred: ArrayView2<f32>, y: ArrayView2<f32>) -> f32 {
        if y_pred.is_empty() {
            return 0.;
        }

        // -y ln(p) - (1 - y) ln(1 - p) with p = logistic(z), rearranged to avoid overflow.
        let total = Zip::from(&y_pred)
            .and(&y)
            .fold(0.0_f32, |acc, &z, &y| {
                acc + z.max(0.) - z * y + (-z.abs()).exp().ln_1p()
            });

        total / y_pred.len() as f32
    }

    fn loss_prime(&self, y_pred: ArrayView2<f32>, y: ArrayView2<f32>) -> Array2<f32> {
        let n = y_pred.len().max(1) as f32;
        Zip::from(&y_pred)
            .and(&y)
            .map_collect(|&z, &y| (logistic(z) - y) / n)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn matches_cross_entropy_of_probabilities() {
        let z = array![[0.3], [-1.2], [2.0]];
        let y = array![[1.0], [0.0], [0.0]];

        let expected = z
            .iter()
            .zip(&y)
            .map(|(&z, &y)| {
                let p = logistic(z);
                -(y * p.ln() + (1. - y) * (1. - p).ln())
            })
            .sum::<f32>()
            / 3.;

        let got = LogLoss.loss(z.view(), y.view());
        assert!((got - expected).abs() < 1e-5);
    }

    #[test]
    fn saturated_logits_stay_finite() {
        let z = array![[500.0], [-500.0]];
        let y = array![[0.0], [1.0]];

        let loss = LogLoss.loss(z.view(), y.view());
        assert!((loss - 500.).abs() < 1e-3);

        let d = LogLoss.loss_prime(z.view(), y.view());
        assert_eq!(d, array![[0.5], [-0.5]]);
    }

    #[test]
    fn derivative_matches_finite_differences() {
        const H: f32 = 1e-2;

        let z = array![[0.8], [-0.4], [1.5], [-2.2]];
        let y = array![[1.0], [1.0], [0.0], [0.0]];
        let d = LogLoss.loss_prime(z.view(), y.view());

        for i in 0..z.len() {
            let mut plus = z.clone();
            let mut minus = z.clone();
            plus[[i, 0]] += H;
            minus[[i, 0]] -= H;

            let loss_plus = LogLoss.loss(plus.view(), y.view());
            let loss_minus = LogLoss.loss(minus.view(), y.view());
            let numeric = (loss_plus - loss_minus) / (2. * H);
            assert!((numeric - d[[i, 0]]).abs() < 1e-3);
        }
    }
}
