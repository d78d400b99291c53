use ndarray::{ArrayView1, Zip};

use crate::{MlErr, Result};

/// The fraction of predictions equal to their expected label.
///
/// # Arguments
/// * `y_true` - The expected labels.
/// * `y_pred` - The predicted labels.
///
/// # Returns
/// `correct / total`, always within `[0, 1]`, or an error if the lengths differ or there is
/// nothing to score.
pub fn accuracy(y_true: ArrayView1<f32>, y_pred: ArrayView1<f32>) -> Result<f32> {
    if y_true.len() != y_pred.len() {
        return Err(MlErr::SizeMismatch {
            a: "predictions",
            b: "labels",
            got: y_pred.len(),
            expected: y_true.len(),
        });
    }

    if y_true.is_empty() {
        return Err(MlErr::EmptyDataset);
    }

    let correct = Zip::from(&y_true)
        .and(&y_pred)
        .fold(0usize, |acc, t, p| acc + (t == p) as usize);

    Ok(correct as f32 / y_true.len() as f32)
}
