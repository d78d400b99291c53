/// What a training run went through.
#[derive(Debug, Clone, PartialEq)]
pub struct FitReport {
    /// The loss of every epoch, in order.
    pub loss_curve: Vec<f32>,
    /// The lowest epoch loss seen.
    pub best_loss: f32,
    /// Whether training stopped because the loss stopped improving rather than because it ran
    /// out of epochs.
    pub converged: bool,
}

impl FitReport {
    /// The amount of epochs run.
    pub fn n_iter(&self) -> usize {
        self.loss_curve.len()
    }

    /// The loss of the last epoch.
    pub fn final_loss(&self) -> Option<f32> {
        self.loss_curve.last().copied()
    }
}
