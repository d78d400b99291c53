use super::FitReport;
use crate::Result;

/// A model trainer, erased from the concrete model, optimizer and loss it is built with.
pub trait Trainer {
    /// Trains the model until its stopping rule is met or it runs out of epochs.
    ///
    /// # Arguments
    /// * `params` - The model's initial parameters, left holding the trained ones.
    ///
    /// # Returns
    /// The summary of the training or an error if the parameters don't fit the model.
    fn train(&mut self, params: &mut [f32]) -> Result<FitReport>;
}
