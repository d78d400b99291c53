use crate::Result;

/// An optimization algorithm: decides how the parameters move given their gradient.
pub trait Optimizer {
    /// Takes one step over `params` following `grad`.
    ///
    /// # Errors
    /// Returns an error if `grad`, `params` and the optimizer's state have different lengths.
    fn update_params(&mut self, grad: &[f32], params: &mut [f32]) -> Result<()>;
}
