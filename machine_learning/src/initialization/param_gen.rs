/// Produces the initial values of a model's flat parameter vector, a chunk at a time.
pub trait ParamGen {
    /// Draws up to `n` values, fewer when the generator is about to run out.
    ///
    /// # Returns
    /// `None` once the generator has nothing left to give.
    fn sample(&mut self, n: usize) -> Option<Vec<f32>>;
}
