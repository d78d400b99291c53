mod act_fn;
mod activation;
mod sigmoid;

pub use act_fn::ActFn;
pub use activation::Activation;
pub use sigmoid::{logistic, logistic_prime};
