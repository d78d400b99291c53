use std::fmt::{self, Display};

use super::ActFn;

/// The hidden layer activations a classifier can be configured with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Activation {
    Relu,
    Tanh,
    Logistic,
}

impl Activation {
    /// The lowercase name of the activation.
    pub fn name(&self) -> &'static str {
        match self {
            Activation::Relu => "relu",
            Activation::Tanh => "tanh",
            Activation::Logistic => "logistic",
        }
    }

    /// Resolves the activation into the function applied by the layers.
    pub fn act_fn(&self) -> ActFn {
        match self {
            Activation::Relu => ActFn::Relu,
            Activation::Tanh => ActFn::Tanh,
            Activation::Logistic => ActFn::Logistic,
        }
    }

    /// The numerator of the Glorot uniform bound, `sqrt(factor / (fan_in + fan_out))`.
    pub fn init_factor(&self) -> f32 {
        match self {
            Activation::Logistic => 2.,
            Activation::Relu | Activation::Tanh => 6.,
        }
    }
}

impl Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}
