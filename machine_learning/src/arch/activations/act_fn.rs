use super::{logistic, logistic_prime};

/// An element-wise activation function applied after a layer's affine transformation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ActFn {
    Relu,
    Tanh,
    Logistic,
}

impl ActFn {
    pub fn f(&self, x: f32) -> f32 {
        match self {
            Self::Relu => x.max(0.),
            Self::Tanh => x.tanh(),
            Self::Logistic => logistic(x),
        }
    }

    pub fn df(&self, x: f32) -> f32 {
        match self {
            Self::Relu => {
                if x > 0. {
                    1.
                } else {
                    0.
                }
            }
            Self::Tanh => 1. - x.tanh().powi(2),
            Self::Logistic => logistic_prime(x),
        }
    }
}
