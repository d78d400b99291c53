use std::{
    error::Error,
    fmt::{self, Display},
};

use ndarray::ShapeError;
use rand_distr::{NormalError, uniform::Error as UniformError};

/// The result type used in the entire machine learning module.
pub type Result<T> = std::result::Result<T, MlErr>;

/// The machine learning module's error type.
#[derive(Debug)]
pub enum MlErr {
    SizeMismatch {
        a: &'static str,
        b: &'static str,
        got: usize,
        expected: usize,
    },
    InvalidArgument {
        what: &'static str,
        reason: String,
    },
    EmptyDataset,
    NotFitted,
    Distribution(String),
    Shape(ShapeError),
}

impl MlErr {
    /// Shorthand for building an `InvalidArgument` error.
    pub fn invalid(what: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            what,
            reason: reason.into(),
        }
    }
}

impl Display for MlErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MlErr::SizeMismatch {
                a,
                b,
                got,
                expected,
            } => {
                format!(
                    "There's a size mismatch between {a} and {b}, got {got} and expected {expected}"
                )
            }
            MlErr::InvalidArgument { what, reason } => format!("Invalid {what}: {reason}"),
            MlErr::EmptyDataset => "The dataset has no samples".to_string(),
            MlErr::NotFitted => "The classifier must be fitted before predicting".to_string(),
            MlErr::Distribution(e) => format!("Failed to build a distribution: {e}"),
            MlErr::Shape(e) => format!("Invalid array shape: {e}"),
        };

        write!(f, "{s}")
    }
}

impl Error for MlErr {}

impl From<ShapeError> for MlErr {
    fn from(value: ShapeError) -> Self {
        Self::Shape(value)
    }
}

impl From<NormalError> for MlErr {
    fn from(value: NormalError) -> Self {
        Self::Distribution(value.to_string())
    }
}

impl From<UniformError> for MlErr {
    fn from(value: UniformError) -> Self {
        Self::Distribution(value.to_string())
    }
}
