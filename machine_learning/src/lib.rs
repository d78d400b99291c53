pub mod arch;
pub mod classifier;
pub mod data;
pub mod error;
pub mod initialization;
pub mod metrics;
pub mod optimization;
mod test;
pub mod training;

pub use classifier::{ClassifierSpec, MlpClassifier, Solver};
pub use error::{MlErr, Result};
