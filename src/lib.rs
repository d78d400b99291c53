pub mod config;
pub mod configurations;
pub mod experiment;
pub mod plot;
pub mod report;

pub use config::ExperimentConfig;
pub use configurations::{CONFIGURATIONS, Configuration};
pub use experiment::{Comparison, TrialResult};
pub use report::ResultsTable;
