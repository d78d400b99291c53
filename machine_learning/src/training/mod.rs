mod builder;
mod fit_report;
mod model_trainer;
mod trainer;

pub use builder::TrainerBuilder;
pub use fit_report::FitReport;
pub use model_trainer::{ModelTrainer, TrainingParams};
pub use trainer::Trainer;
