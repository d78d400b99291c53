mod dataset;
mod moons;
mod split;

pub use dataset::Dataset;
pub use moons::make_moons;
pub use split::{split_indices, train_test_split};
