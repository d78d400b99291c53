use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use super::Dataset;
use crate::{MlErr, Result};

/// Splits the indices `0..n` into a train and a test set.
///
/// The test set takes `ceil(test_fraction * n)` indices and the train set the remaining ones.
/// Both sets come from the same seeded permutation, so together they hold every index exactly
/// once.
///
/// # Arguments
/// * `n` - The amount of samples.
/// * `test_fraction` - The share of samples to hold out, in `(0, 1)`.
/// * `seed` - The seed of the permutation.
///
/// # Returns
/// The train and test indices, or an error if the fraction is out of range or leaves one of the
/// sets empty.
pub fn split_indices(n: usize, test_fraction: f64, seed: u64) -> Result<(Vec<usize>, Vec<usize>)> {
    if !(test_fraction > 0. && test_fraction < 1.) {
        return Err(MlErr::invalid(
            "test fraction",
            format!("{test_fraction} is not in (0, 1)"),
        ));
    }

    let n_test = (test_fraction * n as f64).ceil() as usize;
    let n_train = n.saturating_sub(n_test);

    if n_test == 0 || n_train == 0 {
        return Err(MlErr::invalid(
            "test fraction",
            format!("{test_fraction} of {n} samples leaves a side of the split empty"),
        ));
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(&mut StdRng::seed_from_u64(seed));

    let train = order.split_off(n_test);
    Ok((train, order))
}

/// Splits a dataset into a train and a test dataset, keeping every target with its features.
///
/// # Arguments
/// * `dataset` - The full dataset.
/// * `test_fraction` - The share of samples to hold out, in `(0, 1)`.
/// * `seed` - The seed of the permutation.
///
/// # Returns
/// A `(train, test)` tuple or an error, see `split_indices`.
pub fn train_test_split(
    dataset: &Dataset,
    test_fraction: f64,
    seed: u64,
) -> Result<(Dataset, Dataset)> {
    let (train, test) = split_indices(dataset.len(), test_fraction, seed)?;
    Ok((dataset.select(&train)?, dataset.select(&test)?))
}
