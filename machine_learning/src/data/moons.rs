use std::f32::consts::PI;

use ndarray::{Array1, Array2, Axis};
use ndarray_rand::{RandomExt, rand_distr::Normal};
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use super::Dataset;
use crate::{MlErr, Result};

/// Generates two interleaving half circles: a binary classification toy problem that no linear
/// boundary separates.
///
/// The first `n_samples / 2` points lie on the upper half of the unit circle and are labeled `0`,
/// the rest lie on a lower half circle shifted by `(1, -0.5)` and are labeled `1`. The rows are
/// shuffled and then gaussian noise is added to every coordinate.
///
/// # Arguments
/// * `n_samples` - The total amount of points.
/// * `noise` - The standard deviation of the noise, `0` keeps the points on the circles.
/// * `seed` - The seed for both the shuffle and the noise.
///
/// # Returns
/// The points and their labels, or an error if there are no samples or the noise is not a
/// finite, non-negative number.
pub fn make_moons(n_samples: usize, noise: f32, seed: u64) -> Result<Dataset> {
    if n_samples == 0 {
        return Err(MlErr::invalid("sample count", "at least one sample is needed"));
    }

    if !noise.is_finite() || noise < 0. {
        return Err(MlErr::invalid(
            "noise",
            format!("{noise} is not a finite, non-negative standard deviation"),
        ));
    }

    let n_out = n_samples / 2;
    let n_in = n_samples - n_out;

    let mut points = Vec::with_capacity(n_samples * 2);
    let mut labels = Vec::with_capacity(n_samples);

    for t in Array1::linspace(0., PI, n_out) {
        points.extend([t.cos(), t.sin()]);
        labels.push(0.);
    }

    for t in Array1::linspace(0., PI, n_in) {
        points.extend([1. - t.cos(), 1. - t.sin() - 0.5]);
        labels.push(1.);
    }

    let x = Array2::from_shape_vec((n_samples, 2), points)?;
    let y = Array2::from_shape_vec((n_samples, 1), labels)?;

    let mut rng = StdRng::seed_from_u64(seed);
    let mut order: Vec<usize> = (0..n_samples).collect();
    order.shuffle(&mut rng);

    let mut x = x.select(Axis(0), &order);
    let y = y.select(Axis(0), &order);

    if noise > 0. {
        let normal = Normal::new(0., noise).map_err(|e| MlErr::Distribution(e.to_string()))?;
        x += &Array2::random_using(x.dim(), normal, &mut rng);
    }

    Dataset::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_and_balance() {
        let dataset = make_moons(300, 0.2, 42).unwrap();

        assert_eq!(dataset.len(), 300);
        assert_eq!(dataset.x_size(), 2);

        let ones = dataset.labels().iter().filter(|&&label| label == 1.).count();
        let zeros = dataset.labels().iter().filter(|&&label| label == 0.).count();
        assert_eq!((zeros, ones), (150, 150));
    }

    #[test]
    fn odd_count_puts_the_extra_point_on_the_inner_moon() {
        let dataset = make_moons(7, 0., 1).unwrap();
        let ones = dataset.labels().iter().filter(|&&label| label == 1.).count();
        assert_eq!(ones, 4);
    }

    #[test]
    fn noiseless_points_lie_on_their_circle() {
        let dataset = make_moons(50, 0., 0).unwrap();

        for (point, &label) in dataset.x().rows().into_iter().zip(dataset.labels()) {
            let (cx, cy) = if label == 0. { (0., 0.) } else { (1., 0.5) };
            let radius = ((point[0] - cx).powi(2) + (point[1] - cy).powi(2)).sqrt();
            assert!((radius - 1.).abs() < 1e-5);
        }
    }

    #[test]
    fn same_seed_same_dataset() {
        assert_eq!(make_moons(100, 0.2, 42).unwrap(), make_moons(100, 0.2, 42).unwrap());
        assert_ne!(make_moons(100, 0.2, 42).unwrap(), make_moons(100, 0.2, 43).unwrap());
    }

    #[test]
    fn rejects_invalid_arguments() {
        assert!(make_moons(0, 0.2, 42).is_err());
        assert!(make_moons(10, -0.1, 42).is_err());
        assert!(make_moons(10, f32::NAN, 42).is_err());
    }
}
