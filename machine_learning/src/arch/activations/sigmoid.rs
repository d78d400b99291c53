/// The standard logistic function, `1 / (1 + e^-z)`.
pub fn logistic(z: f32) -> f32 {
    1. / (1. + (-z).exp())
}

/// The derivative of `logistic`, written in terms of its output so large negative `z` does not
/// overflow into NaN.
pub fn logistic_prime(z: f32) -> f32 {
    let s = logistic(z);
    s * (1. - s)
}
