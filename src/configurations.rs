use std::fmt;

use machine_learning::arch::activations::Activation;

/// One hyperparameter combination to compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Configuration {
    pub hidden_layer_sizes: &'static [usize],
    pub activation: Activation,
}

impl Configuration {
    pub const fn new(hidden_layer_sizes: &'static [usize], activation: Activation) -> Self {
        Self {
            hidden_layer_sizes,
            activation,
        }
    }

    /// The hidden layer sizes written as a tuple, `(3,)` or `(3, 5)`.
    pub fn hidden_layers(&self) -> String {
        match self.hidden_layer_sizes {
            [size] => format!("({size},)"),
            sizes => {
                let sizes: Vec<String> = sizes.iter().map(usize::to_string).collect();
                format!("({})", sizes.join(", "))
            }
        }
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.hidden_layers(), self.activation)
    }
}

/// Every configuration the experiment trains, in order.
pub static CONFIGURATIONS: [Configuration; 9] = [
    Configuration::new(&[3], Activation::Relu),
    Configuration::new(&[3], Activation::Tanh),
    Configuration::new(&[3], Activation::Logistic),
    Configuration::new(&[3, 5], Activation::Relu),
    Configuration::new(&[3, 5], Activation::Tanh),
    Configuration::new(&[3, 5], Activation::Logistic),
    Configuration::new(&[3, 10], Activation::Relu),
    Configuration::new(&[3, 10], Activation::Tanh),
    Configuration::new(&[3, 10], Activation::Logistic),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_layers_as_tuples() {
        assert_eq!(CONFIGURATIONS[0].hidden_layers(), "(3,)");
        assert_eq!(CONFIGURATIONS[4].hidden_layers(), "(3, 5)");
        assert_eq!(CONFIGURATIONS[8].to_string(), "(3, 10) logistic");
    }

    #[test]
    fn every_combination_once() {
        for (i, a) in CONFIGURATIONS.iter().enumerate() {
            for b in &CONFIGURATIONS[i + 1..] {
                assert_ne!(a, b);
            }
        }

        let last = CONFIGURATIONS[CONFIGURATIONS.len() - 1];
        assert_eq!(last.hidden_layer_sizes, [3, 10]);
        assert_eq!(last.activation, Activation::Logistic);
    }
}
