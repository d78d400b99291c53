use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;

/// The runtime settings of an experiment. Every field is optional in a settings file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExperimentConfig {
    pub n_samples: usize,
    /// The standard deviation of the gaussian noise added to the moons.
    pub noise: f32,
    /// Seeds the data generation, the split and every classifier.
    pub seed: u64,
    pub test_fraction: f64,
    /// The maximum amount of epochs per classifier.
    pub max_iter: usize,
    /// Whether to show the loss curve of the last classifier.
    pub plot: bool,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            n_samples: 300,
            noise: 0.2,
            seed: 42,
            test_fraction: 0.3,
            max_iter: 1000,
            plot: true,
        }
    }
}

impl ExperimentConfig {
    /// Loads the settings from a JSON file, unset fields keep their default.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("cannot read settings file '{}'", path.display()))?;

        Self::from_json(&content)
            .with_context(|| format!("invalid settings file '{}'", path.display()))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ExperimentConfig::from_json(r#"{ "seed": 7, "plot": false }"#).unwrap();

        assert_eq!(
            config,
            ExperimentConfig {
                seed: 7,
                plot: false,
                ..ExperimentConfig::default()
            }
        );
    }

    #[test]
    fn empty_object_is_the_default() {
        let config = ExperimentConfig::from_json("{}").unwrap();
        assert_eq!(config, ExperimentConfig::default());
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(ExperimentConfig::from_json(r#"{ "epochs": 10 }"#).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = ExperimentConfig::load(Path::new("does/not/exist.json")).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.json"));
    }
}
