use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    optimizer::GradientDescent,
    Float,
};

/// Hyper-parameters of a training run.
///
/// Every field has a default, so a JSON document only needs the keys it overrides:
///
/// ```
/// let config = portnet::config::TrainConfig::from_json(r#"{ "epochs": 20 }"#).unwrap();
/// assert_eq!(20, config.epochs);
/// assert!(config.shuffle);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub learning_rate: Float,
    pub epochs: usize,
    /// Visit samples in a new random order each epoch.
    pub shuffle: bool,
    /// Log the epoch loss at `info` level every this many epochs.
    pub log_every: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.01,
            epochs: 100,
            shuffle: true,
            log_every: 10,
        }
    }
}

impl TrainConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(Error::Config(format!(
                "learning_rate must be a positive number, got {}",
                self.learning_rate
            )));
        }
        if self.epochs == 0 {
            return Err(Error::Config("epochs must be at least 1".into()));
        }
        if self.log_every == 0 {
            return Err(Error::Config("log_every must be at least 1".into()));
        }
        Ok(())
    }

    /// The optimizer every parameterised node of the run should use.
    pub fn optimizer(&self) -> GradientDescent {
        GradientDescent::new(self.learning_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn empty_document_gives_defaults() {
        assert_eq!(TrainConfig::default(), TrainConfig::from_json("{}").unwrap());
    }

    #[test]
    fn overrides_selected_fields() {
        let config =
            TrainConfig::from_json(r#"{ "learning_rate": 0.5, "shuffle": false }"#).unwrap();
        assert_relative_eq!(0.5, config.learning_rate);
        assert!(!config.shuffle);
        assert_eq!(100, config.epochs);
        assert_relative_eq!(0.5, config.optimizer().learning_rate());
    }

    #[test]
    fn rejects_non_positive_learning_rate() {
        let err = TrainConfig::from_json(r#"{ "learning_rate": 0.0 }"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn rejects_zero_epochs() {
        let err = TrainConfig::from_json(r#"{ "epochs": 0 }"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn reports_malformed_json() {
        let err = TrainConfig::from_json(r#"{ "epochs": "many" }"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = TrainConfig::from_path("does/not/exist.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
