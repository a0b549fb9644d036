use log::{debug, info};

use crate::{
    config::TrainConfig,
    data::Dataset,
    error::{Result, ShapeError},
    loss::mean_squared,
    network::Network,
    Float,
};

/// Runs [`Network::train_sample`] over a [`Dataset`] for a configured number of epochs.
pub struct Trainer {
    config: TrainConfig,
}

impl Trainer {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    /// Train `network` on `dataset` and return the mean loss of each epoch.
    ///
    /// The dataset's sampler decides the visiting order; use [`Dataset::shuffle`] (or
    /// [`Trainer::prepare`]) to get a new random order each epoch.
    pub fn fit(&self, network: &mut Network, dataset: &mut Dataset) -> Result<Vec<Float>> {
        let epochs = self.config.epochs;
        let mut history = Vec::with_capacity(epochs);

        for epoch in 0..epochs {
            let mut total_loss = 0.0;
            let mut n_samples = 0;
            for (input, target) in dataset.samples() {
                total_loss += network.train_sample(input, target)?;
                n_samples += 1;
            }
            let loss = if n_samples == 0 {
                0.0
            } else {
                total_loss / n_samples as Float
            };

            if epoch % self.config.log_every.max(1) == 0 || epoch + 1 == epochs {
                info!("epoch {epoch}: loss = {loss}");
            } else {
                debug!("epoch {epoch}: loss = {loss}");
            }
            history.push(loss);
        }

        Ok(history)
    }

    /// Apply the configured sampling order to `dataset`.
    pub fn prepare(&self, dataset: Dataset) -> Dataset {
        if self.config.shuffle {
            dataset.shuffle()
        } else {
            dataset
        }
    }

    /// Mean squared error of the network's predictions over `dataset`, without training.
    pub fn evaluate(&self, network: &mut Network, dataset: &mut Dataset) -> Result<Float> {
        let mut total_loss = 0.0;
        let mut n_samples = 0;
        for (input, target) in dataset.samples() {
            let prediction = network.predict(input)?;
            ShapeError::check("evaluate target", prediction.len(), target.len())?;
            total_loss += mean_squared((&prediction - &target).view());
            n_samples += 1;
        }
        Ok(if n_samples == 0 {
            0.0
        } else {
            total_loss / n_samples as Float
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use ndarray::arr2;

    use crate::node::{Identity, Nonlinearity};

    fn config(epochs: usize) -> TrainConfig {
        TrainConfig {
            epochs,
            shuffle: false,
            ..TrainConfig::default()
        }
    }

    #[test]
    fn fit_reports_one_loss_per_epoch() {
        let mut network = Network::new(1);
        network
            .add_node_with(|port| Nonlinearity::new(port, Identity))
            .unwrap();
        let mut dataset = Dataset::new(arr2(&[[1.0], [2.0]]), arr2(&[[0.0], [0.0]])).unwrap();

        let history = Trainer::new(config(3)).fit(&mut network, &mut dataset).unwrap();
        assert_eq!(3, history.len());
        // An identity pipeline has nothing to learn, so the loss stays (1 + 4) / 2.
        for loss in history {
            assert_relative_eq!(2.5, loss);
        }
    }

    #[test]
    fn evaluate_does_not_train() {
        let mut network = Network::new(1);
        network
            .add_node_with(|port| Nonlinearity::new(port, Identity))
            .unwrap();
        let mut dataset = Dataset::new(arr2(&[[3.0]]), arr2(&[[1.0]])).unwrap();
        let trainer = Trainer::new(config(1));
        assert_relative_eq!(4.0, trainer.evaluate(&mut network, &mut dataset).unwrap());
        assert_relative_eq!(4.0, trainer.evaluate(&mut network, &mut dataset).unwrap());
    }

    #[test]
    fn evaluate_rejects_target_of_wrong_width() {
        let mut network = Network::new(3);
        network
            .add_node_with(|port| Nonlinearity::new(port, Identity))
            .unwrap();
        let trainer = Trainer::new(config(1));

        for targets in [arr2(&[[1.0]]), arr2(&[[1.0, 2.0]])] {
            let mut dataset = Dataset::new(arr2(&[[1.0, 2.0, 3.0]]), targets).unwrap();
            let err = trainer.evaluate(&mut network, &mut dataset).unwrap_err();
            let shape = err.as_shape().unwrap();
            assert_eq!(3, shape.expected);
            assert_eq!(dataset.target_dim(), shape.got);
        }
    }

    #[test]
    fn prepare_follows_shuffle_flag() {
        let trainer = Trainer::new(TrainConfig::default());
        let dataset = Dataset::new(arr2(&[[0.0], [1.0]]), arr2(&[[0.0], [1.0]])).unwrap();
        let mut dataset = trainer.prepare(dataset);
        assert_eq!(2, dataset.samples().count());
    }
}
