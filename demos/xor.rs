use log::info;
use ndarray::arr2;
use portnet::{
    config::TrainConfig,
    data::Dataset,
    node::{Dense, Nonlinearity, Sigmoid},
    trainer::Trainer,
    Network,
};

fn main() -> portnet::Result<()> {
    env_logger::init();

    let config = TrainConfig::from_json(
        r#"{ "learning_rate": 0.5, "epochs": 5000, "log_every": 500 }"#,
    )?;
    let trainer = Trainer::new(config);

    let inputs = arr2(&[[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]]);
    let targets = arr2(&[[0.0], [1.0], [1.0], [0.0]]);
    let mut dataset = trainer.prepare(Dataset::new(inputs.clone(), targets)?);

    let mut network = Network::new(2);
    network.add_node_with(|port| Dense::new(port, 4, trainer.config().optimizer()))?;
    network.add_node_with(|port| Nonlinearity::new(port, Sigmoid))?;
    network.add_node_with(|port| Dense::new(port, 1, trainer.config().optimizer()))?;
    network.add_node_with(|port| Nonlinearity::new(port, Sigmoid))?;

    let history = trainer.fit(&mut network, &mut dataset)?;
    info!("final loss: {:?}", history.last());

    for input in inputs.rows() {
        let output = network.predict(input)?;
        println!("{} xor {} = {:.3}", input[0], input[1], output[0]);
    }
    Ok(())
}
