use std::{env, path::Path};

use csv::Reader;
use log::info;
use portnet::{
    config::TrainConfig,
    data::Dataset,
    node::{Dense, Nonlinearity, Tanh},
    trainer::Trainer,
    Network,
};

// Rows of `x,y` with a header line.
fn load_xy(
    file_path: impl AsRef<Path>,
) -> Result<(Vec<Vec<f64>>, Vec<Vec<f64>>), Box<dyn std::error::Error>> {
    let mut reader = Reader::from_path(file_path)?;
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    for row in reader.records() {
        let row = row?;
        xs.push(vec![row[0].parse()?]);
        ys.push(vec![row[1].parse()?]);
    }
    Ok((xs, ys))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let data_path = args
        .next()
        .unwrap_or_else(|| "demos/data/sine.csv".to_string());
    let config = match args.next() {
        Some(config_path) => TrainConfig::from_path(config_path)?,
        None => TrainConfig {
            learning_rate: 0.02,
            epochs: 2000,
            ..TrainConfig::default()
        },
    };
    let trainer = Trainer::new(config);

    let (xs, ys) = load_xy(&data_path)?;
    info!("loaded {} samples from {data_path}", xs.len());
    let mut dataset = trainer.prepare(Dataset::from_rows(&xs, &ys)?);

    let mut network = Network::new(1);
    network.add_node_with(|port| Dense::new(port, 16, trainer.config().optimizer()))?;
    network.add_node_with(|port| Nonlinearity::new(port, Tanh))?;
    network.add_node_with(|port| Dense::new(port, 1, trainer.config().optimizer()))?;

    trainer.fit(&mut network, &mut dataset)?;
    println!("mse: {}", trainer.evaluate(&mut network, &mut dataset)?);
    Ok(())
}
