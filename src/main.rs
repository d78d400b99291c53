use std::{
    env,
    io::{self, IsTerminal},
    path::Path,
};

use anyhow::Result;
use log::info;
use moons_mlp::{
    CONFIGURATIONS, ExperimentConfig, ResultsTable, experiment,
    plot::{self, LossCurve},
};

fn main() -> Result<()> {
    env_logger::init();

    let config = match env::args_os().nth(1) {
        Some(path) => ExperimentConfig::load(Path::new(&path))?,
        None => ExperimentConfig::default(),
    };
    info!("running with {config:?}");

    let comparison = experiment::run(&config, &CONFIGURATIONS)?;
    print!("{}", ResultsTable::new(&comparison.results));

    if !config.plot {
        return Ok(());
    }

    if !io::stdout().is_terminal() {
        info!("stdout is not a terminal, skipping the loss curve plot");
        return Ok(());
    }

    let caption = comparison
        .last_result()
        .map(|result| result.configuration.to_string())
        .unwrap_or_default();
    let curve = LossCurve::new(caption, comparison.last_model.loss_curve());
    plot::show_loss_curve(&curve)
}
