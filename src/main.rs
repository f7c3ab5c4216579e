use clap::Parser;
use factory_sim::core::execution::simulation_driver::ConsoleObserver;
use factory_sim::prompt::read_config;
use factory_sim::{SimTime, SimulationConfig, SimulationDriver, MAX_TIME};
use log::info;
use std::io;

/// Discrete-event simulation of a five-stage production line
#[derive(Debug, Parser)]
#[command(name = "factory-sim", version)]
struct Args {
    /// Master seed for every random stream; drawn from OS entropy when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Last simulated time at which events are processed
    #[arg(long, default_value_t = MAX_TIME)]
    horizon: SimTime,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let base = SimulationConfig::new()
        .with_seed(args.seed)
        .with_horizon(args.horizon);
    let config = read_config(io::stdin().lock(), io::stdout(), base)?;

    let mut driver = SimulationDriver::new(config)?;
    driver.add_observer(Box::new(ConsoleObserver::stdout()));
    let report = driver.run()?;

    info!("Replay this run with --seed {}", report.seed);
    Ok(())
}
