use std::fs::File;
use std::io::BufReader;
use std::time::Instant;
use clap::Parser;
use log::info;
use assoclib::config::SimulationConfig;
use assoclib::simulator::Simulator;

#[cfg(debug_assertions)]
const DEBUG_DEFAULT: bool = true;

#[cfg(not(debug_assertions))]
const DEBUG_DEFAULT: bool = false;

#[derive(Parser, Debug)]
#[command(about = String::from("Set-associative cache simulator"))]
struct Args {
    /// JSON simulation configuration
    config: String,

    /// Replay a recorded address trace instead of generating one
    #[arg(short, long)]
    trace: Option<String>,

    /// Overrides the configured seed
    #[arg(long)]
    seed: Option<u64>,

    /// Overrides the configured number of steps
    #[arg(long)]
    steps: Option<u64>,

    /// Include the set/way grid in the report
    #[arg(short, long)]
    grid: bool,

    #[arg(short, long)]
    performance: bool,

    #[arg(short, long, default_value_t = DEBUG_DEFAULT)]
    debug: bool,
}

fn main() -> Result<(), String> {
    let start = Instant::now();
    env_logger::init();
    let args = Args::parse();
    let config_file = File::open(&args.config).map_err(|e| format!("Couldn't open the config file at path {}: {e}", args.config))?;
    let mut config: SimulationConfig = serde_json::from_reader(BufReader::new(config_file)).map_err(|e| format!("Couldn't parse the config file: {e}"))?;
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(steps) = args.steps {
        config.total_steps = steps;
    }
    let mut simulator = match &args.trace {
        Some(path) => Simulator::from_trace_file(config, path).map_err(|e| format!("Couldn't set up the simulation for trace {path}: {e}"))?,
        None => Simulator::new(config).map_err(|e| format!("Invalid configuration: {e}"))?,
    };
    info!("simulating {:?} over {:?}", simulator.config().replacement_policy, simulator.config().access_pattern);
    simulator.run_configured().map_err(|e| format!("Invalid configuration: {e}"))?;
    let report = simulator.report(args.grid);
    println!("{}", serde_json::to_string_pretty(&report).map_err(|e| format!("Couldn't serialise the output {e}"))?);
    if args.performance {
        let end = Instant::now();
        let simulation_time = simulator.execution_time();
        let total_time = end - start;
        println!("Simulation time: {}s", simulation_time.as_nanos() as f64 / 1e9);
        println!("Total execution time (includes initial parsing, configuration, and output): {}s", total_time.as_nanos() as f64 / 1e9)
    }
    if args.debug {
        #[cfg(debug_assertions)]
        println!("Running the debug binary, debug mode is enabled by default. If benchmarking, do not use this binary, re-compile with the --release argument when using cargo run");
        println!("Parsed input configuration: {:?}", simulator.config());
        let cache = simulator.cache();
        println!("Valid cache lines: {}, invalid cache lines: {}", cache.valid_line_count(), cache.invalid_line_count());
    }
    Ok(())
}
