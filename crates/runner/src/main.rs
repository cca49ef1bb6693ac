use distmarket_runner::{ScenarioConfig, ScenarioRunner};
use log::info;

fn print_help() {
    eprintln!(
        r#"Distribution Market Runner - replays a scripted market scenario

USAGE:
    distmarket-runner [OPTIONS]

OPTIONS:
    --config <PATH>     Load the scenario from a JSON file
    --help              Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG            Log level filter (default: info)

EXAMPLES:
    # Run the built-in demo scenario
    distmarket-runner

    # Run a scenario file
    distmarket-runner --config scenarios/demo.json
"#
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--config" | "-c" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --config requires a path argument");
                    std::process::exit(1);
                }
                config_path = Some(args[i].clone());
            }
            arg => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let config = if let Some(path) = config_path {
        info!("Loading scenario from: {}", path);
        ScenarioConfig::from_file(&path)?
    } else {
        info!("Using built-in demo scenario");
        ScenarioConfig::demo()
    };
    info!("Accounts: {}", config.accounts.len());
    info!("Steps: {}", config.steps.len());

    let report = ScenarioRunner::new(config)?.run()?;
    let failures = report.failures().count();

    println!("{}", serde_json::to_string_pretty(&report)?);
    info!(
        "Done: {} steps, {} failed, invariants hold: {}",
        report.outcomes.len(),
        failures,
        report.invariants_hold
    );

    Ok(())
}
