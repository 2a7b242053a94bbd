use anyhow::Result;
use log::info;

use txn_matcher::{cli, logging, orchestrator};

fn main() -> Result<()> {
    logging::init_tracing_from_env();

    let cfg = match cli::parse_cli_to_app_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("configuration error: {}", e);
            std::process::exit(2);
        }
    };

    let summary = orchestrator::run(&cfg)?;
    info!("{}", summary);
    println!("{}", summary);
    Ok(())
}
