use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use kiln_engine::logging::{init_logging, LoggingConfig};
use kiln_engine::EngineConfig;
use kiln_lua::ScriptRunner;

#[derive(Parser)]
#[command(name = "kiln", version, about = "Runs a Lua script against the kiln engine")]
struct Cli {
    /// Script to load
    #[arg(default_value = "script.lua")]
    script: PathBuf,

    /// Global function called after the script is loaded
    #[arg(short, long, default_value = "script")]
    entry: String,

    /// Log filter, e.g. "debug" or "kiln_engine=trace"
    #[arg(long)]
    log: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(LoggingConfig {
        env_filter: cli.log.clone(),
        ..LoggingConfig::default()
    });

    match run(&cli.script, &cli.entry) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(script: &Path, entry: &str) -> anyhow::Result<()> {
    log::info!("kiln v{} running {}", env!("CARGO_PKG_VERSION"), script.display());

    let runner = ScriptRunner::new(EngineConfig::default()).context("failed to start the script runtime")?;
    runner.run(script, entry)?;

    log::info!("script finished");
    Ok(())
}
