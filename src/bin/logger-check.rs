use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use request_logger::config::loader::{load_config, ConfigError};

#[derive(Parser)]
#[command(name = "logger-check")]
#[command(about = "Validate a request logger config file", long_about = None)]
struct Cli {
    /// Config file to check.
    path: PathBuf,

    /// Print the resolved snapshot as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match load_config(&cli.path) {
        Ok(resolved) => {
            if cli.json {
                match serde_json::to_string_pretty(&resolved.logging) {
                    Ok(text) => println!("{text}"),
                    Err(e) => {
                        eprintln!("Error: {e}");
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                println!(
                    "OK: enabled={} logging_level={}",
                    resolved.logging.enabled(),
                    resolved.logging.level()
                );
            }
            ExitCode::SUCCESS
        }
        Err(ConfigError::Validation(errors)) => {
            eprintln!("{} validation error(s) in {}:", errors.len(), cli.path.display());
            for error in errors {
                eprintln!("  - {error}");
            }
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
