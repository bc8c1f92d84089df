use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use lazylog::config::{load_config, BackendKind, ConfigError, FacadeConfig};
use lazylog::config::validation::direct_settings_ignored;
use lazylog::dispatch::LevelTable;

#[derive(Parser)]
#[command(name = "lazylog-cli")]
#[command(about = "Inspect lazylog configuration files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and validate a configuration file
    Validate {
        path: PathBuf,
    },
    /// Print the threshold each named logger would get
    Resolve {
        path: PathBuf,
        #[arg(required = true)]
        names: Vec<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { path } => validate(&path),
        Commands::Resolve { path, names } => resolve(&path, &names),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(ConfigError::Validation(errors)) => {
            eprintln!("Error: configuration is invalid:");
            for error in errors {
                eprintln!("  - {}", error);
            }
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn validate(path: &Path) -> Result<(), ConfigError> {
    let config = load_config(path)?;
    println!("{}: ok", path.display());
    print_summary(&config);
    if direct_settings_ignored(&config) {
        println!(
            "warning: [direct] settings have no effect with backend '{}'",
            config.backend.as_str()
        );
    }
    Ok(())
}

fn resolve(path: &Path, names: &[String]) -> Result<(), ConfigError> {
    let config = load_config(path)?;
    let table = LevelTable::from_config(config.level, &config.loggers);
    let width = names.iter().map(String::len).max().unwrap_or(0);
    for name in names {
        println!("{:<width$}  {}", name, table.resolve(name), width = width);
    }
    Ok(())
}

fn print_summary(config: &FacadeConfig) {
    println!("  backend: {}", config.backend.as_str());
    println!("  level:   {}", config.level);
    if config.backend == BackendKind::Direct {
        println!(
            "  direct:  format={:?} target={:?} prefix={}",
            config.direct.format, config.direct.target, config.direct.include_prefix
        );
    }
    let mut overrides: Vec<_> = config.loggers.iter().collect();
    overrides.sort();
    for (prefix, level) in overrides {
        println!("  {} = {}", prefix, level);
    }
}
