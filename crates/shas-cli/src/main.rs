//! Shas CLI - Extract and consolidate Talmud commentary text.

use clap::Parser;
use shas_cli::commands;
use shas_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // Log to stderr; -v wins over RUST_LOG
    let filter = if cli.verbose > 0 {
        EnvFilter::new(cli.log_level())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()))
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> shas_cli::Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Extract(args) => {
            commands::execute_extract(args, &config, &formatter)?;
        }
        Command::Summary(args) => {
            commands::execute_summary(args, &config, &formatter)?;
        }
        Command::Rules => {
            commands::execute_rules(&config, &formatter)?;
        }
    }

    Ok(())
}
