use std::io::IsTerminal;

use clap::Parser;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use repo_provisioner_cli::commands::provision_cmd;
use repo_provisioner_cli::config::{Cli, LOG_FILTER_VAR};
use repo_provisioner_cli::errors::Error;

fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(std::io::stdout().is_terminal()))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var(LOG_FILTER_VAR)
                .from_env_lossy(),
        )
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if Cli::is_informational(&e) => e.exit(),
        Err(e) => {
            print!("{e}");
            std::process::exit(Error::Arguments(e).exit_code());
        }
    };

    let result = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(Error::Runtime)
        .and_then(|runtime| runtime.block_on(provision_cmd::execute(&cli)));

    match result {
        Ok(report) => {
            println!("{report}");
            std::process::exit(0);
        }
        Err(e) => {
            println!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
