mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use innova_core::{Connection, Innova};

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Shell completions generation
        Command::Completions(ref args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "innova", &mut std::io::stdout());
            Ok(())
        }

        // Everything else talks to a unit
        ref cmd => {
            let file = config::load_config()?;
            let connection = config::resolve(&file, &cli.global)?;
            let target = describe(&connection.connection);
            let unit = Innova::connect(&connection)?;

            tracing::debug!(command = ?cmd, %target, "dispatching command");
            commands::dispatch(cmd, &unit, &cli.global, &target).await
        }
    }
}

fn describe(connection: &Connection) -> String {
    match connection {
        Connection::Local { host } => host.clone(),
        Connection::Cloud { serial, .. } => format!("cloud unit {serial}"),
    }
}
