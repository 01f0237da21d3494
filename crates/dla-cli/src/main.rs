use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

use dla_cli::cli::{Cli, Commands};

mod commands;

use commands::{export, inspect, report};

fn main() {
    let cli = Cli::parse();

    // Data output goes to stdout; logs stay on stderr so `--format json`
    // output pipes cleanly.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    match &cli.command {
        Some(Commands::Inspect {
            paths,
            data_dir,
            region,
            theme,
            format,
        }) => {
            let result = inspect::handle(
                paths,
                data_dir.as_deref(),
                region.as_deref(),
                theme.as_deref(),
                *format,
            );
            finish("inspect", result);
        }
        Some(Commands::Report {
            paths,
            data_dir,
            state,
            region,
            theme,
            format,
        }) => {
            let result = report::handle(
                paths,
                data_dir.as_deref(),
                state.as_deref(),
                region.as_deref(),
                theme.as_deref(),
                *format,
            );
            finish("report", result);
        }
        Some(Commands::Export { command }) => {
            let result = export::handle(command);
            finish("export", result);
        }
        None => {
            info!("No subcommand provided. Use `dla-cli --help` for more information.");
        }
    }
}

fn finish(command: &str, result: anyhow::Result<()>) {
    match result {
        Ok(()) => info!("{command} complete"),
        Err(e) => {
            error!("{command} failed: {e:?}");
            std::process::exit(1);
        }
    }
}
