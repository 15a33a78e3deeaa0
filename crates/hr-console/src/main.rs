use clap::Parser;
use hr_client_core::{Client, FileStorage, SessionManager, TracingNavigator};
use hr_console::{cli::Cli, commands, configuration::get_configuration};
use hr_shared::telemetry::{init_tracing, TraceSink};
use std::sync::Arc;
use tracing::error;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let sink = if cli.is_to_std_out {
        TraceSink::Stdout
    } else {
        TraceSink::File
    };
    match init_tracing("hr_console", "info", sink) {
        Ok(Some(path)) => eprintln!("Traces being written to: {path:?}"),
        Ok(None) => {}
        Err(e) => eprintln!("Failed to start tracing: {e:#}"),
    }

    let configuration = get_configuration()?;
    let storage = FileStorage::open(&configuration.client.storage_path);
    let client = Client::new(
        configuration.client.base_url().to_string(),
        SessionManager::new(storage),
        Arc::new(TracingNavigator),
    );

    let outcome = commands::run(&client, &configuration.client, cli.command).await;
    if let Err(e) = &outcome {
        error!(?e, "command failed");
    }
    outcome
}
