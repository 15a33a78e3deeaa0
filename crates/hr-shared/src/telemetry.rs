//! Tracing setup shared by the console and the integration tests
//!
//! Traces are written as bunyan formatted JSON either to a file under
//! `traces/`, to stdout, or discarded. `RUST_LOG` overrides the default filter.

use anyhow::Context;
use std::{
    fs::{create_dir_all, File},
    path::PathBuf,
};
use tracing::{subscriber::set_global_default, Subscriber};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{fmt::MakeWriter, layer::SubscriberExt, EnvFilter, Registry};

const TRACE_FOLDER: &str = "traces";

/// Where trace output should go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceSink {
    /// New file per run in the trace folder
    File,
    Stdout,
    Discard,
}

/// Compose the layers into a subscriber writing to `sink`
///
/// `default_directive` is used when `RUST_LOG` is not set, see
/// <https://docs.rs/tracing-subscriber/0.3.19/tracing_subscriber/filter/struct.EnvFilter.html#directives>
fn build_subscriber<W>(
    app_name: &str,
    default_directive: &str,
    writer: W,
) -> impl Subscriber + Sync + Send
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(BunyanFormattingLayer::new(app_name.to_string(), writer))
}

/// Registers the global subscriber. Must only be called once per process
///
/// Returns the path of the trace file if one was created. If the file cannot
/// be created output falls back to stdout.
pub fn init_tracing(
    app_name: &str,
    default_directive: &str,
    sink: TraceSink,
) -> anyhow::Result<Option<PathBuf>> {
    LogTracer::init().context("failed to redirect log records to tracing")?;
    let trace_file = match sink {
        TraceSink::File => match create_trace_file(app_name) {
            Ok((file, path)) => {
                install(build_subscriber(app_name, default_directive, file))?;
                return Ok(Some(path));
            }
            Err(e) => {
                eprintln!("Failed to create trace file, tracing to stdout instead: {e:#}");
                None
            }
        },
        TraceSink::Discard => {
            install(build_subscriber(app_name, default_directive, std::io::sink))?;
            return Ok(None);
        }
        TraceSink::Stdout => None,
    };
    install(build_subscriber(app_name, default_directive, std::io::stdout))?;
    Ok(trace_file)
}

fn install(subscriber: impl Subscriber + Sync + Send) -> anyhow::Result<()> {
    set_global_default(subscriber).context("failed to set global tracing subscriber")
}

/// Returns a handle to the file created and the file path
fn create_trace_file(app_name: &str) -> anyhow::Result<(File, PathBuf)> {
    let folder = PathBuf::from(TRACE_FOLDER);
    create_dir_all(&folder).context("failed to create trace folder")?;
    let filename = format!(
        "{}_{app_name}.log",
        chrono::Local::now().format("%Y-%m-%dT%H-%M-%S")
    );
    let path = folder.join(&filename);
    let file =
        File::create(&path).with_context(|| format!("failed to create trace file: {filename:?}"))?;
    Ok((file, path))
}
