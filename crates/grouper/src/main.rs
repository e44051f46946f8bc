use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use grouper::cli::Cli;
use grouper::config::Config;
use grouper::coordinator::Coordinator;
use grouper::storage;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    let filter = match &cli.log_filter {
        Some(directives) => EnvFilter::try_new(directives)?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| "grouper=info".into()),
    };
    let fmt_layer = if cli.log_json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();

    let config = Config::from_env();
    let caches = storage::open_caches(&config).await?;
    let coordinator = Coordinator::new(caches);

    let output = cli.command.run(&coordinator).await?;
    println!("{}", output.to_json(cli.compact)?);

    if output.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        tracing::warn!("Command finished with failed steps");
        Ok(ExitCode::FAILURE)
    }
}
