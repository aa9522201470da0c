//! Roast My Resume - brutal AI resume feedback in the terminal

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roast_my_resume::cli;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roast_my_resume=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = cli::Args::parse();
    let config = args.load_config()?;

    tracing::debug!(model = %config.model, timeout_secs = ?config.timeout_secs, "Configuration loaded");

    cli::run(args, config).await
}
