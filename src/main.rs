//! CLI entry point for llmcompress.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use llmcompress_rs::cli::Cli;
use llmcompress_rs::{Driver, HuggingfaceLock, LlmCompressor, Result};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut driver = Driver::new(cli.config(), LlmCompressor::new(&cli.python));
    if let Some(path) = &cli.lock_file {
        tracing::info!("Checking lock file: {}", path.display());
        driver = driver.with_lock(HuggingfaceLock::from_file(path)?);
    }

    let mut stdout = std::io::stdout().lock();
    if cli.dry_run {
        driver.dry_run(&mut stdout)
    } else {
        driver.run(&mut stdout)
    }
}
