use anyhow::Result;
use clap::Parser;
use job_application::cli::{handle_command, Cli};
use job_application::environment::CONFIG_FILE;
use job_application::logging::init_logging;
use job_application::EnvironmentConfig;
use std::path::Path;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = EnvironmentConfig::load()?;
    if let Some(parent) = config.log_file.as_deref().and_then(|p| p.parent()) {
        std::fs::create_dir_all(parent)?;
    }
    init_logging(config.log_file.as_deref())?;

    if !Path::new(CONFIG_FILE).exists() {
        warn!("{} not found, running with default configuration", CONFIG_FILE);
    }
    info!("Applications: {}", config.output_path.display());
    info!("HTML cache: {}", config.cache_path.display());

    handle_command(cli.command, &config).await
}
