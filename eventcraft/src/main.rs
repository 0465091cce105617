use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
use cli::{Cli, Commands};

fn main() -> Result<()> {
    // Parse CLI arguments first to get verbosity level
    let cli = Cli::parse();

    // Initialize tracing with appropriate verbosity
    let filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    match cli.command {
        Some(Commands::ExampleConfig) => cli::commands::example_config::execute(),
        Some(Commands::Run(args)) => run(args, &cli.config)?,
        None => run(cli.run, &cli.config)?,
    }

    Ok(())
}

fn run(args: cli::app::RunArgs, config: &Option<std::path::PathBuf>) -> Result<()> {
    info!("Run command: {:?}", args);
    // Stages are awaited in order on one thread
    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    runtime.block_on(cli::commands::run::execute(args, config.as_deref()))
}
