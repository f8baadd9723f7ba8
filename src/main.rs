use dotenvy::dotenv;
use plant_tracker::{
    cli::{Cli, commands},
    config,
    errors::Result,
};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // 1. Initialize tracing (stderr, so command output on stdout stays clean)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // 2. Load .env file; env vars can be set externally
    dotenv().ok();

    let cli = Cli::try_parse_checked_from(std::env::args_os()).unwrap_or_else(|e| e.exit());
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        // Already reported to the user as a rejection
        Err(e) if e.is_validation() => ExitCode::FAILURE,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    // 3. Load the application configuration
    let mut app_config = config::load_app_configuration(cli.config.as_deref())?;
    if let Some(backend) = cli.store {
        info!("--store selects {backend} storage");
        app_config.storage.backend = backend;
    }

    // 4. Run the command against the configured storage
    commands::run(cli.command, &app_config).await
}
