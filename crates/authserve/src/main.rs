use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use fileserver::{logging, FileServerApi, ServerConfig};

mod cli;

use cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    let _ = dotenv::dotenv();

    let cli = Cli::parse();

    // Console always, file too when a log path is set
    let log_path = (!cli.logpath.is_empty()).then(|| Path::new(&cli.logpath));
    let _log_guard = match logging::init(log_path) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> fileserver::Result<()> {
    let config = ServerConfig::new(cli.port, &cli.path, &cli.users, &cli.logpath)?;

    tracing::info!("===== File server =====");
    tracing::info!("Address: http://localhost:{}", config.port);
    tracing::info!("Shared path: {}", config.root.display());
    tracing::info!("Users: {}", config.credentials.usernames().join(", "));
    if let Some(log_path) = &config.log_path {
        tracing::info!("Log file: {}", log_path.display());
    }
    if config.credentials.is_fallback() {
        tracing::warn!(
            "No users configured, using the default account {}. Set --users before exposing this server",
            fileserver::DEFAULT_USERNAME
        );
    }
    tracing::info!("(press Ctrl+C to stop)");

    FileServerApi::from_config(&config)
        .serve(config.bind_addr())
        .await
}
