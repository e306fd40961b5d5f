use std::process::ExitCode;

use tracing::{error, info, warn};

use ssis::{Config, CredentialStore, Database, WebServer};

#[tokio::main]
async fn main() -> ExitCode {
    // Load configuration
    let mut config = match Config::load("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };
    config.apply_env_overrides();

    // Initialize logging
    if let Err(e) = ssis::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        ssis::logging::init_console_only(&config.logging.level);
    }

    info!("SSIS - Simple Student Information System");

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {e}");
        return ExitCode::FAILURE;
    }

    let db = match Database::open(&config.database.path).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to open database: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = CredentialStore::new(db.pool())
        .ensure_initial_account(&config.admin)
        .await
    {
        error!("Failed to create initial account: {e}");
        db.close().await;
        return ExitCode::FAILURE;
    }

    let server = match WebServer::new(&config.web, db.clone()) {
        Ok(server) => server,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for shutdown signal: {e}");
            std::future::pending::<()>().await;
        }
        info!("Shutdown requested");
    };

    let result = server.run_until(shutdown).await;
    db.close().await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Web server error: {e}");
            ExitCode::FAILURE
        }
    }
}
