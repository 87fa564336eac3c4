//! PeopleDesk console shell composition root.

#![forbid(unsafe_code)]

mod cli;
mod console_config;
mod shell;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use peopledesk_application::{AccessControlService, SessionPersistence};
use peopledesk_core::AppResult;
use peopledesk_infrastructure::{
    FileSessionStore, InMemorySessionStore, RedisSessionStore, SeedCredentialStore,
};
use tracing::{debug, info};

use crate::cli::Cli;
use crate::console_config::{ConsoleConfig, SessionBackendConfig, init_tracing};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> AppResult<String> {
    let config = ConsoleConfig::load()?;

    let credential_store = match config.credentials_file.as_deref() {
        Some(path) => {
            info!(credentials_file = %path.display(), "loading seeded accounts");
            SeedCredentialStore::from_path(path).await?
        }
        None => SeedCredentialStore::demo()?,
    };
    let accounts = credential_store.accounts();

    let service = AccessControlService::new(
        Arc::new(credential_store),
        build_session_persistence(&config.session_backend)?,
    )
    .with_session_key(config.session_key.as_str());

    let restored = service.restore().await;
    debug!(restored = restored.is_some(), "startup restore finished");

    shell::execute(&service, &accounts, cli.command).await
}

fn build_session_persistence(
    backend: &SessionBackendConfig,
) -> AppResult<Arc<dyn SessionPersistence>> {
    let persistence: Arc<dyn SessionPersistence> = match backend {
        SessionBackendConfig::File { directory } => {
            Arc::new(FileSessionStore::new(directory.clone()))
        }
        SessionBackendConfig::Memory => Arc::new(InMemorySessionStore::new()),
        SessionBackendConfig::Redis { url, ttl_seconds } => Arc::new(
            RedisSessionStore::open(url, "peopledesk")?.with_ttl_seconds(*ttl_seconds),
        ),
    };

    Ok(persistence)
}
