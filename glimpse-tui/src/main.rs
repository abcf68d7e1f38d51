use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event};
use tokio::sync::mpsc::{self, UnboundedReceiver};

use glimpse::api::{ApiClient, Backend};
use glimpse::app::App;
use glimpse::components::{ViewContext, ViewEvent};
use glimpse::config::ConfigManager;
use glimpse::logging::{self, LogConfig};
use glimpse::server_config::{ServerConfigManager, DEFAULT_SERVER_URL};
use glimpse::session::Session;
use glimpse::storage::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
use glimpse::terminal::{self, Tui};
use glimpse::ui;

/// Glimpse - browse and manage your posts and images from the terminal
#[derive(Parser)]
#[command(name = "glimpse")]
#[command(about = "A terminal client for the Glimpse photo and post network")]
#[command(version)]
struct Cli {
    /// Server URL to connect to (overrides GLIMPSE_SERVER_URL and saved config)
    #[arg(long, short)]
    server: Option<String>,

    /// Remember --server for future runs
    #[arg(long, requires = "server")]
    save_server: bool,

    /// Access credential (a signed token carrying the user's id and username)
    #[arg(long, env = "GLIMPSE_ACCESS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Store the credential given with --token for future runs
    #[arg(long, requires = "token")]
    remember: bool,

    /// Never read or write the stored credential
    #[arg(long)]
    no_persist: bool,

    /// Enable verbose logging
    #[arg(long, short)]
    verbose: bool,

    /// Log file location
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

// Load environment variables from .env file
// This allows GLIMPSE_SERVER_URL and GLIMPSE_ACCESS_TOKEN to be set without command-line args
fn load_env() {
    let _ = dotenv::dotenv();
}

fn credential_store(cli: &Cli) -> Box<dyn CredentialStore> {
    if cli.no_persist {
        return Box::new(MemoryCredentialStore::new());
    }
    match FileCredentialStore::new() {
        Ok(store) => Box::new(store),
        Err(e) => {
            log::warn!("Credential file unavailable, keeping it in memory: {:#}", e);
            Box::new(MemoryCredentialStore::new())
        }
    }
}

/// Command-line credential first, then the stored one
fn resolve_credential(cli: &Cli, store: &dyn CredentialStore) -> Option<String> {
    if let Some(token) = &cli.token {
        if cli.remember {
            if let Err(e) = store.store_credentials(token) {
                log::warn!("Failed to store credential: {:#}", e);
            }
        }
        return Some(token.clone());
    }

    match store.load_credentials() {
        Ok(token) => token,
        Err(e) => {
            log::warn!("Ignoring stored credential: {:#}", e);
            None
        }
    }
}

fn resolve_server_url(cli: &Cli, config_manager: Option<&ConfigManager>) -> Result<String> {
    let Some(manager) = config_manager else {
        return Ok(cli
            .server
            .clone()
            .or_else(|| std::env::var("GLIMPSE_SERVER_URL").ok())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string()));
    };

    let server_config = ServerConfigManager::new(manager.clone());
    let url = server_config.determine_server_url(cli.server.clone())?;
    if cli.save_server {
        if let Err(e) = server_config.save_server_url(url.clone()) {
            log::warn!("Failed to save server URL: {:#}", e);
        }
    }
    Ok(url)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Before parsing, so .env values feed the env-backed arguments
    load_env();
    let cli = Cli::parse();

    // Initialize logging system
    let mut log_config = if cli.verbose {
        LogConfig::verbose()
    } else {
        LogConfig::default()
    };
    if let Some(path) = &cli.log_file {
        log_config = log_config.with_file(path.clone());
    }
    logging::init_logging(&log_config)?;

    let config_manager = match ConfigManager::new() {
        Ok(manager) => Some(manager),
        Err(e) => {
            log::warn!("Running without a config directory: {:#}", e);
            None
        }
    };

    let server_url = resolve_server_url(&cli, config_manager.as_ref())?;
    log::info!(
        "Using {} at {}",
        ServerConfigManager::describe(&server_url),
        server_url
    );

    let store = credential_store(&cli);
    let credential = resolve_credential(&cli, store.as_ref());
    let session = Session::from_credential(credential.as_deref());
    match session.user() {
        Some(user) => log::info!("Signed in as {}", user.username),
        None => log::info!("No usable credential, continuing anonymously"),
    }

    let mut client = ApiClient::new(server_url);
    client.set_access_token(session.token().map(str::to_string));
    let backend: Arc<dyn Backend> = Arc::new(client);

    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let ctx = ViewContext::new(backend, session, events_tx);
    let mut app = App::new(ctx, store, config_manager, log_config);

    let mut tui = terminal::init()?;
    let result = run(&mut tui, &mut app, &mut events_rx);
    terminal::restore()?;

    result
}

/// Draw, apply finished requests, handle one key; repeat until quit
fn run(tui: &mut Tui, app: &mut App, events: &mut UnboundedReceiver<ViewEvent>) -> Result<()> {
    while app.running {
        while let Ok(event) = events.try_recv() {
            app.handle_view_event(event);
        }
        app.clear_expired_notice();

        tui.draw(|frame| ui::render(app, frame))?;

        // Handle events with timeout
        if event::poll(Duration::from_millis(50))? {
            // Mouse and resize events only need a redraw
            if let Event::Key(key) = event::read()? {
                app.handle_key_event(key)?;
            }
        }
    }
    Ok(())
}
