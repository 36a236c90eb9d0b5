use anyhow::Result;
use clap::{Parser, Subcommand};
use quotesync_core::env_string;
use quotesync_remote::RemoteClient;
use quotesync_service::{QuoteService, SyncConfig, SyncService};
use quotesync_storage::{FileKvStore, QuoteStore};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "quotesync")]
#[command(about = "Local quote collection with remote sync", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the quote viewed last in this session, or a random one
    Show,
    /// Show a random quote
    Random {
        #[arg(short, long)]
        category: Option<String>,
    },
    /// List quotes
    List {
        #[arg(short, long)]
        category: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// List categories
    Categories,
    /// Add a quote
    Add { text: String, category: String },
    /// Import quotes from a JSON file
    Import { file: PathBuf },
    /// Export all quotes to a JSON file ("-" for stdout)
    Export {
        #[arg(default_value = "quotes.json")]
        file: PathBuf,
    },
    /// Fetch the remote collection and merge it (remote wins)
    Sync,
    /// Push local quotes to the remote collection
    Push,
    /// Keep syncing in the background and print status until interrupted
    Watch,
}

pub(crate) fn get_data_dir() -> PathBuf {
    env_string("QUOTESYNC_DATA_DIR").map_or_else(
        || dirs::data_local_dir().unwrap_or_else(|| PathBuf::from(".")).join("quotesync"),
        PathBuf::from,
    )
}

pub(crate) fn get_session_dir() -> PathBuf {
    env_string("QUOTESYNC_SESSION_DIR")
        .map_or_else(|| std::env::temp_dir().join("quotesync-session"), PathBuf::from)
}

pub(crate) fn open_store() -> Result<Arc<Mutex<QuoteStore>>> {
    let durable = FileKvStore::open(get_data_dir())?;
    let session = FileKvStore::open(get_session_dir())?;
    tracing::debug!(
        data_dir = %durable.dir().display(),
        session_dir = %session.dir().display(),
        "opening quote store"
    );
    let store = QuoteStore::open(Arc::new(durable), Arc::new(session))?;
    Ok(Arc::new(Mutex::new(store)))
}

pub(crate) fn build_sync_service(
    store: Arc<Mutex<QuoteStore>>,
    config: &SyncConfig,
) -> Result<SyncService> {
    let remote = RemoteClient::new(&config.remote_url, config.http_timeout, config.push_user_id)?;
    tracing::debug!(url = remote.base_url(), limit = config.fetch_limit, "remote configured");
    Ok(SyncService::new(store, Arc::new(remote), config.fetch_limit))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let store = open_store()?;
    let quotes = QuoteService::new(Arc::clone(&store));

    match cli.command {
        Commands::Show => commands::quotes::run_show(&quotes).await,
        Commands::Random { category } => {
            commands::quotes::run_random(&quotes, category.as_deref()).await
        },
        Commands::List { category, json } => {
            commands::quotes::run_list(&quotes, category.as_deref(), json).await
        },
        Commands::Categories => commands::quotes::run_categories(&quotes).await,
        Commands::Add { text, category } => {
            commands::quotes::run_add(&quotes, &text, &category).await
        },
        Commands::Import { file } => commands::quotes::run_import(&quotes, &file).await,
        Commands::Export { file } => commands::quotes::run_export(&quotes, &file).await,
        Commands::Sync => commands::sync::run_sync(store).await,
        Commands::Push => commands::sync::run_push(store).await,
        Commands::Watch => commands::sync::run_watch(store).await,
    }
}
