use anyhow::Context;
use cyac_interfaces::{Interface, TerminalInterface};
use cyac_os_app::config::{Config, CONFIG_FILE};
use cyac_os_app::Repl;
use cyac_shell::Shell;
use cyac_storage::{KeyValueStore, LocalStore};
use cyac_vfs::FileSystem;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.get(1).map(String::as_str) == Some("config")
        && args.get(2).map(String::as_str) == Some("reset")
    {
        Config::reset(CONFIG_FILE).context("Failed to reset configuration")?;
        println!("Configuration reset to defaults in {}", CONFIG_FILE);
        return Ok(());
    }

    let config = Config::load().context("Failed to load configuration")?;
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        eprintln!("Tip: run 'cyac-os config reset' to restore the defaults");
        return Err(e.into());
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let store: Arc<dyn KeyValueStore> = Arc::new(
        LocalStore::new(&config.data_dir).with_context(|| {
            format!("Failed to open data directory {}", config.data_dir.display())
        })?,
    );
    tracing::info!("Using data directory {}", config.data_dir.display());

    let shell = Shell::new(FileSystem::load(store.clone()));
    let interface: Arc<dyn Interface> = Arc::new(TerminalInterface::new());
    let repl = Repl::new(interface, shell, store, config);

    repl.run().await
}
