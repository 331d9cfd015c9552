use std::sync::Arc;

use salvo::conn::TcpListener;
use salvo::{Listener, Router};
use shuriken_app::config::ConfigHandler;
use shuriken_app::storage_handler::StorageHandler;
use shuriken_core::config::load_config;
use shuriken_core::types::CollectionTag;
use shuriken_dav::MemoryStorage;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config()?;

    shuriken_core::logging::init(&config.logging.level);

    tracing::info!("Starting Shuriken CalDAV/CardDAV server");
    tracing::info!(config = ?config, "Configuration loaded");

    let storage = MemoryStorage::new("demo");
    storage.add_collection("calendar", "Demo Calendar", CollectionTag::Calendar).await;
    storage.add_collection("contacts", "Demo Contacts", CollectionTag::AddressBook).await;
    let storage: Arc<dyn shuriken_dav::Storage> = Arc::new(storage);

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let acceptor = TcpListener::new(bind_addr.clone()).bind().await;

    let router = Router::new()
        .hoop(ConfigHandler { settings: config.clone() })
        .hoop(StorageHandler { storage })
        .goal(shuriken_app::dav::DavHandler);

    tracing::info!("Server listening on {bind_addr}");

    salvo::Server::new(acceptor).serve(router).await;

    Ok(())
}
