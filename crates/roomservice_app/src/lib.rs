use std::sync::Arc;

use config::{Environment, File};
use roomservice_server::{Server, ServerState};
use roomservice_store::{
    Backend, InMemoryReservationRepository, ReservationRepository, RoomServiceStore, Update,
};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Store(#[from] roomservice_store::Error),

    #[error(transparent)]
    Server(#[from] roomservice_server::Error),

    #[error("failed to bind listener: {0}")]
    Listener(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] config::ConfigError),
}

#[derive(serde::Deserialize, Debug)]
pub struct RoomServiceConfig {
    server: roomservice_server::Config,
    store: roomservice_store::Config,
}

impl RoomServiceConfig {
    pub fn new() -> Result<Self, Error> {
        let c = config::Config::builder()
            .add_source(File::with_name("config/default"))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::with_prefix("roomservice")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(c.try_deserialize()?)
    }
}

/// Facade class encompassing all components that make up the `roomservice` application.
pub struct RoomServiceApp {
    config: RoomServiceConfig,
}

impl RoomServiceApp {
    pub fn new(config: RoomServiceConfig) -> Self {
        Self { config }
    }

    /// Opens the configured sqlite store and applies any pending migrations.
    pub fn migrate(&self) -> Result<RoomServiceStore, Error> {
        let store = RoomServiceStore::open(&self.config.store.url)?;

        if store.has_updates()? {
            info!("apply updates to roomservice store");
            store.update()?;
        }

        Ok(store)
    }

    fn reservation_store(&self) -> Result<Arc<dyn ReservationRepository>, Error> {
        match self.config.store.backend {
            Backend::Sqlite => {
                info!("using sqlite store at {}", self.config.store.url);
                Ok(Arc::new(self.migrate()?.reservations()))
            }
            Backend::Memory => {
                info!("using in-memory store, reservations are lost on exit");
                Ok(Arc::new(InMemoryReservationRepository::new()))
            }
        }
    }

    pub async fn run(&self) -> Result<(), Error> {
        let state = ServerState::new(self.reservation_store()?);

        // listenfd is used to enable auto-reloading in development
        // otherwise fallback to standard tcp listener
        let listener = match listenfd::ListenFd::from_env().take_tcp_listener(0)? {
            Some(listener) => listener,
            None => std::net::TcpListener::bind(format!(
                "{}:{}",
                self.config.server.url, self.config.server.port
            ))?,
        };

        Ok(Server::serve(listener, state).await?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn config_from(value: serde_json::Value) -> RoomServiceConfig {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_backend_defaults_to_sqlite() {
        let config = config_from(json!({
            "server": {"url": "127.0.0.1", "port": 8080},
            "store": {"url": "roomservice.sqlite"},
        }));

        assert_eq!(config.store.backend, Backend::Sqlite);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_memory_backend() {
        let app = RoomServiceApp::new(config_from(json!({
            "server": {"url": "127.0.0.1", "port": 0},
            "store": {"backend": "memory", "url": ""},
        })));

        let store = app.reservation_store().unwrap();

        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_sqlite_backend_is_migrated() {
        let app = RoomServiceApp::new(config_from(json!({
            "server": {"url": "127.0.0.1", "port": 0},
            "store": {"url": ":memory:"},
        })));

        let store = app.migrate().unwrap();

        assert!(!store.has_updates().unwrap());
    }
}
