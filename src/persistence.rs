pub mod json_file_store;
pub mod kv_action_item_store;
pub mod kv_card_store;
pub mod kv_session_store;
pub mod remote_kv_store;

use crate::external_connections;
use json_file_store::JsonFileStore;
use remote_kv_store::RemoteKvStore;
use reqwest_middleware::ClientBuilder;
use reqwest_tracing::TracingMiddleware;
use std::path::PathBuf;

/// Selects which backend holds the board's key-value data
#[derive(Clone, Debug)]
pub enum StoreConfig {
    /// A JSON file on local disk at the given path
    File(PathBuf),
    /// A remote key-value service reachable at the given base URL
    Remote(String),
}

/// Data structure which owns clients for connecting to external systems.
/// Allows business logic to be agnostic of the external systems it communicates with
/// so driven adapters can easily be swapped out for other implementations
#[derive(Clone)]
pub struct ExternalConnectivity {
    store: KvBackend,
}

#[derive(Clone)]
enum KvBackend {
    File(JsonFileStore),
    Remote(RemoteKvStore),
}

impl ExternalConnectivity {
    /// Builds the clients for the configured store backend and constructs an
    /// instance of ExternalConnectivity owning them
    pub fn new(store_config: StoreConfig) -> Self {
        let store = match store_config {
            StoreConfig::File(path) => KvBackend::File(JsonFileStore::new(path)),
            StoreConfig::Remote(base_url) => {
                let base_client = reqwest::Client::builder().use_rustls_tls().build().unwrap();
                let traced_client = ClientBuilder::new(base_client)
                    .with(TracingMiddleware::default())
                    .build();
                KvBackend::Remote(RemoteKvStore::new(base_url, traced_client))
            }
        };

        ExternalConnectivity { store }
    }
}

/// A handle from ExternalConnectivity which can reach the configured key-value store
pub struct KvStoreHandle<'store> {
    backend: &'store KvBackend,
}

impl external_connections::KeyValueStore for KvStoreHandle<'_> {
    async fn fetch(&mut self, key: &str) -> Result<Option<String>, anyhow::Error> {
        match self.backend {
            KvBackend::File(file_store) => file_store.fetch(key).await,
            KvBackend::Remote(remote_store) => remote_store.fetch(key).await,
        }
    }

    async fn put(&mut self, key: &str, content: &str) -> Result<(), anyhow::Error> {
        match self.backend {
            KvBackend::File(file_store) => file_store.put(key, content).await,
            KvBackend::Remote(remote_store) => remote_store.put(key, content).await,
        }
    }

    async fn remove(&mut self, key: &str) -> Result<(), anyhow::Error> {
        match self.backend {
            KvBackend::File(file_store) => file_store.remove(key).await,
            KvBackend::Remote(remote_store) => remote_store.remove(key).await,
        }
    }
}

impl external_connections::ExternalConnectivity for ExternalConnectivity {
    type Kv<'store>
        = KvStoreHandle<'store>
    where
        Self: 'store;

    async fn key_value_store(&mut self) -> Result<KvStoreHandle<'_>, anyhow::Error> {
        Ok(KvStoreHandle {
            backend: &self.store,
        })
    }
}
