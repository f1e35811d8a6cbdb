/// Handle granting access to the key-value store backing the board. Values are
/// stored as strings under well-known keys, and every write replaces the whole
/// value under its key.
pub trait KeyValueStore {
    /// Retrieves the value stored under [key], or [None] if nothing is stored there.
    async fn fetch(&mut self, key: &str) -> Result<Option<String>, anyhow::Error>;
    /// Stores [content] under [key], replacing whatever was there before.
    async fn put(&mut self, key: &str, content: &str) -> Result<(), anyhow::Error>;
    /// Removes the value stored under [key]. Removing an absent key is not an error.
    async fn remove(&mut self, key: &str) -> Result<(), anyhow::Error>;
}

/// Owner of the clients used to communicate with external systems. Business logic
/// receives an implementation of this trait so driven adapters can be swapped out
/// without the logic knowing which backend it is talking to.
pub trait ExternalConnectivity {
    type Kv<'store>: KeyValueStore
    where
        Self: 'store;

    /// Acquires a handle to the key-value store
    async fn key_value_store(&mut self) -> Result<Self::Kv<'_>, anyhow::Error>;
}
