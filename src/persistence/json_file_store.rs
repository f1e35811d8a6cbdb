use anyhow::Context;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::warn;

/// Key-value store backed by a single JSON object on local disk. Every write
/// rewrites the whole file. The gate serializes individual operations so two
/// clones never interleave reads with a half-finished rewrite, but it does not
/// span a read-modify-write sequence, so the last writer of a key wins.
#[derive(Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    io_gate: Arc<Mutex<()>>,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> JsonFileStore {
        JsonFileStore {
            path,
            io_gate: Arc::new(Mutex::new(())),
        }
    }

    /// Reads the whole file as a key-value map. A file that is missing or no
    /// longer parses reads as an empty map instead of taking the board down.
    async fn read_entries(&self) -> Result<BTreeMap<String, String>, anyhow::Error> {
        let raw_content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(io_err) if io_err.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(io_err) => return Err(io_err).context("reading the board data file"),
        };

        match serde_json::from_str(&raw_content) {
            Ok(entries) => Ok(entries),
            Err(parse_err) => {
                warn!("The board data file does not parse, treating it as empty: {parse_err}");
                Ok(BTreeMap::new())
            }
        }
    }

    async fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), anyhow::Error> {
        let serialized =
            serde_json::to_string_pretty(entries).context("serializing the board data file")?;
        tokio::fs::write(&self.path, serialized)
            .await
            .context("writing the board data file")?;

        Ok(())
    }

    pub(super) async fn fetch(&self, key: &str) -> Result<Option<String>, anyhow::Error> {
        let _io_permit = self.io_gate.lock().await;
        let entries = self.read_entries().await?;

        Ok(entries.get(key).cloned())
    }

    pub(super) async fn put(&self, key: &str, content: &str) -> Result<(), anyhow::Error> {
        let _io_permit = self.io_gate.lock().await;
        let mut entries = self.read_entries().await?;
        entries.insert(key.to_owned(), content.to_owned());

        self.write_entries(&entries).await
    }

    pub(super) async fn remove(&self, key: &str) -> Result<(), anyhow::Error> {
        let _io_permit = self.io_gate.lock().await;
        let mut entries = self.read_entries().await?;
        entries.remove(key);

        self.write_entries(&entries).await
    }
}
