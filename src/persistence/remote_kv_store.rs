use anyhow::{Context, bail};
use reqwest::StatusCode;
use reqwest_middleware::ClientWithMiddleware;

/// Key-value store client for a remote HTTP service. The value for a key lives
/// at `{base_url}/values/{key}`, with GET, PUT, and DELETE mapping onto fetch,
/// put, and remove. A 404 on fetch means the key holds nothing yet.
#[derive(Clone)]
pub struct RemoteKvStore {
    base_url: String,
    http: ClientWithMiddleware,
}

impl RemoteKvStore {
    pub fn new(base_url: String, http: ClientWithMiddleware) -> RemoteKvStore {
        RemoteKvStore {
            base_url: base_url.trim_end_matches('/').to_owned(),
            http,
        }
    }

    fn value_url(&self, key: &str) -> String {
        format!("{}/values/{}", self.base_url, key)
    }

    pub(super) async fn fetch(&self, key: &str) -> Result<Option<String>, anyhow::Error> {
        let response = self
            .http
            .get(self.value_url(key))
            .send()
            .await
            .with_context(|| format!("fetching {key} from the key-value service"))?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            bail!(
                "The key-value service answered {} while fetching {key}.",
                response.status()
            );
        }

        let content = response
            .text()
            .await
            .with_context(|| format!("reading the value of {key} from the key-value service"))?;

        Ok(Some(content))
    }

    pub(super) async fn put(&self, key: &str, content: &str) -> Result<(), anyhow::Error> {
        let response = self
            .http
            .put(self.value_url(key))
            .body(content.to_owned())
            .send()
            .await
            .with_context(|| format!("storing {key} in the key-value service"))?;
        if !response.status().is_success() {
            bail!(
                "The key-value service answered {} while storing {key}.",
                response.status()
            );
        }

        Ok(())
    }

    pub(super) async fn remove(&self, key: &str) -> Result<(), anyhow::Error> {
        let response = self
            .http
            .delete(self.value_url(key))
            .send()
            .await
            .with_context(|| format!("removing {key} from the key-value service"))?;
        // Removing a key that was never stored is fine
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        if !response.status().is_success() {
            bail!(
                "The key-value service answered {} while removing {key}.",
                response.status()
            );
        }

        Ok(())
    }
}
