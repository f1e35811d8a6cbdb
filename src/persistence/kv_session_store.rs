use crate::domain;
use crate::domain::user::User;
use crate::external_connections::{ExternalConnectivity, KeyValueStore};
use anyhow::{Context, Error};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Key the signed-in user's profile is stored under
pub const SESSION_KEY: &str = "user";

pub struct KvSessionReader;

#[derive(Serialize, Deserialize)]
struct UserRecord {
    id: String,
    name: String,
    avatar: String,
    email: String,
}

impl From<UserRecord> for User {
    fn from(value: UserRecord) -> Self {
        User {
            id: value.id,
            name: value.name,
            avatar: value.avatar,
            email: value.email,
        }
    }
}

impl From<&User> for UserRecord {
    fn from(value: &User) -> Self {
        UserRecord {
            id: value.id.clone(),
            name: value.name.clone(),
            avatar: value.avatar.clone(),
            email: value.email.clone(),
        }
    }
}

impl domain::session::driven_ports::SessionReader for KvSessionReader {
    async fn current(
        &self,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Option<User>, Error> {
        let mut kv_store = ext_cxn
            .key_value_store()
            .await
            .context("reaching the store holding the session")?;
        let Some(raw_session) = kv_store
            .fetch(SESSION_KEY)
            .await
            .context("trying to fetch the stored session")?
        else {
            return Ok(None);
        };

        match serde_json::from_str::<UserRecord>(&raw_session) {
            Ok(record) => Ok(Some(record.into())),
            Err(parse_err) => {
                warn!("The stored session does not parse, treating it as signed out: {parse_err}");
                Ok(None)
            }
        }
    }
}

pub struct KvSessionWriter;

impl domain::session::driven_ports::SessionWriter for KvSessionWriter {
    async fn save(&self, user: &User, ext_cxn: &mut impl ExternalConnectivity) -> Result<(), Error> {
        let mut kv_store = ext_cxn
            .key_value_store()
            .await
            .context("reaching the store holding the session")?;
        let serialized = serde_json::to_string(&UserRecord::from(user))
            .context("serializing the session for storage")?;
        kv_store
            .put(SESSION_KEY, &serialized)
            .await
            .context("trying to store the session")?;

        Ok(())
    }

    async fn clear(&self, ext_cxn: &mut impl ExternalConnectivity) -> Result<(), Error> {
        let mut kv_store = ext_cxn
            .key_value_store()
            .await
            .context("reaching the store holding the session")?;
        kv_store
            .remove(SESSION_KEY)
            .await
            .context("trying to clear the stored session")?;

        Ok(())
    }
}
