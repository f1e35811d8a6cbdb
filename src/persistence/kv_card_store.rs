use crate::domain;
use crate::domain::card::{CardKind, RetroCard};
use crate::external_connections::{ExternalConnectivity, KeyValueStore};
use anyhow::{Context, Error};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Key the whole card collection is stored under
pub const CARDS_KEY: &str = "retroCards";

pub struct KvCardReader;

#[derive(Serialize, Deserialize)]
struct CardRecord {
    id: String,
    #[serde(rename = "type")]
    kind: CardKindRecord,
    content: String,
    #[serde(rename = "isAnonymous")]
    is_anonymous: bool,
    author: String,
    likes: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Copy)]
#[serde(rename_all = "lowercase")]
enum CardKindRecord {
    Good,
    Keep,
    Change,
    Bad,
}

impl From<CardKindRecord> for CardKind {
    fn from(value: CardKindRecord) -> Self {
        match value {
            CardKindRecord::Good => CardKind::Good,
            CardKindRecord::Keep => CardKind::Keep,
            CardKindRecord::Change => CardKind::Change,
            CardKindRecord::Bad => CardKind::Bad,
        }
    }
}

impl From<CardKind> for CardKindRecord {
    fn from(value: CardKind) -> Self {
        match value {
            CardKind::Good => CardKindRecord::Good,
            CardKind::Keep => CardKindRecord::Keep,
            CardKind::Change => CardKindRecord::Change,
            CardKind::Bad => CardKindRecord::Bad,
        }
    }
}

impl From<CardRecord> for RetroCard {
    fn from(value: CardRecord) -> Self {
        RetroCard {
            id: value.id,
            kind: value.kind.into(),
            content: value.content,
            is_anonymous: value.is_anonymous,
            author: value.author,
            likes: value.likes,
        }
    }
}

impl From<&RetroCard> for CardRecord {
    fn from(value: &RetroCard) -> Self {
        CardRecord {
            id: value.id.clone(),
            kind: value.kind.into(),
            content: value.content.clone(),
            is_anonymous: value.is_anonymous,
            author: value.author.clone(),
            likes: value.likes.clone(),
        }
    }
}

impl domain::card::driven_ports::CardReader for KvCardReader {
    async fn load(&self, ext_cxn: &mut impl ExternalConnectivity) -> Result<Vec<RetroCard>, Error> {
        let mut kv_store = ext_cxn
            .key_value_store()
            .await
            .context("reaching the store holding the cards")?;
        let Some(raw_cards) = kv_store
            .fetch(CARDS_KEY)
            .await
            .context("trying to fetch the card collection")?
        else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<CardRecord>>(&raw_cards) {
            Ok(records) => Ok(records.into_iter().map(RetroCard::from).collect()),
            Err(parse_err) => {
                warn!("The stored cards do not parse, treating the board as empty: {parse_err}");
                Ok(Vec::new())
            }
        }
    }
}

pub struct KvCardWriter;

impl domain::card::driven_ports::CardWriter for KvCardWriter {
    async fn store(
        &self,
        cards: &[RetroCard],
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<(), Error> {
        let mut kv_store = ext_cxn
            .key_value_store()
            .await
            .context("reaching the store holding the cards")?;
        let records: Vec<CardRecord> = cards.iter().map(CardRecord::from).collect();
        let serialized =
            serde_json::to_string(&records).context("serializing the card collection")?;
        kv_store
            .put(CARDS_KEY, &serialized)
            .await
            .context("trying to store the card collection")?;

        Ok(())
    }
}
