use crate::domain;
use crate::external_connections::ExternalConnectivity;
use anyhow::Context;
use derive_more::Display;

/// Category a feedback card lands in on the board
#[derive(Clone, Copy, PartialEq, Eq, Debug, Display)]
pub enum CardKind {
    #[display("good")]
    Good,
    #[display("keep")]
    Keep,
    #[display("change")]
    Change,
    #[display("bad")]
    Bad,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RetroCard {
    pub id: String,
    pub kind: CardKind,
    pub content: String,
    pub is_anonymous: bool,
    /// Display name resolved once when the card is created, never recomputed
    pub author: String,
    /// IDs of users who currently like this card, in the order the likes arrived
    pub likes: Vec<String>,
}

#[cfg_attr(test, derive(Clone))]
pub struct NewCard {
    pub kind: CardKind,
    pub content: String,
    pub is_anonymous: bool,
}

pub mod driven_ports {
    use super::*;
    use crate::external_connections::ExternalConnectivity;

    pub trait CardReader {
        async fn load(
            &self,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Vec<RetroCard>, anyhow::Error>;
    }

    pub trait CardWriter {
        async fn store(
            &self,
            cards: &[RetroCard],
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<(), anyhow::Error>;
    }
}

pub mod driving_ports {
    use super::*;
    use crate::external_connections::ExternalConnectivity;

    /// Operations over the card collection. Every mutation rewrites the whole
    /// collection and returns it as re-read from the store, so callers refresh
    /// their view from the durable copy rather than a locally computed one.
    pub trait CardPort {
        async fn list(
            &self,
            ext_cxn: &mut impl ExternalConnectivity,
            card_read: &impl driven_ports::CardReader,
        ) -> Result<Vec<RetroCard>, anyhow::Error>;
        async fn create(
            &self,
            new_card: &NewCard,
            author: &str,
            ext_cxn: &mut impl ExternalConnectivity,
            card_read: &impl driven_ports::CardReader,
            card_write: &impl driven_ports::CardWriter,
        ) -> Result<Vec<RetroCard>, anyhow::Error>;
        async fn remove(
            &self,
            card_id: &str,
            ext_cxn: &mut impl ExternalConnectivity,
            card_read: &impl driven_ports::CardReader,
            card_write: &impl driven_ports::CardWriter,
        ) -> Result<Vec<RetroCard>, anyhow::Error>;
        async fn toggle_like(
            &self,
            card_id: &str,
            user_id: &str,
            ext_cxn: &mut impl ExternalConnectivity,
            card_read: &impl driven_ports::CardReader,
            card_write: &impl driven_ports::CardWriter,
        ) -> Result<Vec<RetroCard>, anyhow::Error>;
        async fn replace_all(
            &self,
            cards: &[RetroCard],
            ext_cxn: &mut impl ExternalConnectivity,
            card_read: &impl driven_ports::CardReader,
            card_write: &impl driven_ports::CardWriter,
        ) -> Result<Vec<RetroCard>, anyhow::Error>;
    }
}

/// Writes the given collection and returns it as re-read from the store
async fn store_and_confirm(
    cards: &[RetroCard],
    ext_cxn: &mut impl ExternalConnectivity,
    card_read: &impl driven_ports::CardReader,
    card_write: &impl driven_ports::CardWriter,
) -> Result<Vec<RetroCard>, anyhow::Error> {
    card_write
        .store(cards, &mut *ext_cxn)
        .await
        .context("storing the card collection")?;
    card_read
        .load(&mut *ext_cxn)
        .await
        .context("confirming the stored card collection")
}

pub struct CardService {}

impl driving_ports::CardPort for CardService {
    async fn list(
        &self,
        ext_cxn: &mut impl ExternalConnectivity,
        card_read: &impl driven_ports::CardReader,
    ) -> Result<Vec<RetroCard>, anyhow::Error> {
        card_read
            .load(&mut *ext_cxn)
            .await
            .context("listing the card collection")
    }

    async fn create(
        &self,
        new_card: &NewCard,
        author: &str,
        ext_cxn: &mut impl ExternalConnectivity,
        card_read: &impl driven_ports::CardReader,
        card_write: &impl driven_ports::CardWriter,
    ) -> Result<Vec<RetroCard>, anyhow::Error> {
        let mut cards = card_read
            .load(&mut *ext_cxn)
            .await
            .context("loading cards before create")?;

        let id = domain::allocate_id(cards.iter().map(|card| card.id.as_str()));
        cards.push(RetroCard {
            id,
            kind: new_card.kind,
            content: new_card.content.clone(),
            is_anonymous: new_card.is_anonymous,
            author: author.to_owned(),
            likes: Vec::new(),
        });

        store_and_confirm(&cards, &mut *ext_cxn, card_read, card_write).await
    }

    async fn remove(
        &self,
        card_id: &str,
        ext_cxn: &mut impl ExternalConnectivity,
        card_read: &impl driven_ports::CardReader,
        card_write: &impl driven_ports::CardWriter,
    ) -> Result<Vec<RetroCard>, anyhow::Error> {
        let mut cards = card_read
            .load(&mut *ext_cxn)
            .await
            .context("loading cards before removal")?;
        cards.retain(|card| card.id != card_id);

        store_and_confirm(&cards, &mut *ext_cxn, card_read, card_write).await
    }

    async fn toggle_like(
        &self,
        card_id: &str,
        user_id: &str,
        ext_cxn: &mut impl ExternalConnectivity,
        card_read: &impl driven_ports::CardReader,
        card_write: &impl driven_ports::CardWriter,
    ) -> Result<Vec<RetroCard>, anyhow::Error> {
        let mut cards = card_read
            .load(&mut *ext_cxn)
            .await
            .context("loading cards before like toggle")?;

        // An unknown card ID toggles nothing but the collection is still rewritten
        if let Some(card) = cards.iter_mut().find(|card| card.id == card_id) {
            match card.likes.iter().position(|liker| liker == user_id) {
                Some(existing_like) => {
                    card.likes.remove(existing_like);
                }
                None => card.likes.push(user_id.to_owned()),
            }
        }

        store_and_confirm(&cards, &mut *ext_cxn, card_read, card_write).await
    }

    async fn replace_all(
        &self,
        cards: &[RetroCard],
        ext_cxn: &mut impl ExternalConnectivity,
        card_read: &impl driven_ports::CardReader,
        card_write: &impl driven_ports::CardWriter,
    ) -> Result<Vec<RetroCard>, anyhow::Error> {
        store_and_confirm(cards, &mut *ext_cxn, card_read, card_write).await
    }
}
