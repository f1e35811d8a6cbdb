use crate::domain;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Category a card can land in on the board
#[derive(Deserialize, Serialize, Clone, Copy, ToSchema)]
#[cfg_attr(test, derive(PartialEq, Eq, Debug))]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Good,
    Keep,
    Change,
    Bad,
}

impl From<CardKind> for domain::card::CardKind {
    fn from(value: CardKind) -> Self {
        match value {
            CardKind::Good => domain::card::CardKind::Good,
            CardKind::Keep => domain::card::CardKind::Keep,
            CardKind::Change => domain::card::CardKind::Change,
            CardKind::Bad => domain::card::CardKind::Bad,
        }
    }
}

impl From<domain::card::CardKind> for CardKind {
    fn from(value: domain::card::CardKind) -> Self {
        match value {
            domain::card::CardKind::Good => CardKind::Good,
            domain::card::CardKind::Keep => CardKind::Keep,
            domain::card::CardKind::Change => CardKind::Change,
            domain::card::CardKind::Bad => CardKind::Bad,
        }
    }
}

/// DTO for posting a new card to the board
#[derive(Deserialize, Validate, ToSchema)]
#[cfg_attr(test, derive(serde::Serialize, Debug))]
pub struct NewCard {
    #[serde(rename = "type")]
    pub kind: CardKind,
    #[schema(example = "Great sprint")]
    #[validate(custom = "crate::dto::validate_not_blank")]
    pub content: String,
    #[serde(rename = "isAnonymous")]
    pub is_anonymous: bool,
}

impl From<NewCard> for domain::card::NewCard {
    fn from(value: NewCard) -> Self {
        domain::card::NewCard {
            kind: value.kind.into(),
            content: value.content,
            is_anonymous: value.is_anonymous,
        }
    }
}

/// DTO for a card returned from the board
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(serde::Deserialize, PartialEq, Eq, Debug))]
pub struct RetroCard {
    #[schema(example = "1718275200000")]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: CardKind,
    #[schema(example = "Great sprint")]
    pub content: String,
    #[serde(rename = "isAnonymous")]
    pub is_anonymous: bool,
    #[schema(example = "alice")]
    pub author: String,
    pub likes: Vec<String>,
}

impl From<domain::card::RetroCard> for RetroCard {
    fn from(value: domain::card::RetroCard) -> Self {
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
