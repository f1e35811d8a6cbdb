use crate::domain;
use crate::dto;
use serde::Serialize;
use utoipa::ToSchema;

/// DTO for the whole board as seen by the signed-in user
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(serde::Deserialize, PartialEq, Eq, Debug))]
#[serde(rename_all = "camelCase")]
pub struct BoardView {
    pub user: dto::user::User,
    pub cards: Vec<dto::card::RetroCard>,
    pub action_items: Vec<dto::action_item::ActionItem>,
    pub item_draft: dto::action_item::ActionItemDraft,
    #[schema(example = "1718275200001")]
    pub editing_item_id: Option<String>,
    #[schema(example = 3)]
    pub total_action_items: usize,
    #[schema(example = 1)]
    pub overdue_action_items: usize,
}

impl From<domain::board::BoardView> for BoardView {
    fn from(value: domain::board::BoardView) -> Self {
        BoardView {
            user: value.user.into(),
            cards: value.cards.into_iter().map(Into::into).collect(),
            action_items: value.action_items.into_iter().map(Into::into).collect(),
            item_draft: value.item_draft.into(),
            editing_item_id: value.editing_item_id,
            total_action_items: value.total_action_items,
            overdue_action_items: value.overdue_action_items,
        }
    }
}
