use crate::domain;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// DTO for submitting the action item form, for both new items and staged edits
#[derive(Deserialize, Validate, ToSchema)]
#[cfg_attr(test, derive(serde::Serialize, Debug))]
pub struct NewActionItem {
    #[schema(example = "Alice")]
    #[validate(custom = "crate::dto::validate_not_blank")]
    pub assignee: String,
    #[serde(rename = "dueDate", default)]
    #[schema(example = "2024-06-20")]
    #[validate(custom = "crate::dto::validate_due_date")]
    pub due_date: String,
    #[schema(example = "Book the retro room")]
    #[validate(custom = "crate::dto::validate_not_blank")]
    pub content: String,
}

impl From<NewActionItem> for domain::action_item::ActionItemDraft {
    fn from(value: NewActionItem) -> Self {
        domain::action_item::ActionItemDraft {
            assignee: value.assignee,
            due_date: value.due_date,
            content: value.content,
        }
    }
}

/// DTO for an action item returned from the board
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(serde::Deserialize, PartialEq, Eq, Debug))]
pub struct ActionItem {
    #[schema(example = "1718275200001")]
    pub id: String,
    #[schema(example = "Alice")]
    pub assignee: String,
    #[serde(rename = "dueDate")]
    #[schema(example = "2024-06-20")]
    pub due_date: String,
    #[schema(example = "Book the retro room")]
    pub content: String,
}

impl From<domain::action_item::ActionItem> for ActionItem {
    fn from(value: domain::action_item::ActionItem) -> Self {
        ActionItem {
            id: value.id,
            assignee: value.assignee,
            due_date: value.due_date,
            content: value.content,
        }
    }
}

/// DTO for the form fields currently staged for editing
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(serde::Deserialize, PartialEq, Eq, Debug))]
pub struct ActionItemDraft {
    pub assignee: String,
    #[serde(rename = "dueDate")]
    pub due_date: String,
    pub content: String,
}

impl From<domain::action_item::ActionItemDraft> for ActionItemDraft {
    fn from(value: domain::action_item::ActionItemDraft) -> Self {
        ActionItemDraft {
            assignee: value.assignee,
            due_date: value.due_date,
            content: value.content,
        }
    }
}
