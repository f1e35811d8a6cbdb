use crate::domain::action_item::driving_ports::ActionItemPort;
use crate::domain::action_item::{self, ActionItem, ActionItemDraft};
use crate::domain::card::driving_ports::CardPort;
use crate::domain::card::{self, NewCard, RetroCard};
use crate::domain::session;
use crate::domain::session::driving_ports::SessionPort;
use crate::domain::user::User;
use crate::external_connections::ExternalConnectivity;
use anyhow::Context;
use chrono::NaiveDate;
use driving_ports::BoardError;

/// Orchestrates the whole board on behalf of one client. Holds the signed-in
/// user plus an in-memory mirror of the collections, which is only ever
/// replaced with copies the store confirmed after a write.
pub struct BoardController {
    current_user: Option<User>,
    cards: Vec<RetroCard>,
    action_items: Vec<ActionItem>,
    item_draft: ActionItemDraft,
    editing_item_id: Option<String>,
}

/// Everything a client needs to render the board for the signed-in user
#[derive(PartialEq, Eq, Debug)]
#[cfg_attr(test, derive(Clone))]
pub struct BoardView {
    pub user: User,
    pub cards: Vec<RetroCard>,
    pub action_items: Vec<ActionItem>,
    pub item_draft: ActionItemDraft,
    pub editing_item_id: Option<String>,
    pub total_action_items: usize,
    pub overdue_action_items: usize,
}

/// Distinguishes whether an action item submission appended a new item or
/// rewrote the one staged for editing
#[derive(PartialEq, Eq, Debug)]
#[cfg_attr(test, derive(Clone))]
pub enum ActionItemSubmission {
    Created(Vec<ActionItem>),
    Updated(Vec<ActionItem>),
}

impl ActionItemSubmission {
    /// The confirmed collection, however the submission landed
    pub fn items(&self) -> &[ActionItem] {
        match self {
            ActionItemSubmission::Created(items) => items,
            ActionItemSubmission::Updated(items) => items,
        }
    }
}

pub mod driving_ports {
    use super::*;
    use crate::external_connections::ExternalConnectivity;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum BoardError {
        #[error("Nobody is logged in right now.")]
        NotLoggedIn,
        #[error("The requested item is not on the board.")]
        NoSuchItem,
        #[error(transparent)]
        Port(#[from] anyhow::Error),
    }


    pub trait BoardPort {
        async fn hydrate(
            &mut self,
            ext_cxn: &mut impl ExternalConnectivity,
            session_read: &impl session::driven_ports::SessionReader,
            card_read: &impl card::driven_ports::CardReader,
            item_read: &impl action_item::driven_ports::ActionItemReader,
        ) -> Result<(), anyhow::Error>;
        async fn log_in(
            &mut self,
            username: &str,
            password: &str,
            ext_cxn: &mut impl ExternalConnectivity,
            session_write: &impl session::driven_ports::SessionWriter,
            card_read: &impl card::driven_ports::CardReader,
            item_read: &impl action_item::driven_ports::ActionItemReader,
        ) -> Result<User, anyhow::Error>;
        async fn log_out(
            &mut self,
            ext_cxn: &mut impl ExternalConnectivity,
            session_write: &impl session::driven_ports::SessionWriter,
        ) -> Result<(), anyhow::Error>;
        async fn submit_card(
            &mut self,
            new_card: &NewCard,
            ext_cxn: &mut impl ExternalConnectivity,
            card_read: &impl card::driven_ports::CardReader,
            card_write: &impl card::driven_ports::CardWriter,
        ) -> Result<Vec<RetroCard>, BoardError>;
        async fn delete_card(
            &mut self,
            card_id: &str,
            ext_cxn: &mut impl ExternalConnectivity,
            card_read: &impl card::driven_ports::CardReader,
            card_write: &impl card::driven_ports::CardWriter,
        ) -> Result<(), BoardError>;
        async fn toggle_like(
            &mut self,
            card_id: &str,
            ext_cxn: &mut impl ExternalConnectivity,
            card_read: &impl card::driven_ports::CardReader,
            card_write: &impl card::driven_ports::CardWriter,
        ) -> Result<Vec<RetroCard>, BoardError>;
        async fn submit_action_item(
            &mut self,
            fields: &ActionItemDraft,
            ext_cxn: &mut impl ExternalConnectivity,
            item_read: &impl action_item::driven_ports::ActionItemReader,
            item_write: &impl action_item::driven_ports::ActionItemWriter,
        ) -> Result<ActionItemSubmission, BoardError>;
        async fn delete_action_item(
            &mut self,
            item_id: &str,
            ext_cxn: &mut impl ExternalConnectivity,
            item_read: &impl action_item::driven_ports::ActionItemReader,
            item_write: &impl action_item::driven_ports::ActionItemWriter,
        ) -> Result<(), BoardError>;
        fn begin_edit_action_item(&mut self, item_id: &str)
            -> Result<ActionItemDraft, BoardError>;
        fn view(&self, today: NaiveDate) -> Result<BoardView, BoardError>;
    }
}

impl BoardController {
    pub fn new() -> BoardController {
        BoardController {
            current_user: None,
            cards: Vec::new(),
            action_items: Vec::new(),
            item_draft: ActionItemDraft::default(),
            editing_item_id: None,
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    fn reset_to_anonymous(&mut self) {
        self.current_user = None;
        self.cards.clear();
        self.action_items.clear();
        self.item_draft = ActionItemDraft::default();
        self.editing_item_id = None;
    }

    async fn refresh_collections(
        &mut self,
        ext_cxn: &mut impl ExternalConnectivity,
        card_read: &impl card::driven_ports::CardReader,
        item_read: &impl action_item::driven_ports::ActionItemReader,
    ) -> Result<(), anyhow::Error> {
        self.cards = card::CardService {}
            .list(&mut *ext_cxn, card_read)
            .await
            .context("refreshing the card mirror")?;
        self.action_items = action_item::ActionItemService {}
            .list(&mut *ext_cxn, item_read)
            .await
            .context("refreshing the action item mirror")?;

        Ok(())
    }
}

impl driving_ports::BoardPort for BoardController {
    async fn hydrate(
        &mut self,
        ext_cxn: &mut impl ExternalConnectivity,
        session_read: &impl session::driven_ports::SessionReader,
        card_read: &impl card::driven_ports::CardReader,
        item_read: &impl action_item::driven_ports::ActionItemReader,
    ) -> Result<(), anyhow::Error> {
        let restored_user = session::SessionService {}
            .current_user(&mut *ext_cxn, session_read)
            .await
            .context("restoring the persisted session")?;
        let Some(user) = restored_user else {
            self.reset_to_anonymous();
            return Ok(());
        };

        self.refresh_collections(&mut *ext_cxn, card_read, item_read)
            .await?;
        self.current_user = Some(user);

        Ok(())
    }

    async fn log_in(
        &mut self,
        username: &str,
        password: &str,
        ext_cxn: &mut impl ExternalConnectivity,
        session_write: &impl session::driven_ports::SessionWriter,
        card_read: &impl card::driven_ports::CardReader,
        item_read: &impl action_item::driven_ports::ActionItemReader,
    ) -> Result<User, anyhow::Error> {
        let user = session::SessionService {}
            .log_in(username, password, &mut *ext_cxn, session_write)
            .await?;
        self.refresh_collections(&mut *ext_cxn, card_read, item_read)
            .await?;

        self.current_user = Some(user.clone());
        self.item_draft = ActionItemDraft::default();
        self.editing_item_id = None;

        Ok(user)
    }

    async fn log_out(
        &mut self,
        ext_cxn: &mut impl ExternalConnectivity,
        session_write: &impl session::driven_ports::SessionWriter,
    ) -> Result<(), anyhow::Error> {
        session::SessionService {}
            .log_out(&mut *ext_cxn, session_write)
            .await?;
        self.reset_to_anonymous();

        Ok(())
    }

    async fn submit_card(
        &mut self,
        new_card: &NewCard,
        ext_cxn: &mut impl ExternalConnectivity,
        card_read: &impl card::driven_ports::CardReader,
        card_write: &impl card::driven_ports::CardWriter,
    ) -> Result<Vec<RetroCard>, BoardError> {
        let Some(user) = &self.current_user else {
            return Err(BoardError::NotLoggedIn);
        };
        // The display name is resolved once at submission time and sticks with the card
        let author = if new_card.is_anonymous {
            "Anonymous".to_owned()
        } else {
            user.name.clone()
        };

        let confirmed_cards = card::CardService {}
            .create(new_card, &author, &mut *ext_cxn, card_read, card_write)
            .await?;
        self.cards = confirmed_cards.clone();

        Ok(confirmed_cards)
    }

    async fn delete_card(
        &mut self,
        card_id: &str,
        ext_cxn: &mut impl ExternalConnectivity,
        card_read: &impl card::driven_ports::CardReader,
        card_write: &impl card::driven_ports::CardWriter,
    ) -> Result<(), BoardError> {
        if self.current_user.is_none() {
            return Err(BoardError::NotLoggedIn);
        }

        self.cards = card::CardService {}
            .remove(card_id, &mut *ext_cxn, card_read, card_write)
            .await?;

        Ok(())
    }

    async fn toggle_like(
        &mut self,
        card_id: &str,
        ext_cxn: &mut impl ExternalConnectivity,
        card_read: &impl card::driven_ports::CardReader,
        card_write: &impl card::driven_ports::CardWriter,
    ) -> Result<Vec<RetroCard>, BoardError> {
        let Some(user) = &self.current_user else {
            return Err(BoardError::NotLoggedIn);
        };
        let liker_id = user.id.clone();

        let confirmed_cards = card::CardService {}
            .toggle_like(card_id, &liker_id, &mut *ext_cxn, card_read, card_write)
            .await?;
        self.cards = confirmed_cards.clone();

        Ok(confirmed_cards)
    }

    async fn submit_action_item(
        &mut self,
        fields: &ActionItemDraft,
        ext_cxn: &mut impl ExternalConnectivity,
        item_read: &impl action_item::driven_ports::ActionItemReader,
        item_write: &impl action_item::driven_ports::ActionItemWriter,
    ) -> Result<ActionItemSubmission, BoardError> {
        if self.current_user.is_none() {
            return Err(BoardError::NotLoggedIn);
        }

        let item_service = action_item::ActionItemService {};
        let submission = match self.editing_item_id.as_deref() {
            Some(staged_id) => ActionItemSubmission::Updated(
                item_service
                    .update(staged_id, fields, &mut *ext_cxn, item_read, item_write)
                    .await?,
            ),
            None => ActionItemSubmission::Created(
                item_service
                    .create(fields, &mut *ext_cxn, item_read, item_write)
                    .await?,
            ),
        };

        // Staging only clears once the write lands, so a failed submission can be retried
        self.action_items = submission.items().to_vec();
        self.item_draft = ActionItemDraft::default();
        self.editing_item_id = None;

        Ok(submission)
    }

    async fn delete_action_item(
        &mut self,
        item_id: &str,
        ext_cxn: &mut impl ExternalConnectivity,
        item_read: &impl action_item::driven_ports::ActionItemReader,
        item_write: &impl action_item::driven_ports::ActionItemWriter,
    ) -> Result<(), BoardError> {
        if self.current_user.is_none() {
            return Err(BoardError::NotLoggedIn);
        }

        // A staged edit deliberately survives deletion. Submitting the stale stage
        // later rewrites the collection without the item, then clears the stage.
        self.action_items = action_item::ActionItemService {}
            .remove(item_id, &mut *ext_cxn, item_read, item_write)
            .await?;

        Ok(())
    }

    fn begin_edit_action_item(&mut self, item_id: &str) -> Result<ActionItemDraft, BoardError> {
        if self.current_user.is_none() {
            return Err(BoardError::NotLoggedIn);
        }
        let Some(item) = self.action_items.iter().find(|item| item.id == item_id) else {
            return Err(BoardError::NoSuchItem);
        };

        let staged_fields = ActionItemDraft {
            assignee: item.assignee.clone(),
            due_date: item.due_date.clone(),
            content: item.content.clone(),
        };
        let staged_id = item.id.clone();
        self.item_draft = staged_fields.clone();
        self.editing_item_id = Some(staged_id);

        Ok(staged_fields)
    }

    fn view(&self, today: NaiveDate) -> Result<BoardView, BoardError> {
        let Some(user) = &self.current_user else {
            return Err(BoardError::NotLoggedIn);
        };

        Ok(BoardView {
            user: user.clone(),
            cards: self.cards.clone(),
            action_items: self.action_items.clone(),
            item_draft: self.item_draft.clone(),
            editing_item_id: self.editing_item_id.clone(),
            total_action_items: self.action_items.len(),
            overdue_action_items: self
                .action_items
                .iter()
                .filter(|item| item.is_overdue(today))
                .count(),
        })
    }
}
