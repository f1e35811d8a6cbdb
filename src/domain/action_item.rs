use crate::domain;
use crate::external_connections::ExternalConnectivity;
use anyhow::Context;
use chrono::{DateTime, NaiveDate};

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ActionItem {
    pub id: String,
    pub assignee: String,
    /// Free-form date string, usually `YYYY-MM-DD` from a date picker
    pub due_date: String,
    pub content: String,
}

/// The editable fields of an action item, detached from any identity
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct ActionItemDraft {
    pub assignee: String,
    pub due_date: String,
    pub content: String,
}

impl ActionItem {
    /// True when the due date falls strictly before the given day. Items with
    /// an empty or unparseable due date are never overdue.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        if self.due_date.is_empty() {
            return false;
        }

        let parsed_day = NaiveDate::parse_from_str(&self.due_date, "%Y-%m-%d")
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(&self.due_date)
                    .ok()
                    .map(|timestamp| timestamp.date_naive())
            });
        match parsed_day {
            Some(day) => day < today,
            None => false,
        }
    }

    fn apply(&mut self, fields: &ActionItemDraft) {
        self.assignee = fields.assignee.clone();
        self.due_date = fields.due_date.clone();
        self.content = fields.content.clone();
    }
}

pub mod driven_ports {
    use super::*;
    use crate::external_connections::ExternalConnectivity;

    pub trait ActionItemReader {
        async fn load(
            &self,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Vec<ActionItem>, anyhow::Error>;
    }

    pub trait ActionItemWriter {
        async fn store(
            &self,
            items: &[ActionItem],
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<(), anyhow::Error>;
    }
}

pub mod driving_ports {
    use super::*;
    use crate::external_connections::ExternalConnectivity;

    /// Operations over the action item collection. As with cards, mutations
    /// rewrite the whole collection and return the re-read durable copy.
    pub trait ActionItemPort {
        async fn list(
            &self,
            ext_cxn: &mut impl ExternalConnectivity,
            item_read: &impl driven_ports::ActionItemReader,
        ) -> Result<Vec<ActionItem>, anyhow::Error>;
        async fn create(
            &self,
            fields: &ActionItemDraft,
            ext_cxn: &mut impl ExternalConnectivity,
            item_read: &impl driven_ports::ActionItemReader,
            item_write: &impl driven_ports::ActionItemWriter,
        ) -> Result<Vec<ActionItem>, anyhow::Error>;
        async fn update(
            &self,
            item_id: &str,
            fields: &ActionItemDraft,
            ext_cxn: &mut impl ExternalConnectivity,
            item_read: &impl driven_ports::ActionItemReader,
            item_write: &impl driven_ports::ActionItemWriter,
        ) -> Result<Vec<ActionItem>, anyhow::Error>;
        async fn remove(
            &self,
            item_id: &str,
            ext_cxn: &mut impl ExternalConnectivity,
            item_read: &impl driven_ports::ActionItemReader,
            item_write: &impl driven_ports::ActionItemWriter,
        ) -> Result<Vec<ActionItem>, anyhow::Error>;
    }
}

/// Writes the given collection and returns it as re-read from the store
async fn store_and_confirm(
    items: &[ActionItem],
    ext_cxn: &mut impl ExternalConnectivity,
    item_read: &impl driven_ports::ActionItemReader,
    item_write: &impl driven_ports::ActionItemWriter,
) -> Result<Vec<ActionItem>, anyhow::Error> {
    item_write
        .store(items, &mut *ext_cxn)
        .await
        .context("storing the action item collection")?;
    item_read
        .load(&mut *ext_cxn)
        .await
        .context("confirming the stored action item collection")
}

pub struct ActionItemService {}

impl driving_ports::ActionItemPort for ActionItemService {
    async fn list(
        &self,
        ext_cxn: &mut impl ExternalConnectivity,
        item_read: &impl driven_ports::ActionItemReader,
    ) -> Result<Vec<ActionItem>, anyhow::Error> {
        item_read
            .load(&mut *ext_cxn)
            .await
            .context("listing the action item collection")
    }

    async fn create(
        &self,
        fields: &ActionItemDraft,
        ext_cxn: &mut impl ExternalConnectivity,
        item_read: &impl driven_ports::ActionItemReader,
        item_write: &impl driven_ports::ActionItemWriter,
    ) -> Result<Vec<ActionItem>, anyhow::Error> {
        let mut items = item_read
            .load(&mut *ext_cxn)
            .await
            .context("loading action items before create")?;

        let id = domain::allocate_id(items.iter().map(|item| item.id.as_str()));
        items.push(ActionItem {
            id,
            assignee: fields.assignee.clone(),
            due_date: fields.due_date.clone(),
            content: fields.content.clone(),
        });

        store_and_confirm(&items, &mut *ext_cxn, item_read, item_write).await
    }

    async fn update(
        &self,
        item_id: &str,
        fields: &ActionItemDraft,
        ext_cxn: &mut impl ExternalConnectivity,
        item_read: &impl driven_ports::ActionItemReader,
        item_write: &impl driven_ports::ActionItemWriter,
    ) -> Result<Vec<ActionItem>, anyhow::Error> {
        let mut items = item_read
            .load(&mut *ext_cxn)
            .await
            .context("loading action items before update")?;

        // An ID that no longer exists makes this an identity rewrite
        if let Some(item) = items.iter_mut().find(|item| item.id == item_id) {
            item.apply(fields);
        }

        store_and_confirm(&items, &mut *ext_cxn, item_read, item_write).await
    }

    async fn remove(
        &self,
        item_id: &str,
        ext_cxn: &mut impl ExternalConnectivity,
        item_read: &impl driven_ports::ActionItemReader,
        item_write: &impl driven_ports::ActionItemWriter,
    ) -> Result<Vec<ActionItem>, anyhow::Error> {
        let mut items = item_read
            .load(&mut *ext_cxn)
            .await
            .context("loading action items before removal")?;
        items.retain(|item| item.id != item_id);

        store_and_confirm(&items, &mut *ext_cxn, item_read, item_write).await
    }
}
