use crate::domain;
use crate::domain::action_item::ActionItem;
use crate::external_connections::{ExternalConnectivity, KeyValueStore};
use anyhow::{Context, Error};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Key the whole action item collection is stored under
pub const ACTION_ITEMS_KEY: &str = "actionItems";

pub struct KvActionItemReader;

#[derive(Serialize, Deserialize)]
struct ActionItemRecord {
    id: String,
    assignee: String,
    #[serde(rename = "dueDate")]
    due_date: String,
    content: String,
}

impl From<ActionItemRecord> for ActionItem {
    fn from(value: ActionItemRecord) -> Self {
        ActionItem {
            id: value.id,
            assignee: value.assignee,
            due_date: value.due_date,
            content: value.content,
        }
    }
}

impl From<&ActionItem> for ActionItemRecord {
    fn from(value: &ActionItem) -> Self {
        ActionItemRecord {
            id: value.id.clone(),
            assignee: value.assignee.clone(),
            due_date: value.due_date.clone(),
            content: value.content.clone(),
        }
    }
}

impl domain::action_item::driven_ports::ActionItemReader for KvActionItemReader {
    async fn load(
        &self,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Vec<ActionItem>, Error> {
        let mut kv_store = ext_cxn
            .key_value_store()
            .await
            .context("reaching the store holding the action items")?;
        let Some(raw_items) = kv_store
            .fetch(ACTION_ITEMS_KEY)
            .await
            .context("trying to fetch the action item collection")?
        else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<ActionItemRecord>>(&raw_items) {
            Ok(records) => Ok(records.into_iter().map(ActionItem::from).collect()),
            Err(parse_err) => {
                warn!("The stored action items do not parse, treating the list as empty: {parse_err}");
                Ok(Vec::new())
            }
        }
    }
}

pub struct KvActionItemWriter;

impl domain::action_item::driven_ports::ActionItemWriter for KvActionItemWriter {
    async fn store(
        &self,
        items: &[ActionItem],
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<(), Error> {
        let mut kv_store = ext_cxn
            .key_value_store()
            .await
            .context("reaching the store holding the action items")?;
        let records: Vec<ActionItemRecord> = items.iter().map(ActionItemRecord::from).collect();
        let serialized =
            serde_json::to_string(&records).context("serializing the action item collection")?;
        kv_store
            .put(ACTION_ITEMS_KEY, &serialized)
            .await
            .context("trying to store the action item collection")?;

        Ok(())
    }
}
