use chrono::Local;

pub mod action_item;
pub mod board;
pub mod card;
pub mod session;
pub mod user;

#[cfg(test)]
pub mod test_util;

/// Allocates an identifier for a new collection entry. Identifiers are the current
/// millisecond timestamp rendered as a decimal string. Two entries created within
/// the same millisecond would collide, so the candidate is bumped past the largest
/// numeric identifier already present in the collection.
pub(crate) fn allocate_id<'a>(existing_ids: impl Iterator<Item = &'a str>) -> String {
    let mut candidate = Local::now().timestamp_millis();
    let highest_existing = existing_ids
        .filter_map(|id| id.parse::<i64>().ok())
        .max();
    if let Some(highest) = highest_existing {
        if candidate <= highest {
            candidate = highest + 1;
        }
    }

    candidate.to_string()
}
