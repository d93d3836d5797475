use cw_storage_plus::Item;

/// The sequence number the next dispatched message will carry. Spokes
/// use it to consume messages exactly once.
pub const NEXT_MESSAGE_ID: Item<u64> = Item::new("next_message_id");
