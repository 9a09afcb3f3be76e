use surrealdb::RecordId;
use uuid::Uuid;

use crate::consts::gate_const::USER_TABLE;

/// JWT subjects are bare keys; profile records live at `users:{key}`.
pub fn user_rid(uid: &str) -> RecordId {
    RecordId::from_table_key(USER_TABLE, uid.trim())
}

pub fn rid(table: &str, key: &str) -> RecordId {
    RecordId::from_table_key(table, key.trim())
}

/// Fresh record key, minted ahead of the write so a whole transaction can
/// reference the record before it exists.
pub fn new_key() -> String {
    Uuid::new_v4().simple().to_string()
}
