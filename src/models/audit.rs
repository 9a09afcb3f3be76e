use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use crate::utils::time::time_now;

/// Statement appended inside the same transaction as every gated mutation.
/// Bind `audit_table` and `audit`. If this write cannot commit, the whole
/// transaction rolls back; an unaudited mutation is never observable.
pub const APPEND_AUDIT: &str = "CREATE type::table($audit_table) CONTENT $audit;";

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct AuditEvent {
    pub id: RecordId,
    pub actor: RecordId,
    pub action: String,
    pub target: String,
    #[serde(default)]
    pub details: serde_json::Value,
    pub timestamp: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct CreateAuditEvent {
    pub actor: RecordId,
    pub action: String,
    pub target: String,
    pub details: serde_json::Value,
    pub timestamp: String,
}

impl CreateAuditEvent {
    pub fn new(
        actor: RecordId,
        action: &str,
        target: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            actor,
            action: action.to_string(),
            target: target.into(),
            details,
            timestamp: time_now(),
        }
    }
}
