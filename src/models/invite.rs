use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use crate::models::user::Role;
use crate::utils::time::is_past;

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Invite {
    pub id: RecordId,
    pub token_hash: String, // ! sha-256 hex; the raw token is never stored
    pub invited_email: String,
    pub role: Role,
    #[serde(default)]
    pub allowed_classes: Vec<String>,
    pub expires_at: String,
    pub used: bool,
    #[serde(default)]
    pub revoked: bool,
    pub created_by: RecordId,
    pub created_at: String,

    // ? set once consumed / revoked
    pub used_by: Option<RecordId>,
    pub used_at: Option<String>,
    pub revoked_by: Option<RecordId>,
    pub revoked_at: Option<String>,
}

impl Invite {
    /// Expiry is derived at read time, never persisted as a status.
    pub fn is_expired(&self) -> bool {
        is_past(&self.expires_at)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct CreateInvite {
    pub token_hash: String,
    pub invited_email: String,
    pub role: Role,
    pub allowed_classes: Vec<String>,
    pub expires_at: String,
    pub used: bool,
    pub revoked: bool,
    pub created_by: RecordId,
    pub created_at: String,
}

/// Listing view; deliberately excludes `token_hash`.
#[derive(Serialize, Debug, Clone)]
pub struct InviteSummary {
    pub id: String,
    pub invited_email: String,
    pub role: Role,
    pub allowed_classes: Vec<String>,
    pub expires_at: String,
    pub used: bool,
    pub revoked: bool,
    pub created_at: String,
}

impl From<Invite> for InviteSummary {
    fn from(invite: Invite) -> Self {
        Self {
            id: invite.id.key().to_string(),
            invited_email: invite.invited_email,
            role: invite.role,
            allowed_classes: invite.allowed_classes,
            expires_at: invite.expires_at,
            used: invite.used,
            revoked: invite.revoked,
            created_at: invite.created_at,
        }
    }
}
