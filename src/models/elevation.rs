use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CrRequestStatus {
    #[default]
    Pending,
    Approved,
}

/// A student-submitted request to be promoted to CR. Created externally;
/// mutated exactly once by approval.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct CrRequest {
    pub id: RecordId,
    #[serde(default)]
    pub status: CrRequestStatus,
    pub invited_email: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub invited_name: Option<String>,
    #[serde(default)]
    pub allowed_classes: Vec<String>,
    pub reviewed_by: Option<RecordId>,
    pub reviewed_at: Option<String>,
    pub created_at: Option<String>,
}

impl CrRequest {
    pub fn contact_email(&self) -> Option<String> {
        self.invited_email
            .as_deref()
            .or(self.email.as_deref())
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty())
    }

    pub fn display_name(&self) -> Option<String> {
        self.name
            .clone()
            .or_else(|| self.invited_name.clone())
            .filter(|n| !n.is_empty())
    }
}
