use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Student {
    pub id: RecordId,
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool, // ! deactivation is a soft delete, records are never removed
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

fn default_active() -> bool {
    true
}
