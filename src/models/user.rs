use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use crate::models::permission::Permission;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Student,
    Cr,
    Cc,
    Hod,
    Admin,
}

impl Role {
    /// HOD and ADMIN bypass explicit permission lists (but never scope checks
    /// made on behalf of other roles).
    pub fn is_top_level(&self) -> bool {
        matches!(self, Role::Hod | Role::Admin)
    }

    pub fn can_invite(&self) -> bool {
        matches!(self, Role::Cc | Role::Hod | Role::Admin)
    }

    /// Permission bundle granted alongside the role on invite redemption
    /// and elevation approval.
    pub fn default_permissions(&self) -> Vec<Permission> {
        match self {
            Role::Cr => vec![Permission::TakeAttendance, Permission::ViewReports],
            _ => Vec::new(),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Role::Student => "STUDENT",
            Role::Cr => "CR",
            Role::Cc => "CC",
            Role::Hod => "HOD",
            Role::Admin => "ADMIN",
        };
        write!(f, "{}", name)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct UserProfile {
    pub id: RecordId,
    pub email: String,
    pub name: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub permissions: Vec<Permission>,
    #[serde(default)]
    pub allowed_classes: Vec<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

fn default_active() -> bool {
    true
}

/// Merge patch applied to a profile when an invite is redeemed or an
/// elevation request is approved.
#[derive(Serialize, Debug, Clone)]
pub struct ProfileGrant {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub role: Role,
    pub allowed_classes: Vec<String>,
    pub permissions: Vec<Permission>,
    pub is_active: bool,
    pub updated_at: String,
}
