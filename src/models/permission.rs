use serde::{Deserialize, Serialize};

use crate::models::user::UserProfile;

/// Explicit permission grants stored per profile. Stored as snake_case
/// strings so seeded documents stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ApproveCr,
    DeactivateStudent,
    TakeAttendance,
    ViewReports,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ApproveCr => "approve_cr",
            Permission::DeactivateStudent => "deactivate_student",
            Permission::TakeAttendance => "take_attendance",
            Permission::ViewReports => "view_reports",
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl UserProfile {
    /// Deactivated profiles authorize nothing. Top-level roles bypass the
    /// explicit grant list; everyone else needs the grant spelled out.
    pub fn authorizes(&self, permission: Permission) -> bool {
        if !self.is_active {
            return false;
        }
        self.role.is_top_level() || self.permissions.contains(&permission)
    }
}
