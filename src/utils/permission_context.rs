use surrealdb::{Surreal, engine::any::Any};

use crate::consts::gate_const::USER_TABLE;
use crate::errors::{Error, Result};
use crate::models::{
    permission::Permission,
    user::{Role, UserProfile},
};
use crate::utils::ids::user_rid;

/// Read the caller's current profile. Every request resolves afresh; no
/// cross-request caching, so scope and permission decisions never go stale.
pub async fn resolve_profile(sdb: &Surreal<Any>, uid: &str) -> Result<UserProfile> {
    sdb.select(user_rid(uid))
        .await?
        .ok_or_else(|| Error::NotFound("profile".to_string()))
}

/// Permission gate. A caller without a stored profile is treated as
/// unprivileged, same as one whose profile lacks the grant.
pub async fn require_permission(
    sdb: &Surreal<Any>,
    uid: &str,
    permission: Permission,
) -> Result<UserProfile> {
    let profile = match resolve_profile(sdb, uid).await {
        Ok(profile) => profile,
        Err(Error::NotFound(_)) => {
            return Err(Error::PermissionDenied(format!(
                "caller lacks {} permission",
                permission
            )));
        }
        Err(e) => return Err(e),
    };

    if !profile.authorizes(permission) {
        return Err(Error::PermissionDenied(format!(
            "caller lacks {} permission",
            permission
        )));
    }
    Ok(profile)
}

/// Role-set gate for operations keyed on role rather than an explicit
/// permission grant.
pub async fn require_role(sdb: &Surreal<Any>, uid: &str, roles: &[Role]) -> Result<UserProfile> {
    let profile = match resolve_profile(sdb, uid).await {
        Ok(profile) => profile,
        Err(Error::NotFound(_)) => {
            return Err(Error::PermissionDenied("insufficient role".to_string()));
        }
        Err(e) => return Err(e),
    };

    if !profile.is_active || !roles.contains(&profile.role) {
        return Err(Error::PermissionDenied("insufficient role".to_string()));
    }
    Ok(profile)
}

/// Whether the caller currently holds a top-level role. Callers without a
/// profile simply see the non-admin view.
pub async fn is_top_level(sdb: &Surreal<Any>, uid: &str) -> Result<bool> {
    let profile: Option<UserProfile> = sdb.select(user_rid(uid)).await?;
    Ok(profile
        .map(|p| p.is_active && p.role.is_top_level())
        .unwrap_or(false))
}

/// Lookup used by approval flows when no explicit target id is supplied.
pub async fn find_profile_by_email(
    sdb: &Surreal<Any>,
    email: &str,
) -> Result<Option<UserProfile>> {
    let profiles: Vec<UserProfile> = sdb
        .query("SELECT * FROM type::table($table) WHERE string::lowercase(email) = $email LIMIT 1;")
        .bind(("table", USER_TABLE))
        .bind(("email", email.trim().to_lowercase()))
        .await?
        .take(0)?;
    Ok(profiles.into_iter().next())
}
