use axum::{Extension, Json, extract::State};
use tracing::info;

use crate::{
    errors::Result,
    middleware::Caller,
    state::AppState,
    utils::{ids::user_rid, time::time_now},
};

#[derive(serde::Serialize, Debug, Clone)]
pub struct BootstrapProfileResponse {
    pub success: bool,
}

/// First-authentication profile creation. At-least-once safe: the email is
/// refreshed every call, everything else only fills in when absent, so a
/// retry or a pre-created record (pending invite, seeded doc) is preserved.
pub async fn bootstrap_profile(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> Result<Json<BootstrapProfileResponse>> {
    state
        .sdb
        .query(
            "UPSERT $user_id SET \
             email = $email, \
             role = role ?? 'STUDENT', \
             allowed_classes = allowed_classes ?? [], \
             permissions = permissions ?? [], \
             is_active = is_active ?? true, \
             created_at = created_at ?? $now;",
        )
        .bind(("user_id", user_rid(&caller.id)))
        .bind(("email", caller.email.clone()))
        .bind(("now", time_now()))
        .await?
        .check()?;

    info!("Profile bootstrapped for {}", caller.id);

    Ok(Json(BootstrapProfileResponse { success: true }))
}
