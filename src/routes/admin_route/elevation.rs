use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde_json::json;
use tracing::info;

use crate::{
    consts::gate_const::{AUDIT_LOG_TABLE, CR_REQUEST_TABLE},
    errors::{Error, Result},
    gate::check_gated,
    middleware::Caller,
    models::{
        audit::{APPEND_AUDIT, CreateAuditEvent},
        elevation::{CrRequest, CrRequestStatus},
        permission::Permission,
        user::{ProfileGrant, Role},
    },
    state::AppState,
    utils::{
        ids::{new_key, rid, user_rid},
        permission_context::{find_profile_by_email, require_permission},
        time::time_now,
        validated_form::ValidatedJson,
    },
};

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, Default, validator::Validate)]
pub struct ApproveCrRequest {
    /// Pre-known target profile key; otherwise resolved by the request's
    /// email, or a placeholder profile is minted.
    pub target_id: Option<String>,
}

#[derive(serde::Serialize, Debug, Clone)]
pub struct ApproveCrResponse {
    pub success: bool,
    pub target_id: Option<String>,
    pub message: Option<String>,
}

pub async fn approve_cr(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(request_id): Path<String>,
    input: Option<ValidatedJson<ApproveCrRequest>>,
) -> Result<Json<ApproveCrResponse>> {
    // bare POST means defaults
    let input = input.map(|ValidatedJson(v)| v).unwrap_or_default();

    require_permission(&state.sdb, &caller.id, Permission::ApproveCr).await?;

    let request: CrRequest = state
        .sdb
        .select(rid(CR_REQUEST_TABLE, &request_id))
        .await?
        .ok_or_else(|| Error::NotFound("CR request".to_string()))?;

    // approval is idempotent: no second audit event, no profile rewrite
    if request.status == CrRequestStatus::Approved {
        return Ok(Json(ApproveCrResponse {
            success: true,
            target_id: None,
            message: Some("Already approved".to_string()),
        }));
    }

    let target_rid = match input.target_id.as_deref().filter(|t| !t.trim().is_empty()) {
        Some(target) => user_rid(target),
        None => match request.contact_email() {
            Some(email) => match find_profile_by_email(&state.sdb, &email).await? {
                Some(profile) => profile.id,
                None => user_rid(&new_key()),
            },
            None => user_rid(&new_key()),
        },
    };
    let target_key = target_rid.key().to_string();

    let grant = ProfileGrant {
        email: request.contact_email().unwrap_or_default(),
        name: request.display_name(),
        role: Role::Cr,
        allowed_classes: request.allowed_classes.clone(),
        permissions: Role::Cr.default_permissions(),
        is_active: true,
        updated_at: time_now(),
    };

    let audit = CreateAuditEvent::new(
        user_rid(&caller.id),
        "approve_cr",
        target_key.clone(),
        json!({ "request_id": request_id.clone() }),
    );

    let response = state
        .sdb
        .query("BEGIN TRANSACTION")
        .query("UPSERT $target_id MERGE $grant;")
        .bind(("target_id", target_rid.clone()))
        .bind(("grant", grant))
        .query(
            "UPDATE $request_id SET status = $status, reviewed_by = $caller, reviewed_at = $now;",
        )
        .bind(("request_id", request.id.clone()))
        .bind(("status", CrRequestStatus::Approved))
        .bind(("caller", user_rid(&caller.id)))
        .bind(("now", time_now()))
        .query(APPEND_AUDIT)
        .bind(("audit_table", AUDIT_LOG_TABLE))
        .bind(("audit", audit))
        .query("COMMIT TRANSACTION")
        .await?;
    check_gated(response)?;

    info!("CR request {} approved, target {}", request_id, target_key);

    Ok(Json(ApproveCrResponse {
        success: true,
        target_id: Some(target_key),
        message: None,
    }))
}
