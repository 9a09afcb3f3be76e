use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::json;
use tracing::info;

use crate::{
    consts::gate_const::{
        AUDIT_LOG_TABLE, DEFAULT_INVITE_TTL_DAYS, EMAIL_OUTBOX_TABLE, INVITE_LIST_LIMIT,
        INVITE_TABLE,
    },
    errors::{Error, Result},
    gate::{INVITE_ALREADY_USED, check_gated},
    middleware::Caller,
    models::{
        audit::{APPEND_AUDIT, CreateAuditEvent},
        invite::{CreateInvite, Invite, InviteSummary},
        outbox::CreateOutboxMessage,
        user::{ProfileGrant, Role},
    },
    state::AppState,
    utils::{
        ids::{new_key, rid, user_rid},
        permission_context::{is_top_level, resolve_profile},
        scope::within_scope,
        time::{time_now, time_plus_days},
        token::{generate_invite_token, hash_token},
        validated_form::ValidatedJson,
    },
};

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, validator::Validate)]
pub struct CreateInviteRequest {
    #[validate(email, length(max = 255))]
    pub invited_email: String,
    pub role: Role,
    #[serde(default)]
    pub allowed_classes: Vec<String>,
    pub expires_in_days: Option<i64>,
}

#[derive(serde::Serialize, Debug, Clone)]
pub struct CreateInviteResponse {
    pub invite_id: String,
    /// The raw bearer token. Returned exactly once; only its digest is stored.
    pub token: String,
}

pub async fn create_invite(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ValidatedJson(input): ValidatedJson<CreateInviteRequest>,
) -> Result<(StatusCode, Json<CreateInviteResponse>)> {
    let inviter = match resolve_profile(&state.sdb, &caller.id).await {
        Ok(profile) => profile,
        Err(Error::NotFound(_)) => {
            return Err(Error::PermissionDenied(
                "insufficient permissions to create invites".to_string(),
            ));
        }
        Err(e) => return Err(e),
    };

    if !inviter.is_active || !inviter.role.can_invite() {
        return Err(Error::PermissionDenied(
            "insufficient permissions to create invites".to_string(),
        ));
    }

    // CC delegates only within its own class scope; HOD/ADMIN skip this.
    if inviter.role == Role::Cc {
        if inviter.allowed_classes.is_empty() {
            return Err(Error::PermissionDenied(
                "inviter has no allowed classes configured".to_string(),
            ));
        }
        if !within_scope(&inviter.allowed_classes, &input.allowed_classes) {
            return Err(Error::PermissionDenied(
                "requested allowed_classes exceed inviter scope".to_string(),
            ));
        }
    }

    let ttl_days = input
        .expires_in_days
        .filter(|days| *days > 0)
        .unwrap_or(DEFAULT_INVITE_TTL_DAYS);

    let invited_email = input.invited_email.trim().to_lowercase();
    let (token, token_hash) = generate_invite_token();
    let invite_id = rid(INVITE_TABLE, &new_key());
    let invite_key = invite_id.key().to_string();

    let invite = CreateInvite {
        token_hash,
        invited_email: invited_email.clone(),
        role: input.role,
        allowed_classes: input.allowed_classes.clone(),
        expires_at: time_plus_days(ttl_days),
        used: false,
        revoked: false,
        created_by: user_rid(&caller.id),
        created_at: time_now(),
    };

    let dynamic_link_domain = std::env::var("DYNAMIC_LINK_DOMAIN").ok();
    let mail = CreateOutboxMessage::invite_email(
        &state.app_url,
        dynamic_link_domain.as_deref(),
        &invite_key,
        &invited_email,
        input.role,
        &input.allowed_classes,
        &token,
        ttl_days,
    );

    let audit = CreateAuditEvent::new(
        user_rid(&caller.id),
        "create_invite",
        invite_key.clone(),
        json!({ "invited_email": invited_email, "role": input.role }),
    );

    let response = state
        .sdb
        .query("BEGIN TRANSACTION")
        .query("CREATE $invite_id CONTENT $invite;")
        .bind(("invite_id", invite_id.clone()))
        .bind(("invite", invite))
        .query("CREATE type::table($outbox_table) CONTENT $mail;")
        .bind(("outbox_table", EMAIL_OUTBOX_TABLE))
        .bind(("mail", mail))
        .query(APPEND_AUDIT)
        .bind(("audit_table", AUDIT_LOG_TABLE))
        .bind(("audit", audit))
        .query("COMMIT TRANSACTION")
        .await?;
    check_gated(response)?;

    info!("Invite {} created for {}", invite_key, invited_email);

    Ok((
        StatusCode::CREATED,
        Json(CreateInviteResponse {
            invite_id: invite_key,
            token,
        }),
    ))
}

#[derive(serde::Serialize, Debug, Clone)]
pub struct ListInvitesResponse {
    pub invites: Vec<InviteSummary>,
}

pub async fn list_invites(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> Result<Json<ListInvitesResponse>> {
    let admin = is_top_level(&state.sdb, &caller.id).await?;

    let invites: Vec<Invite> = if admin {
        state
            .sdb
            .query("SELECT * FROM type::table($table) ORDER BY created_at DESC LIMIT $limit;")
            .bind(("table", INVITE_TABLE))
            .bind(("limit", INVITE_LIST_LIMIT))
            .await?
            .take(0)?
    } else {
        state
            .sdb
            .query("SELECT * FROM type::table($table) WHERE created_by = $caller ORDER BY created_at DESC LIMIT $limit;")
            .bind(("table", INVITE_TABLE))
            .bind(("caller", user_rid(&caller.id)))
            .bind(("limit", INVITE_LIST_LIMIT))
            .await?
            .take(0)?
    };

    Ok(Json(ListInvitesResponse {
        invites: invites.into_iter().map(InviteSummary::from).collect(),
    }))
}

#[derive(serde::Serialize, Debug, Clone)]
pub struct RevokeInviteResponse {
    pub success: bool,
}

pub async fn revoke_invite(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(invite_id): Path<String>,
) -> Result<Json<RevokeInviteResponse>> {
    let invite: Invite = state
        .sdb
        .select(rid(INVITE_TABLE, &invite_id))
        .await?
        .ok_or_else(|| Error::NotFound("invite".to_string()))?;

    let caller_rid = user_rid(&caller.id);
    let is_creator = invite.created_by == caller_rid;
    if !is_creator && !is_top_level(&state.sdb, &caller.id).await? {
        return Err(Error::PermissionDenied(
            "not allowed to revoke this invite".to_string(),
        ));
    }

    // redeemed and revoked are both terminal; neither can be revoked again
    if invite.used {
        return Err(Error::InviteUsed);
    }

    let audit = CreateAuditEvent::new(
        caller_rid.clone(),
        "revoke_invite",
        invite.id.key().to_string(),
        json!({ "revoked_by": caller.id }),
    );

    // Revocation is modeled as a used state so no later redemption can race
    // it, and shares the redemption compare-and-set: a racing redemption that
    // flips `used` first makes this transaction abort instead of rewriting a
    // consumed invite.
    let response = state
        .sdb
        .query("BEGIN TRANSACTION")
        .query(
            "LET $closed = (UPDATE $invite_id SET used = true, revoked = true, revoked_by = $caller, revoked_at = $now WHERE used = false RETURN AFTER);",
        )
        .bind(("invite_id", invite.id.clone()))
        .bind(("caller", caller_rid.clone()))
        .bind(("now", time_now()))
        .query(format!(
            "IF array::len($closed) == 0 {{ THROW '{}' }};",
            INVITE_ALREADY_USED
        ))
        .query(APPEND_AUDIT)
        .bind(("audit_table", AUDIT_LOG_TABLE))
        .bind(("audit", audit))
        .query("COMMIT TRANSACTION")
        .await?;
    check_gated(response)?;

    Ok(Json(RevokeInviteResponse { success: true }))
}

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, validator::Validate)]
pub struct AcceptInviteRequest {
    #[validate(length(min = 1))]
    pub token: String,
}

#[derive(serde::Serialize, Debug, Clone)]
pub struct AcceptInviteResponse {
    pub success: bool,
    pub role: Role,
}

pub async fn accept_invite(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ValidatedJson(input): ValidatedJson<AcceptInviteRequest>,
) -> Result<Json<AcceptInviteResponse>> {
    let hash = hash_token(input.token.trim());

    let invite: Invite = state
        .sdb
        .query("SELECT * FROM type::table($table) WHERE token_hash = $hash LIMIT 1;")
        .bind(("table", INVITE_TABLE))
        .bind(("hash", hash))
        .await?
        .take::<Vec<Invite>>(0)?
        .into_iter()
        .next()
        .ok_or_else(|| Error::NotFound("invite".to_string()))?;

    if invite.used {
        return Err(Error::InviteUsed);
    }
    if invite.is_expired() {
        return Err(Error::InviteExpired);
    }

    // empty invited email = open invite
    let invited_email = invite.invited_email.trim().to_lowercase();
    if !invited_email.is_empty() && invited_email != caller.email {
        return Err(Error::PermissionDenied(
            "signed-in email does not match invited email".to_string(),
        ));
    }

    let caller_rid = user_rid(&caller.id);
    let grant = ProfileGrant {
        email: caller.email.clone(),
        name: None,
        role: invite.role,
        allowed_classes: invite.allowed_classes.clone(),
        permissions: invite.role.default_permissions(),
        is_active: true,
        updated_at: time_now(),
    };

    let audit = CreateAuditEvent::new(
        caller_rid.clone(),
        "accept_invite",
        invite.id.key().to_string(),
        json!({ "invited_email": invited_email }),
    );

    // The conditional flip of `used` is the one mandatory compare-and-set:
    // of two racing redemptions exactly one sees used == false, the loser
    // aborts the whole transaction via THROW.
    let response = state
        .sdb
        .query("BEGIN TRANSACTION")
        .query("LET $flipped = (UPDATE $invite_id SET used = true, used_by = $caller_id, used_at = $now WHERE used = false RETURN AFTER);")
        .bind(("invite_id", invite.id.clone()))
        .bind(("caller_id", caller_rid.clone()))
        .bind(("now", time_now()))
        .query(format!(
            "IF array::len($flipped) == 0 {{ THROW '{}' }};",
            INVITE_ALREADY_USED
        ))
        .query("UPSERT $caller_id MERGE $grant;")
        .bind(("grant", grant))
        .query(APPEND_AUDIT)
        .bind(("audit_table", AUDIT_LOG_TABLE))
        .bind(("audit", audit))
        .query("COMMIT TRANSACTION")
        .await?;
    check_gated(response)?;

    info!("Invite {} accepted by {}", invite.id.key(), caller.id);

    Ok(Json(AcceptInviteResponse {
        success: true,
        role: invite.role,
    }))
}
