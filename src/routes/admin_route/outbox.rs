use axum::{Extension, Json, extract::State};
use tracing::{info, warn};

use crate::{
    consts::gate_const::{DEFAULT_DRAIN_LIMIT, EMAIL_OUTBOX_TABLE},
    errors::Result,
    middleware::Caller,
    models::{outbox::OutboxMessage, user::Role},
    state::AppState,
    utils::{mailer::Mailer, permission_context::require_role, time::time_now,
        validated_form::ValidatedJson},
};

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, Default, validator::Validate)]
pub struct DrainOutboxRequest {
    #[validate(range(min = 1, max = 500))]
    pub limit: Option<i64>,
}

#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DrainStatus {
    Sent,
    Logged,
    Error,
}

#[derive(serde::Serialize, Debug, Clone)]
pub struct DrainResult {
    pub id: String,
    pub status: DrainStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(serde::Serialize, Debug, Clone)]
pub struct DrainOutboxResponse {
    pub processed: usize,
    pub results: Vec<DrainResult>,
}

/// Relay pass over the outbox. Each message's delivery attempt is isolated:
/// a transport failure is recorded on that message and the batch continues.
/// Sent and logged messages are terminal and never picked up again.
pub async fn drain_outbox(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    input: Option<ValidatedJson<DrainOutboxRequest>>,
) -> Result<Json<DrainOutboxResponse>> {
    // bare POST means defaults
    let input = input.map(|ValidatedJson(v)| v).unwrap_or_default();

    require_role(&state.sdb, &caller.id, &[Role::Hod, Role::Admin]).await?;

    let limit = input.limit.unwrap_or(DEFAULT_DRAIN_LIMIT);

    let pending: Vec<OutboxMessage> = state
        .sdb
        .query(
            "SELECT * FROM type::table($table) WHERE sent = false AND logged = false ORDER BY created_at ASC LIMIT $limit;",
        )
        .bind(("table", EMAIL_OUTBOX_TABLE))
        .bind(("limit", limit))
        .await?
        .take(0)?;

    let mut results = Vec::with_capacity(pending.len());
    for message in pending {
        let id = message.id.key().to_string();

        if !state.mailer.is_configured() {
            // no-transport fallback: log the message and close it out
            info!("Outbox message {} logged (no mail transport)", id);
            state
                .sdb
                .query("UPDATE $msg SET logged = true, logged_at = $now;")
                .bind(("msg", message.id.clone()))
                .bind(("now", time_now()))
                .await?
                .check()?;
            results.push(DrainResult {
                id,
                status: DrainStatus::Logged,
                error: None,
            });
            continue;
        }

        match state
            .mailer
            .send(&message.to, &message.subject, &message.body)
            .await
        {
            Ok(()) => {
                state
                    .sdb
                    .query("UPDATE $msg SET sent = true, sent_at = $now, provider = $provider;")
                    .bind(("msg", message.id.clone()))
                    .bind(("now", time_now()))
                    .bind(("provider", Mailer::PROVIDER))
                    .await?
                    .check()?;
                results.push(DrainResult {
                    id,
                    status: DrainStatus::Sent,
                    error: None,
                });
            }
            Err(e) => {
                // stays pending, eligible for the next drain
                warn!("Failed to send outbox message {}: {}", id, e);
                let error = e.to_string();
                state
                    .sdb
                    .query("UPDATE $msg SET last_error = $error, attempted_at = $now;")
                    .bind(("msg", message.id.clone()))
                    .bind(("error", error.clone()))
                    .bind(("now", time_now()))
                    .await?
                    .check()?;
                results.push(DrainResult {
                    id,
                    status: DrainStatus::Error,
                    error: Some(error),
                });
            }
        }
    }

    Ok(Json(DrainOutboxResponse {
        processed: results.len(),
        results,
    }))
}
