use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde_json::json;

use crate::{
    consts::gate_const::{AUDIT_LOG_TABLE, STUDENT_TABLE},
    errors::{Error, Result},
    gate::check_gated,
    middleware::Caller,
    models::{
        audit::{APPEND_AUDIT, CreateAuditEvent},
        permission::Permission,
        student::Student,
    },
    state::AppState,
    utils::{
        ids::{rid, user_rid},
        permission_context::require_permission,
        time::time_now,
    },
};

#[derive(serde::Serialize, Debug, Clone)]
pub struct DeactivateStudentResponse {
    pub success: bool,
}

pub async fn deactivate_student(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(student_id): Path<String>,
) -> Result<Json<DeactivateStudentResponse>> {
    require_permission(&state.sdb, &caller.id, Permission::DeactivateStudent).await?;

    let student: Student = state
        .sdb
        .select(rid(STUDENT_TABLE, &student_id))
        .await?
        .ok_or_else(|| Error::NotFound("student".to_string()))?;

    let audit = CreateAuditEvent::new(
        user_rid(&caller.id),
        "deactivate_student",
        student.id.key().to_string(),
        json!({}),
    );

    let response = state
        .sdb
        .query("BEGIN TRANSACTION")
        .query("UPDATE $student_id SET active = false, updated_at = $now;")
        .bind(("student_id", student.id.clone()))
        .bind(("now", time_now()))
        .query(APPEND_AUDIT)
        .bind(("audit_table", AUDIT_LOG_TABLE))
        .bind(("audit", audit))
        .query("COMMIT TRANSACTION")
        .await?;
    check_gated(response)?;

    Ok(Json(DeactivateStudentResponse { success: true }))
}
