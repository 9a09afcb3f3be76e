use axum::{
    Router, middleware,
    routing::post,
};

use crate::{
    middleware::auth_jwt_middleware,
    routes::admin_route::{
        elevation::approve_cr,
        invitation::{accept_invite, create_invite, list_invites, revoke_invite},
        outbox::drain_outbox,
        profile::bootstrap_profile,
        student::deactivate_student,
    },
    state::AppState,
};

pub mod elevation;
pub mod invitation;
pub mod outbox;
pub mod profile;
pub mod student;

pub fn admin_router(config: AppState) -> Router<AppState> {
    // every gated operation requires an authenticated caller
    Router::new()
        .route("/invites", post(create_invite).get(list_invites))
        .route("/invites/accept", post(accept_invite))
        .route("/invites/{invite_id}/revoke", post(revoke_invite))
        .route("/cr-requests/{request_id}/approve", post(approve_cr))
        .route("/students/{student_id}/deactivate", post(deactivate_student))
        .route("/outbox/drain", post(drain_outbox))
        .route("/profile/bootstrap", post(bootstrap_profile))
        .layer(middleware::from_fn(auth_jwt_middleware))
        .with_state(config)
}
