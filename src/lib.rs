use axum::Router;

use crate::{routes::admin_route::admin_router, state::AppState};

pub mod consts;
pub mod errors;
pub mod gate;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod utils;

pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/admin", admin_router(state.clone()))
        .with_state(state)
}
