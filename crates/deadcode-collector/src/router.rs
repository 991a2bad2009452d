//! Axum router wiring for the dashboard and ops endpoints.

use axum::{routing::get, Router};

use crate::{app_state::AppState, dashboard, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard::views::index))
        .route("/dead", get(dashboard::views::dead))
        .route("/active", get(dashboard::views::active))
        .route("/chart", get(dashboard::views::chart))
        .route(
            "/reset",
            get(dashboard::views::reset_form).post(dashboard::actions::reset),
        )
        .route(
            "/remove",
            get(dashboard::views::remove_form).post(dashboard::actions::remove),
        )
        .route("/health-check", get(ops::health_check))
        .route("/ready-check", get(ops::ready_check))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}
