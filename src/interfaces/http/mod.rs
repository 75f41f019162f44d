//! Inbound HTTP surface.
//!
//! - `GET /check-balance?cost=<n>` with an `Authorization` header
//! - `POST /s2s-payout` with a `{"cost": <n>}` body

pub mod error;
pub mod handlers;

use crate::application::engine::BalanceGate;
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn router(gate: Arc<BalanceGate>) -> Router {
    Router::new()
        .route("/check-balance", get(handlers::check_balance))
        .route("/s2s-payout", post(handlers::payout))
        .layer(TraceLayer::new_for_http())
        .with_state(gate)
}
