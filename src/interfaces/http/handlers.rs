use crate::application::engine::{BalanceCheck, BalanceGate};
use crate::domain::offer::OfferList;
use crate::domain::payout::PayoutRequest;
use crate::error::GateError;
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    pub tokens: u64,
}

pub async fn check_balance(
    State(gate): State<Arc<BalanceGate>>,
    headers: HeaderMap,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Response, GateError> {
    let credential = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    // First `cost` wins; an unreadable query counts as a missing cost.
    let cost = query.ok().and_then(|Query(pairs)| {
        pairs
            .into_iter()
            .find_map(|(key, value)| (key == "cost").then_some(value))
    });

    let response = match gate
        .check_balance(credential, cost.as_deref())
        .await?
    {
        BalanceCheck::Debited { tokens } => Json(TokenResponse { tokens }).into_response(),
        BalanceCheck::Offers(offers) => Json(OfferList { offers }).into_response(),
    };
    Ok(response)
}

pub async fn payout(
    State(gate): State<Arc<BalanceGate>>,
    payload: Result<Json<PayoutRequest>, JsonRejection>,
) -> Result<Response, GateError> {
    let Json(request) = payload.map_err(|rejection| GateError::Payout(rejection.body_text()))?;
    let receipt = gate.submit_payout(request).await?;
    Ok((StatusCode::ACCEPTED, Json(receipt)).into_response())
}
