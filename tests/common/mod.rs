#![allow(dead_code)]

use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokengate::application::bootstrap::SessionBootstrapper;
use tokengate::application::engine::BalanceGate;
use tokengate::application::enricher::DetailEnricher;
use tokengate::domain::ledger::Ledger;
use tokengate::domain::session::SessionProfile;
use tokengate::infrastructure::in_memory::RecordingPayoutProcessor;
use tokengate::infrastructure::upstream::{UpstreamClient, UpstreamConfig};
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower::ServiceExt;

pub const AUTH_TOKEN: &str = "2790c37723d14f8c9964d368e2203325";
pub const SDK_HASH: &str = "sdk-hash";
pub const APP_HASH: &str = "app-hash";
pub const USER_UUID: &str = "user-uuid";

/// One request seen by the fake network.
#[derive(Debug, Clone)]
pub struct Seen {
    pub path: String,
    pub headers: HeaderMap,
    pub query: HashMap<String, String>,
    pub body: Option<Value>,
}

/// Scripted stand-in for the offer network.
#[derive(Clone)]
pub struct FakeNetwork {
    pub init_status: StatusCode,
    pub init_delay: Duration,
    pub offers: (StatusCode, String),
    pub details: HashMap<String, (StatusCode, String)>,
    pub init_calls: Arc<AtomicUsize>,
    pub catalog_calls: Arc<AtomicUsize>,
    pub seen: Arc<Mutex<Vec<Seen>>>,
}

impl Default for FakeNetwork {
    fn default() -> Self {
        Self {
            init_status: StatusCode::CREATED,
            init_delay: Duration::ZERO,
            offers: (StatusCode::OK, sample_offers().to_string()),
            details: HashMap::from([(
                "token-1".to_string(),
                (StatusCode::OK, sample_campaigns().to_string()),
            )]),
            init_calls: Arc::new(AtomicUsize::new(0)),
            catalog_calls: Arc::new(AtomicUsize::new(0)),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl FakeNetwork {
    pub fn init_calls(&self) -> usize {
        self.init_calls.load(Ordering::SeqCst)
    }

    pub fn catalog_calls(&self) -> usize {
        self.catalog_calls.load(Ordering::SeqCst)
    }

    pub async fn seen_with_prefix(&self, prefix: &str) -> Vec<Seen> {
        self.seen
            .lock()
            .await
            .iter()
            .filter(|seen| seen.path.starts_with(prefix))
            .cloned()
            .collect()
    }

    async fn record(&self, path: String, headers: HeaderMap, query: HashMap<String, String>, body: Option<Value>) {
        self.seen.lock().await.push(Seen {
            path,
            headers,
            query,
            body,
        });
    }

    /// Serves the fake network on an ephemeral port and returns its base url.
    pub async fn spawn(self) -> String {
        let app = Router::new()
            .route("/v2/user-management/public/app/:sdk_hash/init", post(init))
            .route("/v1/studio-sdk/user/:user/offers", get(offers))
            .route(
                "/v1/studio-sdk/sdk/:app_hash/tokens/:token/language/en/campaign-details",
                get(details),
            )
            .with_state(self);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }
}

async fn init(
    State(net): State<FakeNetwork>,
    Path(sdk_hash): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    net.init_calls.fetch_add(1, Ordering::SeqCst);
    let external_user_id = body["ExternalUserID"].clone();
    net.record(format!("/init/{sdk_hash}"), headers, HashMap::new(), Some(body))
        .await;
    if !net.init_delay.is_zero() {
        tokio::time::sleep(net.init_delay).await;
    }

    if !net.init_status.is_success() {
        return (net.init_status, "rejected").into_response();
    }
    (
        net.init_status,
        Json(json!({
            "ExternalUserID": external_user_id,
            "AppHash": APP_HASH,
            "UserUUID": USER_UUID,
            "ProvidedGender": "female",
            "TOSAccepted": true,
            "ATTLimit": 1
        })),
    )
        .into_response()
}

async fn offers(
    State(net): State<FakeNetwork>,
    Path(user): Path<String>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    net.catalog_calls.fetch_add(1, Ordering::SeqCst);
    net.record(format!("/offers/{user}"), headers, query, None).await;
    let (status, body) = net.offers.clone();
    (status, [("content-type", "application/json")], body).into_response()
}

async fn details(
    State(net): State<FakeNetwork>,
    Path((app_hash, token)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    net.record(format!("/details/{app_hash}/{token}"), headers, HashMap::new(), None)
        .await;
    match net.details.get(&token) {
        Some((status, body)) => {
            (*status, [("content-type", "application/json")], body.clone()).into_response()
        }
        None => Json(json!({ "Campaigns": [] })).into_response(),
    }
}

pub fn sample_offers() -> Value {
    json!({
        "Offers": [
            {
                "AppID": "app-1",
                "AppName": "Puzzle Quest",
                "Coins": 500,
                "Token": "token-1",
                "IsRecommended": true,
                "ImageURLs": {"icon": "https://cdn.example/icon1.png"},
                "VideoURLs": null
            },
            {
                "AppID": "app-2",
                "AppName": "Road Racer",
                "Coins": 250,
                "Token": "token-2",
                "Description": "catalog description"
            }
        ]
    })
}

pub fn sample_campaigns() -> Value {
    json!({
        "Campaigns": [{
            "UUID": "campaign-1",
            "Type": "AdvancePlus",
            "Description": "Reach level 10 in Puzzle Quest",
            "PostInstallRewardCoins": 50,
            "App": {"ID": "app-1", "Name": "Puzzle Quest", "BundleID": "com.puzzle.quest", "Category": "Puzzle"},
            "ImageURLs": {"Portrait": "p.png", "Landscape": "l.png", "Icon": "i.png"},
            "EventConfigs": {"AdvancePlus": {"SequentialEvents": {
                "TotalCoinsPossible": 500,
                "Events": [
                    {"Name": "install", "Description": "Install the app", "Coins": 100},
                    {"Name": "level_10", "Description": "Reach level 10", "Coins": 400}
                ]
            }}},
            "CashbackSDKConfig": {"IsEnabled": true, "ExchangeRate": 0.25, "MaxLimitPerCampaignUSD": 20},
            "Promotion": {"Name": "Launch week", "BoostFactor": 1.5, "StopAt": "2026-12-31T23:59:59Z"}
        }]
    })
}

pub fn upstream_config(base_url: &str) -> UpstreamConfig {
    UpstreamConfig {
        base_url: base_url.to_string(),
        sdk_hash: SDK_HASH.to_string(),
        api_key: AUTH_TOKEN.to_string(),
        inspect_token: Some("inspect-token".to_string()),
        inspect_country: "DE".to_string(),
        timeout: Duration::from_secs(2),
    }
}

/// Builds a gate wired to the live HTTP adapters pointing at `base_url`.
pub fn gate(base_url: &str, balance: u64) -> Arc<BalanceGate> {
    let upstream = UpstreamClient::new(upstream_config(base_url)).unwrap();
    Arc::new(BalanceGate::new(
        AUTH_TOKEN,
        SessionBootstrapper::new(Box::new(upstream.clone()), SessionProfile::default()),
        Arc::new(Ledger::new(balance)),
        Box::new(upstream.clone()),
        DetailEnricher::new(Box::new(upstream)),
        Box::new(RecordingPayoutProcessor::new()),
    ))
}

/// Sends one request through the router and decodes the body as JSON.
///
/// An empty body decodes to `Value::Null`.
pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub fn check_balance(cost: Option<&str>, auth: Option<&str>) -> Request<Body> {
    let uri = match cost {
        Some(cost) => format!("/check-balance?cost={cost}"),
        None => "/check-balance".to_string(),
    };
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(auth) = auth {
        builder = builder.header("Authorization", auth);
    }
    builder.body(Body::empty()).unwrap()
}
