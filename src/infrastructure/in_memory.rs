//! In-process port implementations. The payout recorder backs the binary; the
//! static session, catalog and detail services back the test suites.

use crate::domain::ledger::Cost;
use crate::domain::offer::{CampaignDetail, Offer};
use crate::domain::payout::PayoutReceipt;
use crate::domain::ports::{CampaignDetailService, CatalogService, PayoutProcessor, SessionService};
use crate::domain::session::{Session, SessionProfile};
use crate::error::{GateError, Result};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tracing::info;

/// A session service answering from a fixed script.
///
/// Outcomes are consumed in order; the last one repeats forever. Clones share
/// the script, the call counter and the recorded profiles.
#[derive(Clone)]
pub struct StaticSessionService {
    outcomes: Arc<Mutex<VecDeque<std::result::Result<Session, String>>>>,
    delay: Duration,
    calls: Arc<AtomicUsize>,
    profiles: Arc<RwLock<Vec<SessionProfile>>>,
}

impl StaticSessionService {
    pub fn new(session: Session) -> Self {
        Self::scripted(vec![Ok(session)])
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self::scripted(vec![Err(reason.into())])
    }

    pub fn scripted(outcomes: Vec<std::result::Result<Session, String>>) -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(outcomes.into())),
            delay: Duration::ZERO,
            calls: Arc::new(AtomicUsize::new(0)),
            profiles: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Simulated latency of each call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn profiles(&self) -> Vec<SessionProfile> {
        self.profiles.read().await.clone()
    }
}

#[async_trait]
impl SessionService for StaticSessionService {
    async fn create_session(&self, profile: &SessionProfile) -> Result<Session> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.profiles.write().await.push(profile.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let mut outcomes = self.outcomes.lock().await;
        let outcome = if outcomes.len() > 1 {
            outcomes.pop_front()
        } else {
            outcomes.front().cloned()
        };
        match outcome {
            Some(Ok(session)) => Ok(session),
            Some(Err(reason)) => Err(GateError::Bootstrap(reason)),
            None => Err(GateError::Bootstrap("no session scripted".to_string())),
        }
    }
}

/// A catalog that always returns the same offers, or the same failure.
#[derive(Clone)]
pub struct StaticCatalog {
    offers: std::result::Result<Vec<Offer>, String>,
    delay: Duration,
    calls: Arc<AtomicUsize>,
}

impl StaticCatalog {
    pub fn new(offers: Vec<Offer>) -> Self {
        Self {
            offers: Ok(offers),
            delay: Duration::ZERO,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            offers: Err(reason.into()),
            delay: Duration::ZERO,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogService for StaticCatalog {
    async fn fetch_offers(&self, _session: &Session) -> Result<Vec<Offer>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.offers.clone().map_err(GateError::Fetch)
    }
}

/// Campaign details keyed by offer token.
///
/// Unknown tokens answer with an empty campaign list.
#[derive(Clone, Default)]
pub struct StaticCampaignDetails {
    campaigns: HashMap<String, std::result::Result<Vec<CampaignDetail>, String>>,
    requested: Arc<RwLock<Vec<String>>>,
}

impl StaticCampaignDetails {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_campaigns(mut self, token: &str, campaigns: Vec<CampaignDetail>) -> Self {
        self.campaigns.insert(token.to_string(), Ok(campaigns));
        self
    }

    pub fn with_failure(mut self, token: &str, reason: &str) -> Self {
        self.campaigns
            .insert(token.to_string(), Err(reason.to_string()));
        self
    }

    /// Tokens looked up so far, in call order.
    pub async fn requested_tokens(&self) -> Vec<String> {
        self.requested.read().await.clone()
    }
}

#[async_trait]
impl CampaignDetailService for StaticCampaignDetails {
    async fn fetch_campaign_details(
        &self,
        _session: &Session,
        token: &str,
    ) -> Result<Vec<CampaignDetail>> {
        self.requested.write().await.push(token.to_string());
        match self.campaigns.get(token) {
            Some(Ok(campaigns)) => Ok(campaigns.clone()),
            Some(Err(reason)) => Err(GateError::Enrichment(reason.clone())),
            None => Ok(Vec::new()),
        }
    }
}

/// Accepts every payout and keeps it in memory.
///
/// Payouts are logged and recorded only; the ledger is not credited.
#[derive(Clone, Default)]
pub struct RecordingPayoutProcessor {
    payouts: Arc<RwLock<Vec<Cost>>>,
}

impl RecordingPayoutProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn payouts(&self) -> Vec<Cost> {
        self.payouts.read().await.clone()
    }
}

#[async_trait]
impl PayoutProcessor for RecordingPayoutProcessor {
    async fn process_payout(&self, cost: Cost) -> Result<PayoutReceipt> {
        self.payouts.write().await.push(cost);
        info!(%cost, "Payout accepted");
        Ok(PayoutReceipt::accepted(cost))
    }
}
