//! HTTP adapters for the offer network.
//!
//! One `reqwest::Client` serves the session, catalog and campaign-detail
//! ports. Every call carries the client-wide timeout, and a timeout surfaces
//! as the failure of whichever port issued the call.

use crate::domain::offer::{CampaignDetail, CampaignList, Offer, OfferList};
use crate::domain::ports::{CampaignDetailService, CatalogService, SessionService};
use crate::domain::session::{Session, SessionProfile};
use crate::error::{GateError, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{StatusCode, Url};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Catalog constraints the gate asks the network to skip.
pub const IGNORED_CONSTRAINTS: &str = "CountryMatchConstraint,SDKAdvancePlusSupportConstraint,PlatformConstraint,StudioSDKNonS2SConstraint,IosFraudConstraints";

const CATALOG_USER_AGENT: &str = "curl/8.1.2";
const INTEGRATION_TYPE: &str = "studio";
const DETAIL_LANGUAGE: &str = "en";

#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub base_url: String,
    /// Publisher SDK hash used for the session bootstrap.
    pub sdk_hash: String,
    /// Sent as `x-api-key` on catalog reads.
    pub api_key: String,
    pub inspect_token: Option<String>,
    pub inspect_country: String,
    /// Applied to every outbound call.
    pub timeout: Duration,
}

#[derive(Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    base_url: Url,
    config: Arc<UpstreamConfig>,
}

impl UpstreamClient {
    pub fn new(config: UpstreamConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| GateError::Config(format!("upstream url {}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(GateError::Config(format!(
                "upstream url {} cannot carry a path",
                config.base_url
            )));
        }

        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url,
            config: Arc::new(config),
        })
    }

    /// Appends percent-encoded path segments to the base url.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

#[async_trait]
impl SessionService for UpstreamClient {
    async fn create_session(&self, profile: &SessionProfile) -> Result<Session> {
        let url = self.endpoint(&[
            "v2",
            "user-management",
            "public",
            "app",
            &self.config.sdk_hash,
            "init",
        ]);

        let resp = self
            .client
            .post(url)
            .json(profile)
            .send()
            .await
            .map_err(|e| GateError::Bootstrap(e.to_string()))?;

        let status = resp.status();
        if status != StatusCode::OK && status != StatusCode::CREATED {
            return Err(GateError::Bootstrap(format!("unexpected status: {status}")));
        }

        resp.json::<Session>()
            .await
            .map_err(|e| GateError::Bootstrap(format!("failed to decode response: {e}")))
    }
}

#[async_trait]
impl CatalogService for UpstreamClient {
    async fn fetch_offers(&self, session: &Session) -> Result<Vec<Offer>> {
        let url = self.endpoint(&[
            "v1",
            "studio-sdk",
            "user",
            &session.external_user_id,
            "offers",
        ]);

        let mut request = self
            .client
            .get(url)
            .query(&[
                ("ignore_constraints", IGNORED_CONSTRAINTS),
                ("inspect_country", self.config.inspect_country.as_str()),
                ("usage_access_allowed", "false"),
            ])
            .header("Adjoe-SDKHash", &session.app_hash)
            .header("x-api-key", &self.config.api_key)
            .header("Adjoe-IntegrationType", INTEGRATION_TYPE)
            .header(USER_AGENT, CATALOG_USER_AGENT)
            .header(ACCEPT, "*/*");
        if let Some(token) = &self.config.inspect_token {
            request = request.header("X-Inspect-Token", token);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| GateError::Fetch(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(GateError::Fetch(format!("unexpected status: {status}")));
        }

        let list = resp
            .json::<OfferList>()
            .await
            .map_err(|e| GateError::Fetch(format!("failed to decode offers: {e}")))?;
        debug!(offers = list.offers.len(), "Fetched offer catalog");
        Ok(list.offers)
    }
}

#[async_trait]
impl CampaignDetailService for UpstreamClient {
    async fn fetch_campaign_details(
        &self,
        session: &Session,
        token: &str,
    ) -> Result<Vec<CampaignDetail>> {
        let url = self.endpoint(&[
            "v1",
            "studio-sdk",
            "sdk",
            &session.app_hash,
            "tokens",
            token,
            "language",
            DETAIL_LANGUAGE,
            "campaign-details",
        ]);

        let resp = self
            .client
            .get(url)
            .header("Adjoe-UserUUID", &session.user_uuid)
            .send()
            .await
            .map_err(|e| GateError::Enrichment(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(GateError::Enrichment(format!("unexpected status: {status}")));
        }

        let list = resp
            .json::<CampaignList>()
            .await
            .map_err(|e| GateError::Enrichment(format!("decode error: {e}")))?;
        Ok(list.campaigns)
    }
}
