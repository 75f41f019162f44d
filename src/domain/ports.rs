use super::ledger::Cost;
use super::offer::{CampaignDetail, Offer};
use super::payout::PayoutReceipt;
use super::session::{Session, SessionProfile};
use crate::error::Result;
use async_trait::async_trait;

/// Creates the upstream session every other call is scoped to.
#[async_trait]
pub trait SessionService: Send + Sync {
    async fn create_session(&self, profile: &SessionProfile) -> Result<Session>;
}

/// Lists the offers currently available to a session's user.
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn fetch_offers(&self, session: &Session) -> Result<Vec<Offer>>;
}

/// Looks up the campaign records behind one offer token.
#[async_trait]
pub trait CampaignDetailService: Send + Sync {
    async fn fetch_campaign_details(
        &self,
        session: &Session,
        token: &str,
    ) -> Result<Vec<CampaignDetail>>;
}

/// Settles a payout reported by the offer network.
///
/// Implementations own idempotency and reporting; the gate only validates the
/// cost before handing it over.
#[async_trait]
pub trait PayoutProcessor: Send + Sync {
    async fn process_payout(&self, cost: Cost) -> Result<PayoutReceipt>;
}

pub type SessionServiceBox = Box<dyn SessionService>;
pub type CatalogServiceBox = Box<dyn CatalogService>;
pub type CampaignDetailServiceBox = Box<dyn CampaignDetailService>;
pub type PayoutProcessorBox = Box<dyn PayoutProcessor>;
