use crate::application::bootstrap::SessionBootstrapper;
use crate::application::enricher::DetailEnricher;
use crate::domain::ledger::{Cost, DebitOutcome, Ledger};
use crate::domain::offer::Offer;
use crate::domain::payout::{PayoutReceipt, PayoutRequest};
use crate::domain::ports::{CatalogServiceBox, PayoutProcessorBox};
use crate::error::{GateError, Result};
use std::sync::Arc;
use tracing::{error, info};

/// Result of a successful balance check.
#[derive(Debug, Clone, PartialEq)]
pub enum BalanceCheck {
    /// The cost was debited; carries the remaining balance.
    Debited { tokens: u64 },
    /// The balance was too low; carries offers the caller can complete instead.
    Offers(Vec<Offer>),
}

/// Entry point for balance checks and payouts.
///
/// The ledger is only locked for the debit itself. Catalog and detail calls
/// on the fallback path run without holding it, so concurrent debits are not
/// held up behind slow upstream calls.
pub struct BalanceGate {
    auth_token: String,
    bootstrapper: SessionBootstrapper,
    ledger: Arc<Ledger>,
    catalog: CatalogServiceBox,
    enricher: DetailEnricher,
    payouts: PayoutProcessorBox,
}

impl BalanceGate {
    /// Creates a new `BalanceGate`.
    ///
    /// # Arguments
    ///
    /// * `auth_token` - The secret callers must present.
    /// * `bootstrapper` - Resolves the shared upstream session.
    /// * `ledger` - The token balance, shared with whoever constructed it.
    /// * `catalog` - Source of fallback offers.
    /// * `enricher` - Adds campaign details to fallback offers.
    /// * `payouts` - Receives payout notifications.
    pub fn new(
        auth_token: impl Into<String>,
        bootstrapper: SessionBootstrapper,
        ledger: Arc<Ledger>,
        catalog: CatalogServiceBox,
        enricher: DetailEnricher,
        payouts: PayoutProcessorBox,
    ) -> Self {
        Self {
            auth_token: auth_token.into(),
            bootstrapper,
            ledger,
            catalog,
            enricher,
            payouts,
        }
    }

    pub fn ledger(&self) -> &Arc<Ledger> {
        &self.ledger
    }

    /// Debits `raw_cost` tokens, or returns enriched offers when the balance
    /// cannot cover it.
    ///
    /// Steps run in a fixed order and stop at the first failure: credential,
    /// session, cost, debit, then the offer fallback.
    pub async fn check_balance(
        &self,
        credential: Option<&str>,
        raw_cost: Option<&str>,
    ) -> Result<BalanceCheck> {
        if credential != Some(self.auth_token.as_str()) {
            return Err(GateError::Unauthorized);
        }

        let session = self.bootstrapper.get_session().await?;
        let cost: Cost = raw_cost.unwrap_or_default().parse()?;

        match self.ledger.try_debit(cost).await {
            DebitOutcome::Debited(remaining) => {
                info!(%cost, remaining, "Processed request");
                return Ok(BalanceCheck::Debited { tokens: remaining });
            }
            DebitOutcome::Insufficient { balance } => {
                info!(%cost, balance, "Insufficient balance, fetching offers");
            }
        }

        let mut offers = self.catalog.fetch_offers(&session).await.map_err(|e| {
            error!(error = %e, "Failed fetching offers");
            match e {
                GateError::Fetch(reason) => GateError::Fetch(reason),
                other => GateError::Fetch(other.to_string()),
            }
        })?;
        self.enricher.enrich(&mut offers, &session).await;

        Ok(BalanceCheck::Offers(offers))
    }

    pub async fn submit_payout(&self, request: PayoutRequest) -> Result<PayoutReceipt> {
        let cost = Cost::try_from(request.cost)
            .map_err(|_| GateError::Payout(format!("invalid cost {}", request.cost)))?;
        self.payouts.process_payout(cost).await
    }
}
