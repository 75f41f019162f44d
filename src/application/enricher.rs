use crate::domain::offer::Offer;
use crate::domain::ports::CampaignDetailServiceBox;
use crate::domain::session::Session;
use tracing::{debug, warn};

/// Merges per-offer campaign details into catalog offers.
pub struct DetailEnricher {
    details: CampaignDetailServiceBox,
}

impl DetailEnricher {
    pub fn new(details: CampaignDetailServiceBox) -> Self {
        Self { details }
    }

    /// Enriches every offer in list order, one lookup per offer.
    ///
    /// A failed lookup or an empty campaign list leaves that offer as the
    /// catalog returned it. Only the first campaign is merged.
    pub async fn enrich(&self, offers: &mut [Offer], session: &Session) {
        for offer in offers.iter_mut() {
            let campaigns = match self
                .details
                .fetch_campaign_details(session, &offer.token)
                .await
            {
                Ok(campaigns) => campaigns,
                Err(e) => {
                    warn!(app_name = %offer.app_name, token = %offer.token, error = %e, "Error fetching campaign details");
                    continue;
                }
            };

            let Some(campaign) = campaigns.first() else {
                debug!(app_name = %offer.app_name, "No campaign details for offer");
                continue;
            };
            if campaigns.len() > 1 {
                warn!(
                    app_name = %offer.app_name,
                    campaigns = campaigns.len(),
                    "Multiple campaigns for one offer token, using the first"
                );
            }
            offer.apply_campaign(campaign);
        }
    }
}
