//! Offer catalog and campaign detail records.
//!
//! Field names follow the upstream JSON exactly. Every record decodes
//! leniently: absent or `null` fields fall back to their defaults, and money
//! values outside the decimal range read as zero, so a sparse or odd catalog
//! entry is still a usable offer.

use super::lenient::{lenient_decimal, null_as_default};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppInfo {
    #[serde(rename = "ID", deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(rename = "Name", deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "BundleID", deserialize_with = "null_as_default")]
    pub bundle_id: String,
    #[serde(rename = "Category", deserialize_with = "null_as_default")]
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreativeUrls {
    #[serde(rename = "Portrait", deserialize_with = "null_as_default")]
    pub portrait: String,
    #[serde(rename = "Landscape", deserialize_with = "null_as_default")]
    pub landscape: String,
    #[serde(rename = "Icon", deserialize_with = "null_as_default")]
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardEvent {
    #[serde(rename = "Name", deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "Description", deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(rename = "Coins", deserialize_with = "null_as_default")]
    pub coins: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SequentialEvents {
    #[serde(rename = "TotalCoinsPossible", deserialize_with = "null_as_default")]
    pub total_coins_possible: i64,
    #[serde(rename = "Events", deserialize_with = "null_as_default")]
    pub events: Vec<RewardEvent>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvancePlus {
    #[serde(rename = "SequentialEvents", deserialize_with = "null_as_default")]
    pub sequential_events: SequentialEvents,
}

/// Reward schedule attached to a campaign.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EventConfigs {
    #[serde(rename = "AdvancePlus", deserialize_with = "null_as_default")]
    pub advance_plus: AdvancePlus,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CashbackConfig {
    #[serde(rename = "IsEnabled", deserialize_with = "null_as_default")]
    pub is_enabled: bool,
    #[serde(rename = "ExchangeRate", deserialize_with = "lenient_decimal")]
    pub exchange_rate: Decimal,
    #[serde(rename = "MaxLimitPerCampaignUSD", deserialize_with = "lenient_decimal")]
    pub max_limit_per_campaign_usd: Decimal,
}

/// A time-boxed boost on a campaign's rewards.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Promotion {
    #[serde(
        rename = "Name",
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub name: String,
    #[serde(
        rename = "Description",
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub description: String,
    #[serde(
        rename = "BoostFactor",
        deserialize_with = "null_as_default",
        skip_serializing_if = "is_zero"
    )]
    pub boost_factor: f32,
    #[serde(rename = "StartAt", skip_serializing_if = "Option::is_none")]
    pub start_at: Option<DateTime<Utc>>,
    #[serde(rename = "StopAt", skip_serializing_if = "Option::is_none")]
    pub stop_at: Option<DateTime<Utc>>,
}

fn is_zero(value: &f32) -> bool {
    *value == 0.0
}

/// Detail record returned for one offer token.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignDetail {
    #[serde(rename = "UUID", deserialize_with = "null_as_default")]
    pub uuid: String,
    #[serde(rename = "Type", deserialize_with = "null_as_default")]
    pub r#type: String,
    #[serde(rename = "Description", deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(rename = "PostInstallRewardCoins", deserialize_with = "null_as_default")]
    pub post_install_reward_coins: i64,
    #[serde(rename = "App", deserialize_with = "null_as_default")]
    pub app: AppInfo,
    #[serde(rename = "ImageURLs", deserialize_with = "null_as_default")]
    pub image_urls: CreativeUrls,
    #[serde(rename = "EventConfigs", deserialize_with = "null_as_default")]
    pub event_configs: EventConfigs,
    #[serde(rename = "CashbackSDKConfig", deserialize_with = "null_as_default")]
    pub cashback_config: CashbackConfig,
    #[serde(rename = "Promotion", skip_serializing_if = "Option::is_none")]
    pub promotion: Option<Promotion>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignList {
    #[serde(rename = "Campaigns", deserialize_with = "null_as_default")]
    pub campaigns: Vec<CampaignDetail>,
}

/// A monetizable action surfaced by the catalog.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Offer {
    #[serde(rename = "AppID", deserialize_with = "null_as_default")]
    pub app_id: String,
    #[serde(rename = "AppName", deserialize_with = "null_as_default")]
    pub app_name: String,
    #[serde(rename = "Coins", deserialize_with = "null_as_default")]
    pub coins: i64,
    #[serde(rename = "Token", deserialize_with = "null_as_default")]
    pub token: String,
    #[serde(rename = "IsRecommended", deserialize_with = "null_as_default")]
    pub is_recommended: bool,
    #[serde(rename = "ImageURLs", deserialize_with = "null_as_default")]
    pub image_urls: BTreeMap<String, String>,
    #[serde(rename = "VideoURLs", deserialize_with = "null_as_default")]
    pub video_urls: BTreeMap<String, String>,
    #[serde(rename = "App", deserialize_with = "null_as_default")]
    pub app: AppInfo,
    #[serde(rename = "Description", deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(rename = "EventConfigs", deserialize_with = "null_as_default")]
    pub event_configs: EventConfigs,
    #[serde(rename = "CashbackSDKConfig", deserialize_with = "null_as_default")]
    pub cashback_config: CashbackConfig,
    #[serde(rename = "Promotion", skip_serializing_if = "Option::is_none")]
    pub promotion: Option<Promotion>,
}

impl Offer {
    /// Copies campaign metadata onto the offer.
    ///
    /// App info, description, reward schedule, cashback and promotion are
    /// replaced. Catalog fields (id, name, coins, token, media) are kept.
    pub fn apply_campaign(&mut self, campaign: &CampaignDetail) {
        self.app = campaign.app.clone();
        self.description = campaign.description.clone();
        self.event_configs = campaign.event_configs.clone();
        self.cashback_config = campaign.cashback_config.clone();
        self.promotion = campaign.promotion.clone();
    }
}

/// Envelope used by the catalog and by the offer-list response.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OfferList {
    #[serde(rename = "Offers", deserialize_with = "null_as_default")]
    pub offers: Vec<Offer>,
}
