use super::lenient::null_as_default;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Extension {
    #[serde(rename = "SubID1", deserialize_with = "null_as_default")]
    pub sub_id1: String,
    #[serde(rename = "SubID2", deserialize_with = "null_as_default")]
    pub sub_id2: String,
    #[serde(rename = "SubID3", deserialize_with = "null_as_default")]
    pub sub_id3: String,
    #[serde(rename = "SubID4", deserialize_with = "null_as_default")]
    pub sub_id4: String,
    #[serde(rename = "SubID5", deserialize_with = "null_as_default")]
    pub sub_id5: String,
}

/// Profile payload sent to the session service when bootstrapping.
///
/// Everything except `external_user_id` is fixed for the life of the
/// process. The identifier is stamped freshly on each bootstrap attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionProfile {
    #[serde(rename = "ExternalUserID")]
    pub external_user_id: String,
    #[serde(rename = "ProvidedDoB")]
    pub provided_dob: String,
    #[serde(rename = "ProvidedGender")]
    pub provided_gender: String,
    #[serde(rename = "UserAgent")]
    pub user_agent: String,
    #[serde(rename = "ClientIP")]
    pub client_ip: String,
    #[serde(rename = "DeviceID")]
    pub device_id: String,
    #[serde(rename = "Placement")]
    pub placement: String,
    #[serde(rename = "UANetwork")]
    pub ua_network: String,
    #[serde(rename = "UAChannel")]
    pub ua_channel: String,
    #[serde(rename = "UASubPublisherEncrypted")]
    pub ua_sub_publisher_encrypted: String,
    #[serde(rename = "TOSAccepted")]
    pub tos_accepted: bool,
    #[serde(rename = "Extension")]
    pub extension: Extension,
}

impl Default for SessionProfile {
    fn default() -> Self {
        Self {
            external_user_id: String::new(),
            provided_dob: "1992-12-21T18:21:25.000Z".to_string(),
            provided_gender: "female".to_string(),
            user_agent: "Mozilla/5.0 (iPhone; CPU iPhone OS 16_4 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.4 Mobile/15E148 Safari/604.1".to_string(),
            client_ip: "62.224.63.244".to_string(),
            device_id: "f365c07d-c0e0-4cb7-a540-62e467d63d4b".to_string(),
            placement: "home_screen_1".to_string(),
            ua_network: "ironsource1".to_string(),
            ua_channel: "video1".to_string(),
            ua_sub_publisher_encrypted: "58e468e6f77c2372f0a7891a6254bd4851b7df7b1".to_string(),
            tos_accepted: true,
            extension: Extension {
                sub_id1: "Ident1".to_string(),
                sub_id2: "Ident2".to_string(),
                sub_id3: "Ident3".to_string(),
                sub_id4: "Ident4".to_string(),
                sub_id5: "Ident5".to_string(),
            },
        }
    }
}

impl SessionProfile {
    /// Returns a copy of this profile carrying the given external user id.
    pub fn for_user(&self, external_user_id: impl Into<String>) -> Self {
        Self {
            external_user_id: external_user_id.into(),
            ..self.clone()
        }
    }
}

/// Credentials and echoed profile returned by the session service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    #[serde(rename = "ExternalUserID", deserialize_with = "null_as_default")]
    pub external_user_id: String,
    #[serde(rename = "AppHash", deserialize_with = "null_as_default")]
    pub app_hash: String,
    #[serde(rename = "UserUUID", deserialize_with = "null_as_default")]
    pub user_uuid: String,
    #[serde(rename = "ProvidedGender", deserialize_with = "null_as_default")]
    pub provided_gender: String,
    #[serde(rename = "ProvidedDoB", deserialize_with = "null_as_default")]
    pub provided_dob: String,
    #[serde(rename = "UserAgent", deserialize_with = "null_as_default")]
    pub user_agent: String,
    #[serde(rename = "ClientIP", deserialize_with = "null_as_default")]
    pub client_ip: String,
    #[serde(rename = "DeviceID", deserialize_with = "null_as_default")]
    pub device_id: String,
    #[serde(rename = "Placement", deserialize_with = "null_as_default")]
    pub placement: String,
    #[serde(rename = "UANetwork", deserialize_with = "null_as_default")]
    pub ua_network: String,
    #[serde(rename = "UAChannel", deserialize_with = "null_as_default")]
    pub ua_channel: String,
    #[serde(rename = "UASubPublisherEncrypted", deserialize_with = "null_as_default")]
    pub ua_sub_publisher_encrypted: String,
    #[serde(rename = "TOSAccepted", deserialize_with = "null_as_default")]
    pub tos_accepted: bool,
    #[serde(rename = "DeviceName", deserialize_with = "null_as_default")]
    pub device_name: String,
    #[serde(rename = "Extension", deserialize_with = "null_as_default")]
    pub extension: Extension,
    #[serde(rename = "IsRelayEnabled", deserialize_with = "null_as_default")]
    pub is_relay_enabled: bool,
    #[serde(rename = "ATTLimit", deserialize_with = "null_as_default")]
    pub att_limit: i64,
    #[serde(rename = "ATTShown", deserialize_with = "null_as_default")]
    pub att_shown: i64,
}
