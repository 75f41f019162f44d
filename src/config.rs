use crate::domain::session::SessionProfile;
use crate::error::Result;
use crate::infrastructure::upstream::UpstreamConfig;
use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Balance-gated proxy in front of an offer network
#[derive(Parser, Debug, Clone)]
#[command(name = "tokengate", author, version, about, long_about = None)]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "TOKENGATE_BIND", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// Secret callers must send in the Authorization header
    #[arg(long, env = "TOKENGATE_AUTH_TOKEN", hide_env_values = true)]
    pub auth_token: String,

    /// Token balance the ledger starts with
    #[arg(long, env = "TOKENGATE_INITIAL_BALANCE", default_value_t = 1000)]
    pub initial_balance: u64,

    /// Base URL of the offer network
    #[arg(long, env = "TOKENGATE_UPSTREAM_URL", default_value = "https://sb2.mainsb2.com")]
    pub upstream_url: String,

    /// Publisher SDK hash used to bootstrap the session
    #[arg(long, env = "TOKENGATE_SDK_HASH", hide_env_values = true)]
    pub sdk_hash: String,

    /// API key for catalog reads. Defaults to the auth token.
    #[arg(long, env = "TOKENGATE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Inspection token sent with catalog reads
    #[arg(long, env = "TOKENGATE_INSPECT_TOKEN", hide_env_values = true)]
    pub inspect_token: Option<String>,

    /// Country the catalog is inspected from
    #[arg(long, env = "TOKENGATE_INSPECT_COUNTRY", default_value = "DE")]
    pub inspect_country: String,

    /// Timeout for each outbound call, in seconds
    #[arg(long, env = "TOKENGATE_REQUEST_TIMEOUT_SECS", default_value_t = 10)]
    pub request_timeout_secs: u64,

    /// Pause after a successful session bootstrap, in milliseconds
    #[arg(long, env = "TOKENGATE_SETTLE_DELAY_MS", default_value_t = 2000)]
    pub settle_delay_ms: u64,

    /// Retry a failed bootstrap after this many seconds. Unset keeps the failure.
    #[arg(long, env = "TOKENGATE_BOOTSTRAP_RETRY_SECS")]
    pub bootstrap_retry_secs: Option<u64>,

    /// JSON file overriding fields of the bootstrap profile
    #[arg(long, env = "TOKENGATE_PROFILE")]
    pub profile: Option<PathBuf>,

    /// Log level filter, overridden by RUST_LOG
    #[arg(long, env = "TOKENGATE_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    #[arg(long, env = "TOKENGATE_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

impl Config {
    pub fn upstream(&self) -> UpstreamConfig {
        UpstreamConfig {
            base_url: self.upstream_url.clone(),
            sdk_hash: self.sdk_hash.clone(),
            api_key: self
                .api_key
                .clone()
                .unwrap_or_else(|| self.auth_token.clone()),
            inspect_token: self.inspect_token.clone(),
            inspect_country: self.inspect_country.clone(),
            timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn bootstrap_retry(&self) -> Option<Duration> {
        self.bootstrap_retry_secs.map(Duration::from_secs)
    }

    /// Loads the bootstrap profile, applying the override file when given.
    pub fn session_profile(&self) -> Result<SessionProfile> {
        match &self.profile {
            Some(path) => {
                let raw = std::fs::read_to_string(path)?;
                Ok(serde_json::from_str(&raw)?)
            }
            None => Ok(SessionProfile::default()),
        }
    }
}
