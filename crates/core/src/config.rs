use std::env;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_u64(key: &str, default: u64) -> u64 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_usize(key: &str, default: usize) -> usize {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

/// Organisms polled when `SEQWATCH_ORGANISMS` is not set.
pub const DEFAULT_ORGANISMS: &[&str] = &[
    "ebola-sudan",
    "ebola-zaire",
    "mpox",
    "west-nile",
    "cchf",
    "rsv-a",
    "rsv-b",
    "hmpv",
];

/// Fields requested from the data API when `SEQWATCH_FIELDS` is not set.
pub const DEFAULT_FIELDS: &[&str] = &[
    "accessionVersion",
    "version",
    "authorAffiliations",
    "dataUseTerms",
    "geoLocCountry",
    "groupName",
    "groupId",
    "sampleCollectionDate",
    "releasedAtTimestamp",
    "isRevocation",
];

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Organism keys polled in order.
    pub organisms: Vec<String>,
    /// Base URL of the sequence data API.
    pub api_base_url: String,
    /// Base URL of the web search UI used for deep-link filter URLs.
    pub search_base_url: String,
    /// Webhook endpoint receiving notifications. The URL embeds a
    /// secret, so it is never logged.
    pub webhook_url: Option<String>,
    /// Directory holding the per-organism notified files.
    pub state_dir: PathBuf,
    /// Maximum number of record dumps included in a message body.
    pub message_cap: usize,
    /// Pause after each webhook send, in seconds.
    pub delay_secs: u64,
    /// Fields requested from the data API.
    pub fields: Vec<String>,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        let organisms = env_opt("SEQWATCH_ORGANISMS")
            .map(|v| split_csv(&v))
            .unwrap_or_else(|| DEFAULT_ORGANISMS.iter().map(|s| s.to_string()).collect());
        let fields = env_opt("SEQWATCH_FIELDS")
            .map(|v| split_csv(&v))
            .unwrap_or_else(|| DEFAULT_FIELDS.iter().map(|s| s.to_string()).collect());

        Self {
            organisms,
            api_base_url: env_or("SEQWATCH_API_BASE_URL", "https://lapis.pathoplexus.org"),
            search_base_url: env_or("SEQWATCH_SEARCH_BASE_URL", "https://pathoplexus.org"),
            webhook_url: env_opt("SEQWATCH_WEBHOOK_URL"),
            state_dir: PathBuf::from(env_or("SEQWATCH_STATE_DIR", "already_notified")),
            message_cap: env_usize("SEQWATCH_MESSAGE_CAP", 10),
            delay_secs: env_u64("SEQWATCH_DELAY_SECS", 5),
            fields,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.webhook_url.is_some()
    }

    /// Comma-joined field list, as sent in the `fields` query parameter.
    pub fn fields_param(&self) -> String {
        self.fields.join(",")
    }

    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  organisms:  {}", self.organisms.join(", "));
        tracing::info!("  api:        {}", self.api_base_url);
        tracing::info!("  search ui:  {}", self.search_base_url);
        tracing::info!(
            "  webhook:    {}",
            if self.webhook_url.is_some() { "(configured)" } else { "(missing)" }
        );
        tracing::info!("  state dir:  {}", self.state_dir.display());
        tracing::info!(
            "  message cap={}, delay={}s, fields={}",
            self.message_cap,
            self.delay_secs,
            self.fields.len()
        );
    }
}

fn split_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}
