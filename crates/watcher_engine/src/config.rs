use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use watcher_core::{CycleSettings, Messages, DEFAULT_MESSAGE_LIMIT};

use crate::{FetchSettings, RetryPolicy, WebhookEndpoints};

/// Everything the watcher needs at startup.
///
/// Every section defaults, so a config file only has to name what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    pub search: SearchConfig,
    pub fetch: FetchConfig,
    pub webhooks: WebhookEndpoints,
    pub retry: RetryConfig,
    pub messages: MessagesConfig,
    pub store: StoreConfig,
    pub schedule: ScheduleConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub search_url: String,
    /// Base that relative listing hrefs are resolved against.
    pub site_origin: String,
    pub page_param: String,
    /// Substring an href must contain to count as a listing.
    pub listing_path_marker: String,
    pub max_pages: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            search_url: "https://www.sreality.cz/hledani/prodej/byty/praha-6?velikost=1%2B1%2C2%2B1%2C2%2Bkk&vlastnictvi=osobni&cena-do=7300000".to_string(),
            site_origin: "https://www.sreality.cz".to_string(),
            page_param: "strana".to_string(),
            listing_path_marker: "/detail/prodej/byt".to_string(),
            max_pages: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub user_agent: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub redirect_limit: usize,
    pub max_bytes: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        let defaults = FetchSettings::default();
        Self {
            user_agent: defaults.user_agent,
            connect_timeout_secs: defaults.connect_timeout.as_secs(),
            request_timeout_secs: defaults.request_timeout.as_secs(),
            redirect_limit: defaults.redirect_limit,
            max_bytes: defaults.max_bytes,
        }
    }
}

impl FetchConfig {
    pub fn settings(&self) -> FetchSettings {
        FetchSettings {
            user_agent: self.user_agent.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            redirect_limit: self.redirect_limit,
            max_bytes: self.max_bytes,
            ..FetchSettings::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff_ms: 1_000,
            max_backoff_ms: 30_000,
        }
    }
}

impl RetryConfig {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            initial_backoff: Duration::from_millis(self.initial_backoff_ms),
            max_backoff: Duration::from_millis(self.max_backoff_ms),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagesConfig {
    pub startup: String,
    pub new_header: String,
    pub removed_header: String,
    /// Supports `{count}` and `{started_at}`.
    pub status_template: String,
    pub message_limit: usize,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        let messages = Messages::default();
        Self {
            startup: messages.startup,
            new_header: messages.new_header,
            removed_header: messages.removed_header,
            status_template: messages.status_template,
            message_limit: DEFAULT_MESSAGE_LIMIT,
        }
    }
}

impl MessagesConfig {
    pub fn messages(&self) -> Messages {
        Messages {
            startup: self.startup.clone(),
            new_header: self.new_header.clone(),
            removed_header: self.removed_header.clone(),
            status_template: self.status_template.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub data_file: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("byty.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    pub poll_interval_secs: u64,
    pub removal_grace_cycles: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 1800,
            removal_grace_cycles: 1,
        }
    }
}

impl WatchConfig {
    pub fn cycle_settings(&self) -> CycleSettings {
        CycleSettings {
            max_pages: self.search.max_pages,
            removal_grace_cycles: self.schedule.removal_grace_cycles,
            message_limit: self.messages.message_limit,
            messages: self.messages.messages(),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.schedule.poll_interval_secs)
    }
}
