//! Webhook notification channel.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use watcher_core::Channel;
use watcher_logging::watch_debug;

use crate::Retryable;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("no webhook configured for the {0} channel")]
    ChannelDisabled(Channel),
    #[error("failed to build webhook client: {0}")]
    Client(String),
    #[error("failed to encode webhook payload: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("webhook request failed: {0}")]
    Request(String),
    #[error("webhook answered {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
}

impl Retryable for NotifyError {
    fn is_retryable(&self) -> bool {
        match self {
            NotifyError::Request(_) => true,
            NotifyError::UnexpectedStatus { status, .. } => *status == 429 || *status >= 500,
            NotifyError::ChannelDisabled(_) | NotifyError::Client(_) | NotifyError::Encode(_) => {
                false
            }
        }
    }
}

/// Delivers plain-text messages to a channel.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, channel: Channel, text: &str) -> Result<(), NotifyError>;
}

/// Webhook URL per channel. A missing URL disables that channel.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookEndpoints {
    pub new_listings: Option<String>,
    pub removed_listings: Option<String>,
    pub status: Option<String>,
}

impl WebhookEndpoints {
    pub fn url_for(&self, channel: Channel) -> Option<&str> {
        match channel {
            Channel::NewListings => self.new_listings.as_deref(),
            Channel::RemovedListings => self.removed_listings.as_deref(),
            Channel::Status => self.status.as_deref(),
        }
    }
}

#[derive(Serialize)]
struct WebhookPayload<'a> {
    content: &'a str,
}

/// Discord-style webhook: JSON `{"content": ...}`, answered with 204 No Content.
pub struct WebhookNotifier {
    endpoints: WebhookEndpoints,
    client: reqwest::Client,
}

impl WebhookNotifier {
    pub fn new(endpoints: WebhookEndpoints, request_timeout: Duration) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|err| NotifyError::Client(err.to_string()))?;
        Ok(Self { endpoints, client })
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn send(&self, channel: Channel, text: &str) -> Result<(), NotifyError> {
        let url = self
            .endpoints
            .url_for(channel)
            .ok_or(NotifyError::ChannelDisabled(channel))?;

        let body = serde_json::to_vec(&WebhookPayload { content: text })?;

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|err| NotifyError::Request(err.to_string()))?;

        let status = response.status();
        if status != StatusCode::NO_CONTENT {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "(no body)".to_string());
            return Err(NotifyError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        watch_debug!("Message delivered to the {} webhook", channel);
        Ok(())
    }
}
