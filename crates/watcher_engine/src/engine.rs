use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use url::Url;
use watcher_core::{update, AppState, CycleReport, CycleSettings, Effect, Msg};
use watcher_logging::{watch_error, watch_info, watch_warn};

use crate::{
    Clock, FetchError, HttpPageSource, JsonFileStore, ListingLinkExtractor, LocalClock, Notifier, NotifyError,
    PageSource, ReqwestFetcher, RetryPolicy, SearchTarget, Sleeper, SnapshotStore, TokioSleeper,
    WatchConfig, WebhookNotifier,
};

#[derive(Debug, Error)]
pub enum EngineBuildError {
    #[error("invalid {field} url {value:?}: {source}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        source: url::ParseError,
    },
    #[error("page fetcher: {0}")]
    Fetcher(#[from] FetchError),
    #[error(transparent)]
    Notifier(#[from] NotifyError),
}

/// The IO collaborators an engine drives.
pub struct EngineParts {
    pub pages: Box<dyn PageSource>,
    pub notifier: Box<dyn Notifier>,
    pub store: Box<dyn SnapshotStore>,
    pub sleeper: Arc<dyn Sleeper>,
    pub clock: Box<dyn Clock>,
}

/// Runs the core state machine, executing its effects one after another.
pub struct Engine {
    state: AppState,
    parts: EngineParts,
    retry: RetryPolicy,
    poll_interval: Duration,
}

impl Engine {
    pub fn new(
        settings: CycleSettings,
        retry: RetryPolicy,
        poll_interval: Duration,
        parts: EngineParts,
    ) -> Self {
        Self {
            state: AppState::with_settings(settings),
            parts,
            retry,
            poll_interval,
        }
    }

    /// Wires the HTTP page source, webhook notifier and JSON store described by `config`.
    pub fn from_config(config: &WatchConfig) -> Result<Self, EngineBuildError> {
        let search_url = parse_url("search", &config.search.search_url)?;
        let origin = parse_url("site origin", &config.search.site_origin)?;

        let fetch_settings = config.fetch.settings();
        let request_timeout = fetch_settings.request_timeout;
        let pages = HttpPageSource::new(
            Box::new(ReqwestFetcher::new(fetch_settings)?),
            SearchTarget::new(search_url, config.search.page_param.clone()),
            ListingLinkExtractor::new(origin, config.search.listing_path_marker.clone()),
        );
        let notifier = WebhookNotifier::new(config.webhooks.clone(), request_timeout)?;

        for (name, url) in [
            ("new listings", &config.webhooks.new_listings),
            ("removed listings", &config.webhooks.removed_listings),
            ("status", &config.webhooks.status),
        ] {
            if url.is_none() {
                watch_warn!("No {} webhook configured; those messages will be skipped", name);
            }
        }

        let parts = EngineParts {
            pages: Box::new(pages),
            notifier: Box::new(notifier),
            store: Box::new(JsonFileStore::new(config.store.data_file.clone())),
            sleeper: Arc::new(TokioSleeper),
            clock: Box::new(LocalClock),
        };

        Ok(Self::new(
            config.cycle_settings(),
            config.retry.policy(),
            config.poll_interval(),
            parts,
        ))
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Sends the startup announcement.
    pub async fn launch(&mut self) {
        self.dispatch(Msg::Launched).await;
    }

    /// One load, scrape, diff, notify, save and status pass. `None` if no cycle could start.
    pub async fn run_cycle(&mut self) -> Option<CycleReport> {
        let started_at = self.parts.clock.timestamp();
        watcher_logging::set_cycle(self.state.view().cycles_completed + 1);
        watch_info!("Starting cycle at {}", started_at);
        self.dispatch(Msg::CycleStarted { started_at }).await
    }

    /// One cycle followed by the poll-interval sleep.
    pub async fn run_once(&mut self) -> Option<CycleReport> {
        let report = self.run_cycle().await;
        if report.is_none() {
            watch_warn!("Cycle did not start in phase {:?}", self.state.phase());
        }
        watch_info!("Sleeping for {:?}", self.poll_interval);
        self.parts.sleeper.sleep(self.poll_interval).await;
        report
    }

    /// Announce, then cycle and sleep until the process is stopped.
    pub async fn run_forever(mut self) {
        self.launch().await;
        loop {
            self.run_once().await;
        }
    }

    async fn dispatch(&mut self, msg: Msg) -> Option<CycleReport> {
        let mut inbox = VecDeque::from([msg]);
        let mut report = None;

        while let Some(msg) = inbox.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (next, effects) = update(state, msg);
            self.state = next;

            for effect in effects {
                match effect {
                    Effect::CycleFinished(finished) => {
                        log_report(&finished);
                        report = Some(finished);
                    }
                    other => {
                        if let Some(reply) = self.execute(other).await {
                            inbox.push_back(reply);
                        }
                    }
                }
            }
        }

        report
    }

    async fn execute(&self, effect: Effect) -> Option<Msg> {
        match effect {
            Effect::LoadSnapshot => Some(Msg::SnapshotLoaded(self.parts.store.load())),
            Effect::FetchPage { page } => {
                watch_info!("Processing page {}...", page);
                let pages = &self.parts.pages;
                let label = format!("page {page}");
                let result = self
                    .retry
                    .run(self.parts.sleeper.as_ref(), &label, || pages.fetch_page(page))
                    .await;
                let result = match result {
                    Ok(links) if links.is_empty() => {
                        watch_info!("Page {} does not contain any listings, stopping", page);
                        Ok(links)
                    }
                    Ok(links) => {
                        watch_info!("Page {} yielded {} listings", page, links.len());
                        Ok(links)
                    }
                    Err(err) => {
                        watch_error!("Failed to load page {}: {}", page, err);
                        Err(err.to_string())
                    }
                };
                Some(Msg::PageFetched { page, result })
            }
            Effect::Notify { channel, text } => {
                let notifier = &self.parts.notifier;
                let label = format!("{channel} webhook");
                let result = self
                    .retry
                    .run(self.parts.sleeper.as_ref(), &label, || {
                        notifier.send(channel, &text)
                    })
                    .await;
                match result {
                    Ok(()) => watch_info!("Message sent to the {} webhook", channel),
                    Err(NotifyError::ChannelDisabled(_)) => {
                        watch_info!("Skipped {} message, channel disabled: {}", channel, text)
                    }
                    Err(err) => watch_error!("Error sending {} message: {}", channel, err),
                }
                None
            }
            Effect::SaveSnapshot(snapshot) => {
                match self.parts.store.save(&snapshot) {
                    Ok(()) => watch_info!("Snapshot saved ({} listings)", snapshot.listings.len()),
                    Err(err) => watch_error!("Error saving snapshot: {}", err),
                }
                None
            }
            Effect::CycleFinished(_) => None,
        }
    }
}

fn parse_url(field: &'static str, value: &str) -> Result<Url, EngineBuildError> {
    Url::parse(value).map_err(|source| EngineBuildError::InvalidUrl {
        field,
        value: value.to_string(),
        source,
    })
}

fn log_report(report: &CycleReport) {
    if !report.is_complete() {
        watch_warn!(
            "Scrape stopped early ({:?}) after {} pages; nothing was pruned",
            report.stop,
            report.pages_fetched
        );
    }
    watch_info!(
        "Total listings found: {} ({} new, {} removed)",
        report.total_count,
        report.added,
        report.removed
    );
}
