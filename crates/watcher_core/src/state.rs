use crate::view_model::WatchViewModel;
use crate::{ListingSet, Messages, Snapshot, DEFAULT_MESSAGE_LIMIT};

/// Knobs the state machine needs; IO settings live in the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleSettings {
    /// Pagination stops after this many pages even if the site keeps answering.
    pub max_pages: u32,
    /// Complete scrapes a listing may be missing from before it counts as removed.
    pub removal_grace_cycles: u32,
    pub message_limit: usize,
    pub messages: Messages,
}

impl Default for CycleSettings {
    fn default() -> Self {
        Self {
            max_pages: 100,
            removal_grace_cycles: 1,
            message_limit: DEFAULT_MESSAGE_LIMIT,
            messages: Messages::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Announcement not sent yet.
    #[default]
    Startup,
    /// Between cycles.
    Idle,
    Loading,
    Scraping { page: u32 },
}

/// Why pagination ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrapeStop {
    EmptyPage,
    FetchFailed,
    PageLimit,
}

/// Summary of one finished cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub pages_fetched: u32,
    pub total_count: usize,
    pub added: usize,
    pub removed: usize,
    pub stop: ScrapeStop,
}

impl CycleReport {
    /// Only a scrape that ran into an empty page saw the whole result set.
    pub fn is_complete(&self) -> bool {
        self.stop == ScrapeStop::EmptyPage
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    settings: CycleSettings,
    phase: Phase,
    started_at: String,
    previous: Snapshot,
    scraped: ListingSet,
    cycles_completed: u64,
    last_report: Option<CycleReport>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: CycleSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn view(&self) -> WatchViewModel {
        WatchViewModel {
            phase: self.phase,
            cycles_completed: self.cycles_completed,
            known_count: self.previous.listings.len(),
            last_report: self.last_report.clone(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn settings(&self) -> &CycleSettings {
        &self.settings
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub(crate) fn begin_cycle(&mut self, started_at: String) {
        self.started_at = started_at;
        self.scraped.clear();
        self.phase = Phase::Loading;
    }

    pub(crate) fn set_previous(&mut self, previous: Snapshot) {
        self.previous = previous;
    }

    pub(crate) fn extend_scraped(&mut self, links: Vec<String>) {
        self.scraped.extend(links);
    }

    pub(crate) fn previous(&self) -> &Snapshot {
        &self.previous
    }

    pub(crate) fn scraped(&self) -> &ListingSet {
        &self.scraped
    }

    pub(crate) fn started_at(&self) -> &str {
        &self.started_at
    }

    pub(crate) fn finish_cycle(&mut self, next: Snapshot, report: CycleReport) {
        self.previous = next;
        self.phase = Phase::Idle;
        self.cycles_completed += 1;
        self.last_report = Some(report);
    }
}
