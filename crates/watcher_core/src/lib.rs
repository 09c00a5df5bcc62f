//! Watcher core: pure cycle state machine, listing diffs and digest formatting.
mod digest;
mod effect;
mod listing;
mod msg;
mod retention;
mod snapshot;
mod state;
mod update;
mod view_model;

pub use digest::{format_digest, format_status, Messages, DEFAULT_MESSAGE_LIMIT};
pub use effect::{Channel, Effect};
pub use listing::{ListingDiff, ListingSet};
pub use msg::Msg;
pub use retention::{apply_retention, RetentionOutcome};
pub use snapshot::{LoadOutcome, Snapshot};
pub use state::{AppState, CycleReport, CycleSettings, Phase, ScrapeStop};
pub use update::update;
pub use view_model::WatchViewModel;
