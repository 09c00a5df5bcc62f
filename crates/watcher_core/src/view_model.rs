use crate::{CycleReport, Phase};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WatchViewModel {
    pub phase: Phase,
    pub cycles_completed: u64,
    /// Listings in the snapshot the running (or last) cycle diffs against.
    pub known_count: usize,
    pub last_report: Option<CycleReport>,
}
