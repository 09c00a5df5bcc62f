#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Process came up; triggers the startup announcement.
    Launched,
    /// Begin a scrape cycle. `started_at` is the local timestamp shown in the status line.
    CycleStarted { started_at: String },
    /// Store finished reading the previous snapshot.
    SnapshotLoaded(crate::LoadOutcome),
    /// A result page was fetched. `Err` carries the failure text after retries.
    PageFetched {
        page: u32,
        result: Result<Vec<String>, String>,
    },
}
