use std::fmt;

use crate::{CycleReport, Snapshot};

/// Webhook a message is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    NewListings,
    RemovedListings,
    Status,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::NewListings => write!(f, "new-listings"),
            Channel::RemovedListings => write!(f, "removed-listings"),
            Channel::Status => write!(f, "status"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Notify { channel: Channel, text: String },
    LoadSnapshot,
    FetchPage { page: u32 },
    SaveSnapshot(Snapshot),
    /// Last effect of a cycle; the runner sleeps after it.
    CycleFinished(CycleReport),
}
