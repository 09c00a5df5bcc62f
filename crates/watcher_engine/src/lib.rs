//! Watcher engine: page fetching, snapshot storage, webhooks and the effect runner.
mod config;
mod decode;
mod engine;
mod fetch;
mod links;
mod notify;
mod persist;
mod retry;
mod search;
mod store;
mod time;
mod types;

pub use config::{
    FetchConfig, MessagesConfig, RetryConfig, ScheduleConfig, SearchConfig, StoreConfig,
    WatchConfig,
};
pub use decode::{decode_html, DecodedHtml};
pub use engine::{Engine, EngineBuildError, EngineParts};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use links::ListingLinkExtractor;
pub use notify::{Notifier, NotifyError, WebhookEndpoints, WebhookNotifier};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use retry::{RetryPolicy, Retryable};
pub use search::{HttpPageSource, PageSource, SearchTarget};
pub use store::{JsonFileStore, SnapshotStore, StoreError};
pub use time::{Clock, LocalClock, Sleeper, TokioSleeper};
pub use types::{FailureKind, FetchError, FetchedPage};
